//! Math puzzles: fill in the missing number, then move on to the next card.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathPuzzle {
    pub equation: String,
    pub answer: String,
}

impl MathPuzzle {
    pub fn new(equation: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            equation: equation.into(),
            answer: answer.into(),
        }
    }

    pub fn check(&self, answer: &str) -> PuzzleVerdict {
        let answer = answer.trim();
        if answer.is_empty() {
            PuzzleVerdict::Blank
        } else if answer == self.answer {
            PuzzleVerdict::Correct
        } else {
            PuzzleVerdict::Incorrect
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleVerdict {
    Correct,
    Incorrect,
    Blank,
}

/// A rotating deck. Only a correct answer moves to the next card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleDeck {
    puzzles: Vec<MathPuzzle>,
    current: usize,
    solved: usize,
}

impl PuzzleDeck {
    /// Returns `None` for an empty deck.
    pub fn new(puzzles: Vec<MathPuzzle>) -> Option<Self> {
        if puzzles.is_empty() {
            return None;
        }
        Some(Self {
            puzzles,
            current: 0,
            solved: 0,
        })
    }

    pub fn sample() -> Self {
        Self {
            puzzles: vec![
                MathPuzzle::new("2 + ? = 8", "6"),
                MathPuzzle::new("3 × ? = 15", "5"),
                MathPuzzle::new("? - 4 = 7", "11"),
                MathPuzzle::new("10 ÷ ? = 2", "5"),
            ],
            current: 0,
            solved: 0,
        }
    }

    pub fn current(&self) -> &MathPuzzle {
        &self.puzzles[self.current]
    }

    pub fn solved(&self) -> usize {
        self.solved
    }

    pub fn answer(&mut self, answer: &str) -> PuzzleVerdict {
        let verdict = self.current().check(answer);
        debug!(equation = %self.current().equation, verdict = ?verdict, "puzzle answered");
        if verdict == PuzzleVerdict::Correct {
            self.solved += 1;
            self.current = (self.current + 1) % self.puzzles.len();
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_compares_trimmed_answer() {
        let puzzle = MathPuzzle::new("2 + ? = 8", "6");
        assert_eq!(puzzle.check(" 6 "), PuzzleVerdict::Correct);
        assert_eq!(puzzle.check("5"), PuzzleVerdict::Incorrect);
        assert_eq!(puzzle.check("  "), PuzzleVerdict::Blank);
    }

    #[test]
    fn correct_answer_moves_to_next_puzzle() {
        let mut deck = PuzzleDeck::sample();
        assert_eq!(deck.current().equation, "2 + ? = 8");
        assert_eq!(deck.answer("6"), PuzzleVerdict::Correct);
        assert_eq!(deck.current().equation, "3 × ? = 15");
        assert_eq!(deck.solved(), 1);
    }

    #[test]
    fn wrong_answer_keeps_the_same_puzzle() {
        let mut deck = PuzzleDeck::sample();
        assert_eq!(deck.answer("7"), PuzzleVerdict::Incorrect);
        assert_eq!(deck.answer(""), PuzzleVerdict::Blank);
        assert_eq!(deck.current().equation, "2 + ? = 8");
        assert_eq!(deck.solved(), 0);
    }

    #[test]
    fn deck_wraps_after_last_puzzle() {
        let mut deck = PuzzleDeck::new(vec![
            MathPuzzle::new("1 + ? = 2", "1"),
            MathPuzzle::new("? + 1 = 3", "2"),
        ])
        .expect("deck");
        deck.answer("1");
        deck.answer("2");
        assert_eq!(deck.current().equation, "1 + ? = 2");
        assert_eq!(deck.solved(), 2);
        assert!(PuzzleDeck::new(Vec::new()).is_none());
    }
}
