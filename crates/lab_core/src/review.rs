//! Quiz review: completed quizzes with per-question answers and scores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const SAMPLE_REVIEW: &str = include_str!("../data/quiz_review.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub selected_option: usize,
    pub explanation: String,
}

impl ReviewQuestion {
    pub fn is_correct(&self) -> bool {
        self.selected_option == self.correct_option
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_option).map(String::as_str)
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.options.get(self.selected_option).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedQuiz {
    pub id: String,
    pub subject: String,
    pub chapter: String,
    pub title: String,
    pub completed_at: NaiveDate,
    pub questions: Vec<ReviewQuestion>,
}

impl CompletedQuiz {
    pub fn score(&self) -> usize {
        self.questions.iter().filter(|q| q.is_correct()).count()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn percentage(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.score() as f64 / self.total() as f64 * 100.0
    }

    pub fn missed(&self) -> impl Iterator<Item = &ReviewQuestion> {
        self.questions.iter().filter(|q| !q.is_correct())
    }
}

/// Completed quizzes, newest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuizReview {
    quizzes: Vec<CompletedQuiz>,
}

impl QuizReview {
    pub fn new(mut quizzes: Vec<CompletedQuiz>) -> Self {
        quizzes.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Self { quizzes }
    }

    pub fn sample() -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(SAMPLE_REVIEW)?))
    }

    pub fn quizzes(&self) -> &[CompletedQuiz] {
        &self.quizzes
    }

    pub fn find(&self, id: &str) -> Option<&CompletedQuiz> {
        self.quizzes.iter().find(|quiz| quiz.id == id)
    }

    pub fn by_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a CompletedQuiz> {
        self.quizzes
            .iter()
            .filter(move |quiz| quiz.subject.eq_ignore_ascii_case(subject))
    }

    /// Mean of per-quiz percentages; 0 when nothing has been completed.
    pub fn average_percentage(&self) -> f64 {
        Self::average_of(&self.quizzes)
    }

    pub fn average_of<'a>(quizzes: impl IntoIterator<Item = &'a CompletedQuiz>) -> f64 {
        let (count, sum) = quizzes
            .into_iter()
            .fold((0usize, 0.0f64), |(count, sum), quiz| {
                (count + 1, sum + quiz.percentage())
            });
        if count == 0 {
            return 0.0;
        }
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_review_is_sorted_newest_first() {
        let review = QuizReview::sample().expect("sample");
        let ids: Vec<&str> = review.quizzes().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["math-1", "physics-1"]);
    }

    #[test]
    fn scores_count_matching_answers() {
        let review = QuizReview::sample().expect("sample");
        let math = review.find("math-1").expect("math quiz");
        assert_eq!(math.score(), 1);
        assert_eq!(math.total(), 2);
        assert_eq!(math.percentage(), 50.0);

        let missed: Vec<_> = math.missed().collect();
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].selected_answer(), Some("3"));
        assert_eq!(missed[0].correct_answer(), Some("5"));
    }

    #[test]
    fn filters_by_subject_case_insensitively() {
        let review = QuizReview::sample().expect("sample");
        assert_eq!(review.by_subject("physics").count(), 1);
        assert_eq!(review.by_subject("Chemistry").count(), 0);
    }

    #[test]
    fn average_of_empty_review_is_zero() {
        assert_eq!(QuizReview::default().average_percentage(), 0.0);
        let review = QuizReview::sample().expect("sample");
        assert_eq!(review.average_percentage(), 75.0);
    }

    #[test]
    fn average_of_covers_only_the_given_quizzes() {
        let review = QuizReview::sample().expect("sample");
        assert_eq!(QuizReview::average_of(review.by_subject("mathematics")), 50.0);
        assert_eq!(QuizReview::average_of(review.by_subject("art")), 0.0);
    }
}
