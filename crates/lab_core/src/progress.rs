//! Parent-facing summary built from quiz results and the goal board.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{goals::GoalBoard, review::QuizReview};

const NEEDS_ATTENTION_BELOW: f64 = 50.0;
const STRONG_FROM: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectProgress {
    pub subject: String,
    pub quizzes: usize,
    pub average_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentSummary {
    pub subjects: Vec<SubjectProgress>,
    pub quiz_performance: f64,
    pub goals_completed: usize,
    pub goals_total: usize,
    pub goal_progress: f64,
    pub streak_days: u32,
    pub suggestions: Vec<String>,
}

impl ParentSummary {
    pub fn build(review: &QuizReview, board: &GoalBoard) -> Self {
        let mut by_subject: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for quiz in review.quizzes() {
            by_subject
                .entry(quiz.subject.as_str())
                .or_default()
                .push(quiz.percentage());
        }
        let subjects: Vec<SubjectProgress> = by_subject
            .into_iter()
            .map(|(subject, scores)| SubjectProgress {
                subject: subject.to_string(),
                quizzes: scores.len(),
                average_percentage: scores.iter().sum::<f64>() / scores.len() as f64,
            })
            .collect();

        let mut suggestions = Vec::new();
        for subject in &subjects {
            if subject.average_percentage < NEEDS_ATTENTION_BELOW {
                suggestions.push(format!(
                    "Encourage more time on {} - currently at {:.0}%",
                    subject.subject, subject.average_percentage
                ));
            } else if subject.average_percentage >= STRONG_FROM {
                suggestions.push(format!(
                    "Great progress in {}! Consider introducing advanced topics",
                    subject.subject
                ));
            }
        }
        if board.completed_count() < board.goals().len() {
            suggestions.push(format!(
                "{} daily goal(s) still open today",
                board.goals().len() - board.completed_count()
            ));
        }

        Self {
            subjects,
            quiz_performance: review.average_percentage(),
            goals_completed: board.completed_count(),
            goals_total: board.goals().len(),
            goal_progress: board.progress_percent(),
            streak_days: board.streak_days(),
            suggestions,
        }
    }
}
