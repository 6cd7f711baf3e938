//! Plain-text rendering of lab snapshots.

use std::fmt::Write as _;

use catalog::{ExperimentDefinition, LabCatalog};
use lab_core::{
    CompletedQuiz, GoalBoard, GuidedExperimentStepper, MathPuzzle, MixReaction, MixState,
    ParentSummary, PuzzleVerdict, QuizReview, ScreenEvent, StepTransition, StepperState,
};
use serde::Serialize;
use shared::domain::{Quiz, QuizVerdict, ReagentId};

fn reagent_name<'a>(catalog: &'a LabCatalog, id: &'a ReagentId) -> &'a str {
    catalog
        .reagent(id)
        .map(|reagent| reagent.name.as_str())
        .unwrap_or(id.as_str())
}

pub fn catalog_listing(catalog: &LabCatalog) -> String {
    let mut out = String::from("Experiments:\n");
    for experiment in catalog.experiments() {
        let mut kinds = Vec::new();
        if experiment.has_mix_lab() {
            kinds.push("mix lab");
        }
        if experiment.has_steps() {
            kinds.push("guided steps");
        }
        let _ = writeln!(
            out,
            "  {:<20} {} ({}) [{}]",
            experiment.id,
            experiment.title,
            experiment.subject,
            kinds.join(", ")
        );
    }
    out.push_str("Reagents:\n");
    for reagent in catalog.reagents() {
        let _ = writeln!(out, "  {:<20} {} ({})", reagent.id, reagent.name, reagent.color);
    }
    out
}

pub fn experiment_sheet(catalog: &LabCatalog, experiment: &ExperimentDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", experiment.title, experiment.subject);
    if !experiment.storyline.is_empty() {
        let _ = writeln!(out, "\n{}", experiment.storyline);
    }
    if !experiment.materials.is_empty() {
        let _ = writeln!(out, "\nMaterials:");
        for material in &experiment.materials {
            let _ = writeln!(out, "  - {material}");
        }
    }
    if !experiment.instructions.is_empty() {
        let _ = writeln!(out, "\nInstructions:");
        for (idx, line) in experiment.instructions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {line}", idx + 1);
        }
    }
    if experiment.has_steps() {
        let _ = writeln!(out, "\nSteps:");
        for step in &experiment.steps {
            let _ = writeln!(
                out,
                "  {}. {:<14} {} -> {} ({:.0}%)",
                step.ordinal, step.action, step.label, step.content, step.progress_percent
            );
        }
    }
    if experiment.has_mix_lab() {
        let names: Vec<&str> = experiment
            .palette
            .iter()
            .map(|id| reagent_name(catalog, id))
            .collect();
        let _ = writeln!(out, "\nOn the bench: {}", names.join(", "));
    }
    out
}

pub fn mix_state(catalog: &LabCatalog, state: &MixState) -> String {
    if state.is_empty() {
        return "Beaker: empty. Drop ingredients here!".to_string();
    }
    let names: Vec<&str> = state
        .reagents()
        .iter()
        .map(|id| reagent_name(catalog, id))
        .collect();
    let mut effects = vec![state.color().to_string()];
    if let Some(animation) = state.animation() {
        effects.push(format!("{animation:?}").to_ascii_lowercase());
    }
    if state.bubbles() {
        effects.push("bubbles".to_string());
    }

    let mut out = format!("Beaker: {} [{}]", names.join(" + "), effects.join(", "));
    if matches!(state.reaction(), MixReaction::Matched { .. }) {
        out.push_str("\nReaction complete! ");
    } else {
        out.push('\n');
    }
    out.push_str(state.result_text());
    if let Some(quiz) = state.quiz() {
        out.push('\n');
        out.push_str(&quiz_card("mix", quiz));
    }
    out
}

pub fn stepper_state(experiment: &ExperimentDefinition, state: &StepperState) -> String {
    let stepper = GuidedExperimentStepper::new(experiment);
    let mut out = format!(
        "Step {}/{} ({:.0}%) | contents: {}",
        state.current_step(),
        state.total_steps(),
        state.progress_percent(),
        state.content()
    );
    match stepper.next_action(state) {
        Some(next) => {
            let _ = write!(out, " | next: {next}");
        }
        None => {
            if let Some(text) = state.result_text() {
                let _ = write!(out, "\n{text}");
            }
            if let Some(quiz) = state.quiz() {
                out.push('\n');
                out.push_str(&quiz_card("experiment", quiz));
            }
        }
    }
    out
}

fn quiz_card(source: &str, quiz: &Quiz) -> String {
    let mut out = format!("Quiz ({source}): {}", quiz.question);
    for (idx, option) in quiz.options.iter().enumerate() {
        let _ = write!(out, "\n  {}. {option}", idx + 1);
    }
    out
}

pub fn screen_event(
    catalog: &LabCatalog,
    experiment: &ExperimentDefinition,
    event: &ScreenEvent,
) -> String {
    match event {
        ScreenEvent::MixUpdated { state, advisory } => match advisory {
            Some(advisory) => advisory.message(),
            None => mix_state(catalog, state),
        },
        ScreenEvent::StepperUpdated { state, transition } => match transition {
            StepTransition::Ignored { .. } => "Nothing happens. Try another step.".to_string(),
            _ => stepper_state(experiment, state),
        },
        ScreenEvent::QuizAnswered { verdict, .. } => match verdict {
            QuizVerdict::Correct => "🎉 Correct!".to_string(),
            QuizVerdict::Incorrect { correct_option } => {
                format!("❌ Not quite. The answer was option {}.", correct_option + 1)
            }
            QuizVerdict::InvalidChoice => "That option is not on the card.".to_string(),
        },
        ScreenEvent::Advisory(advisory) => advisory.message(),
    }
}

pub fn quiz_review(review: &QuizReview, subject: Option<&str>) -> String {
    let quizzes: Vec<&CompletedQuiz> = match subject {
        Some(subject) => review.by_subject(subject).collect(),
        None => review.quizzes().iter().collect(),
    };
    if quizzes.is_empty() {
        return "No completed quizzes.".to_string();
    }
    let mut out = String::new();
    for quiz in &quizzes {
        let _ = writeln!(
            out,
            "{} | {} / {} | {}/{} ({:.0}%) on {}",
            quiz.title,
            quiz.subject,
            quiz.chapter,
            quiz.score(),
            quiz.total(),
            quiz.percentage(),
            quiz.completed_at
        );
        for missed in quiz.missed() {
            let _ = writeln!(
                out,
                "  missed: {} (you chose {}, answer {})\n    {}",
                missed.question,
                missed.selected_answer().unwrap_or("-"),
                missed.correct_answer().unwrap_or("-"),
                missed.explanation
            );
        }
    }
    let _ = write!(out, "Average: {:.0}%", QuizReview::average_of(quizzes.iter().copied()));
    out
}

pub fn goal_board(board: &GoalBoard) -> String {
    let mut out = format!(
        "Daily goals: {}/{} ({:.0}%) | {} day streak!",
        board.completed_count(),
        board.goals().len(),
        board.progress_percent(),
        board.streak_days()
    );
    for goal in board.goals() {
        let mark = if goal.completed { "x" } else { " " };
        let _ = write!(out, "\n  [{mark}] {}. {}", goal.id, goal.title);
    }
    out
}

/// JSON payload for `lab goals --json`; ids that matched no goal travel with the board.
#[derive(Debug, Serialize)]
pub struct GoalsReport<'a> {
    pub board: &'a GoalBoard,
    pub unknown_ids: &'a [u32],
}

pub fn goal_board_json(board: &GoalBoard, unknown_ids: &[u32]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&GoalsReport { board, unknown_ids })
}

pub fn puzzle_card(puzzle: &MathPuzzle) -> String {
    format!("Solve: {}", puzzle.equation)
}

pub fn puzzle_verdict(answer: &str, verdict: PuzzleVerdict, next: &MathPuzzle) -> String {
    match verdict {
        PuzzleVerdict::Correct => format!("{} is correct! Next: {}", answer.trim(), next.equation),
        PuzzleVerdict::Incorrect => {
            format!("{} is not right, try again: {}", answer.trim(), next.equation)
        }
        PuzzleVerdict::Blank => format!("Enter a number for {}", next.equation),
    }
}

pub fn parent_summary(summary: &ParentSummary) -> String {
    let mut out = format!(
        "Quiz performance: {:.0}% | goals {}/{} ({:.0}%) | {} day streak",
        summary.quiz_performance,
        summary.goals_completed,
        summary.goals_total,
        summary.goal_progress,
        summary.streak_days
    );
    for subject in &summary.subjects {
        let _ = write!(
            out,
            "\n  {}: {:.0}% over {} quiz(zes)",
            subject.subject, subject.average_percentage, subject.quizzes
        );
    }
    for suggestion in &summary.suggestions {
        let _ = write!(out, "\n  * {suggestion}");
    }
    out
}
