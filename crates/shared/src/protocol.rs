use serde::{Deserialize, Serialize};

use crate::domain::{ActionId, ReagentId};

pub const CAPACITY_ADVISORY: &str = "Try mixing 2–3 ingredients for clear results.";

/// Which activity on an experiment screen a quiz answer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizSource {
    Mix,
    Experiment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    MixLab,
    Stepper,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LabRequest {
    AddReagent { reagent_id: ReagentId },
    ResetMix,
    AdvanceStep { action_id: ActionId },
    ResetStepper,
    AnswerQuiz { source: QuizSource, choice: usize },
}

impl LabRequest {
    pub fn name(&self) -> &'static str {
        match self {
            LabRequest::AddReagent { .. } => "add_reagent",
            LabRequest::ResetMix => "reset_mix",
            LabRequest::AdvanceStep { .. } => "advance_step",
            LabRequest::ResetStepper => "reset_stepper",
            LabRequest::AnswerQuiz { .. } => "answer_quiz",
        }
    }
}

/// User-facing feedback for a request that left state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Advisory {
    DuplicateReagent { reagent_id: ReagentId },
    CapacityReached { max: usize },
    UnknownReagent { reagent_id: ReagentId },
    ActivityUnavailable { activity: Activity },
    NoQuiz { source: QuizSource },
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::DuplicateReagent { reagent_id } => {
                format!("{reagent_id} is already in the beaker.")
            }
            Advisory::CapacityReached { .. } => CAPACITY_ADVISORY.to_string(),
            Advisory::UnknownReagent { reagent_id } => {
                format!("{reagent_id} is not on this lab bench.")
            }
            Advisory::ActivityUnavailable { activity } => match activity {
                Activity::MixLab => "This experiment has no mixing bench.".to_string(),
                Activity::Stepper => "This experiment has no guided steps.".to_string(),
            },
            Advisory::NoQuiz { .. } => "There is no quiz to answer yet.".to_string(),
        }
    }
}
