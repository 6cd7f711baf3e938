use shared::{
    domain::{ActionId, ExperimentId, ReagentId},
    error::{ErrorCode, LabError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate reagent id `{0}`")]
    DuplicateReagent(ReagentId),
    #[error("reaction #{index} references unknown reagent `{reagent_id}`")]
    UnknownRuleReagent { index: usize, reagent_id: ReagentId },
    #[error("reaction #{index} lists reagent `{reagent_id}` more than once")]
    RepeatedRuleReagent { index: usize, reagent_id: ReagentId },
    #[error("reaction #{index} must combine 1 to {max} reagents, got {actual}")]
    RuleArity {
        index: usize,
        max: usize,
        actual: usize,
    },
    #[error("reaction combination `{key}` is defined more than once")]
    DuplicateRule { key: String },
    #[error("duplicate experiment id `{0}`")]
    DuplicateExperiment(ExperimentId),
    #[error("experiment `{experiment}` palette references unknown reagent `{reagent_id}`")]
    UnknownPaletteReagent {
        experiment: ExperimentId,
        reagent_id: ReagentId,
    },
    #[error("experiment `{experiment}` repeats step action `{action}`")]
    DuplicateStepAction {
        experiment: ExperimentId,
        action: ActionId,
    },
    #[error("experiment `{0}` has neither a mixing palette nor guided steps")]
    EmptyExperiment(ExperimentId),
    #[error("quiz `{question}` marks option {correct_option} correct but offers {options} options")]
    QuizOutOfRange {
        question: String,
        correct_option: usize,
        options: usize,
    },
}

impl From<CatalogError> for LabError {
    fn from(value: CatalogError) -> Self {
        LabError::new(ErrorCode::Validation, value.to_string())
    }
}
