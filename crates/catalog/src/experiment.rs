use serde::Serialize;
use shared::domain::{ActionId, ContentTag, ExperimentId, Quiz, ReagentId};

/// One stage of a guided experiment. Ordinals start at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentStep {
    pub ordinal: usize,
    /// Ordinal that must be complete first; `None` for the opening step.
    pub requires: Option<usize>,
    pub action: ActionId,
    pub label: String,
    pub content: ContentTag,
    /// Cumulative progress once this step is complete.
    pub progress_percent: f64,
}

impl ExperimentStep {
    /// Builds a strictly linear sequence from `(action, label, content)` triples.
    pub fn sequence(stages: Vec<(ActionId, String, ContentTag)>) -> Vec<ExperimentStep> {
        let total = stages.len();
        stages
            .into_iter()
            .enumerate()
            .map(|(idx, (action, label, content))| {
                let ordinal = idx + 1;
                ExperimentStep {
                    ordinal,
                    requires: (idx > 0).then_some(idx),
                    action,
                    label,
                    content,
                    progress_percent: progress_percent(ordinal, total),
                }
            })
            .collect()
    }
}

pub fn progress_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentDefinition {
    pub id: ExperimentId,
    pub title: String,
    pub subject: String,
    pub storyline: String,
    pub materials: Vec<String>,
    pub instructions: Vec<String>,
    pub palette: Vec<ReagentId>,
    pub initial_content: ContentTag,
    pub steps: Vec<ExperimentStep>,
    pub result_text: String,
    pub quiz: Option<Quiz>,
}

impl ExperimentDefinition {
    pub fn has_mix_lab(&self) -> bool {
        !self.palette.is_empty()
    }

    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, ordinal: usize) -> Option<&ExperimentStep> {
        ordinal.checked_sub(1).and_then(|idx| self.steps.get(idx))
    }

    pub fn offers_reagent(&self, reagent_id: &ReagentId) -> bool {
        self.palette.contains(reagent_id)
    }
}
