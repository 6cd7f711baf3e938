//! Guided experiments: a strictly linear unlock sequence of actions.

use catalog::{progress_percent, ExperimentDefinition};
use serde::Serialize;
use shared::domain::{ActionId, ContentTag, Quiz};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepperState {
    current_step: usize,
    total_steps: usize,
    consumed: Vec<ActionId>,
    progress_percent: f64,
    content: ContentTag,
    result_text: Option<String>,
    quiz: Option<Quiz>,
}

impl StepperState {
    /// Ordinal of the last completed step; 0 before the first action.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Actions performed so far, in order.
    pub fn consumed(&self) -> &[ActionId] {
        &self.consumed
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn content(&self) -> &ContentTag {
        &self.content
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn quiz_available(&self) -> bool {
        self.quiz.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.current_step == self.total_steps
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepTransition {
    Advanced { ordinal: usize },
    Completed { ordinal: usize },
    /// Out-of-order or post-completion action; state is unchanged.
    Ignored { expected: Option<ActionId> },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepUpdate {
    pub state: StepperState,
    pub transition: StepTransition,
}

#[derive(Debug, Clone, Copy)]
pub struct GuidedExperimentStepper<'a> {
    experiment: &'a ExperimentDefinition,
}

impl<'a> GuidedExperimentStepper<'a> {
    pub fn new(experiment: &'a ExperimentDefinition) -> Self {
        Self { experiment }
    }

    pub fn start(&self) -> StepperState {
        StepperState {
            current_step: 0,
            total_steps: self.experiment.total_steps(),
            consumed: Vec::new(),
            progress_percent: 0.0,
            content: self.experiment.initial_content.clone(),
            result_text: None,
            quiz: None,
        }
    }

    /// The unique action that completes step `ordinal` (1-based).
    pub fn required_action(&self, ordinal: usize) -> Option<&'a ActionId> {
        self.experiment.step(ordinal).map(|step| &step.action)
    }

    pub fn next_action(&self, state: &StepperState) -> Option<&'a ActionId> {
        self.required_action(state.current_step + 1)
    }

    pub fn advance(&self, state: &StepperState, action: &ActionId) -> StepUpdate {
        let expected = self.next_action(state);
        let Some(step) = self
            .experiment
            .step(state.current_step + 1)
            .filter(|step| &step.action == action)
        else {
            debug!(
                experiment = %self.experiment.id,
                action = %action,
                expected = ?expected,
                "ignored out-of-order action"
            );
            return StepUpdate {
                state: state.clone(),
                transition: StepTransition::Ignored {
                    expected: expected.cloned(),
                },
            };
        };

        let mut next = state.clone();
        next.current_step = step.ordinal;
        next.consumed.push(step.action.clone());
        next.progress_percent = progress_percent(step.ordinal, next.total_steps);
        next.content = step.content.clone();

        let transition = if next.is_complete() {
            next.result_text = Some(self.experiment.result_text.clone());
            next.quiz = self.experiment.quiz.clone();
            info!(experiment = %self.experiment.id, "experiment complete");
            StepTransition::Completed {
                ordinal: step.ordinal,
            }
        } else {
            debug!(
                experiment = %self.experiment.id,
                step = step.ordinal,
                progress = next.progress_percent,
                "step advanced"
            );
            StepTransition::Advanced {
                ordinal: step.ordinal,
            }
        };

        StepUpdate {
            state: next,
            transition,
        }
    }

    pub fn reset(&self) -> StepperState {
        debug!(experiment = %self.experiment.id, "stepper reset");
        self.start()
    }
}

#[cfg(test)]
#[path = "tests/stepper_tests.rs"]
mod tests;
