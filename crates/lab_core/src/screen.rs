//! Experiment screen: static content plus the live mix and stepper snapshots.

use catalog::{ExperimentDefinition, LabCatalog};
use serde::Serialize;
use shared::{
    domain::{ExperimentId, QuizVerdict},
    error::LabError,
    protocol::{Activity, Advisory, LabRequest, QuizSource},
};
use tracing::{debug, info};

use crate::{
    mix::{MixState, ReagentMixResolver},
    stepper::{GuidedExperimentStepper, StepTransition, StepperState},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ScreenEvent {
    MixUpdated {
        state: MixState,
        advisory: Option<Advisory>,
    },
    StepperUpdated {
        state: StepperState,
        transition: StepTransition,
    },
    QuizAnswered {
        source: QuizSource,
        verdict: QuizVerdict,
    },
    Advisory(Advisory),
}

struct MixBench<'a> {
    resolver: ReagentMixResolver<'a>,
    state: MixState,
}

struct StepBench<'a> {
    stepper: GuidedExperimentStepper<'a>,
    state: StepperState,
}

/// One open experiment. Owns its own state; nothing is shared between screens.
pub struct ExperimentScreen<'a> {
    experiment: &'a ExperimentDefinition,
    mix: Option<MixBench<'a>>,
    steps: Option<StepBench<'a>>,
}

impl<'a> ExperimentScreen<'a> {
    pub fn open(catalog: &'a LabCatalog, id: &ExperimentId) -> Result<Self, LabError> {
        let experiment = catalog
            .experiment(id)
            .ok_or_else(|| LabError::not_found(format!("unknown experiment `{id}`")))?;

        let mix = experiment.has_mix_lab().then(|| MixBench {
            resolver: ReagentMixResolver::for_experiment(catalog, experiment),
            state: MixState::empty(),
        });
        let steps = experiment.has_steps().then(|| {
            let stepper = GuidedExperimentStepper::new(experiment);
            StepBench {
                state: stepper.start(),
                stepper,
            }
        });

        info!(experiment = %id, "experiment screen opened");
        Ok(Self {
            experiment,
            mix,
            steps,
        })
    }

    pub fn experiment(&self) -> &'a ExperimentDefinition {
        self.experiment
    }

    pub fn title(&self) -> &str {
        &self.experiment.title
    }

    pub fn storyline(&self) -> &str {
        &self.experiment.storyline
    }

    pub fn materials(&self) -> &[String] {
        &self.experiment.materials
    }

    pub fn instructions(&self) -> &[String] {
        &self.experiment.instructions
    }

    pub fn mix_state(&self) -> Option<&MixState> {
        self.mix.as_ref().map(|bench| &bench.state)
    }

    pub fn stepper_state(&self) -> Option<&StepperState> {
        self.steps.as_ref().map(|bench| &bench.state)
    }

    pub fn handle(&mut self, request: LabRequest) -> ScreenEvent {
        debug!(
            experiment = %self.experiment.id,
            request = request.name(),
            "handling lab request"
        );
        match request {
            LabRequest::AddReagent { reagent_id } => match self.mix.as_mut() {
                Some(bench) => {
                    let update = bench.resolver.add_reagent(&bench.state, &reagent_id);
                    bench.state = update.state.clone();
                    ScreenEvent::MixUpdated {
                        state: update.state,
                        advisory: update.advisory,
                    }
                }
                None => unavailable(Activity::MixLab),
            },
            LabRequest::ResetMix => match self.mix.as_mut() {
                Some(bench) => {
                    bench.state = bench.resolver.reset();
                    ScreenEvent::MixUpdated {
                        state: bench.state.clone(),
                        advisory: None,
                    }
                }
                None => unavailable(Activity::MixLab),
            },
            LabRequest::AdvanceStep { action_id } => match self.steps.as_mut() {
                Some(bench) => {
                    let update = bench.stepper.advance(&bench.state, &action_id);
                    bench.state = update.state.clone();
                    ScreenEvent::StepperUpdated {
                        state: update.state,
                        transition: update.transition,
                    }
                }
                None => unavailable(Activity::Stepper),
            },
            LabRequest::ResetStepper => match self.steps.as_mut() {
                Some(bench) => {
                    bench.state = bench.stepper.reset();
                    ScreenEvent::StepperUpdated {
                        state: bench.state.clone(),
                        transition: StepTransition::Reset,
                    }
                }
                None => unavailable(Activity::Stepper),
            },
            LabRequest::AnswerQuiz { source, choice } => self.answer_quiz(source, choice),
        }
    }

    fn answer_quiz(&self, source: QuizSource, choice: usize) -> ScreenEvent {
        let quiz = match source {
            QuizSource::Mix => self.mix_state().and_then(MixState::quiz),
            QuizSource::Experiment => self.stepper_state().and_then(StepperState::quiz),
        };
        let Some(quiz) = quiz else {
            return ScreenEvent::Advisory(Advisory::NoQuiz { source });
        };
        let verdict = quiz.grade(choice);
        info!(source = ?source, choice, verdict = ?verdict, "quiz answered");
        ScreenEvent::QuizAnswered { source, verdict }
    }
}

fn unavailable(activity: Activity) -> ScreenEvent {
    ScreenEvent::Advisory(Advisory::ActivityUnavailable { activity })
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
