use super::*;

use catalog::LabCatalog;
use shared::domain::ExperimentId;

const DNA_ACTIONS: [&str; 6] = [
    "add-sample",
    "add-reagents",
    "mash",
    "filter",
    "add-alcohol",
    "extract",
];

fn catalog() -> LabCatalog {
    LabCatalog::builtin().expect("builtin catalog")
}

fn dna(catalog: &LabCatalog) -> &ExperimentDefinition {
    catalog
        .experiment(&ExperimentId::new("dna-extraction"))
        .expect("dna experiment")
}

fn act(stepper: &GuidedExperimentStepper<'_>, state: &StepperState, action: &str) -> StepUpdate {
    stepper.advance(state, &ActionId::new(action))
}

#[test]
fn starts_at_step_zero_with_initial_content() {
    let catalog = catalog();
    let stepper = GuidedExperimentStepper::new(dna(&catalog));
    let state = stepper.start();
    assert_eq!(state.current_step(), 0);
    assert_eq!(state.total_steps(), 6);
    assert_eq!(state.progress_percent(), 0.0);
    assert_eq!(state.content().as_str(), "empty");
    assert!(state.consumed().is_empty());
    assert!(!state.quiz_available());
    assert_eq!(
        stepper.next_action(&state).map(ActionId::as_str),
        Some("add-sample")
    );
}

#[test]
fn correct_sequence_increases_progress_to_exactly_one_hundred() {
    let catalog = catalog();
    let stepper = GuidedExperimentStepper::new(dna(&catalog));
    let mut state = stepper.start();
    let mut last_progress = state.progress_percent();

    for (idx, action) in DNA_ACTIONS.iter().enumerate() {
        let update = act(&stepper, &state, action);
        assert!(update.state.progress_percent() > last_progress);
        assert_eq!(update.state.current_step(), idx + 1);
        last_progress = update.state.progress_percent();
        state = update.state;
    }

    assert_eq!(state.progress_percent(), 100.0);
    assert!(state.is_complete());
    assert_eq!(state.content().as_str(), "dna-strands");
    assert_eq!(state.consumed().len(), DNA_ACTIONS.len());
}

#[test]
fn final_step_sets_result_and_quiz() {
    let catalog = catalog();
    let stepper = GuidedExperimentStepper::new(dna(&catalog));
    let mut state = stepper.start();
    let mut transition = None;
    for action in DNA_ACTIONS {
        let update = act(&stepper, &state, action);
        transition = Some(update.transition);
        state = update.state;
    }
    assert_eq!(transition, Some(StepTransition::Completed { ordinal: 6 }));
    assert!(state.result_text().is_some_and(|text| text.contains("DNA")));
    assert!(state.quiz_available());
}

#[test]
fn alcohol_before_filter_is_ignored() {
    let catalog = catalog();
    let stepper = GuidedExperimentStepper::new(dna(&catalog));
    let mut state = stepper.start();
    for action in ["add-sample", "add-reagents", "mash"] {
        state = act(&stepper, &state, action).state;
    }
    let before = state.clone();

    let update = act(&stepper, &state, "add-alcohol");
    assert_eq!(update.state, before);
    assert_eq!(update.state.current_step(), 3);
    assert_eq!(update.state.progress_percent(), 50.0);
    assert_eq!(update.state.content().as_str(), "mash");
    assert_eq!(
        update.transition,
        StepTransition::Ignored {
            expected: Some(ActionId::new("filter"))
        }
    );
}

#[test]
fn any_wrong_action_leaves_step_progress_and_content_unchanged() {
    let catalog = catalog();
    let stepper = GuidedExperimentStepper::new(dna(&catalog));
    let mut state = stepper.start();

    for (idx, action) in DNA_ACTIONS.iter().enumerate() {
        for wrong in DNA_ACTIONS
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != idx)
            .map(|(_, wrong)| wrong)
            .chain(["shake", ""].iter())
        {
            let ignored = act(&stepper, &state, wrong);
            assert_eq!(ignored.state.current_step(), state.current_step());
            assert_eq!(ignored.state.progress_percent(), state.progress_percent());
            assert_eq!(ignored.state.content(), state.content());
        }
        state = act(&stepper, &state, action).state;
    }
}

#[test]
fn actions_after_completion_are_ignored() {
    let catalog = catalog();
    let stepper = GuidedExperimentStepper::new(dna(&catalog));
    let mut state = stepper.start();
    for action in DNA_ACTIONS {
        state = act(&stepper, &state, action).state;
    }
    let update = act(&stepper, &state, "extract");
    assert_eq!(update.state, state);
    assert_eq!(update.transition, StepTransition::Ignored { expected: None });
}

#[test]
fn reset_returns_initial_state() {
    let catalog = catalog();
    let stepper = GuidedExperimentStepper::new(dna(&catalog));
    let mut state = stepper.start();
    for action in &DNA_ACTIONS[..4] {
        state = act(&stepper, &state, action).state;
    }
    assert_eq!(state.content().as_str(), "filtered-liquid");

    let reset = stepper.reset();
    assert_eq!(reset, stepper.start());
    assert_eq!(reset.current_step(), 0);
    assert!(reset.consumed().is_empty());
    assert!(reset.result_text().is_none());
}
