use catalog::LabCatalog;
use lab_core::{ExperimentScreen, MixReaction, ScreenEvent, StepTransition};
use shared::{
    domain::{ActionId, ExperimentId, ReagentId},
    protocol::{Advisory, LabRequest, CAPACITY_ADVISORY},
};

fn add(reagent: &str) -> LabRequest {
    LabRequest::AddReagent {
        reagent_id: ReagentId::new(reagent),
    }
}

fn step(action: &str) -> LabRequest {
    LabRequest::AdvanceStep {
        action_id: ActionId::new(action),
    }
}

#[test]
fn kitchen_chemistry_session_acceptance() {
    let catalog = LabCatalog::builtin().expect("catalog");
    let mut screen = ExperimentScreen::open(&catalog, &ExperimentId::new("kitchen-chemistry"))
        .expect("screen");

    screen.handle(add("vinegar"));
    screen.handle(add("baking-soda"));
    let state = screen.mix_state().expect("mix bench").clone();
    assert!(state.bubbles());
    assert!(state.result_text().contains("CO2"));

    screen.handle(add("dish-soap"));
    let event = screen.handle(add("milk"));
    let ScreenEvent::MixUpdated { state, advisory } = event else {
        panic!("expected mix update");
    };
    assert_eq!(state.reagents().len(), 3);
    assert_eq!(
        advisory.map(|a| a.message()),
        Some(CAPACITY_ADVISORY.to_string())
    );

    screen.handle(LabRequest::ResetMix);
    screen.handle(add("milk"));
    screen.handle(add("sugar"));
    let state = screen.mix_state().expect("mix bench");
    assert_eq!(state.reaction(), &MixReaction::NoReaction);
    assert!(state.quiz().is_none());
}

#[test]
fn dna_extraction_session_acceptance() {
    let catalog = LabCatalog::builtin().expect("catalog");
    let mut screen =
        ExperimentScreen::open(&catalog, &ExperimentId::new("dna-extraction")).expect("screen");

    for action in ["add-sample", "add-reagents", "mash"] {
        screen.handle(step(action));
    }
    let progress = screen
        .stepper_state()
        .map(|s| s.progress_percent())
        .expect("stepper");

    let event = screen.handle(step("add-alcohol"));
    assert!(matches!(
        event,
        ScreenEvent::StepperUpdated {
            transition: StepTransition::Ignored { .. },
            ..
        }
    ));
    assert_eq!(
        screen.stepper_state().map(|s| s.progress_percent()),
        Some(progress)
    );

    for action in ["filter", "add-alcohol", "extract"] {
        screen.handle(step(action));
    }
    let state = screen.stepper_state().expect("stepper");
    assert_eq!(state.progress_percent(), 100.0);
    assert!(state.quiz_available());

    assert_eq!(
        screen.handle(add("milk")),
        ScreenEvent::Advisory(Advisory::ActivityUnavailable {
            activity: shared::protocol::Activity::MixLab
        })
    );
}
