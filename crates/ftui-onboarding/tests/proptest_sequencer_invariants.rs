#![forbid(unsafe_code)]

//! Property tests for the walkthrough state machine.
//!
//! # Invariants tested
//!
//! 1. At most one popup is attached to the host at any time, and it is the
//!    walkthrough's current popup.
//! 2. `is_running()` holds exactly when the phase is `Showing`.
//! 3. The cursor stays in bounds and footer composition matches it.
//! 4. Stop is idempotent from any reachable state.

use ftui_onboarding::{
    CLOSE_BUTTON_FOOTER_ID, CLOSE_BUTTON_HEADER_ID, NEXT_STEP_BUTTON_ID, Onboarding,
    OnboardingInput, OnboardingStep, PREVIOUS_STEP_BUTTON_ID, Phase,
};
use ftui_popup::{ContainerId, ControlId, Overlay, PopupInput, PopupLayer, TargetId};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    Start,
    Stop,
    Click(ControlId),
    Popup(PopupInput),
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Start),
        Just(Action::Stop),
        Just(Action::Click(NEXT_STEP_BUTTON_ID)),
        Just(Action::Click(NEXT_STEP_BUTTON_ID)),
        Just(Action::Click(PREVIOUS_STEP_BUTTON_ID)),
        Just(Action::Click(CLOSE_BUTTON_FOOTER_ID)),
        Just(Action::Click(CLOSE_BUTTON_HEADER_ID)),
        Just(Action::Popup(PopupInput::Escape)),
        Just(Action::Popup(PopupInput::OutsideClick)),
        Just(Action::Popup(PopupInput::InsideClick)),
        Just(Action::Popup(PopupInput::TargetClick)),
    ]
}

fn tour(len: usize) -> Onboarding<PopupLayer> {
    let mut layer = PopupLayer::new();
    let mut tour_steps = Vec::with_capacity(len);
    for i in 0..len {
        // Every other step points at a registered target.
        if i % 2 == 0 {
            let target = TargetId(i as u64 + 1);
            layer.register_target(target, ContainerId(100 + i as u64));
            tour_steps.push(OnboardingStep::targeted(target).with_header(format!("Step {i}")));
        } else {
            tour_steps.push(OnboardingStep::untargeted().with_content(format!("step {i}")));
        }
    }

    let mut tour = Onboarding::new(layer);
    for step in tour_steps {
        tour.add_step(step);
    }
    tour
}

fn apply(tour: &mut Onboarding<PopupLayer>, action: &Action) {
    match action {
        Action::Start => {
            tour.start().expect("start");
        }
        Action::Stop => {
            tour.stop();
        }
        Action::Click(id) => {
            tour.handle(OnboardingInput::ControlClicked(id.clone()))
                .expect("click");
        }
        Action::Popup(input) => {
            if let Some(popup) = tour.current_overlay_mut() {
                popup.handle_input(*input);
            }
            tour.pump().expect("pump");
        }
    }
}

fn check_invariants(tour: &Onboarding<PopupLayer>) -> Result<(), TestCaseError> {
    let layer = tour.host();
    let current = tour.current_overlay();

    prop_assert!(layer.attached_count() <= 1);
    match current {
        Some(popup) => {
            prop_assert!(layer.attachment(popup.id()).is_some());
            prop_assert_eq!(layer.attached_count(), 1);
        }
        None => prop_assert_eq!(layer.attached_count(), 0),
    }

    let showing = matches!(tour.phase(), Phase::Showing { .. });
    let transitioning = matches!(tour.phase(), Phase::Transitioning { .. });
    prop_assert_eq!(tour.is_running(), showing);
    prop_assert!(!transitioning, "left mid-transition: {:?}", tour.phase());

    if let (Some(index), Some(popup)) = (tour.cursor(), current) {
        let n = tour.step_count();
        prop_assert!(index < n);
        let footer = popup.footer();
        prop_assert_eq!(footer.contains(&PREVIOUS_STEP_BUTTON_ID), index > 0);
        prop_assert_eq!(footer.contains(&NEXT_STEP_BUTTON_ID), index + 1 < n);
        prop_assert_eq!(footer.contains(&CLOSE_BUTTON_FOOTER_ID), index + 1 == n);
        prop_assert_eq!(popup.target(), tour.steps()[index].target());
    } else {
        prop_assert!(current.is_none());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn invariants_hold_for_any_input_sequence(
        len in 1usize..6,
        actions in proptest::collection::vec(action_strategy(), 0..60),
    ) {
        let mut tour = tour(len);
        check_invariants(&tour)?;
        for action in &actions {
            apply(&mut tour, action);
            check_invariants(&tour)?;
        }
    }

    #[test]
    fn stop_twice_equals_stop_once(
        len in 1usize..6,
        actions in proptest::collection::vec(action_strategy(), 0..30),
    ) {
        let mut tour = tour(len);
        for action in &actions {
            apply(&mut tour, action);
        }

        tour.stop();
        let once = (tour.phase(), tour.cursor(), tour.host().attached_count());
        prop_assert!(tour.stop().is_none());
        prop_assert_eq!((tour.phase(), tour.cursor(), tour.host().attached_count()), once);
        prop_assert_eq!(once, (Phase::Idle, None, 0));
    }

    #[test]
    fn next_clicks_walk_to_the_last_step_and_stay(len in 1usize..8, extra in 0usize..5) {
        let mut tour = tour(len);
        tour.start().expect("start");
        for _ in 0..(len - 1 + extra) {
            tour.handle(OnboardingInput::ControlClicked(NEXT_STEP_BUTTON_ID))
                .expect("next");
        }
        prop_assert_eq!(tour.cursor(), Some(len - 1));
        prop_assert!(tour.is_running());
    }
}
