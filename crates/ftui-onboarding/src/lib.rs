#![forbid(unsafe_code)]

//! Onboarding walkthroughs for FrankenTUI.
//!
//! # Role in FrankenTUI
//! `ftui-onboarding` drives a sequence of anchored popups that introduce an
//! application to a new user. Each [`OnboardingStep`] names a target widget,
//! a header, and a body; the [`Onboarding`] sequencer builds one popup per
//! step with Previous/Next/Close controls and keeps exactly one on screen.
//!
//! The sequencer is generic over [`ftui_popup::OverlayHost`], so it works with
//! the in-memory [`ftui_popup::PopupLayer`] as well as any host a renderer
//! provides.
//!
//! # Primary pieces
//! - [`Onboarding`]: the state machine, with [`Onboarding::handle`] as the
//!   single input entry point.
//! - [`OnboardingStep`]: per-step settings and before-show hooks.
//! - [`OnboardingConfig`]: labels and popup settings shared by every step.
//!
//! # Features
//! - `tracing`: spans for every step transition.
//! - `serde`: JSON loading for [`OnboardingConfig`].

pub mod config;
pub mod error;
pub mod sequencer;
pub mod slot;
pub mod step;

pub use config::{ControlLabels, OnboardingConfig};
pub use error::{HookError, OnboardingError, Result};
pub use sequencer::{
    CLOSE_BUTTON_FOOTER_ID, CLOSE_BUTTON_HEADER_ID, NEXT_STEP_BUTTON_ID, Onboarding,
    OnboardingEvent, OnboardingInput, PREVIOUS_STEP_BUTTON_ID, Phase, StepChangeReason,
    StopReason,
};
pub use slot::OverlaySlot;
pub use step::{BeforeShowHook, HookId, OnboardingStep};
