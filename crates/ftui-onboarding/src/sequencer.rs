#![forbid(unsafe_code)]

//! Walkthrough sequencing.
//!
//! [`Onboarding`] walks the user through an ordered list of
//! [`OnboardingStep`]s, showing one popup at a time with Previous/Next/Close
//! controls in its footer.
//!
//! # State machine
//!
//! ```text
//!            start()                 next (i < last)
//!   Idle ───────────────▶ Showing(0) ───────────────▶ Showing(i+1)
//!    ▲                       │   ◀───────────────
//!    │   stop() / dismiss    │    previous (i > 0)
//!    └───────────────────────┘
//! ```
//!
//! Every step change passes through [`Phase::Transitioning`] while the old
//! popup is torn down and the new one is built. Close events emitted by the
//! outgoing popup are never dispatched, so only a close the user caused can
//! stop the walkthrough.
//!
//! # Invariants
//!
//! 1. At most one popup is owned at any time, and it is hidden and detached
//!    before the next one is created.
//! 2. `cursor()` is `Some(i)` with `i < step_count()` whenever a popup is owned.
//! 3. Footer composition for step `i` of `n`: Previous iff `i > 0`, Next iff
//!    `i < n - 1`, Close iff `i == n - 1`.
//! 4. Every step change builds a new popup; popups are never reused.
//!
//! # Input routing
//!
//! The walkthrough never registers callbacks on its popups. Control clicks and
//! open-state changes come in through [`Onboarding::handle`]; [`Onboarding::pump`]
//! drains the current popup's outbox and feeds it to `handle`.
//!
//! # Example
//!
//! ```
//! use ftui_onboarding::{Onboarding, OnboardingInput, OnboardingStep, NEXT_STEP_BUTTON_ID};
//! use ftui_popup::PopupLayer;
//!
//! let mut tour = Onboarding::new(PopupLayer::new());
//! tour.add_step(OnboardingStep::untargeted().with_header("Welcome").with_content("Hi!"));
//! tour.add_step(OnboardingStep::untargeted().with_content("That's all."));
//!
//! tour.start().unwrap();
//! assert_eq!(tour.cursor(), Some(0));
//! tour.handle(OnboardingInput::ControlClicked(NEXT_STEP_BUTTON_ID)).unwrap();
//! assert_eq!(tour.cursor(), Some(1));
//! tour.stop();
//! assert!(!tour.is_running());
//! ```

use std::fmt;

use ftui_popup::{
    AttachPoint, Control, ControlId, Overlay, OverlayHost, PopupEvent, SlotLayout,
};

use crate::config::OnboardingConfig;
use crate::error::{OnboardingError, Result};
use crate::slot::OverlaySlot;
use crate::step::OnboardingStep;

/// Footer control that goes back one step.
pub const PREVIOUS_STEP_BUTTON_ID: ControlId = ControlId::from_static("previous-step-button");
/// Footer control that goes forward one step.
pub const NEXT_STEP_BUTTON_ID: ControlId = ControlId::from_static("next-step-button");
/// Header icon that closes the popup directly (treated as a dismissal).
pub const CLOSE_BUTTON_HEADER_ID: ControlId = ControlId::from_static("close-button-header");
/// Footer control on the last step that ends the walkthrough.
pub const CLOSE_BUTTON_FOOTER_ID: ControlId = ControlId::from_static("close-button-footer");

/// Where the walkthrough is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started, or stopped.
    Idle,
    /// The popup for `index` is the current popup.
    Showing { index: usize },
    /// Swapping popups. `from` is `None` when starting.
    Transitioning { from: Option<usize>, to: usize },
}

/// Input delivered to [`Onboarding::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingInput {
    /// A control in the current popup's header or footer was activated.
    ControlClicked(ControlId),
    /// The current popup opened or closed.
    OverlayOpenChanged { opened: bool },
}

impl From<PopupEvent> for OnboardingInput {
    fn from(event: PopupEvent) -> Self {
        match event {
            PopupEvent::OpenChanged(change) => Self::OverlayOpenChanged {
                opened: change.opened,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChangeReason {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop()` was called.
    Requested,
    /// The footer Close control on the last step.
    Completed,
    /// The popup was closed by the user (header close, Escape, outside click).
    Dismissed,
}

/// What a call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingEvent {
    Started {
        step: usize,
    },
    StepChanged {
        from: usize,
        to: usize,
        reason: StepChangeReason,
    },
    Stopped {
        last_step: usize,
        reason: StopReason,
    },
}

/// Walkthrough sequencer over popups created by `H`.
pub struct Onboarding<H: OverlayHost> {
    host: H,
    config: OnboardingConfig,
    steps: Vec<OnboardingStep<H::Overlay>>,
    phase: Phase,
    slot: OverlaySlot<H::Overlay>,
}

impl<H: OverlayHost> fmt::Debug for Onboarding<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Onboarding")
            .field("phase", &self.phase)
            .field("steps", &self.steps.len())
            .field("overlay", &self.slot.get().map(Overlay::id))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<H: OverlayHost> Onboarding<H> {
    /// Empty walkthrough with the default config.
    pub fn new(host: H) -> Self {
        Self::with_config(host, OnboardingConfig::default())
    }

    pub fn with_config(host: H, config: OnboardingConfig) -> Self {
        Self {
            host,
            config,
            steps: Vec::new(),
            phase: Phase::Idle,
            slot: OverlaySlot::new(),
        }
    }

    /// Append a step. Allowed at any time, including while running; the
    /// current popup's footer is not rebuilt.
    pub fn add_step(&mut self, step: OnboardingStep<H::Overlay>) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[OnboardingStep<H::Overlay>] {
        &self.steps
    }

    pub fn step_mut(&mut self, index: usize) -> Option<&mut OnboardingStep<H::Overlay>> {
        self.steps.get_mut(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the step being shown, `None` when idle.
    pub fn cursor(&self) -> Option<usize> {
        match self.phase {
            Phase::Idle => None,
            Phase::Showing { index } => Some(index),
            Phase::Transitioning { to, .. } => Some(to),
        }
    }

    /// Whether a popup is owned and open.
    pub fn is_running(&self) -> bool {
        self.slot.is_open()
    }

    pub fn current_overlay(&self) -> Option<&H::Overlay> {
        self.slot.get()
    }

    /// Mutable access to the current popup, e.g. to feed it user input.
    /// Changes it makes to its open state reach the walkthrough via [`pump`](Self::pump).
    pub fn current_overlay_mut(&mut self) -> Option<&mut H::Overlay> {
        self.slot.get_mut()
    }

    // --- Public transitions ---

    /// Show the first step.
    ///
    /// No-op when already running.
    ///
    /// # Errors
    ///
    /// [`OnboardingError::NoSteps`] when no steps were added, and
    /// [`OnboardingError::BeforeShow`] when a hook of the first step fails.
    pub fn start(&mut self) -> Result<Option<OnboardingEvent>> {
        if self.is_running() {
            return Ok(None);
        }
        if self.steps.is_empty() {
            return Err(OnboardingError::NoSteps);
        }
        self.phase = Phase::Idle;
        self.switch_to(None, 0)?;
        Ok(Some(OnboardingEvent::Started { step: 0 }))
    }

    /// Close and drop the current popup. Idempotent.
    pub fn stop(&mut self) -> Option<OnboardingEvent> {
        self.stop_with(StopReason::Requested)
    }

    /// Move forward one step. No-op on the last step or when idle.
    ///
    /// If the user already closed the current popup, the walkthrough stops
    /// with [`StopReason::Dismissed`] instead.
    ///
    /// # Errors
    ///
    /// [`OnboardingError::BeforeShow`] when a hook of the next step fails; the
    /// walkthrough is idle afterwards.
    pub fn next_step(&mut self) -> Result<Option<OnboardingEvent>> {
        if let Some(stopped) = self.settle_dismissal() {
            return Ok(Some(stopped));
        }
        let Phase::Showing { index } = self.phase else {
            return Ok(None);
        };
        if index + 1 >= self.steps.len() {
            return Ok(None);
        }
        self.switch_to(Some(index), index + 1)?;
        Ok(Some(OnboardingEvent::StepChanged {
            from: index,
            to: index + 1,
            reason: StepChangeReason::Next,
        }))
    }

    /// Move back one step. No-op on the first step or when idle.
    ///
    /// # Errors
    ///
    /// Same as [`next_step`](Self::next_step).
    pub fn previous_step(&mut self) -> Result<Option<OnboardingEvent>> {
        if let Some(stopped) = self.settle_dismissal() {
            return Ok(Some(stopped));
        }
        let Phase::Showing { index } = self.phase else {
            return Ok(None);
        };
        if index == 0 {
            return Ok(None);
        }
        self.switch_to(Some(index), index - 1)?;
        Ok(Some(OnboardingEvent::StepChanged {
            from: index,
            to: index - 1,
            reason: StepChangeReason::Previous,
        }))
    }

    // --- Dispatch ---

    /// Single entry point for UI input.
    ///
    /// # Errors
    ///
    /// Propagates hook failures from the transition the input triggered.
    pub fn handle(&mut self, input: OnboardingInput) -> Result<Option<OnboardingEvent>> {
        match input {
            OnboardingInput::ControlClicked(id) => {
                if let Some(stopped) = self.settle_dismissal() {
                    return Ok(Some(stopped));
                }
                if id == PREVIOUS_STEP_BUTTON_ID {
                    self.previous_step()
                } else if id == NEXT_STEP_BUTTON_ID {
                    self.next_step()
                } else if id == CLOSE_BUTTON_FOOTER_ID {
                    Ok(self.stop_with(StopReason::Completed))
                } else if id == CLOSE_BUTTON_HEADER_ID {
                    self.close_current_directly()
                } else {
                    Ok(None)
                }
            }
            OnboardingInput::OverlayOpenChanged { opened: false }
                if matches!(self.phase, Phase::Showing { .. }) =>
            {
                Ok(self.stop_with(StopReason::Dismissed))
            }
            OnboardingInput::OverlayOpenChanged { .. } => Ok(None),
        }
    }

    /// Drain the current popup's queued events and dispatch them.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle`](Self::handle).
    pub fn pump(&mut self) -> Result<Vec<OnboardingEvent>> {
        let Some(overlay) = self.slot.get_mut() else {
            return Ok(Vec::new());
        };
        let pending = overlay.take_events();

        let mut emitted = Vec::new();
        for event in pending {
            if let Some(out) = self.handle(event.into())? {
                emitted.push(out);
            }
        }
        Ok(emitted)
    }

    // --- Internals ---

    /// A popup closed by the user but not yet pumped still counts as a
    /// dismissal; act on it before any control input.
    fn settle_dismissal(&mut self) -> Option<OnboardingEvent> {
        let pending = matches!(self.phase, Phase::Showing { .. })
            && self.slot.is_occupied()
            && !self.slot.is_open();
        if pending {
            self.stop_with(StopReason::Dismissed)
        } else {
            None
        }
    }

    fn stop_with(&mut self, reason: StopReason) -> Option<OnboardingEvent> {
        let last_step = self.cursor();
        let discarded = self.slot.discard(&mut self.host);
        self.phase = Phase::Idle;

        #[cfg(feature = "tracing")]
        {
            if discarded.is_some() {
                self.trace_transition("stop", last_step, None);
            }
        }

        match (discarded, last_step) {
            (Some(_), Some(last_step)) => Some(OnboardingEvent::Stopped { last_step, reason }),
            _ => None,
        }
    }

    /// Header close: hide the popup as if the user dismissed it, then route the
    /// resulting close through the normal dispatch.
    fn close_current_directly(&mut self) -> Result<Option<OnboardingEvent>> {
        let Some(overlay) = self.slot.get_mut() else {
            return Ok(None);
        };
        overlay.hide();
        Ok(self.pump()?.pop())
    }

    fn switch_to(&mut self, from: Option<usize>, to: usize) -> Result<()> {
        self.phase = Phase::Transitioning { from, to };

        #[cfg(feature = "tracing")]
        self.trace_transition("switch", from, Some(to));

        self.slot.discard(&mut self.host);
        match self.show_step(to) {
            Ok(()) => {
                self.phase = Phase::Showing { index: to };
                Ok(())
            }
            Err(err) => {
                self.phase = Phase::Idle;
                Err(err)
            }
        }
    }

    fn show_step(&mut self, index: usize) -> Result<()> {
        let step_count = self.steps.len();
        let mut overlay = self.host.create();
        let step = &mut self.steps[index];

        configure_overlay(&mut overlay, step, index, step_count, &self.config);
        self.host
            .attach(&mut overlay, AttachPoint::for_target(step.target()));

        if let Err(source) = step.fire_before_show(&mut overlay) {
            self.host.detach(&mut overlay);
            return Err(OnboardingError::BeforeShow {
                step: index,
                source,
            });
        }

        overlay.show();
        self.slot.replace(&mut self.host, overlay);
        Ok(())
    }

    #[cfg(feature = "tracing")]
    fn trace_transition(&self, operation: &'static str, from: Option<usize>, to: Option<usize>) {
        let _span = tracing::debug_span!(
            "onboarding.transition",
            operation,
            from = ?from,
            to = ?to,
            step_count = self.steps.len()
        )
        .entered();
    }
}

/// Apply a step's settings and the navigation controls to a fresh popup.
fn configure_overlay<O: Overlay>(
    overlay: &mut O,
    step: &OnboardingStep<O>,
    index: usize,
    step_count: usize,
    config: &OnboardingConfig,
) {
    let is_first = index == 0;
    let is_last = index + 1 == step_count;
    let labels = &config.labels;

    if let Some(variant) = config.variant {
        overlay.add_theme_variant(variant);
    }
    overlay.set_highlight_target(config.highlight_target);
    overlay.set_position(step.position());
    overlay.set_alignment(step.alignment());
    overlay.set_ignore_target_click(config.ignore_target_click);
    if let Some(target) = step.target() {
        overlay.set_target(Some(target));
    }

    match step.header() {
        Some(title) => overlay.set_header_title(title),
        // Lone close icon hugs the end edge.
        None => overlay.header_mut().set_layout(SlotLayout::End),
    }
    overlay
        .header_mut()
        .add(Control::icon(CLOSE_BUTTON_HEADER_ID, labels.header_close.as_str()));

    let footer = overlay.footer_mut();
    if !is_first {
        footer.add(Control::button(PREVIOUS_STEP_BUTTON_ID, labels.previous.as_str()));
    }
    if !is_last {
        footer.add(Control::button(NEXT_STEP_BUTTON_ID, labels.next.as_str()));
    }
    if is_last {
        footer.add(Control::button(CLOSE_BUTTON_FOOTER_ID, labels.close.as_str()));
    }

    if let Some(content) = step.content() {
        overlay.set_content(content.clone());
    }
}
