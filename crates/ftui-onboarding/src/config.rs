#![forbid(unsafe_code)]

//! Walkthrough presentation settings.
//!
//! Everything here has a default matching the stock walkthrough look, so
//! `OnboardingConfig::default()` is what most applications want. With the
//! `serde` feature the config can be loaded from JSON; missing keys keep their
//! defaults.
//!
//! ```json
//! {
//!   "labels": { "previous": "Back", "next": "Continue" },
//!   "highlight_target": false
//! }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ftui_popup::PopupVariant;

/// Text shown on the walkthrough's navigation controls.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlLabels {
    pub previous: String,
    pub next: String,
    /// Footer close on the last step.
    pub close: String,
    /// Glyph of the header close icon.
    pub header_close: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            previous: "Previous".to_owned(),
            next: "Next".to_owned(),
            close: "Close".to_owned(),
            header_close: "✕".to_owned(),
        }
    }
}

/// Settings applied to every popup a walkthrough builds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OnboardingConfig {
    pub labels: ControlLabels,
    /// Theme variant added to each popup; `None` adds none.
    pub variant: Option<PopupVariant>,
    pub highlight_target: bool,
    /// Step popups are opened by the walkthrough only, never by clicking
    /// their target.
    pub ignore_target_click: bool,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            labels: ControlLabels::default(),
            variant: Some(PopupVariant::PointerArrow),
            highlight_target: true,
            ignore_target_click: true,
        }
    }
}

impl OnboardingConfig {
    #[must_use]
    pub fn labels(mut self, labels: ControlLabels) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Option<PopupVariant>) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn highlight_target(mut self, highlight: bool) -> Self {
        self.highlight_target = highlight;
        self
    }

    #[must_use]
    pub fn ignore_target_click(mut self, ignore: bool) -> Self {
        self.ignore_target_click = ignore;
        self
    }

    /// Load from a JSON string.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to pretty JSON.
    #[cfg(feature = "serde")]
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
