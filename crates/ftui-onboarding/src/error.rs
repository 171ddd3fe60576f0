use thiserror::Error;

/// Error type returned by before-show hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, OnboardingError>;

#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("walkthrough has no steps")]
    NoSteps,

    #[error("before-show hook failed on step {step}: {source}")]
    BeforeShow {
        step: usize,
        #[source]
        source: HookError,
    },

    #[cfg(feature = "serde")]
    #[error("invalid onboarding config: {0}")]
    Config(#[from] serde_json::Error),
}

impl OnboardingError {
    /// Step index the error is attached to, if any.
    #[must_use]
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::BeforeShow { step, .. } => Some(*step),
            _ => None,
        }
    }
}
