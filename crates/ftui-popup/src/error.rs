use thiserror::Error;

use crate::control::ControlId;

pub type Result<T> = std::result::Result<T, PopupError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PopupError {
    #[error("control is not a child of this slot: {id}")]
    NotAChild { id: ControlId },

    #[error("no content at index {index} (popup holds {len})")]
    NoContentAt { index: usize, len: usize },
}
