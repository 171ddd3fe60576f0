#![forbid(unsafe_code)]

//! Anchored popup overlays for FrankenTUI.
//!
//! # Role in FrankenTUI
//! `ftui-popup` owns popup *state*: which widget a popup points at, which side
//! it prefers, what its header, body, and footer hold, and whether it is open.
//! Painting is left to the widget layer, which reads a [`Popup`] the same way
//! it reads any other widget state.
//!
//! # Primary pieces
//! - [`Overlay`] / [`OverlayHost`]: the seam that orchestrators (such as
//!   onboarding walkthroughs) program against.
//! - [`Popup`]: the concrete overlay, including input handling.
//! - [`PopupLayer`]: an in-memory host that tracks where popups are attached.
//! - [`Slot`] / [`Control`]: header and footer content, addressed by [`ControlId`].

pub mod content;
pub mod control;
pub mod error;
pub mod layer;
pub mod overlay;
pub mod placement;
pub mod popup;

pub use content::{Content, CustomContent, Padding, TextBlock};
pub use control::{Control, ControlId, ControlKind, Slot, SlotLayout};
pub use error::{PopupError, Result};
pub use layer::PopupLayer;
pub use overlay::{
    AttachPoint, ContainerId, ListenerId, OpenChanged, OpenChangedListener, Overlay, OverlayHost,
    PopupEvent, PopupId, TargetId,
};
pub use placement::{PopupAlignment, PopupPosition, PopupVariant};
pub use popup::{Popup, PopupAction, PopupFlags, PopupInput};
