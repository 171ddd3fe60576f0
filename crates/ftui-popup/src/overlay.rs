#![forbid(unsafe_code)]

//! Traits at the seam between popup owners and popup implementations.
//!
//! [`Overlay`] is the contract a floating panel exposes to whoever configures
//! it; [`OverlayHost`] creates overlays and decides where they live in the
//! widget tree. Owners that orchestrate several overlays (walkthroughs, menus)
//! are written against these traits so that tests and alternative hosts can
//! stand in for [`Popup`](crate::Popup) and [`PopupLayer`](crate::PopupLayer).
//!
//! # Open-state changes
//!
//! Every actual open/closed transition is delivered two ways:
//!
//! 1. synchronously to listeners registered with
//!    [`Overlay::add_open_changed_listener`], and
//! 2. as a [`PopupEvent`] queued in the overlay's outbox, drained with
//!    [`Overlay::take_events`].
//!
//! The outbox lets an owner route events through its own dispatch function
//! instead of capturing itself inside a listener closure.

use std::fmt;

use crate::content::Content;
use crate::control::Slot;
use crate::placement::{PopupAlignment, PopupPosition, PopupVariant};

/// Process-unique identity of an overlay instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopupId(pub u64);

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popup#{}", self.0)
    }
}

/// Handle to the widget an overlay anchors to.
///
/// This is an identifier, not an owning reference: the widget may disappear
/// while a popup still names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u64);

/// Identifier of a container that overlays can be attached under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerId(pub u64);

impl ContainerId {
    /// The application root.
    pub const ROOT: Self = Self(0);
}

/// Where an overlay should be inserted before it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachPoint {
    /// Under the same parent container as the target (a sibling of it).
    SiblingOf(TargetId),
    /// Under the application root.
    Root,
}

impl AttachPoint {
    /// Sibling of `target` when there is one, else the root.
    pub fn for_target(target: Option<TargetId>) -> Self {
        target.map_or(Self::Root, Self::SiblingOf)
    }
}

/// Registration handle for an open-changed listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Payload of an open-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenChanged {
    pub popup: PopupId,
    pub opened: bool,
}

/// Events queued in an overlay's outbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    OpenChanged(OpenChanged),
}

/// Callback for open-state changes.
pub type OpenChangedListener = Box<dyn FnMut(&OpenChanged)>;

/// A floating panel bound to an optional target.
pub trait Overlay {
    fn id(&self) -> PopupId;

    /// Anchor to `target`, or float untargeted when `None`.
    fn set_target(&mut self, target: Option<TargetId>);
    fn set_position(&mut self, position: PopupPosition);
    /// `None` leaves the alignment unset.
    fn set_alignment(&mut self, alignment: Option<PopupAlignment>);
    /// When set, clicking the target does not toggle the overlay; it is only
    /// opened programmatically.
    fn set_ignore_target_click(&mut self, ignore: bool);
    /// Visually emphasise the target while open.
    fn set_highlight_target(&mut self, highlight: bool);
    fn add_theme_variant(&mut self, variant: PopupVariant);

    fn set_header_title(&mut self, title: &str);
    fn header_mut(&mut self) -> &mut Slot;
    fn footer_mut(&mut self) -> &mut Slot;
    /// Replace the body with a single payload.
    fn set_content(&mut self, content: Content);

    /// Open the overlay. No-op when already open.
    fn show(&mut self);
    /// Close the overlay. No-op when already closed.
    fn hide(&mut self);
    fn is_open(&self) -> bool;

    fn add_open_changed_listener(&mut self, listener: OpenChangedListener) -> ListenerId;
    /// Returns `false` if the listener was not registered.
    fn remove_open_changed_listener(&mut self, id: ListenerId) -> bool;
    /// Drain queued events, oldest first.
    fn take_events(&mut self) -> Vec<PopupEvent>;
}

/// Creates overlays and places them in the widget tree.
pub trait OverlayHost {
    type Overlay: Overlay;

    /// A new, closed overlay.
    fn create(&mut self) -> Self::Overlay;

    /// Insert `overlay` at `point`.
    ///
    /// Returns `false` when the point cannot be resolved (e.g. the target has
    /// no known parent); the overlay then stays detached.
    fn attach(&mut self, overlay: &mut Self::Overlay, point: AttachPoint) -> bool;

    /// Remove `overlay` from wherever it is attached. No-op if detached.
    fn detach(&mut self, overlay: &mut Self::Overlay);
}
