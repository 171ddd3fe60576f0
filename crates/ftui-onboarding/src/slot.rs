#![forbid(unsafe_code)]

//! Single-occupant overlay storage.
//!
//! The walkthrough owns at most one live overlay. [`OverlaySlot`] makes the
//! hand-over explicit: an occupant is always hidden and detached from its host
//! before it is dropped or replaced, so events it queued while closing die
//! with it instead of being mistaken for user input.

use ftui_popup::{Overlay, OverlayHost, PopupId};

#[derive(Debug)]
pub struct OverlaySlot<O> {
    current: Option<O>,
}

impl<O> Default for OverlaySlot<O> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<O: Overlay> OverlaySlot<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&O> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut O> {
        self.current.as_mut()
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    /// Whether there is an occupant and it is open.
    pub fn is_open(&self) -> bool {
        self.current.as_ref().is_some_and(Overlay::is_open)
    }

    /// Hide, detach, and drop the occupant. Returns its id.
    pub fn discard<H>(&mut self, host: &mut H) -> Option<PopupId>
    where
        H: OverlayHost<Overlay = O>,
    {
        let mut overlay = self.current.take()?;
        overlay.hide();
        host.detach(&mut overlay);
        Some(overlay.id())
    }

    /// Discard the occupant, then install `next`. Returns the discarded id.
    pub fn replace<H>(&mut self, host: &mut H, next: O) -> Option<PopupId>
    where
        H: OverlayHost<Overlay = O>,
    {
        let previous = self.discard(host);
        self.current = Some(next);
        previous
    }
}
