#![forbid(unsafe_code)]

//! Header and footer controls.
//!
//! A [`Slot`] is the mutable handle for a popup's header or footer. It holds an
//! ordered list of [`Control`]s; activation is reported back to whoever owns
//! the popup by [`ControlId`], so the popup itself never stores callbacks for
//! its buttons.

use std::borrow::Cow;
use std::fmt;

use crate::error::{PopupError, Result};

/// Identifier of a control inside a popup slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlId(Cow<'static, str>);

impl ControlId {
    /// Identifier backed by a static string, usable in `const` items.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Identifier from any string.
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ControlId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl PartialEq<str> for ControlId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// How a control presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlKind {
    /// Text button.
    #[default]
    Button,
    /// Borderless icon-only button (the label is the glyph).
    Icon,
}

/// A single activatable control.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Control {
    pub id: ControlId,
    pub label: String,
    pub kind: ControlKind,
}

impl Control {
    /// Text button.
    pub fn button(id: impl Into<ControlId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ControlKind::Button,
        }
    }

    /// Icon-only button.
    pub fn icon(id: impl Into<ControlId>, glyph: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: glyph.into(),
            kind: ControlKind::Icon,
        }
    }
}

/// Main-axis arrangement of a slot's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotLayout {
    /// Packed at the start edge.
    #[default]
    Start,
    /// Stretched to full width and packed at the end edge.
    End,
}

/// Header or footer content of a popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    controls: Vec<Control>,
    layout: SlotLayout,
}

impl Slot {
    /// Empty slot with start layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a control.
    pub fn add(&mut self, control: Control) {
        self.controls.push(control);
    }

    /// Append several controls, preserving order.
    pub fn extend(&mut self, controls: impl IntoIterator<Item = Control>) {
        self.controls.extend(controls);
    }

    /// Remove the control with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`PopupError::NotAChild`] when no such control is in this slot.
    pub fn remove(&mut self, id: &ControlId) -> Result<Control> {
        let Some(pos) = self.controls.iter().position(|c| &c.id == id) else {
            return Err(PopupError::NotAChild { id: id.clone() });
        };
        Ok(self.controls.remove(pos))
    }

    /// Remove every control. Layout is kept.
    pub fn remove_all(&mut self) {
        self.controls.clear();
    }

    pub fn contains(&self, id: &ControlId) -> bool {
        self.controls.iter().any(|c| &c.id == id)
    }

    pub fn get(&self, id: &ControlId) -> Option<&Control> {
        self.controls.iter().find(|c| &c.id == id)
    }

    /// Controls in display order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = &ControlId> + '_ {
        self.controls.iter().map(|c| &c.id)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: SlotLayout) {
        self.layout = layout;
    }
}
