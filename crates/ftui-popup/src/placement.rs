#![forbid(unsafe_code)]

//! Placement vocabulary shared by popups and anything that configures them.
//!
//! Each value maps to a stable property string so that hosts which persist or
//! mirror popup state (config files, remote renderers) use one spelling.

/// Preferred side of the target on which the popup opens.
///
/// The renderer is free to flip to the opposite side when there is not enough
/// room; this only records the preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PopupPosition {
    /// Below the target, flipping above when space runs out.
    Bottom,
    /// After the target in reading order (right in LTR, left in RTL).
    #[default]
    End,
}

impl PopupPosition {
    /// All positions, in declaration order.
    pub const ALL: [Self; 2] = [Self::Bottom, Self::End];

    /// Stable property string for this position.
    #[must_use]
    pub const fn property_value(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::End => "end",
        }
    }

    /// Parse a property string. Unknown values yield `None`.
    #[must_use]
    pub fn from_property_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|position| position.property_value() == value)
    }
}

/// Cross-axis alignment of the popup relative to its target.
///
/// Popups carry `Option<PopupAlignment>`; `None` leaves alignment unset and the
/// renderer falls back to aligning with the target's start edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PopupAlignment {
    /// Centered on the target.
    #[default]
    Center,
}

impl PopupAlignment {
    /// All alignments, in declaration order.
    pub const ALL: [Self; 1] = [Self::Center];

    /// Stable property string for this alignment.
    #[must_use]
    pub const fn property_value(self) -> &'static str {
        match self {
            Self::Center => "center",
        }
    }

    /// Parse a property string. Unknown values yield `None`.
    #[must_use]
    pub fn from_property_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|alignment| alignment.property_value() == value)
    }
}

/// Theme variants a popup can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PopupVariant {
    /// Draw a small arrow pointing from the popup at its target.
    PointerArrow,
}

impl PopupVariant {
    /// Variant name as understood by the theme layer.
    #[must_use]
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::PointerArrow => "pointer-arrow",
        }
    }
}
