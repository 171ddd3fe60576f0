#![forbid(unsafe_code)]

//! Body payloads a popup can carry.
//!
//! Plain text gets promoted to a [`TextBlock`] with the padding and minimum
//! width a walkthrough bubble expects. Anything richer travels as
//! [`CustomContent`], an opaque shared payload the renderer downcasts.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Minimum width, in cells, of promoted text blocks.
pub const TEXT_BLOCK_MIN_WIDTH: u16 = 15;

/// Padding in cells around a block of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Padding {
    /// Create padding from explicit edges.
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Total horizontal padding.
    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical padding.
    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

/// Literal text styled as a popup body block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBlock {
    pub text: String,
    pub padding: Padding,
    pub min_width: u16,
}

impl TextBlock {
    /// Promote `text` to a block with the default body styling.
    ///
    /// No top padding: the header already separates the body from the edge.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            padding: Padding::new(0, 1, 1, 1),
            min_width: TEXT_BLOCK_MIN_WIDTH,
        }
    }

    /// Override the padding.
    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Override the minimum width.
    #[must_use]
    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = min_width;
        self
    }
}

/// Opaque renderable payload shared between a step and the popups built for it.
///
/// Cloning shares the payload rather than copying it.
#[derive(Clone)]
pub struct CustomContent {
    payload: Rc<dyn Any>,
}

impl CustomContent {
    /// Wrap an arbitrary renderable value.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            payload: Rc::new(value),
        }
    }

    /// Borrow the payload as `T`, if that is what it holds.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Whether two handles share the same payload.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for CustomContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomContent").finish_non_exhaustive()
    }
}

/// A popup body payload.
#[derive(Debug, Clone)]
pub enum Content {
    /// Styled literal text.
    Text(TextBlock),
    /// Arbitrary renderable sub-tree.
    Custom(CustomContent),
}

impl Content {
    /// Promote literal text to a styled block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextBlock::new(text))
    }

    /// Wrap an arbitrary renderable value.
    pub fn custom<T: Any>(value: T) -> Self {
        Self::Custom(CustomContent::new(value))
    }

    /// The text, when this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(block) => Some(block.text.as_str()),
            Self::Custom(_) => None,
        }
    }
}

impl From<TextBlock> for Content {
    fn from(block: TextBlock) -> Self {
        Self::Text(block)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_promotion_applies_body_styling() {
        let block = TextBlock::new("Welcome");
        assert_eq!(block.text, "Welcome");
        assert_eq!(block.padding, Padding::new(0, 1, 1, 1));
        assert_eq!(block.min_width, TEXT_BLOCK_MIN_WIDTH);
        assert_eq!(block.padding.horizontal(), 2);
        assert_eq!(block.padding.vertical(), 1);
    }

    #[test]
    fn custom_content_downcasts() {
        #[derive(Debug, PartialEq)]
        struct Chart(u32);

        let content = CustomContent::new(Chart(7));
        assert_eq!(content.downcast_ref::<Chart>(), Some(&Chart(7)));
        assert!(content.downcast_ref::<String>().is_none());
    }

    #[test]
    fn custom_content_clone_shares_payload() {
        let a = CustomContent::new(vec![1u8, 2, 3]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&CustomContent::new(vec![1u8, 2, 3])));
    }

    #[test]
    fn content_as_text() {
        assert_eq!(Content::from("hi").as_text(), Some("hi"));
        assert_eq!(Content::custom(1u8).as_text(), None);
    }

    #[test]
    fn custom_debug_does_not_leak_payload() {
        let dbg = format!("{:?}", Content::custom(42u64));
        assert!(dbg.contains("CustomContent"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn text_block_json_keeps_styling() {
        let block = TextBlock::new("Welcome aboard");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["text"], "Welcome aboard");
        assert_eq!(value["padding"]["top"], 0);
        assert_eq!(value["padding"]["left"], 1);
        assert_eq!(value["min_width"], u64::from(TEXT_BLOCK_MIN_WIDTH));

        let back: TextBlock = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }
}
