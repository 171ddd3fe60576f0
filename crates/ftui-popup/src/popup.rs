#![forbid(unsafe_code)]

//! Popup state container.
//!
//! [`Popup`] holds everything a renderer needs to draw an anchored floating
//! panel (target, placement, header, body, footer, style flags) plus its
//! open/closed state. It does not draw anything itself.
//!
//! # Invariants
//!
//! 1. A popup starts closed.
//! 2. Listeners and the outbox observe every actual open-state change exactly
//!    once, in order. `show()` on an open popup and `hide()` on a closed one
//!    are silent.
//! 3. Input handling never opens a popup except through a target click, and
//!    only when target clicks are not ignored.
//!
//! # Example
//!
//! ```
//! use ftui_popup::{Control, Overlay, Popup, PopupInput, PopupPosition};
//!
//! let mut popup = Popup::new()
//!     .with_position(PopupPosition::Bottom)
//!     .with_header_title("Filters");
//! popup.footer_mut().add(Control::button("apply", "Apply"));
//! popup.show();
//! assert!(popup.is_open());
//!
//! popup.handle_input(PopupInput::Escape);
//! assert!(!popup.is_open());
//! assert_eq!(popup.take_events().len(), 2);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

use crate::content::Content;
use crate::control::Slot;
use crate::error::{PopupError, Result};
use crate::overlay::{
    ListenerId, OpenChanged, OpenChangedListener, Overlay, PopupEvent, PopupId, TargetId,
};
use crate::placement::{PopupAlignment, PopupPosition, PopupVariant};

static NEXT_POPUP_ID: AtomicU64 = AtomicU64::new(1);

bitflags! {
    /// Behaviour toggles of a popup.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PopupFlags: u8 {
        /// Close when the user clicks inside the popup.
        const CLOSE_ON_CLICK      = 1 << 0;
        /// Close when the page scrolls. Only honoured for modeless popups.
        const CLOSE_ON_SCROLL     = 1 << 1;
        /// Leave the rest of the UI interactive while open.
        const MODELESS            = 1 << 2;
        /// Emphasise the target while open.
        const HIGHLIGHT_TARGET    = 1 << 3;
        /// Target clicks do not toggle the popup.
        const IGNORE_TARGET_CLICK = 1 << 4;
    }
}

/// User input a popup reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupInput {
    Escape,
    /// Click outside both the popup and its target.
    OutsideClick,
    /// Click on the popup body.
    InsideClick,
    Scroll,
    /// Click on the target widget.
    TargetClick,
}

/// Outcome of [`Popup::handle_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Opened,
    Closed,
}

/// Anchored floating panel state.
pub struct Popup {
    id: PopupId,
    target: Option<TargetId>,
    position: PopupPosition,
    alignment: Option<PopupAlignment>,
    flags: PopupFlags,
    variants: Vec<PopupVariant>,
    header_title: String,
    header: Slot,
    footer: Slot,
    content: Vec<Content>,
    open: bool,
    listeners: Vec<(ListenerId, OpenChangedListener)>,
    next_listener: u64,
    events: VecDeque<PopupEvent>,
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popup")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("position", &self.position)
            .field("alignment", &self.alignment)
            .field("flags", &self.flags)
            .field("variants", &self.variants)
            .field("header_title", &self.header_title)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("content", &self.content)
            .field("open", &self.open)
            .field("listeners", &self.listeners.len())
            .field("queued_events", &self.events.len())
            .finish()
    }
}

impl Popup {
    /// A closed, untargeted popup with default placement.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PopupId(NEXT_POPUP_ID.fetch_add(1, Ordering::Relaxed)),
            target: None,
            position: PopupPosition::default(),
            alignment: None,
            flags: PopupFlags::empty(),
            variants: Vec::new(),
            header_title: String::new(),
            header: Slot::new(),
            footer: Slot::new(),
            content: Vec::new(),
            open: false,
            listeners: Vec::new(),
            next_listener: 0,
            events: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: PopupPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: PopupAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: PopupFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_header_title(mut self, title: impl Into<String>) -> Self {
        self.header_title = title.into();
        self
    }

    // --- Accessors ---

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn position(&self) -> PopupPosition {
        self.position
    }

    pub fn alignment(&self) -> Option<PopupAlignment> {
        self.alignment
    }

    pub fn flags(&self) -> PopupFlags {
        self.flags
    }

    pub fn variants(&self) -> &[PopupVariant] {
        &self.variants
    }

    pub fn has_variant(&self, variant: PopupVariant) -> bool {
        self.variants.contains(&variant)
    }

    /// Header title, or an empty string when none was set.
    pub fn header_title(&self) -> &str {
        &self.header_title
    }

    pub fn header(&self) -> &Slot {
        &self.header
    }

    pub fn footer(&self) -> &Slot {
        &self.footer
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Whether the header has anything to render.
    pub fn has_header(&self) -> bool {
        !self.header_title.is_empty() || !self.header.is_empty()
    }

    pub fn is_close_on_click(&self) -> bool {
        self.flags.contains(PopupFlags::CLOSE_ON_CLICK)
    }

    pub fn set_close_on_click(&mut self, close: bool) {
        self.flags.set(PopupFlags::CLOSE_ON_CLICK, close);
    }

    pub fn is_close_on_scroll(&self) -> bool {
        self.flags.contains(PopupFlags::CLOSE_ON_SCROLL)
    }

    /// Has no effect unless the popup is also modeless.
    pub fn set_close_on_scroll(&mut self, close: bool) {
        self.flags.set(PopupFlags::CLOSE_ON_SCROLL, close);
    }

    pub fn is_modeless(&self) -> bool {
        self.flags.contains(PopupFlags::MODELESS)
    }

    pub fn set_modeless(&mut self, modeless: bool) {
        self.flags.set(PopupFlags::MODELESS, modeless);
    }

    pub fn is_highlight_target(&self) -> bool {
        self.flags.contains(PopupFlags::HIGHLIGHT_TARGET)
    }

    pub fn is_ignore_target_click(&self) -> bool {
        self.flags.contains(PopupFlags::IGNORE_TARGET_CLICK)
    }

    // --- Body ---

    pub fn add_content(&mut self, content: impl Into<Content>) {
        self.content.push(content.into());
    }

    /// Insert at `index`; indices past the end append.
    pub fn insert_content(&mut self, index: usize, content: impl Into<Content>) {
        let index = index.min(self.content.len());
        self.content.insert(index, content.into());
    }

    /// # Errors
    ///
    /// Returns [`PopupError::NoContentAt`] when `index` is out of range.
    pub fn remove_content(&mut self, index: usize) -> Result<Content> {
        if index >= self.content.len() {
            return Err(PopupError::NoContentAt {
                index,
                len: self.content.len(),
            });
        }
        Ok(self.content.remove(index))
    }

    pub fn clear_content(&mut self) {
        self.content.clear();
    }

    // --- Open state ---

    /// Open or close the popup.
    pub fn set_opened(&mut self, opened: bool) {
        if self.open == opened {
            return;
        }
        self.open = opened;

        #[cfg(feature = "tracing")]
        self.trace_open_changed();

        let change = OpenChanged {
            popup: self.id,
            opened,
        };
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
        self.events.push_back(PopupEvent::OpenChanged(change));
    }

    /// Apply user input.
    ///
    /// Returns the resulting open-state change, if any.
    pub fn handle_input(&mut self, input: PopupInput) -> Option<PopupAction> {
        let close = match input {
            PopupInput::Escape | PopupInput::OutsideClick => self.open,
            PopupInput::InsideClick => self.open && self.is_close_on_click(),
            PopupInput::Scroll => {
                self.open
                    && self
                        .flags
                        .contains(PopupFlags::CLOSE_ON_SCROLL | PopupFlags::MODELESS)
            }
            PopupInput::TargetClick => {
                if self.is_ignore_target_click() || self.target.is_none() {
                    return None;
                }
                if !self.open {
                    self.set_opened(true);
                    return Some(PopupAction::Opened);
                }
                true
            }
        };

        if close {
            self.set_opened(false);
            Some(PopupAction::Closed)
        } else {
            None
        }
    }

    #[cfg(feature = "tracing")]
    fn trace_open_changed(&self) {
        let _span = tracing::debug_span!(
            "popup.open_changed",
            popup_id = self.id.0,
            opened = self.open,
            listener_count = self.listeners.len(),
            has_target = self.target.is_some()
        )
        .entered();
    }
}

impl Overlay for Popup {
    fn id(&self) -> PopupId {
        self.id
    }

    fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }

    fn set_position(&mut self, position: PopupPosition) {
        self.position = position;
    }

    fn set_alignment(&mut self, alignment: Option<PopupAlignment>) {
        self.alignment = alignment;
    }

    fn set_ignore_target_click(&mut self, ignore: bool) {
        self.flags.set(PopupFlags::IGNORE_TARGET_CLICK, ignore);
    }

    fn set_highlight_target(&mut self, highlight: bool) {
        self.flags.set(PopupFlags::HIGHLIGHT_TARGET, highlight);
    }

    fn add_theme_variant(&mut self, variant: PopupVariant) {
        if !self.variants.contains(&variant) {
            self.variants.push(variant);
        }
    }

    fn set_header_title(&mut self, title: &str) {
        title.clone_into(&mut self.header_title);
    }

    fn header_mut(&mut self) -> &mut Slot {
        &mut self.header
    }

    fn footer_mut(&mut self) -> &mut Slot {
        &mut self.footer
    }

    fn set_content(&mut self, content: Content) {
        self.content.clear();
        self.content.push(content);
    }

    fn show(&mut self) {
        self.set_opened(true);
    }

    fn hide(&mut self) {
        self.set_opened(false);
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn add_open_changed_listener(&mut self, listener: OpenChangedListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_open_changed_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn take_events(&mut self) -> Vec<PopupEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Control;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[cfg(feature = "tracing")]
    use std::sync::{Arc, Mutex};
    #[cfg(feature = "tracing")]
    use tracing::Subscriber;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::Layer;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::layer::{Context, SubscriberExt};

    fn open_popup(flags: PopupFlags) -> Popup {
        let mut popup = Popup::new().with_target(TargetId(1)).with_flags(flags);
        popup.show();
        popup.take_events();
        popup
    }

    #[test]
    fn new_popup_is_closed_and_unique() {
        let a = Popup::new();
        let b = Popup::new();
        assert!(!a.is_open());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.position(), PopupPosition::End);
        assert_eq!(a.alignment(), None);
        assert_eq!(a.header_title(), "");
        assert!(!a.has_header());
    }

    #[test]
    fn show_and_hide_queue_events_once() {
        let mut popup = Popup::new();
        popup.show();
        popup.show();
        popup.hide();
        popup.hide();
        let id = popup.id();
        assert_eq!(
            popup.take_events(),
            vec![
                PopupEvent::OpenChanged(OpenChanged {
                    popup: id,
                    opened: true
                }),
                PopupEvent::OpenChanged(OpenChanged {
                    popup: id,
                    opened: false
                }),
            ]
        );
        assert!(popup.take_events().is_empty());
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut popup = Popup::new();
        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            popup.add_open_changed_listener(Box::new(move |change| {
                log.borrow_mut().push((tag, change.opened));
            }));
        }
        popup.show();
        popup.hide();
        assert_eq!(
            *log.borrow(),
            vec![("a", true), ("b", true), ("a", false), ("b", false)]
        );
    }

    #[test]
    fn removed_listener_stops_firing() {
        let count = Rc::new(RefCell::new(0));
        let mut popup = Popup::new();
        let id = {
            let count = Rc::clone(&count);
            popup.add_open_changed_listener(Box::new(move |_| *count.borrow_mut() += 1))
        };
        popup.show();
        assert!(popup.remove_open_changed_listener(id));
        assert!(!popup.remove_open_changed_listener(id));
        popup.hide();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn escape_and_outside_click_close() {
        for input in [PopupInput::Escape, PopupInput::OutsideClick] {
            let mut popup = open_popup(PopupFlags::empty());
            assert_eq!(popup.handle_input(input), Some(PopupAction::Closed));
            assert!(!popup.is_open());
            assert_eq!(popup.handle_input(input), None);
        }
    }

    #[test]
    fn inside_click_respects_close_on_click() {
        let mut popup = open_popup(PopupFlags::empty());
        assert_eq!(popup.handle_input(PopupInput::InsideClick), None);
        popup.set_close_on_click(true);
        assert_eq!(
            popup.handle_input(PopupInput::InsideClick),
            Some(PopupAction::Closed)
        );
    }

    #[test]
    fn scroll_closes_only_modeless_popups() {
        let mut modal = open_popup(PopupFlags::CLOSE_ON_SCROLL);
        assert_eq!(modal.handle_input(PopupInput::Scroll), None);
        assert!(modal.is_open());

        let mut modeless = open_popup(PopupFlags::CLOSE_ON_SCROLL | PopupFlags::MODELESS);
        assert_eq!(
            modeless.handle_input(PopupInput::Scroll),
            Some(PopupAction::Closed)
        );
    }

    #[test]
    fn target_click_toggles_unless_ignored() {
        let mut popup = Popup::new().with_target(TargetId(3));
        assert_eq!(
            popup.handle_input(PopupInput::TargetClick),
            Some(PopupAction::Opened)
        );
        assert_eq!(
            popup.handle_input(PopupInput::TargetClick),
            Some(PopupAction::Closed)
        );

        popup.set_ignore_target_click(true);
        assert_eq!(popup.handle_input(PopupInput::TargetClick), None);
        assert!(!popup.is_open());
    }

    #[test]
    fn target_click_without_target_is_ignored() {
        let mut popup = Popup::new();
        assert_eq!(popup.handle_input(PopupInput::TargetClick), None);
    }

    #[test]
    fn content_insert_clamps_and_remove_errors() {
        let mut popup = Popup::new();
        popup.add_content("b");
        popup.insert_content(0, "a");
        popup.insert_content(99, "c");
        let texts: Vec<_> = popup.content().iter().filter_map(Content::as_text).collect();
        assert_eq!(texts, ["a", "b", "c"]);

        assert_eq!(popup.remove_content(1).unwrap().as_text(), Some("b"));
        assert_eq!(
            popup.remove_content(5).unwrap_err(),
            PopupError::NoContentAt { index: 5, len: 2 }
        );
        popup.clear_content();
        assert!(popup.content().is_empty());
    }

    #[test]
    fn set_content_replaces_body() {
        let mut popup = Popup::new();
        popup.add_content("old");
        popup.add_content("older");
        popup.set_content(Content::text("new"));
        assert_eq!(popup.content().len(), 1);
        assert_eq!(popup.content()[0].as_text(), Some("new"));
    }

    #[test]
    fn theme_variants_are_deduplicated() {
        let mut popup = Popup::new();
        popup.add_theme_variant(PopupVariant::PointerArrow);
        popup.add_theme_variant(PopupVariant::PointerArrow);
        assert_eq!(popup.variants(), &[PopupVariant::PointerArrow]);
        assert!(popup.has_variant(PopupVariant::PointerArrow));
    }

    #[test]
    fn header_reports_presence() {
        let mut popup = Popup::new();
        popup.header_mut().add(Control::icon("x", "✕"));
        assert!(popup.has_header());

        let titled = Popup::new().with_header_title("Hello");
        assert!(titled.has_header());
        assert_eq!(titled.header_title(), "Hello");
    }

    #[test]
    fn debug_impl_summarises_listeners() {
        let mut popup = Popup::new();
        popup.add_open_changed_listener(Box::new(|_| {}));
        let dbg = format!("{popup:?}");
        assert!(dbg.contains("listeners: 1"));
    }

    #[cfg(feature = "tracing")]
    #[derive(Debug, Default)]
    struct OpenTraceState {
        opened: Vec<bool>,
    }

    #[cfg(feature = "tracing")]
    struct OpenTraceCapture {
        state: Arc<Mutex<OpenTraceState>>,
    }

    #[cfg(feature = "tracing")]
    impl<S> Layer<S> for OpenTraceCapture
    where
        S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::Id,
            _ctx: Context<'_, S>,
        ) {
            if attrs.metadata().name() != "popup.open_changed" {
                return;
            }

            #[derive(Default)]
            struct OpenedVisitor {
                opened: Option<bool>,
            }

            impl tracing::field::Visit for OpenedVisitor {
                fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
                    if field.name() == "opened" {
                        self.opened = Some(value);
                    }
                }

                fn record_debug(&mut self, _field: &tracing::field::Field, _value: &dyn fmt::Debug) {}
            }

            let mut visitor = OpenedVisitor::default();
            attrs.record(&mut visitor);
            if let Some(opened) = visitor.opened {
                self.state.lock().expect("trace state lock").opened.push(opened);
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_open_changed_span_records_state() {
        let state = Arc::new(Mutex::new(OpenTraceState::default()));
        let subscriber = tracing_subscriber::registry().with(OpenTraceCapture {
            state: Arc::clone(&state),
        });
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();

        let mut popup = Popup::new();
        popup.show();
        popup.show();
        popup.hide();

        tracing::callsite::rebuild_interest_cache();
        let snapshot = state.lock().expect("trace state lock");
        assert_eq!(snapshot.opened, vec![true, false]);
    }
}
