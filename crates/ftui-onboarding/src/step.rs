#![forbid(unsafe_code)]

//! One stop of a walkthrough.
//!
//! An [`OnboardingStep`] describes what the step's popup shows and where it
//! points. Before-show hooks get the freshly built popup right before it opens
//! and may adjust it, e.g. to add extra footer controls.

use std::fmt;

use ftui_popup::{Content, PopupAlignment, PopupPosition, TargetId, TextBlock};

use crate::error::HookError;

/// Hook run against a step's popup just before it is shown.
pub type BeforeShowHook<O> = Box<dyn FnMut(&mut O) -> Result<(), HookError>>;

/// Registration handle for a before-show hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// Definition of a single walkthrough step, generic over the popup type its
/// hooks receive.
pub struct OnboardingStep<O> {
    target: Option<TargetId>,
    position: PopupPosition,
    alignment: Option<PopupAlignment>,
    header: Option<String>,
    content: Option<Content>,
    hooks: Vec<(HookId, BeforeShowHook<O>)>,
    next_hook: u64,
}

impl<O> fmt::Debug for OnboardingStep<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnboardingStep")
            .field("target", &self.target)
            .field("position", &self.position)
            .field("alignment", &self.alignment)
            .field("header", &self.header)
            .field("content", &self.content)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl<O> OnboardingStep<O> {
    /// A step pointing at `target`, or a centered generic dialog for `None`.
    #[must_use]
    pub fn new(target: Option<TargetId>) -> Self {
        Self {
            target,
            position: PopupPosition::End,
            alignment: Some(PopupAlignment::Center),
            header: None,
            content: None,
            hooks: Vec::new(),
            next_hook: 0,
        }
    }

    #[must_use]
    pub fn targeted(target: TargetId) -> Self {
        Self::new(Some(target))
    }

    #[must_use]
    pub fn untargeted() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn with_position(mut self, position: PopupPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Option<PopupAlignment>) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add a hook, builder style.
    #[must_use]
    pub fn with_before_show_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut O) -> Result<(), HookError> + 'static,
    {
        self.add_before_show_hook(hook);
        self
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }

    pub fn position(&self) -> PopupPosition {
        self.position
    }

    pub fn set_position(&mut self, position: PopupPosition) {
        self.position = position;
    }

    pub fn alignment(&self) -> Option<PopupAlignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Option<PopupAlignment>) {
        self.alignment = alignment;
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn set_header(&mut self, header: Option<String>) {
        self.header = header;
    }

    /// `None` until content is set; such a step shows an empty popup.
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: impl Into<Content>) {
        self.content = Some(content.into());
    }

    /// Promote `text` to a styled text block and use it as content.
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.content = Some(Content::Text(TextBlock::new(text)));
    }

    /// Register a hook. Hooks run in registration order.
    pub fn add_before_show_hook<F>(&mut self, hook: F) -> HookId
    where
        F: FnMut(&mut O) -> Result<(), HookError> + 'static,
    {
        let id = HookId(self.next_hook);
        self.next_hook += 1;
        self.hooks.push((id, Box::new(hook)));
        id
    }

    /// Returns `false` if no hook with `id` is registered.
    pub fn remove_before_show_hook(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(hid, _)| *hid != id);
        self.hooks.len() != before
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Run every hook against `overlay`, in registration order.
    ///
    /// # Errors
    ///
    /// The first failing hook stops the run and its error is returned; later
    /// hooks do not run.
    pub fn fire_before_show(&mut self, overlay: &mut O) -> Result<(), HookError> {
        for (_, hook) in &mut self.hooks {
            hook(&mut *overlay)?;
        }
        Ok(())
    }
}
