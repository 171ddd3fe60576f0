#![forbid(unsafe_code)]

//! In-memory overlay host.
//!
//! [`PopupLayer`] knows which container each registered target lives in and
//! records where every popup it attached went. It is the host used by the
//! headless runtime and by tests; a renderer reads [`PopupLayer::children`] to
//! decide which popups to paint over which container.

use ahash::AHashMap;

use crate::overlay::{AttachPoint, ContainerId, Overlay, OverlayHost, PopupId, TargetId};
use crate::popup::Popup;

/// Target registry plus popup attachment table.
#[derive(Debug, Default)]
pub struct PopupLayer {
    parents: AHashMap<TargetId, ContainerId>,
    attached: AHashMap<PopupId, ContainerId>,
    /// Attachment order, so `children` is deterministic.
    order: Vec<PopupId>,
}

impl PopupLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `target` lives directly under `parent`.
    pub fn register_target(&mut self, target: TargetId, parent: ContainerId) {
        self.parents.insert(target, parent);
    }

    /// Forget a target. Popups already attached next to it stay attached.
    pub fn unregister_target(&mut self, target: TargetId) -> Option<ContainerId> {
        self.parents.remove(&target)
    }

    pub fn parent_of(&self, target: TargetId) -> Option<ContainerId> {
        self.parents.get(&target).copied()
    }

    /// Container a popup is attached under, if any.
    pub fn attachment(&self, popup: PopupId) -> Option<ContainerId> {
        self.attached.get(&popup).copied()
    }

    /// Popups attached under `container`, in attachment order.
    pub fn children(&self, container: ContainerId) -> Vec<PopupId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.attached.get(id) == Some(&container))
            .collect()
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    fn resolve(&self, point: AttachPoint) -> Option<ContainerId> {
        match point {
            AttachPoint::Root => Some(ContainerId::ROOT),
            AttachPoint::SiblingOf(target) => self.parent_of(target),
        }
    }
}

impl OverlayHost for PopupLayer {
    type Overlay = Popup;

    fn create(&mut self) -> Popup {
        Popup::new()
    }

    fn attach(&mut self, overlay: &mut Popup, point: AttachPoint) -> bool {
        let Some(container) = self.resolve(point) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                popup_id = overlay.id().0,
                ?point,
                "attach point unresolved; popup left detached"
            );
            return false;
        };

        let id = overlay.id();
        if self.attached.insert(id, container).is_none() {
            self.order.push(id);
        }
        true
    }

    fn detach(&mut self, overlay: &mut Popup) {
        let id = overlay.id();
        if self.attached.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
        }
    }
}
