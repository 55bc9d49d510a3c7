use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::ui::View;

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

/// Shared handle to a window; UI code is single-threaded.
pub type WindowHandle = Rc<RefCell<Window>>;

/// A frozen picture of a root view, drawn on top of its replacement while a
/// transition plays.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    id: u64,
    pub content: View,
    pub opacity: f32,
    pub scale: f32,
}

impl Snapshot {
    pub fn new(content: View) -> Self {
        Snapshot {
            id: NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed),
            content,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A top-level root container.
#[derive(Debug, Clone, Default)]
pub struct Window {
    label: Option<String>,
    root: Option<View>,
    visible: bool,
    overlays: Vec<Snapshot>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_root(mut self, root: View) -> Self {
        self.root = Some(root);
        self
    }

    /// Marks the window as shown on screen.
    pub fn visible(mut self) -> Self {
        self.visible = true;
        self
    }

    pub fn into_handle(self) -> WindowHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn root(&self) -> Option<&View> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut View> {
        self.root.as_mut()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// A snapshot of the current root; `None` if hidden or empty.
    pub fn snapshot(&self) -> Option<Snapshot> {
        if !self.visible {
            return None;
        }
        self.root.clone().map(Snapshot::new)
    }

    pub fn set_root(&mut self, root: View) {
        self.root = Some(root);
    }

    pub fn add_overlay(&mut self, snapshot: Snapshot) {
        self.overlays.push(snapshot);
    }

    pub fn overlays(&self) -> &[Snapshot] {
        &self.overlays
    }

    pub fn overlay_mut(&mut self, id: u64) -> Option<&mut Snapshot> {
        self.overlays.iter_mut().find(|overlay| overlay.id == id)
    }

    pub fn remove_overlay(&mut self, id: u64) -> Option<Snapshot> {
        let index = self.overlays.iter().position(|overlay| overlay.id == id)?;
        Some(self.overlays.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{View, widgets::Label};

    #[test]
    fn test_hidden_window_has_no_snapshot() {
        let window = Window::new().with_root(View::new(Label::new("key")));
        assert!(window.snapshot().is_none());
        assert!(Window::new().visible().snapshot().is_none());
    }

    #[test]
    fn test_overlays() {
        let mut window = Window::new()
            .with_label("main")
            .with_root(View::container(vec![]))
            .visible();
        let snapshot = window.snapshot().unwrap();
        let id = snapshot.id();
        window.add_overlay(snapshot);
        window.overlay_mut(id).unwrap().opacity = 0.0;
        assert_eq!(window.overlays()[0].opacity, 0.0);
        assert!(window.remove_overlay(id).is_some());
        assert!(window.overlays().is_empty());
        assert!(window.remove_overlay(id).is_none());
        assert_eq!(window.label(), Some("main"));
    }

    #[test]
    fn test_snapshot_ids_are_unique() {
        let a = Snapshot::new(View::default());
        let b = Snapshot::new(View::default());
        assert_ne!(a.id(), b.id());
    }
}
