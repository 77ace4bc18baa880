//! In-memory render tree for tests and headless runs

use crate::render::{rotate_css, Mount, RenderHost, SpriteStyle, VisualElement, PARTICLE_CLASS};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Index of a node in a `HeadlessDocument`
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct NodeId(pub usize);

/// Recorded state of one sprite node
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub id: NodeId,
    pub mount: String,
    pub class: String,
    pub sprite: SpriteStyle,
    /// Inline style, kept in sync with `sprite`
    pub style: String,
    pub attached: bool,
    /// Number of transform updates applied after creation
    pub updates: u32,
}

impl NodeRecord {
    pub fn transform(&self) -> String {
        rotate_css(self.sprite.rotation)
    }
}

#[derive(Default)]
struct DocumentState {
    mounts: HashSet<String>,
    nodes: Vec<NodeRecord>,
}

/// A render tree that keeps sprite nodes in memory.
///
/// Clones share the same tree, so a test can keep one handle for
/// inspection while the simulation holds another.
#[derive(Clone, Default)]
pub struct HeadlessDocument {
    inner: Rc<RefCell<DocumentState>>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with a single mount point already registered
    pub fn with_mount(selector: &str) -> Self {
        let doc = Self::new();
        doc.add_mount(selector);
        doc
    }

    pub fn add_mount(&self, selector: &str) {
        self.inner.borrow_mut().mounts.insert(selector.to_string());
    }

    /// Unregister a mount point. Nodes already created stay as they are.
    pub fn remove_mount(&self, selector: &str) {
        self.inner.borrow_mut().mounts.remove(selector);
    }

    pub fn has_mount(&self, selector: &str) -> bool {
        self.inner.borrow().mounts.contains(selector)
    }

    /// Every node ever created, attached or not
    pub fn node_count(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    /// Nodes still attached to a mount
    pub fn attached_count(&self) -> usize {
        self.inner.borrow().nodes.iter().filter(|n| n.attached).count()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRecord> {
        self.inner.borrow().nodes.get(id.0).cloned()
    }

    /// Attached children of the mount registered as `selector`
    pub fn children(&self, selector: &str) -> Vec<NodeRecord> {
        self.inner
            .borrow()
            .nodes
            .iter()
            .filter(|n| n.attached && n.mount == selector)
            .cloned()
            .collect()
    }
}

impl RenderHost for HeadlessDocument {
    fn resolve_mount(&self, selector: &str) -> Option<Box<dyn Mount>> {
        if !self.has_mount(selector) {
            return None;
        }
        Some(Box::new(HeadlessMount {
            doc: self.inner.clone(),
            selector: selector.to_string(),
        }))
    }
}

struct HeadlessMount {
    doc: Rc<RefCell<DocumentState>>,
    selector: String,
}

impl Mount for HeadlessMount {
    fn append(&mut self, sprite: &SpriteStyle) -> Box<dyn VisualElement> {
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(NodeRecord {
            id,
            mount: self.selector.clone(),
            class: PARTICLE_CLASS.to_string(),
            sprite: sprite.clone(),
            style: sprite.to_css(),
            attached: true,
            updates: 0,
        });
        Box::new(HeadlessElement {
            doc: self.doc.clone(),
            id,
        })
    }
}

struct HeadlessElement {
    doc: Rc<RefCell<DocumentState>>,
    id: NodeId,
}

impl VisualElement for HeadlessElement {
    fn set_transform(&mut self, top: f64, left: f64, rotation_deg: f64) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.nodes.get_mut(self.id.0) {
            node.sprite = node.sprite.with_transform(top, left, rotation_deg);
            node.style = node.sprite.to_css();
            node.updates += 1;
        }
    }

    fn detach(&mut self) {
        if let Some(node) = self.doc.borrow_mut().nodes.get_mut(self.id.0) {
            node.attached = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_selector_resolves_to_none() {
        let doc = HeadlessDocument::with_mount("#stage");
        assert!(doc.resolve_mount("#stage").is_some());
        assert!(doc.resolve_mount("#missing").is_none());
    }

    #[test]
    fn append_update_detach() {
        let doc = HeadlessDocument::with_mount("#stage");
        let mut mount = doc.resolve_mount("#stage").unwrap();
        let mut element = mount.append(&SpriteStyle::new("x.png", 10.0, 0.0, 0.0, 30.0));

        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.children("#stage").len(), 1);
        let node = doc.node(NodeId(0)).unwrap();
        assert_eq!(node.class, "particle");
        assert_eq!(node.sprite.src, "x.png");
        assert!(node.style.contains("top:0px"));

        element.set_transform(-12.0, 4.0, 65.0);
        let node = doc.node(NodeId(0)).unwrap();
        assert_eq!(node.updates, 1);
        assert!(node.style.contains("top:-12px"));
        assert!(node.style.contains("left:4px"));
        assert_eq!(node.transform(), "rotate(65deg)");

        element.detach();
        element.detach();
        assert_eq!(doc.attached_count(), 0);
        assert_eq!(doc.node_count(), 1);
        assert!(doc.children("#stage").is_empty());
    }

    #[test]
    fn removed_mount_stops_resolving() {
        let doc = HeadlessDocument::with_mount("#stage");
        doc.remove_mount("#stage");
        assert!(!doc.has_mount("#stage"));
        assert!(doc.resolve_mount("#stage").is_none());
    }
}
