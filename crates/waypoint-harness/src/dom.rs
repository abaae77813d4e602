#![forbid(unsafe_code)]

//! In-memory document: anchors with fixed bounding boxes, and a recording
//! highlighter.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use waypoint_core::{AnchorQuery, Highlighter, Rect, Size};

/// A laid-out document snapshot keyed by anchor id.
#[derive(Debug, Clone)]
pub struct StaticDom {
    nodes: BTreeMap<String, Rect>,
    viewport: Size,
}

impl Default for StaticDom {
    fn default() -> Self {
        Self::new(Size::new(1280.0, 800.0))
    }
}

impl StaticDom {
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: BTreeMap::new(),
            viewport,
        }
    }

    #[must_use]
    pub fn with_node(mut self, anchor_id: impl Into<String>, bounds: Rect) -> Self {
        self.insert(anchor_id, bounds);
        self
    }

    pub fn insert(&mut self, anchor_id: impl Into<String>, bounds: Rect) {
        self.nodes.insert(anchor_id.into(), bounds);
    }

    /// Unmount a node, as when its page is navigated away from.
    pub fn remove(&mut self, anchor_id: &str) -> Option<Rect> {
        self.nodes.remove(anchor_id)
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}

impl AnchorQuery for StaticDom {
    type Node = String;

    fn resolve(&self, anchor_id: &str) -> Option<String> {
        self.nodes.contains_key(anchor_id).then(|| anchor_id.to_string())
    }

    fn bounding_box(&self, node: &String) -> Rect {
        self.nodes.get(node).copied().unwrap_or_default()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

/// One call made on a [`RecordingHighlighter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightOp {
    Apply(String),
    Remove(String),
}

#[derive(Debug, Default)]
struct HighlightState {
    lit: Vec<String>,
    ops: Vec<HighlightOp>,
}

/// Highlighter that records calls and tracks which nodes are currently lit.
///
/// Clones share state, so a test can keep one clone while the engine owns
/// another. Apply and remove are idempotent on the lit set.
#[derive(Debug, Clone, Default)]
pub struct RecordingHighlighter {
    state: Rc<RefCell<HighlightState>>,
}

impl RecordingHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes currently highlighted.
    pub fn lit(&self) -> Vec<String> {
        self.state.borrow().lit.clone()
    }

    pub fn ops(&self) -> Vec<HighlightOp> {
        self.state.borrow().ops.clone()
    }

    /// Largest number of nodes that were ever lit at once.
    pub fn max_concurrent(&self) -> usize {
        let state = self.state.borrow();
        let mut lit = 0usize;
        let mut max = 0usize;
        let mut seen: Vec<&str> = Vec::new();
        for op in &state.ops {
            match op {
                HighlightOp::Apply(n) if !seen.contains(&n.as_str()) => {
                    seen.push(n);
                    lit += 1;
                    max = max.max(lit);
                }
                HighlightOp::Remove(n) => {
                    if let Some(i) = seen.iter().position(|s| *s == n.as_str()) {
                        seen.remove(i);
                        lit -= 1;
                    }
                }
                HighlightOp::Apply(_) => {}
            }
        }
        max
    }
}

impl Highlighter for RecordingHighlighter {
    type Node = String;

    fn apply_highlight(&mut self, node: &String) {
        let mut state = self.state.borrow_mut();
        state.ops.push(HighlightOp::Apply(node.clone()));
        if !state.lit.contains(node) {
            state.lit.push(node.clone());
        }
    }

    fn remove_highlight(&mut self, node: &String) {
        let mut state = self.state.borrow_mut();
        state.ops.push(HighlightOp::Remove(node.clone()));
        state.lit.retain(|n| n != node);
    }
}
