#![forbid(unsafe_code)]

//! Host ports: the capabilities the tour engine consumes from its environment.
//!
//! The engine never touches a browser, router, or toast system directly. A
//! host implements these traits over its real platform (a web router, the
//! DOM, a notification center); tests implement them in memory.
//!
//! All ports are infallible from the engine's point of view. A host that can
//! fail (a detached document, a router that rejects a path) degrades inside
//! its own implementation.

use std::fmt;

use crate::geometry::{Rect, Size};

/// Client-side routing capability.
pub trait Router {
    /// The current route path (e.g. `/dashboard`).
    fn current_path(&self) -> String;

    /// Request navigation to `path`.
    ///
    /// From the engine's point of view navigation completes synchronously:
    /// `current_path()` reflects `path` once this returns.
    fn navigate(&mut self, path: &str);

    /// Next pending path-change notification, oldest first.
    ///
    /// This is the routing subscription expressed as a pull stream. Hosts
    /// that push notifications directly into the engine keep the default.
    fn poll_path_change(&mut self) -> Option<String> {
        None
    }
}

/// Anchor lookup over a laid-out document snapshot.
pub trait AnchorQuery {
    /// Opaque handle to a resolved node.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Resolve an anchor id to a mounted node, or `None` when absent.
    fn resolve(&self, anchor_id: &str) -> Option<Self::Node>;

    /// Bounding box of `node` in viewport coordinates.
    fn bounding_box(&self, node: &Self::Node) -> Rect;

    /// Current viewport size, used for centered placement.
    fn viewport(&self) -> Size;
}

/// Visual highlight marker on anchor nodes.
///
/// Implementations must be idempotent: applying twice equals applying once,
/// and removing an absent highlight is a no-op.
pub trait Highlighter {
    type Node: Clone + PartialEq + fmt::Debug;

    fn apply_highlight(&mut self, node: &Self::Node);

    fn remove_highlight(&mut self, node: &Self::Node);
}

/// Lifecycle notices sent to the host's notification collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourNotice {
    Started,
    Ended,
}

impl TourNotice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for TourNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional notification capability (toasts, status bars).
pub trait Notifier {
    fn notify(&mut self, notice: TourNotice, message: &str);
}

/// Notifier that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&mut self, _notice: TourNotice, _message: &str) {}
}

impl<T: Router + ?Sized> Router for Box<T> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn navigate(&mut self, path: &str) {
        (**self).navigate(path);
    }

    fn poll_path_change(&mut self) -> Option<String> {
        (**self).poll_path_change()
    }
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify(&mut self, notice: TourNotice, message: &str) {
        (**self).notify(notice, message);
    }
}

impl<T: Highlighter + ?Sized> Highlighter for Box<T> {
    type Node = T::Node;

    fn apply_highlight(&mut self, node: &Self::Node) {
        (**self).apply_highlight(node);
    }

    fn remove_highlight(&mut self, node: &Self::Node) {
        (**self).remove_highlight(node);
    }
}
