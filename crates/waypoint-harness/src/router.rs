#![forbid(unsafe_code)]

//! In-memory router.

use std::collections::VecDeque;

use tracing::trace;
use waypoint_core::Router;

/// A router that records every navigation and queues change notifications.
///
/// Both engine-requested navigation ([`Router::navigate`]) and simulated user
/// navigation ([`MemoryRouter::visit`]) queue a notification, mirroring a
/// browser router that reports every location change to its subscribers.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouter {
    path: String,
    history: Vec<String>,
    pending: VecDeque<String>,
}

impl MemoryRouter {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            history: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Simulate the user following a link the tour did not request.
    pub fn visit(&mut self, path: impl Into<String>) {
        let path = path.into();
        trace!(path = %path, "external navigation");
        self.change_to(path);
    }

    /// Paths navigated to so far, oldest first, both engine and user initiated.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    fn change_to(&mut self, path: String) {
        self.path.clone_from(&path);
        self.history.push(path.clone());
        self.pending.push_back(path);
    }
}

impl Router for MemoryRouter {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn navigate(&mut self, path: &str) {
        self.change_to(path.to_string());
    }

    fn poll_path_change(&mut self) -> Option<String> {
        self.pending.pop_front()
    }
}
