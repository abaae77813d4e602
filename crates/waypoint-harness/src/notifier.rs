#![forbid(unsafe_code)]

//! Recording notifier.

use std::cell::RefCell;
use std::rc::Rc;

use waypoint_core::{Notifier, TourNotice};

/// Notifier that keeps every notice it receives. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<(TourNotice, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(TourNotice, String)> {
        self.notices.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<TourNotice> {
        self.notices.borrow().iter().map(|(n, _)| *n).collect()
    }

    pub fn clear(&self) {
        self.notices.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: TourNotice, message: &str) {
        self.notices.borrow_mut().push((notice, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_log() {
        let observer = RecordingNotifier::new();
        let mut sink = observer.clone();
        sink.notify(TourNotice::Started, "hi");
        sink.notify(TourNotice::Ended, "bye");
        assert_eq!(observer.kinds(), vec![TourNotice::Started, TourNotice::Ended]);
        assert_eq!(observer.notices()[1].1, "bye");
        observer.clear();
        assert!(observer.notices().is_empty());
    }
}
