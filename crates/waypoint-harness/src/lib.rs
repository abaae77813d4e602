#![forbid(unsafe_code)]

//! Test harness for the waypoint tour engine.
//!
//! In-memory implementations of every host port, so tours can run headless:
//!
//! - [`MemoryRouter`]: records navigation and queues change notifications.
//! - [`StaticDom`]: anchors with fixed bounding boxes.
//! - [`RecordingHighlighter`]: tracks lit nodes and every apply/remove call.
//! - [`RecordingNotifier`]: keeps start/end notices.
//!
//! The recording doubles share state between clones, so a test keeps one
//! clone as an observer while the engine owns the other.

pub mod dom;
pub mod jsonl;
pub mod notifier;
pub mod router;

pub use dom::{HighlightOp, RecordingHighlighter, StaticDom};
pub use jsonl::JsonlLogger;
pub use notifier::RecordingNotifier;
pub use router::MemoryRouter;
