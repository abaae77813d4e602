#![forbid(unsafe_code)]

//! Core vocabulary for the waypoint guided-tour engine.
//!
//! # Role
//! `waypoint-core` is the leaf crate. It owns the viewport geometry the
//! tooltip positioner works in, the [`Side`] a tooltip is placed on, and the
//! host ports ([`Router`], [`AnchorQuery`], [`Highlighter`], [`Notifier`])
//! through which the engine reaches its environment.
//!
//! # How it fits in the system
//! The engine (`waypoint`) is generic over these ports. Hosts implement them
//! over a real router and document; `waypoint-harness` implements them in
//! memory for tests and headless runs.

pub mod geometry;
pub mod ports;
pub mod side;

pub use geometry::{Rect, Size};
pub use ports::{AnchorQuery, Highlighter, NoopNotifier, Notifier, Router, TourNotice};
pub use side::{ParseSideError, Side};
