#![forbid(unsafe_code)]

//! Guided-tour engine.
//!
//! # Role
//! `waypoint` drives a sequence of contextual tooltips across routed pages.
//! It owns the tour position, keeps it in step with client-side navigation,
//! and works out where each tooltip goes and which anchor to highlight.
//!
//! # Primary responsibilities
//! - **[`Catalog`]**: validated, immutable page → step hierarchy.
//! - **[`Tour`]**: the state machine (`start`/`end`/`next`/`previous`,
//!   progress) and the route synchronization bridge (`sync_path`).
//! - **[`anchor`]**: tooltip placement and the single-highlight discipline.
//! - **[`Walkthrough`]**: both of the above wired together with a deferred
//!   layout pass.
//!
//! # How it fits in the system
//! Hosts implement the ports from `waypoint-core` over their router and
//! document, construct one [`Walkthrough`] per application, and feed it
//! [`TourMsg`] values from user input and route changes.

pub mod anchor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod tour;
pub mod walkthrough;

pub use anchor::{Placement, Positioner};
pub use catalog::{Catalog, Page, Position, Step};
pub use config::TourConfig;
#[cfg(feature = "catalog-file")]
pub use error::LoadError;
pub use error::{CatalogError, ConfigError};
pub use tour::{EndReason, SyncOutcome, Tour, TourAdvanceReason, TourEvent, TourSnapshot, TourState};
pub use walkthrough::{TourMsg, Walkthrough};

pub use waypoint_core::{Rect, Side, Size};
