#![forbid(unsafe_code)]

//! Command-line demo for the waypoint tour engine.
//!
//! Runs a scripted session of the sample health-coaching tour against the
//! in-memory host from `waypoint-harness`, printing one line (or JSON object)
//! per action.

pub mod cli;
pub mod data;
pub mod error;
pub mod script;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
