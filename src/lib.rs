//! `gridload-synth` library crate.
//!
//! The binary (`gridload`) is a thin wrapper around this library so that:
//!
//! - the generator and analysis views are testable without spawning processes
//! - exports can be produced and re-ingested programmatically
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod calendar;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod telemetry;
pub mod tui;
