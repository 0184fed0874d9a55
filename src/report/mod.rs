//! Reporting: aggregation over enriched tables and formatted output.

pub mod aggregate;
pub mod format;

pub use aggregate::*;
pub use format::*;
