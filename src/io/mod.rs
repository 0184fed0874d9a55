//! Input/output helpers.
//!
//! - dataset/pivot/report exports (`export`)
//! - CSV ingest + validation (`ingest`)
//! - run summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
