//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration enums (`Preset`, `GenerationMode`, `Locale`)
//! - generated records and tables (`LoadRecord`, `LoadTable`)
//! - enrichment outputs (`EnrichedRecord`, `EnrichedLoadTable`, `DayType`)

pub mod types;

pub use types::*;
