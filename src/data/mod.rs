//! Data production: generation, enrichment and label tables.

pub mod enrich;
pub mod generator;
pub mod locale;

pub use enrich::{enrich, enrich_record};
pub use generator::{GeneratorOutput, NoProgress, Progress, generate, generate_detailed, generate_with_progress};
