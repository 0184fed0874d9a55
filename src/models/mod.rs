//! Parametric load/weather model.
//!
//! Model terms are implemented as small, pure functions so that the generator
//! stays a thin loop of "deterministic term + noise draw".

pub mod params;
pub mod profile;

pub use params::*;
pub use profile::*;
