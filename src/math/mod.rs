//! Numerical helpers: polynomial least squares.

pub mod ols;

pub use ols::*;
