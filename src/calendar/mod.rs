//! Calendar helpers: the hourly timeline and the fixed holiday table.

pub mod holidays;
pub mod timeline;

pub use holidays::*;
pub use timeline::*;
