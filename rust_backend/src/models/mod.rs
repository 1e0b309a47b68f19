//! Domain models: filters and instrument configuration.

pub mod filter;
pub mod instrument;

pub use filter::*;
pub use instrument::*;
