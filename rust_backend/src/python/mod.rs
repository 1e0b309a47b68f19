//! Python bindings for the exposure time calculator.
//!
//! This module exposes the calculator to the Flask scheduling UI via PyO3.
//! Build with the `python` feature; the functions are available in the
//! `etc_rust` Python module after installation.
//!
//! # Modules
//!
//! - [`exposure`]: Exposure times and per-filter plans

pub mod exposure;

pub use exposure::*;
