//! Exposure time calculator for a small-telescope CCD scheduler.
//!
//! Given a filter and a stellar magnitude, estimates how long to expose to
//! reach a target signal-to-noise ratio, and assembles the per-filter
//! durations of an observation schedule.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod config;
pub mod error;
pub mod models;
pub mod photometry;
pub mod services;
#[cfg(feature = "python")]
pub mod python;

pub use config::EtcConfig;
pub use error::{EtcError, EtcResult};
pub use models::{Filter, InstrumentConfig};
pub use services::{compute_exposure_time, ExposureCalculator};

/// Exposure Time Calculator - Python extension module
#[cfg(feature = "python")]
#[pymodule]
fn etc_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::expose, m)?)?;
    m.add_function(wrap_pyfunction!(python::expose_rounded, m)?)?;
    m.add_function(wrap_pyfunction!(python::plan_exposures, m)?)?;
    Ok(())
}
