use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::EtcConfig;
use crate::error::EtcError;
use crate::services::{reference_calculator, rounded_seconds, ExposureCalculator};

fn to_py_err(err: EtcError) -> PyErr {
    match err {
        EtcError::ConfigurationFile(msg) => PyIOError::new_err(msg),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Exposure time needed to reach the reference SNR
///
/// Args:
///     filter: Filter code, one of U, B, V, R, I, H
///     mag: Magnitude of the star in that filter
///
/// Returns:
///     float: Exposure time in seconds
///
/// Raises:
///     ValueError: Unknown filter, non-finite magnitude or unreachable SNR
///
/// Example:
///     >>> import etc_rust
///     >>> etc_rust.expose("V", 10.0)
///     13.35...
#[pyfunction]
pub fn expose(filter: &str, mag: f64) -> PyResult<f64> {
    reference_calculator()
        .expose(filter, mag)
        .map(|t| t.value())
        .map_err(to_py_err)
}

/// Exposure time rounded to whole seconds, as written to schedule files
#[pyfunction]
pub fn expose_rounded(filter: &str, mag: f64) -> PyResult<u64> {
    reference_calculator()
        .expose(filter, mag)
        .map(rounded_seconds)
        .map_err(to_py_err)
}

/// Build the FILTER and DURATION fields for a schedule
///
/// Args:
///     filters: Comma-separated filter selection, e.g. "B,V,R,I,H"
///     mag: Magnitude of the star
///     config_path: Optional etc.toml describing another instrument
///
/// Returns:
///     tuple[str, str, list[str]]: Concatenated filter codes, comma-separated
///     durations in seconds, and the rejected filter tokens
///
/// Example:
///     >>> etc_rust.plan_exposures("B,V,X", 10.0)
///     ('BV', '59,13', ['X'])
#[pyfunction]
#[pyo3(signature = (filters, mag, config_path=None))]
pub fn plan_exposures(
    filters: &str,
    mag: f64,
    config_path: Option<&str>,
) -> PyResult<(String, String, Vec<String>)> {
    let plan = match config_path {
        Some(path) => {
            let config = EtcConfig::from_file(path).map_err(to_py_err)?;
            ExposureCalculator::new(config)
                .and_then(|calculator| calculator.plan_exposures(filters, mag))
        }
        None => reference_calculator().plan_exposures(filters, mag),
    }
    .map_err(to_py_err)?;

    Ok((plan.filters, plan.durations, plan.rejected))
}
