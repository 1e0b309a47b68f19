//! Service layer for exposure estimation.
//!
//! This module sits between the photometric model and its callers (the
//! command line tool and the Python bindings). It binds the model to a
//! validated configuration, applies the exposure limits and assembles
//! per-filter plans for the schedule form.

pub mod exposure;
pub mod plan;

pub use exposure::{rounded_seconds, ExposureCalculator, ExposureEstimate};
pub use plan::{parse_filter_list, ExposurePlan, DEFAULT_FILTER_SELECTION};

use once_cell::sync::Lazy;
use qtty::Seconds;

use crate::error::EtcResult;
use crate::models::Filter;

/// Process-wide calculator for the reference instrument.
static REFERENCE_CALCULATOR: Lazy<ExposureCalculator> = Lazy::new(ExposureCalculator::default);

/// Calculator for the reference instrument, shared by all threads.
pub fn reference_calculator() -> &'static ExposureCalculator {
    &REFERENCE_CALCULATOR
}

/// Exposure time for `filter` at `magnitude` on the reference instrument.
///
/// # Example
/// ```
/// use etc_rust::models::Filter;
/// use etc_rust::services::compute_exposure_time;
///
/// let t = compute_exposure_time(Filter::R, 10.0).unwrap();
/// assert!(t.value() > 9.0 && t.value() < 11.0);
/// ```
pub fn compute_exposure_time(filter: Filter, magnitude: f64) -> EtcResult<Seconds> {
    REFERENCE_CALCULATOR.compute_exposure_time(filter, magnitude)
}
