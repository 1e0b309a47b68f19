//! Photometric noise model and exposure time solver.
//!
//! The pipeline runs in three steps:
//!
//! - [`aperture`]: fraction of the PSF captured by the aperture
//! - [`budget`]: star, sky and read-noise electrons for a filter and magnitude
//! - [`solver`]: closed-form exposure time for a target SNR
//!
//! # Example
//!
//! ```
//! use etc_rust::models::{Filter, InstrumentConfig, IntegrationSettings};
//! use etc_rust::photometry::{solve_exposure_time, NoiseBudget};
//!
//! let instrument = InstrumentConfig::default();
//! let budget = NoiseBudget::build(Filter::V, 10.0, &instrument, &IntegrationSettings::coarse())
//!     .unwrap();
//! let t = solve_exposure_time(&budget, instrument.target_snr).unwrap();
//! assert!(t.value() > 10.0 && t.value() < 20.0);
//! ```

pub mod aperture;
pub mod budget;
pub mod solver;

pub use aperture::{fraction_inside, fraction_inside_pixels, FWHM_PER_SIGMA};
pub use budget::{pogson, NoiseBudget};
pub use solver::solve_exposure_time;
