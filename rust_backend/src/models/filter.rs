//! Photometric filters and their per-band parameters.
//!
//! Each supported broadband filter carries three constants used by the noise
//! model: the atmospheric extinction coefficient (magnitudes per airmass), the
//! photon flux of a zero-magnitude Vega-like star above the atmosphere
//! (photons cm⁻² s⁻¹), and the CCD quantum efficiency at the band's central
//! wavelength.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EtcError, EtcResult};

/// Supported photometric filter.
///
/// # Examples
///
/// ```
/// use etc_rust::models::Filter;
///
/// let filter: Filter = "V".parse().unwrap();
/// assert_eq!(filter, Filter::V);
/// assert!("X".parse::<Filter>().is_err());
/// assert!("v".parse::<Filter>().is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Filter {
    U,
    B,
    V,
    R,
    I,
    H,
}

/// Per-filter constants consumed by the noise budget.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParameters {
    /// Atmospheric extinction coefficient (mag / airmass)
    pub extinction_coeff: f64,
    /// Photons cm⁻² s⁻¹ from a magnitude-zero star above the atmosphere
    pub zero_mag_flux: f64,
    /// Detector quantum efficiency (0 - 1)
    pub quantum_efficiency: f64,
}

impl Filter {
    /// All supported filters in the order the schedule form lists them.
    pub const ALL: [Filter; 6] = [
        Filter::U,
        Filter::B,
        Filter::V,
        Filter::R,
        Filter::I,
        Filter::H,
    ];

    /// Single-letter code used in schedule files.
    pub fn code(self) -> &'static str {
        match self {
            Filter::U => "U",
            Filter::B => "B",
            Filter::V => "V",
            Filter::R => "R",
            Filter::I => "I",
            Filter::H => "H",
        }
    }

    /// Returns the fixed photometric constants for this filter.
    pub fn parameters(self) -> FilterParameters {
        let (extinction_coeff, zero_mag_flux, quantum_efficiency) = match self {
            Filter::U => (0.6, 5.5e5, 0.28),
            Filter::B => (0.4, 3.91e5, 0.45),
            Filter::V => (0.2, 8.66e5, 0.65),
            Filter::R => (0.1, 1.1e6, 0.6),
            Filter::I => (0.08, 6.75e5, 0.48),
            Filter::H => (0.1, 9.83e5, 0.58),
        };
        FilterParameters {
            extinction_coeff,
            zero_mag_flux,
            quantum_efficiency,
        }
    }
}

/// Look up the parameters for a filter given by its text code.
///
/// Unknown codes are rejected before any arithmetic happens. Codes must match
/// exactly: `"v"` or `" V"` are not filters.
///
/// # Arguments
/// * `code` - Filter code, e.g. `"V"`
///
/// # Returns
/// * `Ok(FilterParameters)` for a supported filter
/// * `Err(EtcError::InvalidFilter)` otherwise
pub fn lookup(code: &str) -> EtcResult<FilterParameters> {
    code.parse::<Filter>().map(Filter::parameters)
}

impl FromStr for Filter {
    type Err = EtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(Filter::U),
            "B" => Ok(Filter::B),
            "V" => Ok(Filter::V),
            "R" => Ok(Filter::R),
            "I" => Ok(Filter::I),
            "H" => Ok(Filter::H),
            _ => Err(EtcError::InvalidFilter(s.to_string())),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
