//! Exposure time estimation for a configured instrument.
//!
//! [`ExposureCalculator`] owns a validated, read-only [`EtcConfig`] and runs
//! the full pipeline (aperture fraction, noise budget, SNR solve) for each
//! request. It holds no mutable state and can be shared freely between
//! threads.

use qtty::Seconds;
use serde::{Deserialize, Serialize};

use crate::config::EtcConfig;
use crate::error::{EtcError, EtcResult};
use crate::models::{Filter, InstrumentConfig};
use crate::photometry::{fraction_inside, solve_exposure_time, NoiseBudget};

/// Full result of one exposure estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureEstimate {
    pub filter: Filter,
    pub magnitude: f64,
    pub aperture_fraction: f64,
    pub budget: NoiseBudget,
    pub exposure: Seconds,
}

impl ExposureEstimate {
    /// Exposure rounded to whole seconds, as written to schedule files.
    pub fn rounded_seconds(&self) -> u64 {
        rounded_seconds(self.exposure)
    }
}

/// Round an exposure to a non-negative whole number of seconds.
///
/// Halves round away from zero.
pub fn rounded_seconds(exposure: Seconds) -> u64 {
    let value = exposure.value();
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Exposure time calculator bound to one instrument configuration.
///
/// # Examples
///
/// ```
/// use etc_rust::config::EtcConfig;
/// use etc_rust::models::{Filter, IntegrationSettings};
/// use etc_rust::services::ExposureCalculator;
///
/// let config = EtcConfig { integration: IntegrationSettings::coarse(), ..Default::default() };
/// let calculator = ExposureCalculator::new(config).unwrap();
/// let t = calculator.compute_exposure_time(Filter::V, 10.0).unwrap();
/// assert_eq!(t.value().round(), 13.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExposureCalculator {
    config: EtcConfig,
}

impl ExposureCalculator {
    /// Create a calculator after validating `config`.
    pub fn new(config: EtcConfig) -> EtcResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Calculator for `instrument` with default integration settings and limits.
    pub fn with_instrument(instrument: InstrumentConfig) -> EtcResult<Self> {
        Self::new(EtcConfig {
            instrument,
            ..EtcConfig::default()
        })
    }

    pub fn config(&self) -> &EtcConfig {
        &self.config
    }

    /// Fraction of the star's light the configured aperture collects.
    ///
    /// Depends only on the instrument and integration settings, so it is the
    /// same for every filter and magnitude.
    pub fn aperture_fraction(&self) -> EtcResult<f64> {
        let instrument = &self.config.instrument;
        fraction_inside(
            instrument.fwhm,
            instrument.aperture_radius,
            instrument.pixel_scale,
            &self.config.integration,
        )
    }

    /// Expected electrons for `filter` at `magnitude` on this instrument.
    ///
    /// The exposure limits are not applied: a budget below the signal floor
    /// is still returned.
    pub fn noise_budget(&self, filter: Filter, magnitude: f64) -> EtcResult<NoiseBudget> {
        if !magnitude.is_finite() {
            return Err(EtcError::InvalidMagnitude(magnitude));
        }
        NoiseBudget::with_fraction(
            filter,
            magnitude,
            &self.config.instrument,
            self.aperture_fraction()?,
        )
    }

    /// Exposure time in seconds needed to reach the configured SNR.
    ///
    /// # Errors
    /// * `InvalidMagnitude` if `magnitude` is NaN or infinite
    /// * `DegenerateBudget` if the star is below the signal floor or the
    ///   exposure would exceed the configured maximum
    /// * `NumericInstability` if the aperture integration breaks down
    pub fn compute_exposure_time(&self, filter: Filter, magnitude: f64) -> EtcResult<Seconds> {
        self.estimate(filter, magnitude).map(|e| e.exposure)
    }

    /// Same as [`compute_exposure_time`](Self::compute_exposure_time) for a
    /// filter given by its text code.
    pub fn expose(&self, filter_code: &str, magnitude: f64) -> EtcResult<Seconds> {
        let filter: Filter = filter_code.parse()?;
        self.compute_exposure_time(filter, magnitude)
    }

    /// Run the whole pipeline and keep the intermediate values.
    pub fn estimate(&self, filter: Filter, magnitude: f64) -> EtcResult<ExposureEstimate> {
        if !magnitude.is_finite() {
            return Err(EtcError::InvalidMagnitude(magnitude));
        }
        self.estimate_with_fraction(filter, magnitude, self.aperture_fraction()?)
    }

    /// Budget, solve and limits for an already integrated aperture fraction.
    pub(crate) fn estimate_with_fraction(
        &self,
        filter: Filter,
        magnitude: f64,
        aperture_fraction: f64,
    ) -> EtcResult<ExposureEstimate> {
        if !magnitude.is_finite() {
            return Err(EtcError::InvalidMagnitude(magnitude));
        }

        let instrument = &self.config.instrument;
        let limits = &self.config.limits;

        let budget = NoiseBudget::with_fraction(filter, magnitude, instrument, aperture_fraction)?;

        if budget.star_rate < limits.min_star_rate {
            log::warn!(
                "{} = {:.2}: star rate {:.3e} e-/s below floor {} e-/s",
                filter,
                magnitude,
                budget.star_rate,
                limits.min_star_rate
            );
            return Err(EtcError::DegenerateBudget(format!(
                "star rate {:.3e} e-/s in {} is below the signal floor of {} e-/s",
                budget.star_rate, filter, limits.min_star_rate
            )));
        }

        let exposure = solve_exposure_time(&budget, instrument.target_snr)?;
        if exposure.value() > limits.max_exposure.value() {
            log::warn!(
                "{} = {:.2}: required exposure {:.1} s exceeds limit {} s",
                filter,
                magnitude,
                exposure.value(),
                limits.max_exposure.value()
            );
            return Err(EtcError::DegenerateBudget(format!(
                "SNR {} in {} needs {:.1} s, above the {} s exposure limit",
                instrument.target_snr,
                filter,
                exposure.value(),
                limits.max_exposure.value()
            )));
        }

        log::debug!(
            "{} = {:.2}: fraction {:.4}, star {:.3e} e-/s, sky {:.3e} e-/s, read {:.3e} e-, t = {:.3} s",
            filter,
            magnitude,
            aperture_fraction,
            budget.star_rate,
            budget.sky_rate,
            budget.read_electrons,
            exposure.value()
        );

        Ok(ExposureEstimate {
            filter,
            magnitude,
            aperture_fraction,
            budget,
            exposure,
        })
    }
}
