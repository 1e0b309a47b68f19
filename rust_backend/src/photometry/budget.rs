//! Electron budget of a stellar exposure.
//!
//! Converts a filter, a magnitude and the instrument configuration into the
//! three noise sources of aperture photometry: star and sky electrons
//! accumulate linearly with exposure time, read noise is paid once per
//! readout.

use serde::{Deserialize, Serialize};

use crate::error::{EtcError, EtcResult};
use crate::models::{Filter, InstrumentConfig, IntegrationSettings};

use super::aperture::fraction_inside;

/// Expected electron counts inside the aperture.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseBudget {
    /// Star electrons per second collected in the aperture
    pub star_rate: f64,
    /// Sky electrons per second collected in the aperture
    pub sky_rate: f64,
    /// Read-noise variance summed over the aperture pixels (electrons²)
    pub read_electrons: f64,
}

/// Flux ratio of a source `magnitude` magnitudes fainter than the reference.
#[inline]
pub fn pogson(magnitude: f64) -> f64 {
    10f64.powf(-0.4 * magnitude)
}

impl NoiseBudget {
    /// Build the budget, integrating the aperture fraction for `instrument`.
    ///
    /// # Arguments
    /// * `filter` - Photometric band
    /// * `magnitude` - Apparent magnitude of the target in that band
    /// * `instrument` - Telescope, detector and sky configuration
    /// * `settings` - Aperture integration knobs
    ///
    /// # Errors
    /// * `InvalidMagnitude` for NaN or infinite magnitudes
    /// * `InvalidConfiguration` / `NumericInstability` from the aperture integration
    pub fn build(
        filter: Filter,
        magnitude: f64,
        instrument: &InstrumentConfig,
        settings: &IntegrationSettings,
    ) -> EtcResult<Self> {
        if !magnitude.is_finite() {
            return Err(EtcError::InvalidMagnitude(magnitude));
        }
        instrument.validate()?;
        let fraction = fraction_inside(
            instrument.fwhm,
            instrument.aperture_radius,
            instrument.pixel_scale,
            settings,
        )?;
        Self::with_fraction(filter, magnitude, instrument, fraction)
    }

    /// Build the budget from an already integrated aperture fraction.
    pub fn with_fraction(
        filter: Filter,
        magnitude: f64,
        instrument: &InstrumentConfig,
        aperture_fraction: f64,
    ) -> EtcResult<Self> {
        if !magnitude.is_finite() {
            return Err(EtcError::InvalidMagnitude(magnitude));
        }
        if !(0.0..=1.0).contains(&aperture_fraction) {
            return Err(EtcError::NumericInstability(format!(
                "aperture fraction {} outside [0, 1]",
                aperture_fraction
            )));
        }

        let params = filter.parameters();
        let collected =
            params.zero_mag_flux * instrument.collecting_area() * params.quantum_efficiency;
        let npix = instrument.pixels_in_aperture();
        let pixel = instrument.pixel_scale.value();

        let extinction = pogson(instrument.airmass * params.extinction_coeff);
        let star_rate = pogson(magnitude) * collected * aperture_fraction * extinction;

        let sky_per_pixel = pogson(instrument.sky_brightness) * collected * pixel * pixel;
        let sky_rate = sky_per_pixel * npix;

        let read_electrons = instrument.read_noise * instrument.read_noise * npix;

        Ok(Self {
            star_rate,
            sky_rate,
            read_electrons,
        })
    }

    /// Total noise (electrons RMS) after `seconds` of integration.
    pub fn noise_at(&self, seconds: f64) -> f64 {
        (self.read_electrons + (self.sky_rate + self.star_rate) * seconds).sqrt()
    }

    /// Signal-to-noise ratio reached after `seconds` of integration.
    pub fn snr_at(&self, seconds: f64) -> f64 {
        let noise = self.noise_at(seconds);
        if noise == 0.0 {
            return 0.0;
        }
        self.star_rate * seconds / noise
    }
}
