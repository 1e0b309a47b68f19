//! Telescope, detector and sky configuration.
//!
//! The defaults reproduce the 50 cm telescope and CCD the scheduler was built
//! around. Every value can be overridden from an `etc.toml` file or replaced
//! wholesale when constructing an [`ExposureCalculator`](crate::services::ExposureCalculator).

use qtty::{Arcseconds, Centimeters, Seconds};
use serde::{Deserialize, Serialize};

use crate::error::{EtcError, EtcResult};

/// Fixed instrument and observing conditions for one telescope setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    /// Telescope aperture diameter
    pub telescope_diameter: Centimeters,
    /// Angular size of one detector pixel
    pub pixel_scale: Arcseconds,
    /// CCD read noise (electrons RMS per pixel)
    pub read_noise: f64,
    /// Sky surface brightness (mag / arcsec²)
    pub sky_brightness: f64,
    /// Airmass of the target
    pub airmass: f64,
    /// Full width at half maximum of the stellar PSF
    pub fwhm: Arcseconds,
    /// Radius of the photometric aperture
    pub aperture_radius: Arcseconds,
    /// Signal-to-noise ratio the exposure must reach
    pub target_snr: f64,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        let pixel_scale = 0.442;
        Self {
            telescope_diameter: Centimeters::new(50.0),
            pixel_scale: Arcseconds::new(pixel_scale),
            read_noise: 15.78,
            sky_brightness: 19.0,
            airmass: 1.77,
            fwhm: Arcseconds::new(2.5),
            aperture_radius: Arcseconds::new(8.0 * pixel_scale),
            target_snr: 1000.0,
        }
    }
}

impl InstrumentConfig {
    /// Collecting area of the primary mirror in cm².
    pub fn collecting_area(&self) -> f64 {
        let radius = self.telescope_diameter.value() / 2.0;
        std::f64::consts::PI * radius * radius
    }

    /// Number of (fractional) pixels covered by the aperture.
    pub fn pixels_in_aperture(&self) -> f64 {
        let radius = self.aperture_radius.value();
        let pixel = self.pixel_scale.value();
        std::f64::consts::PI * radius * radius / (pixel * pixel)
    }

    /// Checks that every value is finite and physically meaningful.
    pub fn validate(&self) -> EtcResult<()> {
        require_positive("telescope_diameter", self.telescope_diameter.value())?;
        require_positive("pixel_scale", self.pixel_scale.value())?;
        require_positive("fwhm", self.fwhm.value())?;
        require_positive("aperture_radius", self.aperture_radius.value())?;
        require_positive("target_snr", self.target_snr)?;

        if !self.read_noise.is_finite() || self.read_noise < 0.0 {
            return Err(EtcError::InvalidConfiguration(format!(
                "read_noise must be finite and non-negative, got {}",
                self.read_noise
            )));
        }
        if !self.sky_brightness.is_finite() {
            return Err(EtcError::InvalidConfiguration(format!(
                "sky_brightness must be finite, got {}",
                self.sky_brightness
            )));
        }
        if !self.airmass.is_finite() || self.airmass < 1.0 {
            return Err(EtcError::InvalidConfiguration(format!(
                "airmass must be finite and at least 1.0, got {}",
                self.airmass
            )));
        }
        Ok(())
    }
}

/// Accuracy/performance knobs of the aperture integration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    /// Half-width of the square pixel grid around the star
    pub grid_half_width: u32,
    /// Number of sub-samples per pixel along each axis
    pub subsamples: u32,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            grid_half_width: 30,
            subsamples: 20,
        }
    }
}

impl IntegrationSettings {
    /// A cheap grid for quick estimates and tests.
    pub fn coarse() -> Self {
        Self {
            grid_half_width: 30,
            subsamples: 4,
        }
    }

    pub fn validate(&self) -> EtcResult<()> {
        if self.grid_half_width == 0 || self.subsamples == 0 {
            return Err(EtcError::InvalidConfiguration(format!(
                "integration grid_half_width and subsamples must be at least 1, got {} and {}",
                self.grid_half_width, self.subsamples
            )));
        }
        Ok(())
    }
}

/// Bounds outside of which an exposure is reported as unreachable.
///
/// Faint targets drive the star rate towards zero and the required exposure
/// towards infinity; both limits turn that regime into a
/// [`EtcError::DegenerateBudget`] instead of an absurd duration.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureLimits {
    /// Minimum star signal inside the aperture (electrons / s)
    pub min_star_rate: f64,
    /// Longest exposure the schedule will accept
    pub max_exposure: Seconds,
}

impl Default for ExposureLimits {
    fn default() -> Self {
        Self {
            min_star_rate: 1.0,
            max_exposure: Seconds::new(86_400.0),
        }
    }
}

impl ExposureLimits {
    pub fn validate(&self) -> EtcResult<()> {
        if !self.min_star_rate.is_finite() || self.min_star_rate < 0.0 {
            return Err(EtcError::InvalidConfiguration(format!(
                "min_star_rate must be finite and non-negative, got {}",
                self.min_star_rate
            )));
        }
        require_positive("max_exposure", self.max_exposure.value())
    }
}

fn require_positive(name: &str, value: f64) -> EtcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EtcError::InvalidConfiguration(format!(
            "{} must be finite and positive, got {}",
            name, value
        )))
    }
}
