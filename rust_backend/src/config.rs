//! Calculator configuration file support.
//!
//! This module reads the instrument, integration and limit settings from a
//! TOML file. Missing sections and keys fall back to the reference
//! instrument, so an empty file is a valid configuration.
//!
//! ```toml
//! [instrument]
//! telescope_diameter = 50.0   # cm
//! pixel_scale = 0.442         # arcsec / pixel
//! read_noise = 15.78          # e-
//! sky_brightness = 19.0       # mag / arcsec^2
//! airmass = 1.77
//! fwhm = 2.5                  # arcsec
//! aperture_radius = 3.536     # arcsec
//! target_snr = 1000.0
//!
//! [integration]
//! grid_half_width = 30
//! subsamples = 20
//!
//! [limits]
//! min_star_rate = 1.0         # e- / s
//! max_exposure = 86400.0      # s
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EtcError, EtcResult};
use crate::models::{ExposureLimits, InstrumentConfig, IntegrationSettings};

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "ETC_CONFIG";

/// Complete calculator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtcConfig {
    pub instrument: InstrumentConfig,
    pub integration: IntegrationSettings,
    pub limits: ExposureLimits,
}

impl EtcConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> EtcResult<Self> {
        let config: EtcConfig = toml::from_str(content).map_err(|e| {
            EtcError::ConfigurationFile(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EtcConfig)` if successful
    /// * `Err(EtcError)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> EtcResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EtcError::ConfigurationFile(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        log::debug!("Loading calculator configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Uses `$ETC_CONFIG` when set, otherwise searches for `etc.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(EtcConfig))` if a file was found and parsed successfully
    /// * `Ok(None)` if no configuration file exists
    /// * `Err(EtcError)` on read or parse errors
    pub fn from_default_location() -> EtcResult<Option<Self>> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(explicit).map(Some);
        }

        let search_paths = [
            PathBuf::from("etc.toml"),
            PathBuf::from("rust_backend/etc.toml"),
            PathBuf::from("../etc.toml"),
        ];

        for path in search_paths.iter() {
            if path.exists() {
                return Self::from_file(path).map(Some);
            }
        }

        log::debug!("No etc.toml found, using reference instrument");
        Ok(None)
    }

    /// Like [`from_default_location`](Self::from_default_location), falling
    /// back to the reference configuration when no file exists.
    pub fn load_default() -> EtcResult<Self> {
        Ok(Self::from_default_location()?.unwrap_or_default())
    }

    /// Validate every section.
    pub fn validate(&self) -> EtcResult<()> {
        self.instrument.validate()?;
        self.integration.validate()?;
        self.limits.validate()
    }
}
