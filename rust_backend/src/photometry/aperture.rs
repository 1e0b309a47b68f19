//! Fraction of a Gaussian point-spread function enclosed by a circular aperture.
//!
//! The star is modelled as an isotropic 2-D Gaussian placed at the sub-pixel
//! offset (0.5, 0.5) of the central pixel. The light falling on a square grid
//! of pixels is integrated numerically by splitting every pixel into
//! `P × P` sub-samples; the samples whose centre lies within the aperture
//! radius are summed separately. The ratio of the two sums is the fraction of
//! the star's light the aperture collects.
//!
//! The grid is finite, so flux beyond `grid_half_width` pixels is dropped from
//! both sums. At the default settings this is negligible for any PSF narrower
//! than a few pixels.

use qtty::Arcseconds;

use crate::error::{EtcError, EtcResult};
use crate::models::IntegrationSettings;

/// Ratio between the FWHM and the standard deviation of a Gaussian.
pub const FWHM_PER_SIGMA: f64 = 2.35482;

/// Position of the PSF centre inside the central pixel, in pixels.
pub const PSF_CENTER: f64 = 0.5;

/// Fraction of the star's light inside a circular aperture.
///
/// # Arguments
/// * `fwhm` - Full width at half maximum of the PSF
/// * `aperture_radius` - Radius of the photometric aperture
/// * `pixel_scale` - Angular size of one pixel
/// * `settings` - Grid size and sub-pixel sampling
///
/// # Returns
/// * `Ok(ratio)` with `ratio` in `[0, 1]`
/// * `Err(EtcError::InvalidConfiguration)` for non-finite inputs, a
///   non-positive FWHM or pixel scale, or a negative radius
/// * `Err(EtcError::NumericInstability)` if the integrated total vanishes
///
/// # Example
/// ```
/// use etc_rust::models::IntegrationSettings;
/// use etc_rust::photometry::fraction_inside;
/// use qtty::Arcseconds;
///
/// let ratio = fraction_inside(
///     Arcseconds::new(2.5),
///     Arcseconds::new(3.536),
///     Arcseconds::new(0.442),
///     &IntegrationSettings::coarse(),
/// )
/// .unwrap();
/// assert!(ratio > 0.99 && ratio <= 1.0);
/// ```
pub fn fraction_inside(
    fwhm: Arcseconds,
    aperture_radius: Arcseconds,
    pixel_scale: Arcseconds,
    settings: &IntegrationSettings,
) -> EtcResult<f64> {
    let pixel = pixel_scale.value();
    if !(pixel.is_finite() && pixel > 0.0) {
        return Err(EtcError::InvalidConfiguration(format!(
            "pixel scale must be finite and positive, got {}",
            pixel
        )));
    }
    fraction_inside_pixels(fwhm.value() / pixel, aperture_radius.value() / pixel, settings)
}

/// Same as [`fraction_inside`] with the FWHM and radius already in pixels.
pub fn fraction_inside_pixels(
    fwhm_px: f64,
    radius_px: f64,
    settings: &IntegrationSettings,
) -> EtcResult<f64> {
    settings.validate()?;
    if !(fwhm_px.is_finite() && fwhm_px > 0.0) {
        return Err(EtcError::InvalidConfiguration(format!(
            "PSF FWHM must be finite and positive, got {} px",
            fwhm_px
        )));
    }
    if !(radius_px.is_finite() && radius_px >= 0.0) {
        return Err(EtcError::InvalidConfiguration(format!(
            "aperture radius must be finite and non-negative, got {} px",
            radius_px
        )));
    }

    let sigma = fwhm_px / FWHM_PER_SIGMA;
    let two_sigma2 = 2.0 * sigma * sigma;
    let radius2 = radius_px * radius_px;
    let bit = 1.0 / settings.subsamples as f64;
    let bit2 = bit * bit;

    // The Gaussian is separable and both axes share the same offset, so one
    // table of (offset, weight) pairs serves for x and y.
    let axis = axis_samples(settings, two_sigma2);

    let mut rad_sum = 0.0_f64;
    let mut all_sum = 0.0_f64;
    for &(x, fx) in &axis {
        let x2 = x * x;
        for &(y, fy) in &axis {
            let this_bit = fx * fy * bit2;
            all_sum += this_bit;
            if x2 + y * y <= radius2 {
                rad_sum += this_bit;
            }
        }
    }

    if !all_sum.is_finite() || all_sum <= 0.0 {
        return Err(EtcError::NumericInstability(format!(
            "integrated PSF total is {} (FWHM {} px over a {}-pixel half-width grid)",
            all_sum, fwhm_px, settings.grid_half_width
        )));
    }

    Ok((rad_sum / all_sum).clamp(0.0, 1.0))
}

/// Sub-sample offsets from the PSF centre along one axis, paired with the
/// unnormalised Gaussian weight at that offset.
fn axis_samples(settings: &IntegrationSettings, two_sigma2: f64) -> Vec<(f64, f64)> {
    let half = settings.grid_half_width as i64;
    let pieces = settings.subsamples as usize;
    let bit = 1.0 / pieces as f64;

    let mut samples = Vec::with_capacity(2 * half as usize * pieces);
    for i in -half..half {
        for k in 0..pieces {
            let offset = i as f64 - PSF_CENTER + (k as f64 + 0.5) * bit;
            samples.push((offset, (-(offset * offset) / two_sigma2).exp()));
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn reference_fraction(settings: &IntegrationSettings) -> f64 {
        fraction_inside(
            Arcseconds::new(2.5),
            Arcseconds::new(8.0 * 0.442),
            Arcseconds::new(0.442),
            settings,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_aperture_fraction() {
        let ratio = reference_fraction(&IntegrationSettings::default());
        assert_relative_eq!(ratio, 0.9961067902067313, max_relative = 1e-9);
    }

    #[test]
    fn test_coarse_grid_is_close_to_default() {
        let coarse = reference_fraction(&IntegrationSettings::coarse());
        assert_relative_eq!(coarse, 0.9961736101716144, max_relative = 1e-9);
        assert!((coarse - reference_fraction(&IntegrationSettings::default())).abs() < 1e-3);
    }

    #[test]
    fn test_large_aperture_captures_everything() {
        // radius of 5 FWHM
        let ratio = fraction_inside(
            Arcseconds::new(2.5),
            Arcseconds::new(12.5),
            Arcseconds::new(0.442),
            &IntegrationSettings::default(),
        )
        .unwrap();
        assert!(ratio > 0.99, "ratio = {ratio}");
        assert!(ratio <= 1.0);
    }

    #[test]
    fn test_tiny_aperture_captures_little() {
        let ratio = fraction_inside_pixels(5.0, 0.1, &IntegrationSettings::coarse()).unwrap();
        assert!(ratio < 0.01, "ratio = {ratio}");
    }

    #[test]
    fn test_zero_radius_collects_nothing() {
        let settings = IntegrationSettings::coarse();
        assert_eq!(fraction_inside_pixels(5.0, 0.0, &settings).unwrap(), 0.0);
        assert_eq!(
            fraction_inside(
                Arcseconds::new(2.5),
                Arcseconds::new(0.0),
                Arcseconds::new(0.442),
                &settings
            )
            .unwrap(),
            0.0
        );
    }

    #[test]
    fn test_scale_invariance() {
        let settings = IntegrationSettings::coarse();
        let base = fraction_inside(
            Arcseconds::new(2.5),
            Arcseconds::new(3.536),
            Arcseconds::new(0.442),
            &settings,
        )
        .unwrap();
        for factor in [0.5, 3.7, 10.0] {
            let scaled = fraction_inside(
                Arcseconds::new(2.5 * factor),
                Arcseconds::new(3.536 * factor),
                Arcseconds::new(0.442 * factor),
                &settings,
            )
            .unwrap();
            assert_relative_eq!(base, scaled, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_vanishing_psf_is_numeric_instability() {
        let result = fraction_inside(
            Arcseconds::new(1e-4),
            Arcseconds::new(3.536),
            Arcseconds::new(0.442),
            &IntegrationSettings::default(),
        );
        assert!(matches!(result, Err(EtcError::NumericInstability(_))));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let settings = IntegrationSettings::coarse();
        assert!(fraction_inside_pixels(0.0, 8.0, &settings).is_err());
        assert!(fraction_inside_pixels(5.0, f64::NAN, &settings).is_err());
        assert!(fraction_inside_pixels(5.0, -1.0, &settings).is_err());
        assert!(fraction_inside(
            Arcseconds::new(2.5),
            Arcseconds::new(3.5),
            Arcseconds::new(-0.442),
            &settings
        )
        .is_err());

        let no_grid = IntegrationSettings {
            grid_half_width: 30,
            subsamples: 0,
        };
        assert!(matches!(
            fraction_inside_pixels(5.0, 8.0, &no_grid),
            Err(EtcError::InvalidConfiguration(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_monotone_in_radius(
            fwhm_px in 1.0f64..10.0,
            r1 in 0.5f64..20.0,
            dr in 0.0f64..10.0,
        ) {
            let settings = IntegrationSettings { grid_half_width: 20, subsamples: 3 };
            let inner = fraction_inside_pixels(fwhm_px, r1, &settings).unwrap();
            let outer = fraction_inside_pixels(fwhm_px, r1 + dr, &settings).unwrap();
            prop_assert!(outer >= inner);
            prop_assert!((0.0..=1.0).contains(&inner));
            prop_assert!((0.0..=1.0).contains(&outer));
        }
    }
}
