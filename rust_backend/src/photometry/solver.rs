//! Exposure time that reaches a target signal-to-noise ratio.
//!
//! With star rate `S`, sky rate `B`, read variance `R` and target `N`,
//!
//! ```text
//! N = S t / sqrt(R + B t + S t)
//! ```
//!
//! squares to `S² t² − N² (B + S) t − N² R = 0`. Because `S² > 0` and
//! `−N² R ≤ 0` the product of the roots is non-positive, so exactly one root
//! is positive (or zero when `R = 0` and the other root is zero). That root is
//! returned.
//!
//! Dividing through by `S` before taking the root gives
//!
//! ```text
//! q = N² (B + S) / S
//! t = (q + sqrt(q² + 4 N² R)) / (2 S)
//! ```
//!
//! which never forms `S²`, so very bright stars do not overflow.

use qtty::Seconds;

use crate::error::{EtcError, EtcResult};

use super::budget::NoiseBudget;

/// Solve the SNR equation for the exposure time.
///
/// # Arguments
/// * `budget` - Electron rates of the target, sky and detector
/// * `target_snr` - Signal-to-noise ratio to reach
///
/// # Returns
/// * `Ok(Seconds)` - Positive exposure time
/// * `Err(EtcError::DegenerateBudget)` - No signal, or no positive finite root
/// * `Err(EtcError::InvalidConfiguration)` - Non-positive or non-finite target
///
/// # Example
/// ```
/// use etc_rust::photometry::{solve_exposure_time, NoiseBudget};
///
/// let budget = NoiseBudget { star_rate: 100.0, sky_rate: 0.0, read_electrons: 0.0 };
/// // shot-noise limited: SNR = sqrt(S t)
/// let t = solve_exposure_time(&budget, 10.0).unwrap();
/// assert!((t.value() - 1.0).abs() < 1e-12);
/// ```
pub fn solve_exposure_time(budget: &NoiseBudget, target_snr: f64) -> EtcResult<Seconds> {
    if !(target_snr.is_finite() && target_snr > 0.0) {
        return Err(EtcError::InvalidConfiguration(format!(
            "target SNR must be finite and positive, got {}",
            target_snr
        )));
    }

    let NoiseBudget {
        star_rate,
        sky_rate,
        read_electrons,
    } = *budget;

    if !(star_rate.is_finite() && star_rate > 0.0) {
        return Err(EtcError::DegenerateBudget(format!(
            "star signal rate is {} e-/s; SNR {} is unreachable",
            star_rate, target_snr
        )));
    }
    if !(sky_rate.is_finite() && sky_rate >= 0.0)
        || !(read_electrons.is_finite() && read_electrons >= 0.0)
    {
        return Err(EtcError::DegenerateBudget(format!(
            "noise terms must be finite and non-negative (sky {} e-/s, read {} e-)",
            sky_rate, read_electrons
        )));
    }

    let snr2 = target_snr * target_snr;
    let q = snr2 * (sky_rate + star_rate) / star_rate;
    // q >= 0, so the sum has no cancellation.
    let root = (q + q.hypot(2.0 * target_snr * read_electrons.sqrt())) / (2.0 * star_rate);
    if !root.is_finite() || root <= 0.0 {
        return Err(EtcError::DegenerateBudget(format!(
            "SNR equation has no positive finite root (got {})",
            root
        )));
    }

    Ok(Seconds::new(root))
}
