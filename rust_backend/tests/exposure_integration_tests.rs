//! Integration tests for the exposure time pipeline.
//!
//! These tests ensure that:
//! 1. The reference instrument reproduces the pinned exposure times
//! 2. Solved exposures reach the configured SNR
//! 3. Brighter stars always need less time
//! 4. Invalid input and faint targets fail with the right error kind

use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use proptest::prelude::*;
use qtty::Seconds;

use etc_rust::config::EtcConfig;
use etc_rust::models::{ExposureLimits, Filter, InstrumentConfig, IntegrationSettings};
use etc_rust::photometry::{solve_exposure_time, NoiseBudget};
use etc_rust::services::{compute_exposure_time, ExposureCalculator};
use etc_rust::EtcError;

// ==================== Helper Functions ====================

fn coarse_calculator() -> ExposureCalculator {
    ExposureCalculator::new(EtcConfig {
        integration: IntegrationSettings::coarse(),
        ..EtcConfig::default()
    })
    .unwrap()
}

// ==================== Reference Values ====================

#[test]
fn test_reference_exposures_all_filters() {
    let expected = [
        (Filter::U, 94.7424094166137),
        (Filter::B, 59.459928473879344),
        (Filter::V, 13.35099313701927),
        (Filter::R, 9.655863055017612),
        (Filter::I, 19.03194461355934),
        (Filter::H, 11.177727604293022),
    ];

    for (filter, seconds) in expected {
        let t = compute_exposure_time(filter, 10.0).unwrap();
        assert_relative_eq!(t.value(), seconds, max_relative = 1e-9);
    }
}

#[test]
fn test_reference_v10_is_tens_of_seconds() {
    let t = compute_exposure_time(Filter::V, 10.0).unwrap();
    assert!(t.value().is_finite());
    assert!(t.value() > 10.0 && t.value() < 100.0);
}

#[test]
fn test_faint_v25_is_degenerate() {
    match compute_exposure_time(Filter::V, 25.0) {
        Err(EtcError::DegenerateBudget(msg)) => assert!(msg.contains("signal floor")),
        other => panic!("expected DegenerateBudget, got {:?}", other),
    }
}

#[test]
fn test_invalid_filter_regardless_of_magnitude() {
    let calculator = coarse_calculator();
    for magnitude in [-5.0, 0.0, 10.0, 25.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            calculator.expose("X", magnitude),
            Err(EtcError::InvalidFilter(_))
        ));
    }
}

// ==================== Properties ====================

#[test]
fn test_round_trip_snr_for_every_filter() {
    let calculator = coarse_calculator();
    let target = calculator.config().instrument.target_snr;

    for filter in Filter::ALL {
        for magnitude in [6.0, 10.0, 13.0] {
            let estimate = calculator.estimate(filter, magnitude).unwrap();
            let snr = estimate.budget.snr_at(estimate.exposure.value());
            assert_relative_eq!(snr, target, max_relative = 1e-6);
        }
    }
}

#[test]
fn test_other_instrument() {
    let instrument = InstrumentConfig {
        telescope_diameter: qtty::Centimeters::new(100.0),
        target_snr: 100.0,
        ..InstrumentConfig::default()
    };
    let big = ExposureCalculator::new(EtcConfig {
        instrument,
        integration: IntegrationSettings::coarse(),
        ..EtcConfig::default()
    })
    .unwrap();
    let reference = coarse_calculator();

    let t_big = big.compute_exposure_time(Filter::B, 12.0).unwrap();
    let t_ref = reference.compute_exposure_time(Filter::B, 12.0).unwrap();
    assert!(t_big.value() < t_ref.value());
}

#[test]
fn test_concurrent_requests_agree() {
    let calculator = Arc::new(coarse_calculator());
    let expected = calculator.compute_exposure_time(Filter::I, 11.0).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let calculator = Arc::clone(&calculator);
            thread::spawn(move || calculator.compute_exposure_time(Filter::I, 11.0).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_plan_matches_single_calls() {
    let calculator = coarse_calculator();
    let plan = calculator.plan_exposures("B,V,R,I,H", 11.5).unwrap();
    assert_eq!(plan.filters, "BVRIH");

    let durations: Vec<u64> = plan
        .durations
        .split(',')
        .map(|d| d.parse().unwrap())
        .collect();
    for (filter, duration) in [Filter::B, Filter::V, Filter::R, Filter::I, Filter::H]
        .into_iter()
        .zip(durations)
    {
        let t = calculator.compute_exposure_time(filter, 11.5).unwrap();
        assert_eq!(t.value().round() as u64, duration);
    }
}

#[test]
fn test_limits_apply_to_plans() {
    let calculator = ExposureCalculator::new(EtcConfig {
        integration: IntegrationSettings::coarse(),
        limits: ExposureLimits {
            min_star_rate: 1.0,
            max_exposure: Seconds::new(30.0),
        },
        ..EtcConfig::default()
    })
    .unwrap();

    assert!(calculator.plan_exposures("V,R", 10.0).is_ok());
    // U needs about 95 s
    assert!(matches!(
        calculator.plan_exposures("V,U", 10.0),
        Err(EtcError::DegenerateBudget(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_brighter_is_strictly_shorter(
        star_rate in 1.0f64..1.0e6,
        sky_rate in 0.0f64..1.0e4,
        read_electrons in 0.0f64..1.0e5,
        delta_mag in 0.05f64..5.0,
        snr in 5.0f64..2000.0,
    ) {
        let faint = NoiseBudget { star_rate, sky_rate, read_electrons };
        let bright = NoiseBudget {
            star_rate: star_rate * 10f64.powf(0.4 * delta_mag),
            ..faint
        };
        let t_faint = solve_exposure_time(&faint, snr).unwrap();
        let t_bright = solve_exposure_time(&bright, snr).unwrap();
        prop_assert!(t_bright.value() < t_faint.value());
    }

    #[test]
    fn prop_round_trip_snr(
        star_rate in 1.0e-2f64..1.0e7,
        sky_rate in 0.0f64..1.0e5,
        read_electrons in 0.0f64..1.0e6,
        snr in 1.0f64..5000.0,
    ) {
        let budget = NoiseBudget { star_rate, sky_rate, read_electrons };
        let t = solve_exposure_time(&budget, snr).unwrap();
        prop_assert!(t.value() > 0.0);
        let reached = budget.snr_at(t.value());
        prop_assert!(((reached - snr) / snr).abs() < 1e-6);
    }
}
