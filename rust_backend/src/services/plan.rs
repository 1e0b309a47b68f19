//! Exposure plans for the schedule form.
//!
//! The scheduling UI lets the observer type a comma-separated filter list
//! (`"B,V,R,I,H"`) and pre-fills the schedule's `FILTER` and `DURATION`
//! fields from it. Unknown tokens are skipped and reported instead of
//! aborting the whole plan.

use serde::{Deserialize, Serialize};

use crate::error::EtcResult;
use crate::models::Filter;

use super::exposure::{ExposureCalculator, ExposureEstimate};

/// Filter selection used when the observer does not pick one.
pub const DEFAULT_FILTER_SELECTION: &str = "B,V,R,I,H";

/// Exposure times for a list of filters, ready for a schedule record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposurePlan {
    /// Accepted filter codes, concatenated (`"BVRIH"`)
    pub filters: String,
    /// Rounded exposure seconds, comma-separated, same order as `filters`
    pub durations: String,
    /// Tokens that are not supported filters
    pub rejected: Vec<String>,
    pub estimates: Vec<ExposureEstimate>,
}

impl ExposurePlan {
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }
}

/// Split a comma-separated selection into filters and rejected tokens.
///
/// Empty tokens are ignored. Every other token must be an exact filter code,
/// so `" V"` or `"v"` end up in the rejected list.
///
/// # Example
/// ```
/// use etc_rust::models::Filter;
/// use etc_rust::services::parse_filter_list;
///
/// let (filters, rejected) = parse_filter_list("B,V,X,,H, R");
/// assert_eq!(filters, vec![Filter::B, Filter::V, Filter::H]);
/// assert_eq!(rejected, vec!["X".to_string(), " R".to_string()]);
/// ```
pub fn parse_filter_list(selection: &str) -> (Vec<Filter>, Vec<String>) {
    let mut filters = Vec::new();
    let mut rejected = Vec::new();
    for token in selection.split(',').filter(|t| !t.is_empty()) {
        match token.parse::<Filter>() {
            Ok(filter) => filters.push(filter),
            Err(_) => rejected.push(token.to_string()),
        }
    }
    (filters, rejected)
}

impl ExposureCalculator {
    /// Compute exposures for every valid filter in `selection`.
    ///
    /// # Arguments
    /// * `selection` - Comma-separated filter codes
    /// * `magnitude` - Target magnitude used for every filter
    ///
    /// # Errors
    /// Any numeric failure for an accepted filter aborts the plan; invalid
    /// filter tokens do not.
    pub fn plan_exposures(&self, selection: &str, magnitude: f64) -> EtcResult<ExposurePlan> {
        let (filters, rejected) = parse_filter_list(selection);
        for token in &rejected {
            log::warn!("Invalid filter chosen: {}", token);
        }

        let estimates = if filters.is_empty() {
            Vec::new()
        } else {
            // the aperture does not depend on the filter
            let fraction = self.aperture_fraction()?;
            filters
                .iter()
                .map(|&filter| self.estimate_with_fraction(filter, magnitude, fraction))
                .collect::<EtcResult<Vec<_>>>()?
        };

        let filters: String = estimates.iter().map(|e| e.filter.code()).collect();
        let durations = estimates
            .iter()
            .map(|e| e.rounded_seconds().to_string())
            .collect::<Vec<_>>()
            .join(",");

        log::info!(
            "Planned {} exposures at magnitude {:.2}: FILTER={} DURATION={}",
            estimates.len(),
            magnitude,
            filters,
            durations
        );

        Ok(ExposurePlan {
            filters,
            durations,
            rejected,
            estimates,
        })
    }
}
