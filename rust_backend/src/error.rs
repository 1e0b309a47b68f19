//! Error types for exposure time estimation.

/// Result type for exposure calculator operations
pub type EtcResult<T> = Result<T, EtcError>;

/// Error type for exposure calculator operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EtcError {
    #[error("Invalid filter: {0:?} (expected one of U, B, V, R, I, H)")]
    InvalidFilter(String),

    #[error("Invalid magnitude: {0} (must be finite)")]
    InvalidMagnitude(f64),

    #[error("Degenerate noise budget: {0}")]
    DegenerateBudget(String),

    #[error("Numeric instability: {0}")]
    NumericInstability(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration file error: {0}")]
    ConfigurationFile(String),
}

impl EtcError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EtcError::InvalidFilter(_) => "invalid_filter",
            EtcError::InvalidMagnitude(_) => "invalid_magnitude",
            EtcError::DegenerateBudget(_) => "degenerate_budget",
            EtcError::NumericInstability(_) => "numeric_instability",
            EtcError::InvalidConfiguration(_) => "invalid_configuration",
            EtcError::ConfigurationFile(_) => "configuration_file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_offending_value() {
        let err = EtcError::InvalidFilter("X".to_string());
        assert!(err.to_string().contains("\"X\""));

        let err = EtcError::InvalidMagnitude(f64::NAN);
        assert!(err.to_string().contains("NaN"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(EtcError::DegenerateBudget(String::new()).kind(), "degenerate_budget");
        assert_eq!(EtcError::NumericInstability(String::new()).kind(), "numeric_instability");
    }
}
