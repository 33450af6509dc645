use qtty::Seconds;
use thiserror::Error;

use crate::profile::ProfileError;

/// Exposure time reported to callers that only understand a bare number.
pub const SENTINEL: f64 = -1.0;

/// Result of a single exposure estimate.
pub type EstimateResult = Result<Seconds, EstimateError>;

/// Why no exposure time could be suggested.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("Unsupported configuration: {0}")]
    Unsupported(#[from] ProfileError),

    #[error("Invalid {field}: {value}")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("Target saturates: {counts_per_pixel:.0} counts/pixel exceeds {limit:.0}")]
    Saturated { counts_per_pixel: f64, limit: f64 },

    #[error("Exposure of {seconds:.1} s exceeds the {limit:.0} s limit")]
    TooLong { seconds: f64, limit: f64 },
}

/// Coarse failure category, as shown to a requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The instrument/element combination, or the input itself, is not supported.
    Unsupported,
    /// The target is too bright for the detector.
    Saturated,
    /// The requested signal-to-noise cannot be reached within the duration cap.
    TooLong,
}

impl EstimateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Unsupported(_) | Self::InvalidInput { .. } => FailureKind::Unsupported,
            Self::Saturated { .. } => FailureKind::Saturated,
            Self::TooLong { .. } => FailureKind::TooLong,
        }
    }
}

/// Collapses an estimate to the numeric convention of the observing forms:
/// the exposure in seconds, or [`SENTINEL`] on any failure.
pub trait SentinelExt {
    fn sentinel_seconds(&self) -> f64;
}

impl SentinelExt for EstimateResult {
    fn sentinel_seconds(&self) -> f64 {
        match self {
            Ok(seconds) => seconds.value(),
            Err(_) => SENTINEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_wraps_profile_error() {
        let e: EstimateError = ProfileError::UnknownInstrument("wfc".into()).into();
        assert_eq!(e.to_string(), "Unsupported configuration: Unknown instrument: wfc");
        assert_eq!(e.kind(), FailureKind::Unsupported);
    }

    #[test]
    fn invalid_input_is_unsupported_kind() {
        let e = EstimateError::InvalidInput {
            field: "snr",
            value: 0.0,
        };
        assert_eq!(e.to_string(), "Invalid snr: 0");
        assert_eq!(e.kind(), FailureKind::Unsupported);
    }

    #[test]
    fn saturated_display() {
        let e = EstimateError::Saturated {
            counts_per_pixel: 25_000.0,
            limit: 10_000.0,
        };
        assert_eq!(
            e.to_string(),
            "Target saturates: 25000 counts/pixel exceeds 10000"
        );
        assert_eq!(e.kind(), FailureKind::Saturated);
    }

    #[test]
    fn too_long_display() {
        let e = EstimateError::TooLong {
            seconds: 12_000.0,
            limit: 10_800.0,
        };
        assert_eq!(e.to_string(), "Exposure of 12000.0 s exceeds the 10800 s limit");
        assert_eq!(e.kind(), FailureKind::TooLong);
    }

    #[test]
    fn sentinel_collapses_every_failure() {
        let ok: EstimateResult = Ok(Seconds::new(42.0));
        assert_eq!(ok.sentinel_seconds(), 42.0);

        let failures: Vec<EstimateResult> = vec![
            Err(ProfileError::UnknownBinning("3x3".into()).into()),
            Err(EstimateError::Saturated {
                counts_per_pixel: 1e6,
                limit: 1e4,
            }),
            Err(EstimateError::TooLong {
                seconds: 1e5,
                limit: 1e4,
            }),
        ];
        for failure in failures {
            assert_eq!(failure.sentinel_seconds(), SENTINEL);
        }
    }
}
