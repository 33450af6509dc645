//! Acceptance limits applied to a solved exposure time.

use qtty::Seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::estimator::EstimateError;
use crate::photometry::DEFAULT_MOON_FACTOR;

/// Shortest exposure ever suggested.
pub const MIN_EXPOSURE: Seconds = Seconds::new(1.0);
/// Longest single exposure a facility accepts (3 hours).
pub const MAX_EXPOSURE: Seconds = Seconds::new(10_800.0);
/// Predicted counts per pixel above which the detector leaves its linear regime.
pub const SATURATION_COUNTS: f64 = 10_000.0;

/// Bounds and environment factors shared by every estimate.
///
/// Solved times below `min_exposure` are raised to it; times above
/// `max_exposure`, or that would push the star past `saturation_counts`
/// per pixel, are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExposureLimits {
    pub min_exposure: Seconds,
    pub max_exposure: Seconds,
    pub saturation_counts: f64,
    /// Scale applied to every sky offset. Fixed, not derived from lunar phase.
    pub moon_factor: f64,
}

impl Default for ExposureLimits {
    fn default() -> Self {
        Self {
            min_exposure: MIN_EXPOSURE,
            max_exposure: MAX_EXPOSURE,
            saturation_counts: SATURATION_COUNTS,
            moon_factor: DEFAULT_MOON_FACTOR,
        }
    }
}

impl ExposureLimits {
    /// Raises short exposures to the floor, then rejects overlong ones.
    ///
    /// A floor above the cap rejects every duration.
    pub fn clamp_duration(&self, raw: f64) -> Result<Seconds, EstimateError> {
        let limit = self.max_exposure.value();
        if !raw.is_finite() {
            return Err(EstimateError::TooLong { seconds: raw, limit });
        }
        let seconds = raw.max(self.min_exposure.value());
        if seconds > limit || limit.is_nan() {
            return Err(EstimateError::TooLong { seconds, limit });
        }
        Ok(Seconds::new(seconds))
    }

    /// Rejects exposures whose predicted per-pixel counts exceed saturation.
    ///
    /// A NaN threshold saturates everything.
    pub fn check_saturation(&self, counts_per_pixel: f64) -> Result<(), EstimateError> {
        if counts_per_pixel > self.saturation_counts || self.saturation_counts.is_nan() {
            Err(EstimateError::Saturated {
                counts_per_pixel,
                limit: self.saturation_counts,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_facility_limits() {
        let limits = ExposureLimits::default();
        assert_eq!(limits.min_exposure.value(), 1.0);
        assert_eq!(limits.max_exposure.value(), 10_800.0);
        assert_eq!(limits.saturation_counts, 10_000.0);
        assert_eq!(limits.moon_factor, 1.0);
    }

    #[test]
    fn short_exposure_is_raised_to_floor() {
        let limits = ExposureLimits::default();
        assert_eq!(limits.clamp_duration(0.02).unwrap().value(), 1.0);
        assert_eq!(limits.clamp_duration(1.0).unwrap().value(), 1.0);
        assert_eq!(limits.clamp_duration(42.5).unwrap().value(), 42.5);
    }

    #[test]
    fn long_exposure_is_rejected() {
        let limits = ExposureLimits::default();
        assert_eq!(limits.clamp_duration(10_800.0).unwrap().value(), 10_800.0);
        assert!(matches!(
            limits.clamp_duration(10_800.5),
            Err(EstimateError::TooLong { .. })
        ));
        assert!(matches!(
            limits.clamp_duration(f64::INFINITY),
            Err(EstimateError::TooLong { .. })
        ));
        assert!(matches!(
            limits.clamp_duration(f64::NAN),
            Err(EstimateError::TooLong { .. })
        ));
    }

    #[test]
    fn floor_above_cap_rejects_everything() {
        let limits = ExposureLimits {
            min_exposure: Seconds::new(20_000.0),
            ..ExposureLimits::default()
        };
        assert_eq!(
            limits.clamp_duration(5.0),
            Err(EstimateError::TooLong {
                seconds: 20_000.0,
                limit: 10_800.0
            })
        );
    }

    #[test]
    fn nan_threshold_saturates() {
        let limits = ExposureLimits {
            saturation_counts: f64::NAN,
            ..ExposureLimits::default()
        };
        assert!(limits.check_saturation(1.0).is_err());
    }

    #[test]
    fn saturation_threshold_is_exclusive() {
        let limits = ExposureLimits::default();
        assert!(limits.check_saturation(10_000.0).is_ok());
        assert_eq!(
            limits.check_saturation(10_000.1),
            Err(EstimateError::Saturated {
                counts_per_pixel: 10_000.1,
                limit: 10_000.0
            })
        );
    }
}
