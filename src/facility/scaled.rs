//! Flux-scaled reference exposures.
//!
//! Some facilities publish a reference exposure per filter for a source of a
//! given magnitude (e.g. 60 s for V = 15 at S/N 100) instead of detector
//! characteristics. The suggestion for another magnitude keeps the collected
//! signal constant: `t = t_ref * 10^((mag - mag_ref) / 2.5)`.

use qtty::Seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::estimator::{EstimateError, EstimateResult};
use crate::photometry::flux_ratio;
use crate::profile::ProfileError;

/// Reference exposures of one instrument.
///
/// # Example
///
/// ```rust
/// use followup_etc::facility::ScaledReference;
///
/// let rem = ScaledReference::new("ROS2", 14.0)
///     .with_filter("griz+J", 100.0)
///     .with_filter("griz+H", 120.0);
///
/// let seconds = rem.estimate("griz+H", 14.0).unwrap();
/// assert!((seconds.value() - 120.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaledReference {
    pub instrument: String,
    /// Magnitude at which the reference exposures apply.
    pub reference_magnitude: f64,
    /// Filter name and its reference exposure in seconds, in display order.
    pub filters: Vec<(String, f64)>,
    /// Truncate suggestions to whole seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub whole_seconds: bool,
}

impl ScaledReference {
    pub fn new(instrument: impl Into<String>, reference_magnitude: f64) -> Self {
        Self {
            instrument: instrument.into(),
            reference_magnitude,
            filters: Vec::new(),
            whole_seconds: false,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>, reference_exposure: f64) -> Self {
        self.filters.push((filter.into(), reference_exposure));
        self
    }

    pub fn whole_seconds(mut self) -> Self {
        self.whole_seconds = true;
        self
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|(name, _)| name.as_str())
    }

    pub fn reference_exposure(&self, filter: &str) -> Option<f64> {
        self.filters
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(filter))
            .map(|(_, seconds)| *seconds)
    }

    /// Scales the filter's reference exposure to `magnitude`.
    ///
    /// The scaled time is returned as is, truncated when whole seconds are
    /// requested. No duration floor, cap or saturation test applies here.
    pub fn estimate(&self, filter: &str, magnitude: f64) -> EstimateResult {
        if !magnitude.is_finite() {
            return Err(EstimateError::InvalidInput {
                field: "magnitude",
                value: magnitude,
            });
        }
        let reference = self
            .reference_exposure(filter)
            .ok_or_else(|| ProfileError::UnknownFilter {
                instrument: self.instrument.clone(),
                filter: filter.to_string(),
            })?;

        let seconds = reference * flux_ratio(magnitude, self.reference_magnitude);
        if self.whole_seconds {
            Ok(Seconds::new(seconds.trunc()))
        } else {
            Ok(Seconds::new(seconds))
        }
    }
}
