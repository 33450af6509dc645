//! Suggestion tables shown next to an observation request.

use std::fmt::Display;

use crate::estimator::{EstimateResult, SentinelExt};

/// One filter or grating and its suggested exposure.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRow {
    pub option: String,
    pub estimate: EstimateResult,
}

/// Suggested exposures for every option of an instrument, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionTable {
    magnitude: f64,
    snr: Option<f64>,
    rows: Vec<SuggestionRow>,
}

impl SuggestionTable {
    pub fn new(magnitude: f64, snr: Option<f64>) -> Self {
        Self {
            magnitude,
            snr,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, option: impl Into<String>, estimate: EstimateResult) {
        self.rows.push(SuggestionRow {
            option: option.into(),
            estimate,
        });
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Signal-to-noise the suggestions were computed for, if the method has one.
    pub fn snr(&self) -> Option<f64> {
        self.snr
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SuggestionRow> {
        self.rows.iter()
    }

    /// Estimate for an option, matched case-insensitively.
    pub fn get(&self, option: &str) -> Option<&EstimateResult> {
        self.rows
            .iter()
            .find(|row| row.option.eq_ignore_ascii_case(option))
            .map(|row| &row.estimate)
    }

    /// The row used to pre-fill the exposure field.
    pub fn first(&self) -> Option<&SuggestionRow> {
        self.rows.first()
    }

    /// Option name to seconds, with `-1` for every failure.
    pub fn sentinel_map(&self) -> Vec<(String, f64)> {
        self.rows
            .iter()
            .map(|row| (row.option.clone(), row.estimate.sentinel_seconds()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SuggestionTable {
    type Item = &'a SuggestionRow;
    type IntoIter = std::slice::Iter<'a, SuggestionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Display for SuggestionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Suggested exposure times for mag={:.2}", self.magnitude)?;
        if let Some(snr) = self.snr {
            write!(f, " and S/N={snr}")?;
        }
        writeln!(f)?;
        writeln!(f, "{:<12} {:>14}", "Option", "Exposure Time")?;
        for row in &self.rows {
            match &row.estimate {
                Ok(seconds) => writeln!(f, "{:<12} {:>14.2}", row.option, seconds.value())?,
                Err(_) => writeln!(f, "{:<12} {:>14}", row.option, "n/a")?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// SuggestionTable Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for SuggestionTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("SuggestionTable", 3)?;
        s.serialize_field("magnitude", &self.magnitude)?;
        s.serialize_field("snr", &self.snr)?;
        s.serialize_field("exposure_times", &self.sentinel_map())?;
        s.end()
    }
}
