//! Per-facility suggestion plans.
//!
//! A plan fixes everything an observation form supplies besides the target:
//! which instrument is estimated, which filters or gratings are listed, and
//! the signal-to-noise and seeing the facility assumes.

use std::fmt::Display;
use std::str::FromStr;

use log::debug;
use qtty::Arcseconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::estimator::{
    ExposureTimeEstimator, ImagingRequest, SpectroscopyRequest, DEFAULT_SEEING, DEFAULT_SNR,
};
use crate::facility::{ScaledReference, SuggestionTable};
use crate::photometry::NO_MAGNITUDE;
use crate::profile::{Binning, ProfileError};

/// Robotic facilities that receive follow-up requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Facility {
    Bolecina,
    Lesedi,
    LiverpoolTelescope,
    Rem,
}

impl Facility {
    pub const ALL: [Facility; 4] = [
        Facility::Bolecina,
        Facility::Lesedi,
        Facility::LiverpoolTelescope,
        Facility::Rem,
    ];

    /// Short code used by the request forms.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Bolecina => "BOLECINA",
            Self::Lesedi => "LESEDI",
            Self::LiverpoolTelescope => "LT",
            Self::Rem => "REM",
        }
    }

    /// Suggestion plans for every instrument of this facility.
    pub fn plans(self) -> Vec<SuggestionPlan> {
        let seeing = DEFAULT_SEEING;
        match self {
            Self::Bolecina => vec![SuggestionPlan {
                facility: self,
                label: "SOAB_ZWO-ASI294MC-Pro".into(),
                method: EstimationMethod::ScaledReference(
                    ScaledReference::new("SOAB_ZWO-ASI294MC-Pro", 15.0)
                        .with_filter("B", 60.0)
                        .with_filter("R", 60.0)
                        .with_filter("I", 60.0)
                        .whole_seconds(),
                ),
                options: vec!["B".into(), "R".into(), "I".into()],
                snr: None,
                seeing,
            }],
            Self::Lesedi => vec![SuggestionPlan {
                facility: self,
                label: "Lesedi".into(),
                method: EstimationMethod::ScaledReference(
                    ScaledReference::new("Lesedi", 15.0)
                        .with_filter("U", 60.0)
                        .with_filter("B", 60.0)
                        .with_filter("V", 60.0)
                        .with_filter("I", 60.0)
                        .whole_seconds(),
                ),
                options: vec!["U".into(), "B".into(), "V".into(), "I".into()],
                snr: None,
                seeing,
            }],
            Self::LiverpoolTelescope => vec![
                SuggestionPlan {
                    facility: self,
                    label: "SPRAT".into(),
                    method: EstimationMethod::Spectroscopy {
                        instrument: "sprat".into(),
                        slit: "spratslit".into(),
                    },
                    options: vec!["spbluarm".into(), "spredarm".into()],
                    snr: Some(10.0),
                    seeing,
                },
                SuggestionPlan {
                    facility: self,
                    label: "FRODO".into(),
                    method: EstimationMethod::Spectroscopy {
                        instrument: "frodo".into(),
                        slit: "ifu".into(),
                    },
                    options: vec![
                        "frbluarm".into(),
                        "frredarm".into(),
                        "frbluarmv".into(),
                        "frredarmv".into(),
                    ],
                    snr: Some(10.0),
                    seeing,
                },
                SuggestionPlan {
                    facility: self,
                    label: "IOO".into(),
                    method: EstimationMethod::Imaging {
                        instrument: "ioo".into(),
                        binning: Binning::Two,
                    },
                    options: ["fsu", "fsg", "fsr", "fsi", "fsz", "fbb", "fbv"]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                    snr: Some(50.0),
                    seeing,
                },
                SuggestionPlan {
                    facility: self,
                    label: "IOI".into(),
                    method: EstimationMethod::Imaging {
                        instrument: "ioi".into(),
                        binning: Binning::One,
                    },
                    options: vec!["fhh".into()],
                    snr: Some(50.0),
                    seeing,
                },
            ],
            Self::Rem => vec![SuggestionPlan {
                facility: self,
                label: "ROS2".into(),
                method: EstimationMethod::ScaledReference(
                    ScaledReference::new("ROS2", 14.0)
                        .with_filter("griz+J", 100.0)
                        .with_filter("griz+H", 120.0)
                        .with_filter("griz+Ks", 140.0),
                ),
                options: vec!["griz+J".into(), "griz+H".into(), "griz+Ks".into()],
                snr: None,
                seeing,
            }],
        }
    }

    /// Plan for one instrument, matched on its label case-insensitively.
    pub fn plan(self, label: &str) -> Result<SuggestionPlan, ProfileError> {
        self.plans()
            .into_iter()
            .find(|plan| plan.label.eq_ignore_ascii_case(label))
            .ok_or_else(|| ProfileError::UnknownInstrument(format!("{}/{}", self.code(), label)))
    }
}

impl Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Facility {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facility| facility.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProfileError::UnknownInstrument(s.to_string()))
    }
}

/// How a plan turns a magnitude into an exposure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "method", rename_all = "snake_case"))]
pub enum EstimationMethod {
    /// Signal-to-noise inversion on an imager; options are filters.
    Imaging { instrument: String, binning: Binning },
    /// Signal-to-noise inversion on a spectrograph; options are arms.
    Spectroscopy { instrument: String, slit: String },
    /// Reference exposures scaled by flux; options are filters.
    ScaledReference(ScaledReference),
}

/// Everything needed to fill a facility's suggestion table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SuggestionPlan {
    pub facility: Facility,
    /// Instrument name as shown on the request form.
    pub label: String,
    pub method: EstimationMethod,
    /// Filters or gratings, in display order.
    pub options: Vec<String>,
    /// Signal-to-noise target, for methods that solve for one.
    pub snr: Option<f64>,
    pub seeing: Arcseconds,
}

impl SuggestionPlan {
    /// Suggested exposure for every option at the target's magnitude.
    ///
    /// A target without photometry is estimated at [`NO_MAGNITUDE`].
    pub fn suggest(
        &self,
        estimator: &ExposureTimeEstimator<'_>,
        magnitude: Option<f64>,
    ) -> SuggestionTable {
        let magnitude = magnitude.unwrap_or(NO_MAGNITUDE);
        let snr = self.snr.unwrap_or(DEFAULT_SNR);
        let mut table = SuggestionTable::new(magnitude, self.snr);

        for option in &self.options {
            let estimate = match &self.method {
                EstimationMethod::Imaging {
                    instrument,
                    binning,
                } => estimator.estimate_imaging(
                    &ImagingRequest::new(instrument.as_str(), option.as_str(), magnitude)
                        .with_binning(*binning)
                        .with_snr(snr)
                        .with_seeing(self.seeing),
                ),
                EstimationMethod::Spectroscopy { instrument, slit } => estimator
                    .estimate_spectroscopy(
                        &SpectroscopyRequest::new(
                            instrument.as_str(),
                            slit.as_str(),
                            option.as_str(),
                            magnitude,
                        )
                        .with_snr(snr)
                        .with_seeing(self.seeing),
                    ),
                EstimationMethod::ScaledReference(reference) => {
                    reference.estimate(option, magnitude)
                }
            };
            table.push(option.as_str(), estimate);
        }

        debug!(
            "{} {} suggestions at mag={}: {:?}",
            self.facility,
            self.label,
            magnitude,
            table.sentinel_map()
        );
        table
    }
}
