//! Exposure requests for the two observing modes.
//!
//! Imaging and spectroscopy are distinct request types; a request names its
//! instrument and optical elements explicitly instead of leaving the unused
//! mode's arguments empty.

use qtty::Arcseconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::estimator::EstimateError;
use crate::profile::Binning;

/// Seeing assumed by the observing forms when none is given.
pub const DEFAULT_SEEING: Arcseconds = Arcseconds::new(1.2);
/// Signal-to-noise ratio requested by the spectroscopic forms.
pub const DEFAULT_SNR: f64 = 10.0;

/// Photometric request: camera, filter, binning.
///
/// # Example
///
/// ```rust
/// use followup_etc::estimator::ImagingRequest;
/// use followup_etc::profile::Binning;
/// use qtty::Arcseconds;
///
/// let request = ImagingRequest::new("ioo", "fsu", 15.0)
///     .with_binning(Binning::Two)
///     .with_snr(50.0)
///     .with_seeing(Arcseconds::new(1.0));
/// assert_eq!(request.snr, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImagingRequest {
    pub instrument: String,
    pub filter: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub binning: Binning,
    /// Target brightness in the filter's magnitude system.
    pub magnitude: f64,
    pub snr: f64,
    pub seeing: Arcseconds,
}

impl ImagingRequest {
    pub fn new(instrument: impl Into<String>, filter: impl Into<String>, magnitude: f64) -> Self {
        Self {
            instrument: instrument.into(),
            filter: filter.into(),
            binning: Binning::default(),
            magnitude,
            snr: DEFAULT_SNR,
            seeing: DEFAULT_SEEING,
        }
    }

    pub fn with_binning(mut self, binning: Binning) -> Self {
        self.binning = binning;
        self
    }

    pub fn with_snr(mut self, snr: f64) -> Self {
        self.snr = snr;
        self
    }

    pub fn with_seeing(mut self, seeing: Arcseconds) -> Self {
        self.seeing = seeing;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), EstimateError> {
        validate_observables(self.magnitude, self.snr, self.seeing)
    }
}

/// Spectroscopic request: spectrograph, slit, grating arm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpectroscopyRequest {
    pub instrument: String,
    pub slit: String,
    pub arm: String,
    pub magnitude: f64,
    pub snr: f64,
    pub seeing: Arcseconds,
}

impl SpectroscopyRequest {
    pub fn new(
        instrument: impl Into<String>,
        slit: impl Into<String>,
        arm: impl Into<String>,
        magnitude: f64,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            slit: slit.into(),
            arm: arm.into(),
            magnitude,
            snr: DEFAULT_SNR,
            seeing: DEFAULT_SEEING,
        }
    }

    pub fn with_snr(mut self, snr: f64) -> Self {
        self.snr = snr;
        self
    }

    pub fn with_seeing(mut self, seeing: Arcseconds) -> Self {
        self.seeing = seeing;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), EstimateError> {
        validate_observables(self.magnitude, self.snr, self.seeing)
    }
}

/// Either kind of request, dispatched by [`ExposureTimeEstimator::estimate`].
///
/// [`ExposureTimeEstimator::estimate`]: crate::estimator::ExposureTimeEstimator::estimate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum ExposureRequest {
    Imaging(ImagingRequest),
    Spectroscopy(SpectroscopyRequest),
}

impl ExposureRequest {
    pub fn instrument(&self) -> &str {
        match self {
            Self::Imaging(r) => &r.instrument,
            Self::Spectroscopy(r) => &r.instrument,
        }
    }

    pub fn magnitude(&self) -> f64 {
        match self {
            Self::Imaging(r) => r.magnitude,
            Self::Spectroscopy(r) => r.magnitude,
        }
    }
}

impl From<ImagingRequest> for ExposureRequest {
    fn from(request: ImagingRequest) -> Self {
        Self::Imaging(request)
    }
}

impl From<SpectroscopyRequest> for ExposureRequest {
    fn from(request: SpectroscopyRequest) -> Self {
        Self::Spectroscopy(request)
    }
}

fn validate_observables(magnitude: f64, snr: f64, seeing: Arcseconds) -> Result<(), EstimateError> {
    if !magnitude.is_finite() {
        return Err(EstimateError::InvalidInput {
            field: "magnitude",
            value: magnitude,
        });
    }
    if !(snr.is_finite() && snr > 0.0) {
        return Err(EstimateError::InvalidInput {
            field: "snr",
            value: snr,
        });
    }
    if !(seeing.value().is_finite() && seeing.value() > 0.0) {
        return Err(EstimateError::InvalidInput {
            field: "seeing",
            value: seeing.value(),
        });
    }
    Ok(())
}
