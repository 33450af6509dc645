//! Exposure-time estimation from target brightness.
//!
//! An [`ExposureTimeEstimator`] turns an [`ExposureRequest`] into the
//! exposure needed to reach the requested signal-to-noise ratio, by solving
//! the CCD noise equation ([`SignalModel`]) with the detector and photometric
//! terms of a [`ProfileRegistry`](crate::profile::ProfileRegistry).
//!
//! Outcomes are tagged: an exposure in seconds, or an [`EstimateError`]
//! telling unsupported configurations apart from saturated and overlong
//! exposures. Callers that need the historical numeric convention use
//! [`SentinelExt::sentinel_seconds`].

pub mod error;
mod estimator;
mod limits;
mod request;
mod solver;


pub use error::{EstimateError, EstimateResult, FailureKind, SentinelExt, SENTINEL};
pub use estimator::ExposureTimeEstimator;
pub use limits::{ExposureLimits, MAX_EXPOSURE, MIN_EXPOSURE, SATURATION_COUNTS};
pub use request::{
    ExposureRequest, ImagingRequest, SpectroscopyRequest, DEFAULT_SEEING, DEFAULT_SNR,
};
pub use solver::SignalModel;
