//! followup_etc - exposure-time suggestions for robotic telescope follow-up
//!
//! Given a target's last known magnitude, the crate suggests how long a
//! facility should expose to reach a signal-to-noise goal, for every filter
//! or grating an observation form offers.
//!
//! - [`profile`]: instrument, filter and grating tables in one registry
//! - [`estimator`]: signal-to-noise inversion of the CCD noise equation
//! - [`facility`]: per-facility suggestion tables
//! - [`photometry`]: magnitude and flux conversions

pub mod estimator;
pub mod facility;
pub mod photometry;
pub mod profile;

pub use estimator::{
    EstimateError, EstimateResult, ExposureRequest, ExposureTimeEstimator, ImagingRequest,
    SentinelExt, SpectroscopyRequest,
};
pub use facility::{Facility, SuggestionPlan, SuggestionTable};
pub use profile::{Binning, ProfileRegistry};
