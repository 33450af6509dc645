//! Instrument and optical-element profiles.
//!
//! Profiles are the static inputs of every exposure estimate: detector noise
//! terms for cameras and spectrographs, photometric zero points and sky
//! backgrounds for filters and grating arms. They are gathered in a single
//! [`ProfileRegistry`] so that facilities sharing an instrument never carry
//! diverging copies of its tables.

mod binning;
pub mod error;
mod filter;
mod instrument;
mod registry;

pub use binning::Binning;
pub use error::ProfileError;
pub use filter::{ArmProfile, FilterProfile};
pub use instrument::{DetectorNoise, ImagerProfile, SpectrographProfile};
pub use registry::ProfileRegistry;

/// Lookup key for instrument, filter, slit and arm names.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
