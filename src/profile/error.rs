use thiserror::Error;

/// Errors raised while looking up or loading instrument profiles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Filter {filter} is not available on instrument {instrument}")]
    UnknownFilter { instrument: String, filter: String },

    #[error("Arm {arm} is not available on spectrograph {instrument}")]
    UnknownArm { instrument: String, arm: String },

    #[error("Slit {slit} is not available on spectrograph {instrument}")]
    UnknownSlit { instrument: String, slit: String },

    #[error("Unknown binning: {0}")]
    UnknownBinning(String),

    #[error("{owner} references undefined {kind} {name}")]
    DanglingReference {
        owner: String,
        kind: &'static str,
        name: String,
    },

    #[error("Invalid value for {field} of {owner}: {value}")]
    InvalidValue {
        owner: String,
        field: &'static str,
        value: String,
    },

    #[cfg(feature = "config")]
    #[error("Cannot read profile file {path}: {message}")]
    Io { path: String, message: String },

    #[cfg(feature = "config")]
    #[error("Cannot parse profile document: {0}")]
    Parse(String),
}
