//! On-chip detector binning.

use std::fmt::Display;
use std::str::FromStr;

use crate::profile::ProfileError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Square on-chip binning applied to an imaging detector.
///
/// Binning multiplies the effective pixel scale, so `Two` packs four
/// physical pixels into one read-out pixel.
///
/// Parsing accepts the word form used by the observing forms (`"two"`),
/// the read-out geometry (`"2x2"`) and the bare factor (`"2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Binning {
    /// 1x1, native pixels.
    One,
    /// 2x2, the usual choice for optical imaging.
    #[default]
    Two,
}

impl Binning {
    /// Linear binning factor.
    pub const fn factor(self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Two => 2.0,
        }
    }
}

impl FromStr for Binning {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one" | "1x1" | "1" => Ok(Self::One),
            "two" | "2x2" | "2" => Ok(Self::Two),
            _ => Err(ProfileError::UnknownBinning(s.to_string())),
        }
    }
}

impl Display for Binning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "1x1"),
            Self::Two => write!(f, "2x2"),
        }
    }
}
