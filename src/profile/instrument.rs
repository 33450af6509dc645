//! Detector-level profiles for cameras and spectrographs.
//!
//! A profile carries the detector terms of the CCD noise equation (pixel
//! scale, dark current, read noise) plus the optical elements the instrument
//! can be configured with. Element names are stored lower-cased so lookups
//! are case-insensitive.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::profile::name_key;

/// Detector noise terms shared by imagers and spectrographs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorNoise {
    /// Sky-projected size of one unbinned pixel (arcsec/pixel).
    pub pixel_scale: f64,
    /// Dark current (e-/s).
    pub dark_current: f64,
    /// Read noise per pixel (e-).
    pub read_noise: f64,
}

/// An imaging camera and the filters mounted in it.
///
/// # Example
///
/// ```rust
/// use followup_etc::profile::ImagerProfile;
///
/// let ioo = ImagerProfile::new(0.15, 0.0, 10.0).with_filters(["fsu", "FSG"]);
/// assert!(ioo.has_filter("fsg"));
/// assert!(!ioo.has_filter("fhh"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImagerProfile {
    /// Unbinned pixel scale (arcsec/pixel).
    pub pixel_scale: f64,
    /// Dark current (e-/s).
    #[cfg_attr(feature = "serde", serde(default))]
    pub dark_current: f64,
    /// Read noise (e-).
    pub read_noise: f64,
    /// Filters valid on this camera.
    #[cfg_attr(feature = "serde", serde(default))]
    pub filters: Vec<String>,
}

impl ImagerProfile {
    pub fn new(pixel_scale: f64, dark_current: f64, read_noise: f64) -> Self {
        Self {
            pixel_scale,
            dark_current,
            read_noise,
            filters: Vec::new(),
        }
    }

    /// Registers filters on this camera.
    pub fn with_filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters
            .extend(filters.into_iter().map(|f| name_key(f.as_ref())));
        self
    }

    pub fn has_filter(&self, filter: &str) -> bool {
        let filter = name_key(filter);
        self.filters.iter().any(|f| *f == filter)
    }

    pub fn noise(&self) -> DetectorNoise {
        DetectorNoise {
            pixel_scale: self.pixel_scale,
            dark_current: self.dark_current,
            read_noise: self.read_noise,
        }
    }
}

/// A long-slit or IFU spectrograph, its entrance apertures and grating arms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpectrographProfile {
    /// Spatial pixel scale (arcsec/pixel).
    pub pixel_scale: f64,
    /// Dark current (e-/s).
    #[cfg_attr(feature = "serde", serde(default))]
    pub dark_current: f64,
    /// Read noise (e-).
    pub read_noise: f64,
    /// Slit (or fibre bundle) name to projected width in arcsec.
    #[cfg_attr(feature = "serde", serde(default))]
    pub slits: BTreeMap<String, f64>,
    /// Grating arms valid on this spectrograph.
    #[cfg_attr(feature = "serde", serde(default))]
    pub arms: Vec<String>,
}

impl SpectrographProfile {
    pub fn new(pixel_scale: f64, dark_current: f64, read_noise: f64) -> Self {
        Self {
            pixel_scale,
            dark_current,
            read_noise,
            slits: BTreeMap::new(),
            arms: Vec::new(),
        }
    }

    /// Adds a slit of the given width (arcsec).
    pub fn with_slit(mut self, name: impl AsRef<str>, width: f64) -> Self {
        self.slits.insert(name_key(name.as_ref()), width);
        self
    }

    pub fn with_arms<I, S>(mut self, arms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.arms
            .extend(arms.into_iter().map(|a| name_key(a.as_ref())));
        self
    }

    /// Width of the named slit in arcsec, if mounted.
    pub fn slit_width(&self, slit: &str) -> Option<f64> {
        self.slits.get(&name_key(slit)).copied()
    }

    pub fn has_arm(&self, arm: &str) -> bool {
        let arm = name_key(arm);
        self.arms.iter().any(|a| *a == arm)
    }

    pub fn noise(&self) -> DetectorNoise {
        DetectorNoise {
            pixel_scale: self.pixel_scale,
            dark_current: self.dark_current,
            read_noise: self.read_noise,
        }
    }
}
