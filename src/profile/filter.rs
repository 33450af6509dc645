//! Photometric profiles of imaging filters and spectrograph arms.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::photometry::effective_sky_magnitude;

/// Zero point and sky background of an imaging filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterProfile {
    /// Magnitude yielding one detected photon per second.
    pub zero_point: f64,
    /// Dark-sky surface brightness (mag/arcsec²).
    pub sky_brightness: f64,
    /// Sky brightening applied per unit of moon factor (mag).
    #[cfg_attr(feature = "serde", serde(default))]
    pub sky_offset: f64,
}

impl FilterProfile {
    pub const fn new(zero_point: f64, sky_brightness: f64, sky_offset: f64) -> Self {
        Self {
            zero_point,
            sky_brightness,
            sky_offset,
        }
    }

    /// Sky surface brightness under the given moon factor.
    pub fn sky_magnitude(&self, moon_factor: f64) -> f64 {
        effective_sky_magnitude(self.sky_brightness, self.sky_offset, moon_factor)
    }
}

/// Photometric and dispersive properties of a spectrograph arm (grating).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArmProfile {
    /// Zero point per Ångström of bandwidth.
    pub zero_point: f64,
    /// Dark-sky surface brightness (mag/arcsec²).
    pub sky_brightness: f64,
    /// Sky brightening applied per unit of moon factor (mag).
    #[cfg_attr(feature = "serde", serde(default))]
    pub sky_offset: f64,
    /// Resolving power `λ/Δλ`.
    pub resolving_power: f64,
    /// Dispersion along the spectral axis (Å/pixel).
    pub dispersion: f64,
    /// Wavelength at which the estimate is evaluated (Å).
    pub reference_wavelength: f64,
}

impl ArmProfile {
    pub fn sky_magnitude(&self, moon_factor: f64) -> f64 {
        effective_sky_magnitude(self.sky_brightness, self.sky_offset, moon_factor)
    }

    /// Width of one resolution element at the reference wavelength (Å).
    pub fn resolution_element(&self) -> f64 {
        self.reference_wavelength / self.resolving_power
    }

    /// Detector pixels spanned by one resolution element.
    pub fn spectral_pixels(&self) -> f64 {
        self.resolution_element() / self.dispersion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photometry::DEFAULT_MOON_FACTOR;

    #[test]
    fn filter_sky_magnitude_applies_offset() {
        let fsu = FilterProfile::new(22.17, 21.0, 1.5);
        assert!((fsu.sky_magnitude(DEFAULT_MOON_FACTOR) - 19.5).abs() < 1e-12);
    }

    #[test]
    fn arm_resolution_geometry() {
        let spbluarm = ArmProfile {
            zero_point: 17.2,
            sky_brightness: 22.8,
            sky_offset: 1.5,
            resolving_power: 350.0,
            dispersion: 3.0,
            reference_wavelength: 4500.0,
        };

        let element = spbluarm.resolution_element();
        assert!((element - 4500.0 / 350.0).abs() < 1e-12);
        assert!((spbluarm.spectral_pixels() - element / 3.0).abs() < 1e-12);
        assert!((spbluarm.sky_magnitude(DEFAULT_MOON_FACTOR) - 21.3).abs() < 1e-12);
    }
}
