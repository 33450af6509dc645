//! Photometric conversions shared by every estimator.
//!
//! Magnitudes follow the Pogson convention: a difference of 2.5 magnitudes is
//! a factor of 10 in flux. A zero point is the magnitude that produces one
//! detected photon per second, so `flux = 10^((zp - mag) / 2.5)`.

/// Fixed sky-brightness correction factor applied to every sky offset.
///
/// Kept at 1.0: the offset tables already describe typical grey-time
/// conditions and no lunar-phase model feeds this value.
pub const DEFAULT_MOON_FACTOR: f64 = 1.0;

/// Magnitude assumed for a target that has no recorded photometry.
pub const NO_MAGNITUDE: f64 = 99.0;

/// Converts a magnitude to a photon rate (photons/s) for the given zero point.
///
/// # Example
///
/// ```rust
/// use followup_etc::photometry::flux_from_magnitude;
///
/// // A source at the zero point yields one photon per second.
/// assert!((flux_from_magnitude(22.0, 22.0) - 1.0).abs() < 1e-12);
/// // Five magnitudes fainter is a factor of 100 in flux.
/// assert!((flux_from_magnitude(25.0, 20.0) - 100.0).abs() < 1e-9);
/// ```
#[inline]
pub fn flux_from_magnitude(zero_point: f64, magnitude: f64) -> f64 {
    10f64.powf((zero_point - magnitude) / 2.5)
}

/// Inverse of [`flux_from_magnitude`].
///
/// Returns `None` for non-positive or non-finite fluxes, which have no
/// magnitude.
pub fn magnitude_from_flux(zero_point: f64, flux: f64) -> Option<f64> {
    if flux.is_finite() && flux > 0.0 {
        Some(zero_point - 2.5 * flux.log10())
    } else {
        None
    }
}

/// Effective sky surface brightness after the moon/seeing correction.
///
/// `sky_brightness - sky_offset * moon_factor`; a brighter sky has a smaller
/// magnitude, so a positive offset brightens the background.
#[inline]
pub fn effective_sky_magnitude(sky_brightness: f64, sky_offset: f64, moon_factor: f64) -> f64 {
    sky_brightness - sky_offset * moon_factor
}

/// Multiplicative flux scale between two magnitudes, `10^((mag - reference)/2.5)`.
///
/// Values above 1 mean `magnitude` is fainter than `reference`.
#[inline]
pub fn flux_ratio(magnitude: f64, reference: f64) -> f64 {
    10f64.powf((magnitude - reference) / 2.5)
}
