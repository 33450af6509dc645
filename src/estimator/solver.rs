//! CCD signal-to-noise inversion.
//!
//! For an exposure of `t` seconds the signal-to-noise ratio of a source is
//!
//! ```text
//! SNR = S t / sqrt((S + B + D) t + N R²)
//! ```
//!
//! with `S` the source rate, `B` the sky rate inside the aperture, `D` the
//! dark current, `N` the number of pixels in the aperture and `R` the read
//! noise. Squaring and rearranging gives a quadratic in `t`:
//!
//! ```text
//! S² t² − SNR² (S + B + D) t − SNR² N R² = 0
//! ```
//!
//! whose larger root is the exposure time.

/// Photon and noise budget of one aperture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalModel {
    /// Source photons per second.
    pub star_rate: f64,
    /// Sky photons per second inside the aperture.
    pub sky_rate: f64,
    /// Dark current (e-/s).
    pub dark_current: f64,
    /// Detector pixels covered by the aperture.
    pub pixels: f64,
    /// Read noise per pixel (e-).
    pub read_noise: f64,
}

impl SignalModel {
    /// Exposure time (s) at which the model reaches `snr`.
    ///
    /// Returns `f64::INFINITY` when the source contributes no signal.
    pub fn exposure_for_snr(&self, snr: f64) -> f64 {
        let snr2 = snr * snr;
        let a = self.star_rate * self.star_rate;
        if !(a.is_finite() && a > 0.0) {
            return f64::INFINITY;
        }
        let b = -snr2 * (self.star_rate + self.sky_rate + self.dark_current);
        let c = -snr2 * self.pixels * self.read_noise * self.read_noise;
        larger_root(a, b, c)
    }

    /// Signal-to-noise reached after `seconds`.
    pub fn snr_after(&self, seconds: f64) -> f64 {
        let signal = self.star_rate * seconds;
        let variance = (self.star_rate + self.sky_rate + self.dark_current) * seconds
            + self.pixels * self.read_noise * self.read_noise;
        signal / variance.sqrt()
    }

    /// Mean source counts per pixel after `seconds`.
    pub fn counts_per_pixel(&self, seconds: f64) -> f64 {
        self.star_rate * seconds / self.pixels
    }
}

/// Larger root of `a x² + b x + c` for `a > 0`.
fn larger_root(a: f64, b: f64, c: f64) -> f64 {
    let discriminant = b * b - 4.0 * a * c;
    (-b + discriminant.max(0.0).sqrt()) / (2.0 * a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SignalModel {
        SignalModel {
            star_rate: 500.0,
            sky_rate: 40.0,
            dark_current: 0.0,
            pixels: 44.0,
            read_noise: 10.0,
        }
    }

    #[test]
    fn larger_root_of_simple_quadratic() {
        // (x - 3)(x + 1) = x² - 2x - 3
        assert!((larger_root(1.0, -2.0, -3.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn solved_time_reaches_requested_snr() {
        let m = model();
        for snr in [5.0, 10.0, 50.0, 200.0] {
            let t = m.exposure_for_snr(snr);
            assert!(t > 0.0);
            assert!((m.snr_after(t) - snr).abs() < 1e-6 * snr);
        }
    }

    #[test]
    fn higher_snr_needs_longer_exposure() {
        let m = model();
        assert!(m.exposure_for_snr(20.0) > m.exposure_for_snr(10.0));
    }

    #[test]
    fn skyless_model_reaches_requested_snr() {
        let m = SignalModel {
            star_rate: 100.0,
            sky_rate: 0.0,
            dark_current: 0.0,
            pixels: 4.0,
            read_noise: 5.0,
        };
        let t = m.exposure_for_snr(10.0);
        assert!((m.snr_after(t) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn no_signal_is_unreachable() {
        let m = SignalModel {
            star_rate: 0.0,
            ..model()
        };
        assert!(m.exposure_for_snr(10.0).is_infinite());
    }

    #[test]
    fn counts_per_pixel_scales_with_time() {
        let m = model();
        assert!((m.counts_per_pixel(44.0) - 500.0).abs() < 1e-9);
    }
}
