//! Exposure-time estimator over a profile registry.

use log::{debug, warn};
use qtty::Seconds;

use crate::estimator::{
    EstimateError, EstimateResult, ExposureLimits, ExposureRequest, ImagingRequest, SignalModel,
    SpectroscopyRequest,
};
use crate::photometry::flux_from_magnitude;
use crate::profile::ProfileRegistry;

/// Suggests the exposure needed to reach a signal-to-noise target.
///
/// The estimator is a pure function of its registry, its limits and the
/// request; it can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use followup_etc::estimator::{ExposureTimeEstimator, ImagingRequest};
///
/// let estimator = ExposureTimeEstimator::builtin();
/// let request = ImagingRequest::new("ioo", "fsr", 16.0).with_snr(50.0);
/// let seconds = estimator.estimate_imaging(&request).unwrap();
/// assert!(seconds.value() >= 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExposureTimeEstimator<'r> {
    registry: &'r ProfileRegistry,
    limits: ExposureLimits,
}

impl ExposureTimeEstimator<'static> {
    /// Estimator over the built-in Liverpool Telescope tables.
    pub fn builtin() -> Self {
        Self::new(ProfileRegistry::builtin())
    }
}

impl Default for ExposureTimeEstimator<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'r> ExposureTimeEstimator<'r> {
    /// Creates an estimator using the registry's own limits.
    pub fn new(registry: &'r ProfileRegistry) -> Self {
        Self {
            registry,
            limits: *registry.limits(),
        }
    }

    /// Overrides the registry's limits.
    pub fn with_limits(mut self, limits: ExposureLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn registry(&self) -> &'r ProfileRegistry {
        self.registry
    }

    pub fn limits(&self) -> &ExposureLimits {
        &self.limits
    }

    /// Dispatches on the request's observing mode.
    pub fn estimate(&self, request: &ExposureRequest) -> EstimateResult {
        match request {
            ExposureRequest::Imaging(r) => self.estimate_imaging(r),
            ExposureRequest::Spectroscopy(r) => self.estimate_spectroscopy(r),
        }
    }

    /// Exposure for a photometric observation.
    ///
    /// The aperture is a square of side twice the seeing; the sky is
    /// integrated over that area.
    pub fn estimate_imaging(&self, request: &ImagingRequest) -> EstimateResult {
        request.validate()?;
        let (imager, filter) = self
            .registry
            .imaging_pair(&request.instrument, &request.filter)
            .inspect_err(|e| warn!("Imaging estimate rejected: {e}"))?;

        let noise = imager.noise();
        let seeing = request.seeing.value();
        let aperture = (2.0 * seeing) * (2.0 * seeing);
        let pixel = noise.pixel_scale * request.binning.factor();
        let pixels = aperture / (pixel * pixel);

        let sky_magnitude = filter.sky_magnitude(self.limits.moon_factor);
        let model = SignalModel {
            star_rate: flux_from_magnitude(filter.zero_point, request.magnitude),
            sky_rate: flux_from_magnitude(filter.zero_point, sky_magnitude) * aperture,
            dark_current: noise.dark_current,
            pixels,
            read_noise: noise.read_noise,
        };
        debug!(
            "Imaging {}/{} ({}) mag={} snr={}: {:?}",
            request.instrument,
            request.filter,
            request.binning,
            request.magnitude,
            request.snr,
            model
        );

        self.finish(&model, request.snr)
    }

    /// Exposure for a spectroscopic observation.
    ///
    /// Fluxes are taken per resolution element at the arm's reference
    /// wavelength; the aperture is the slit width times twice the seeing.
    pub fn estimate_spectroscopy(&self, request: &SpectroscopyRequest) -> EstimateResult {
        request.validate()?;
        let (spectrograph, slit_width, arm) = self
            .registry
            .spectroscopy_setup(&request.instrument, &request.slit, &request.arm)
            .inspect_err(|e| warn!("Spectroscopy estimate rejected: {e}"))?;

        let noise = spectrograph.noise();
        let spatial = slit_width * request.seeing.value() * 2.0;
        let spatial_pixels = spatial / (noise.pixel_scale * noise.pixel_scale);
        let pixels = spatial_pixels * arm.spectral_pixels();

        let bandwidth = arm.resolution_element();
        let sky_magnitude = arm.sky_magnitude(self.limits.moon_factor);
        let model = SignalModel {
            star_rate: flux_from_magnitude(arm.zero_point, request.magnitude) * bandwidth,
            sky_rate: flux_from_magnitude(arm.zero_point, sky_magnitude) * bandwidth * spatial,
            dark_current: noise.dark_current,
            pixels,
            read_noise: noise.read_noise,
        };
        debug!(
            "Spectroscopy {}/{}/{} mag={} snr={}: {:?}",
            request.instrument, request.slit, request.arm, request.magnitude, request.snr, model
        );

        self.finish(&model, request.snr)
    }

    fn finish(&self, model: &SignalModel, snr: f64) -> Result<Seconds, EstimateError> {
        let raw = model.exposure_for_snr(snr);
        let seconds = self.limits.clamp_duration(raw).inspect_err(|e| debug!("{e}"))?;
        self.limits
            .check_saturation(model.counts_per_pixel(seconds.value()))
            .inspect_err(|e| debug!("{e}"))?;
        debug!("Suggested exposure {:.2} s (raw {:.3} s)", seconds.value(), raw);
        Ok(seconds)
    }
}
