//! Consolidated profile tables.
//!
//! Every facility reads the same registry, so a zero point or read noise is
//! defined exactly once. The built-in registry is constructed on first use
//! and shared for the lifetime of the process; custom registries can be
//! assembled programmatically or, with the `config` feature, loaded from TOML.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::estimator::ExposureLimits;
use crate::profile::{
    name_key, ArmProfile, FilterProfile, ImagerProfile, ProfileError, SpectrographProfile,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static BUILTIN: Lazy<ProfileRegistry> = Lazy::new(builtin_registry);

const LIMITS: &str = "limits";

/// Immutable lookup tables for imagers, filters, spectrographs and arms.
///
/// Imaging and spectroscopy are separate lookup spaces: a grating name is
/// never resolved as a filter and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileRegistry {
    limits: ExposureLimits,
    imagers: BTreeMap<String, ImagerProfile>,
    filters: BTreeMap<String, FilterProfile>,
    spectrographs: BTreeMap<String, SpectrographProfile>,
    arms: BTreeMap<String, ArmProfile>,
}

impl ProfileRegistry {
    /// Creates an empty registry with default exposure limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide built-in registry.
    pub fn builtin() -> &'static ProfileRegistry {
        &BUILTIN
    }

    pub fn with_limits(mut self, limits: ExposureLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &ExposureLimits {
        &self.limits
    }

    pub fn insert_imager(&mut self, name: impl AsRef<str>, profile: ImagerProfile) {
        self.imagers.insert(name_key(name.as_ref()), profile);
    }

    pub fn insert_filter(&mut self, name: impl AsRef<str>, profile: FilterProfile) {
        self.filters.insert(name_key(name.as_ref()), profile);
    }

    pub fn insert_spectrograph(&mut self, name: impl AsRef<str>, profile: SpectrographProfile) {
        self.spectrographs.insert(name_key(name.as_ref()), profile);
    }

    pub fn insert_arm(&mut self, name: impl AsRef<str>, profile: ArmProfile) {
        self.arms.insert(name_key(name.as_ref()), profile);
    }

    pub fn imager(&self, name: &str) -> Result<&ImagerProfile, ProfileError> {
        self.imagers
            .get(&name_key(name))
            .ok_or_else(|| ProfileError::UnknownInstrument(name.to_string()))
    }

    pub fn spectrograph(&self, name: &str) -> Result<&SpectrographProfile, ProfileError> {
        self.spectrographs
            .get(&name_key(name))
            .ok_or_else(|| ProfileError::UnknownInstrument(name.to_string()))
    }

    /// Resolves an imager together with one of its registered filters.
    pub fn imaging_pair(
        &self,
        instrument: &str,
        filter: &str,
    ) -> Result<(&ImagerProfile, &FilterProfile), ProfileError> {
        let imager = self.imager(instrument)?;
        let unknown = || ProfileError::UnknownFilter {
            instrument: instrument.to_string(),
            filter: filter.to_string(),
        };
        if !imager.has_filter(filter) {
            return Err(unknown());
        }
        let profile = self.filters.get(&name_key(filter)).ok_or_else(unknown)?;
        Ok((imager, profile))
    }

    /// Resolves a spectrograph, the width of one of its slits and one of its arms.
    pub fn spectroscopy_setup(
        &self,
        instrument: &str,
        slit: &str,
        arm: &str,
    ) -> Result<(&SpectrographProfile, f64, &ArmProfile), ProfileError> {
        let spectrograph = self.spectrograph(instrument)?;
        let slit_width = spectrograph
            .slit_width(slit)
            .ok_or_else(|| ProfileError::UnknownSlit {
                instrument: instrument.to_string(),
                slit: slit.to_string(),
            })?;
        let unknown = || ProfileError::UnknownArm {
            instrument: instrument.to_string(),
            arm: arm.to_string(),
        };
        if !spectrograph.has_arm(arm) {
            return Err(unknown());
        }
        let profile = self.arms.get(&name_key(arm)).ok_or_else(unknown)?;
        Ok((spectrograph, slit_width, profile))
    }

    pub fn imager_names(&self) -> impl Iterator<Item = &str> {
        self.imagers.keys().map(String::as_str)
    }

    pub fn spectrograph_names(&self) -> impl Iterator<Item = &str> {
        self.spectrographs.keys().map(String::as_str)
    }

    /// Checks that every cross-reference resolves and every physical value is usable.
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.validate_limits()
            .inspect_err(|e| log::warn!("Rejected exposure limits: {e}"))?;

        for (name, imager) in &self.imagers {
            positive(name, "pixel_scale", imager.pixel_scale)?;
            non_negative(name, "dark_current", imager.dark_current)?;
            non_negative(name, "read_noise", imager.read_noise)?;
            for filter in &imager.filters {
                if !self.filters.contains_key(&name_key(filter)) {
                    return Err(ProfileError::DanglingReference {
                        owner: name.clone(),
                        kind: "filter",
                        name: filter.clone(),
                    });
                }
            }
        }

        for (name, filter) in &self.filters {
            finite(name, "zero_point", filter.zero_point)?;
            finite(name, "sky_brightness", filter.sky_brightness)?;
            finite(name, "sky_offset", filter.sky_offset)?;
        }

        for (name, spectrograph) in &self.spectrographs {
            positive(name, "pixel_scale", spectrograph.pixel_scale)?;
            non_negative(name, "dark_current", spectrograph.dark_current)?;
            non_negative(name, "read_noise", spectrograph.read_noise)?;
            for width in spectrograph.slits.values() {
                positive(name, "slit width", *width)?;
            }
            for arm in &spectrograph.arms {
                if !self.arms.contains_key(&name_key(arm)) {
                    return Err(ProfileError::DanglingReference {
                        owner: name.clone(),
                        kind: "arm",
                        name: arm.clone(),
                    });
                }
            }
        }

        for (name, arm) in &self.arms {
            finite(name, "zero_point", arm.zero_point)?;
            finite(name, "sky_brightness", arm.sky_brightness)?;
            finite(name, "sky_offset", arm.sky_offset)?;
            positive(name, "resolving_power", arm.resolving_power)?;
            positive(name, "dispersion", arm.dispersion)?;
            positive(name, "reference_wavelength", arm.reference_wavelength)?;
        }

        Ok(())
    }

    fn validate_limits(&self) -> Result<(), ProfileError> {
        let limits = &self.limits;
        let min = limits.min_exposure.value();
        let max = limits.max_exposure.value();
        positive(LIMITS, "min_exposure", min)?;
        finite(LIMITS, "max_exposure", max)?;
        if max < min {
            return Err(invalid(LIMITS, "max_exposure", max));
        }
        positive(LIMITS, "saturation_counts", limits.saturation_counts)?;
        finite(LIMITS, "moon_factor", limits.moon_factor)
    }

    // =========================================================================
    // TOML loading
    // =========================================================================

    /// Parses and validates a registry from a TOML document.
    ///
    /// Table and element names are normalised to lower case.
    #[cfg(feature = "config")]
    pub fn from_toml_str(document: &str) -> Result<Self, ProfileError> {
        let parsed: ProfileRegistry =
            toml::from_str(document).map_err(|e| ProfileError::Parse(e.to_string()))?;
        let registry = parsed.normalized();
        registry.validate()?;
        log::debug!(
            "Loaded profile registry: {} imagers, {} filters, {} spectrographs, {} arms",
            registry.imagers.len(),
            registry.filters.len(),
            registry.spectrographs.len(),
            registry.arms.len()
        );
        Ok(registry)
    }

    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|e| ProfileError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&document)
    }

    #[cfg(feature = "config")]
    fn normalized(self) -> Self {
        let mut registry = ProfileRegistry::new().with_limits(self.limits);
        for (name, imager) in self.imagers {
            let filters = imager.filters.clone();
            let imager = ImagerProfile {
                filters: Vec::new(),
                ..imager
            }
            .with_filters(filters);
            registry.insert_imager(name, imager);
        }
        for (name, filter) in self.filters {
            registry.insert_filter(name, filter);
        }
        for (name, spectrograph) in self.spectrographs {
            let mut normalized = SpectrographProfile::new(
                spectrograph.pixel_scale,
                spectrograph.dark_current,
                spectrograph.read_noise,
            )
            .with_arms(&spectrograph.arms);
            for (slit, width) in &spectrograph.slits {
                normalized = normalized.with_slit(slit, *width);
            }
            registry.insert_spectrograph(name, normalized);
        }
        for (name, arm) in self.arms {
            registry.insert_arm(name, arm);
        }
        registry
    }
}

fn finite(owner: &str, field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(owner, field, value))
    }
}

fn positive(owner: &str, field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(owner, field, value))
    }
}

fn non_negative(owner: &str, field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(owner, field, value))
    }
}

fn invalid(owner: &str, field: &'static str, value: f64) -> ProfileError {
    ProfileError::InvalidValue {
        owner: owner.to_string(),
        field,
        value: value.to_string(),
    }
}

// =============================================================================
// Built-in tables
// =============================================================================

fn arm(
    zero_point: f64,
    sky_brightness: f64,
    sky_offset: f64,
    resolving_power: f64,
    dispersion: f64,
    reference_wavelength: f64,
) -> ArmProfile {
    ArmProfile {
        zero_point,
        sky_brightness,
        sky_offset,
        resolving_power,
        dispersion,
        reference_wavelength,
    }
}

fn builtin_registry() -> ProfileRegistry {
    let mut registry = ProfileRegistry::new();

    // Liverpool Telescope cameras
    registry.insert_imager(
        "ioo",
        ImagerProfile::new(0.15, 0.0, 10.0)
            .with_filters(["fsu", "fbb", "fbv", "fsg", "fsr", "fsi", "fsz"]),
    );
    registry.insert_imager(
        "ioi",
        ImagerProfile::new(0.18, 0.0, 17.0).with_filters(["fjj", "fhh"]),
    );
    registry.insert_imager(
        "rise",
        ImagerProfile::new(0.54, 0.0, 10.0).with_filters(["frise", "frise720"]),
    );
    registry.insert_imager(
        "ringo",
        ImagerProfile::new(0.48, 0.0, 17.0).with_filters(["fringr", "fringg", "fringb"]),
    );

    for (name, zp, sky, offset) in [
        ("fsu", 22.17, 21.0, 1.5),
        ("fbb", 24.90, 22.3, 1.5),
        ("fbv", 24.96, 21.4, 1.5),
        ("fsg", 25.14, 21.7, 1.0),
        ("fsr", 25.39, 20.4, 1.0),
        ("fsi", 25.06, 19.3, 1.0),
        ("fsz", 24.52, 18.3, 0.5),
        ("fjj", 24.50, 16.6, 0.0),
        ("fhh", 24.00, 12.5, 0.0),
        ("frise", 25.20, 20.4, 1.0),
        ("frise720", 23.40, 19.3, 1.0),
        ("fringr", 21.0, 19.3, 1.0),
        ("fringg", 21.8, 20.4, 1.0),
        ("fringb", 23.0, 22.3, 1.5),
    ] {
        registry.insert_filter(name, FilterProfile::new(zp, sky, offset));
    }

    // Liverpool Telescope spectrographs
    registry.insert_spectrograph(
        "frodo",
        SpectrographProfile::new(0.82, 0.0, 10.0)
            .with_slit("ifu", 10.0)
            .with_arms(["frredarmv", "frbluarmv", "frredarm", "frbluarm"]),
    );
    registry.insert_spectrograph(
        "sprat",
        SpectrographProfile::new(0.48, 0.0, 9.0)
            .with_slit("spratslit", 2.0)
            .with_arms(["spredarm", "spbluarm"]),
    );

    registry.insert_arm("frredarmv", arm(16.0, 20.8, 1.0, 5300.0, 0.8, 7000.0));
    registry.insert_arm("frbluarmv", arm(14.5, 22.8, 1.5, 5500.0, 0.35, 4500.0));
    registry.insert_arm("frredarm", arm(15.6, 20.8, 1.0, 2200.0, 1.9, 7000.0));
    registry.insert_arm("frbluarm", arm(14.7, 22.8, 1.5, 2600.0, 0.60, 4500.0));
    registry.insert_arm("spredarm", arm(17.7, 20.8, 1.0, 350.0, 9.0, 7000.0));
    registry.insert_arm("spbluarm", arm(17.2, 22.8, 1.5, 350.0, 3.0, 4500.0));

    debug_assert!(registry.validate().is_ok());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Seconds;

    #[test]
    fn builtin_registry_is_consistent() {
        assert!(ProfileRegistry::builtin().validate().is_ok());
    }

    #[test]
    fn builtin_is_shared() {
        let a = ProfileRegistry::builtin() as *const ProfileRegistry;
        let b = ProfileRegistry::builtin() as *const ProfileRegistry;
        assert_eq!(a, b);
    }

    #[test]
    fn builtin_contains_all_instruments() {
        let registry = ProfileRegistry::builtin();
        let imagers: Vec<_> = registry.imager_names().collect();
        assert_eq!(imagers, vec!["ioi", "ioo", "ringo", "rise"]);
        let spectrographs: Vec<_> = registry.spectrograph_names().collect();
        assert_eq!(spectrographs, vec!["frodo", "sprat"]);
    }

    #[test]
    fn imaging_pair_resolves_registered_filter() {
        let (imager, filter) = ProfileRegistry::builtin().imaging_pair("IOO", "fsu").unwrap();
        assert_eq!(imager.pixel_scale, 0.15);
        assert_eq!(filter.zero_point, 22.17);
        assert_eq!(filter.sky_brightness, 21.0);
    }

    #[test]
    fn imaging_pair_rejects_foreign_filter() {
        let err = ProfileRegistry::builtin().imaging_pair("ioo", "fhh").unwrap_err();
        assert_eq!(
            err,
            ProfileError::UnknownFilter {
                instrument: "ioo".into(),
                filter: "fhh".into()
            }
        );
    }

    #[test]
    fn imaging_and_spectroscopy_are_separate_spaces() {
        let registry = ProfileRegistry::builtin();
        assert!(matches!(
            registry.imaging_pair("sprat", "spbluarm"),
            Err(ProfileError::UnknownInstrument(_))
        ));
        assert!(matches!(
            registry.spectroscopy_setup("ioo", "spratslit", "fsu"),
            Err(ProfileError::UnknownInstrument(_))
        ));
    }

    #[test]
    fn padded_names_resolve_like_registry_keys() {
        let registry = ProfileRegistry::builtin();
        assert!(registry.imaging_pair(" ioo ", " fsu").is_ok());
        assert!(registry
            .spectroscopy_setup("sprat ", " spratslit ", "SPBLUARM ")
            .is_ok());
    }

    #[test]
    fn spectroscopy_setup_checks_slit_then_arm() {
        let registry = ProfileRegistry::builtin();

        let (sprat, width, arm) = registry
            .spectroscopy_setup("sprat", "spratslit", "spbluarm")
            .unwrap();
        assert_eq!(sprat.read_noise, 9.0);
        assert_eq!(width, 2.0);
        assert_eq!(arm.resolving_power, 350.0);

        assert!(matches!(
            registry.spectroscopy_setup("sprat", "ifu", "spbluarm"),
            Err(ProfileError::UnknownSlit { .. })
        ));
        assert!(matches!(
            registry.spectroscopy_setup("sprat", "spratslit", "frredarm"),
            Err(ProfileError::UnknownArm { .. })
        ));
    }

    #[test]
    fn validate_reports_dangling_filter() {
        let mut registry = ProfileRegistry::new();
        registry.insert_imager("cam", ImagerProfile::new(0.3, 0.0, 5.0).with_filters(["v"]));
        assert_eq!(
            registry.validate(),
            Err(ProfileError::DanglingReference {
                owner: "cam".into(),
                kind: "filter",
                name: "v".into()
            })
        );

        registry.insert_filter("V", FilterProfile::new(24.0, 21.0, 1.0));
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_pixel_scale() {
        let mut registry = ProfileRegistry::new();
        registry.insert_imager("cam", ImagerProfile::new(0.0, 0.0, 5.0));
        assert!(matches!(
            registry.validate(),
            Err(ProfileError::InvalidValue {
                field: "pixel_scale",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_inconsistent_limits() {
        let inverted = ExposureLimits {
            min_exposure: Seconds::new(20_000.0),
            ..ExposureLimits::default()
        };
        assert_eq!(
            ProfileRegistry::new().with_limits(inverted).validate(),
            Err(ProfileError::InvalidValue {
                owner: "limits".into(),
                field: "max_exposure",
                value: "10800".into()
            })
        );

        let unsaturable = ExposureLimits {
            saturation_counts: f64::NAN,
            ..ExposureLimits::default()
        };
        assert!(matches!(
            ProfileRegistry::new().with_limits(unsaturable).validate(),
            Err(ProfileError::InvalidValue {
                field: "saturation_counts",
                ..
            })
        ));

        let no_floor = ExposureLimits {
            min_exposure: Seconds::new(0.0),
            ..ExposureLimits::default()
        };
        assert!(ProfileRegistry::new().with_limits(no_floor).validate().is_err());

        let moonless = ExposureLimits {
            moon_factor: f64::INFINITY,
            ..ExposureLimits::default()
        };
        assert!(ProfileRegistry::new().with_limits(moonless).validate().is_err());
        assert!(ProfileRegistry::builtin().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_resolving_power() {
        let mut registry = ProfileRegistry::new();
        registry.insert_arm("bad", arm(17.0, 21.0, 1.0, 0.0, 3.0, 4500.0));
        assert!(matches!(
            registry.validate(),
            Err(ProfileError::InvalidValue {
                field: "resolving_power",
                ..
            })
        ));
    }
}

#[cfg(all(test, feature = "config"))]
mod config_tests {
    use super::*;

    const DOCUMENT: &str = r#"
        [limits]
        max_exposure = 3600.0

        [imagers.Cam]
        pixel_scale = 0.3
        read_noise = 8.0
        filters = ["V", "r"]

        [filters.v]
        zero_point = 24.0
        sky_brightness = 21.0
        sky_offset = 1.0

        [filters.r]
        zero_point = 24.5
        sky_brightness = 20.5

        [spectrographs.lores]
        pixel_scale = 0.5
        read_noise = 6.0
        arms = ["blue"]
        slits = { long = 1.5 }

        [arms.blue]
        zero_point = 17.0
        sky_brightness = 22.0
        resolving_power = 500.0
        dispersion = 2.0
        reference_wavelength = 4500.0
    "#;

    #[test]
    fn loads_registry_from_toml() {
        let registry = ProfileRegistry::from_toml_str(DOCUMENT).unwrap();

        let (cam, v) = registry.imaging_pair("cam", "V").unwrap();
        assert_eq!(cam.read_noise, 8.0);
        assert_eq!(cam.dark_current, 0.0);
        assert_eq!(v.zero_point, 24.0);

        let (_, width, blue) = registry.spectroscopy_setup("LORES", "long", "blue").unwrap();
        assert_eq!(width, 1.5);
        assert_eq!(blue.sky_offset, 0.0);

        assert_eq!(registry.limits().max_exposure.value(), 3600.0);
        assert_eq!(registry.limits().min_exposure.value(), 1.0);
    }

    #[test]
    fn rejects_dangling_arm() {
        let document = r#"
            [spectrographs.lores]
            pixel_scale = 0.5
            read_noise = 6.0
            arms = ["missing"]
        "#;
        let err = ProfileRegistry::from_toml_str(document).unwrap_err();
        assert_eq!(
            err,
            ProfileError::DanglingReference {
                owner: "lores".into(),
                kind: "arm",
                name: "missing".into()
            }
        );
    }

    #[test]
    fn rejects_floor_above_cap() {
        let document = r#"
            [limits]
            min_exposure = 20000.0
        "#;
        let err = ProfileRegistry::from_toml_str(document).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InvalidValue {
                field: "max_exposure",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_positive_saturation() {
        let document = r#"
            [limits]
            saturation_counts = -1.0
        "#;
        let err = ProfileRegistry::from_toml_str(document).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InvalidValue {
                field: "saturation_counts",
                ..
            }
        ));
    }

    #[test]
    fn reports_parse_errors() {
        let document = "[imagers.cam]\npixel_scale = \"wide\"";
        let err = ProfileRegistry::from_toml_str(document).unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ProfileRegistry::from_toml_file("/nonexistent/profiles.toml").unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
    }
}
