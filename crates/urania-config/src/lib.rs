use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use urania::western::{FirstHouseReference, HouseCalculator, HouseSystem, Sign};
use urania::{EventSettings, GeoLocation};

/// Relative locations tried for `configs/urania.toml`, from the workspace
/// root and from a crate directory.
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Analytic,
    Swiss,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EphemerisSettings {
    pub backend: BackendKind,
    pub data_path: Option<PathBuf>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UraniaSettings {
    pub location: Option<GeoLocation>,
    pub houses: HouseCalculator,
    pub events: EventSettings,
    pub ephemeris: EphemerisSettings,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationToml {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
enum FirstHouseToml {
    #[default]
    Ascendant,
    SunSign,
    MoonSign,
    Manual,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct HousesToml {
    #[serde(default)]
    system: HouseSystem,
    #[serde(default)]
    first_house: FirstHouseToml,
    #[serde(default)]
    manual_sign: Option<Sign>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
enum BackendToml {
    #[default]
    Analytic,
    Swiss,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct EphemerisToml {
    #[serde(default)]
    backend: BackendToml,
    #[serde(default)]
    data_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RootConfigToml {
    #[serde(default)]
    location: Option<LocationToml>,
    #[serde(default)]
    houses: HousesToml,
    #[serde(default)]
    events: EventSettings,
    #[serde(default)]
    ephemeris: EphemerisToml,
}

/// Text of the config file, or `None` when no file exists on the search path.
///
/// An explicit path must exist.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", path.display()))?;
        return Ok(Some(text));
    }
    for p in &CONFIG_SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            debug!("loaded config from {p}");
            return Ok(Some(text));
        }
    }
    debug!("no config found in {:?}; using defaults", CONFIG_SEARCH_PATHS);
    Ok(None)
}

/// Parse and validate TOML config text
pub fn parse_settings(text: &str) -> anyhow::Result<UraniaSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let RootConfigToml {
        location,
        houses,
        events,
        ephemeris,
    } = root;

    let location = location
        .map(|l| {
            GeoLocation::try_new(l.latitude, l.longitude)
                .map_err(|e| anyhow::anyhow!("Invalid [location]: {e}"))
        })
        .transpose()?;

    let reference = match (houses.first_house, houses.manual_sign) {
        (FirstHouseToml::Ascendant, _) => FirstHouseReference::Ascendant,
        (FirstHouseToml::SunSign, _) => FirstHouseReference::SunSign,
        (FirstHouseToml::MoonSign, _) => FirstHouseReference::MoonSign,
        (FirstHouseToml::Manual, Some(sign)) => FirstHouseReference::ManualSign(sign),
        (FirstHouseToml::Manual, None) => {
            anyhow::bail!("houses.first_house = \"manual\" requires houses.manual_sign")
        }
    };
    if reference == FirstHouseReference::Ascendant && location.is_none() {
        debug!("ascendant houses configured without [location]");
    }

    validate_events(&events)?;

    let ephemeris = EphemerisSettings {
        backend: match ephemeris.backend {
            BackendToml::Analytic => BackendKind::Analytic,
            BackendToml::Swiss => BackendKind::Swiss,
        },
        data_path: ephemeris.data_path,
    };

    Ok(UraniaSettings {
        location,
        houses: HouseCalculator::new(houses.system, reference),
        events,
        ephemeris,
    })
}

fn validate_events(events: &EventSettings) -> anyhow::Result<()> {
    if events.sample_hours.is_empty() {
        anyhow::bail!("events.sample_hours must list at least one hour");
    }
    if let Some(hour) = events.sample_hours.iter().find(|&&h| h > 23) {
        anyhow::bail!("events.sample_hours contains {hour}; hours run 0-23");
    }
    if events.reference_hour > 23 {
        anyhow::bail!("events.reference_hour {} is not an hour of the day", events.reference_hour);
    }
    for (name, value) in [
        ("lunation_orb", events.lunation_orb),
        ("exact_orb", events.exact_orb),
        ("solar_node_limit", events.solar_node_limit),
        ("lunar_node_limit", events.lunar_node_limit),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            anyhow::bail!("events.{name} must be a non-negative number, got {value}");
        }
    }
    Ok(())
}

/// Load settings from `explicit`, or the search path; defaults when no file exists
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<UraniaSettings> {
    match read_config_text(explicit)? {
        Some(text) => parse_settings(&text),
        None => Ok(UraniaSettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, UraniaSettings::default());
        assert_eq!(settings.events.sample_hours, vec![0, 6, 12, 18]);
    }

    #[test]
    fn test_full_config() {
        let text = r#"
            [location]
            latitude = 51.5074
            longitude = -0.1278

            [houses]
            system = "placidus"
            first_house = "manual"
            manual_sign = "leo"

            [events]
            lunation_orb = 3.0
            reference_hour = 0

            [ephemeris]
            backend = "swiss"
            data_path = "/opt/ephe"
        "#;
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.location, Some(GeoLocation::new(51.5074, -0.1278)));
        assert_eq!(settings.houses.system, HouseSystem::PlacidusSimplified);
        assert_eq!(settings.houses.reference, FirstHouseReference::ManualSign(Sign::Leo));
        assert_eq!(settings.events.lunation_orb, 3.0);
        assert_eq!(settings.events.reference_hour, 0);
        // untouched fields keep their defaults
        assert_eq!(settings.events.solar_node_limit, 18.0);
        assert_eq!(settings.ephemeris.backend, BackendKind::Swiss);
        assert_eq!(settings.ephemeris.data_path, Some(PathBuf::from("/opt/ephe")));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_settings("[location]\nlatitude = 95.0\nlongitude = 0.0").is_err());
        assert!(parse_settings("[houses]\nfirst_house = \"manual\"").is_err());
        assert!(parse_settings("[houses]\nsystem = \"koch\"").is_err());
        assert!(parse_settings("[events]\nsample_hours = [0, 25]").is_err());
        assert!(parse_settings("[events]\nlunation_orb = -1.0").is_err());
        assert!(parse_settings("[location\n").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urania.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[houses]\nsystem = \"equal\"\nfirst_house = \"sun_sign\"").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.houses.system, HouseSystem::Equal);
        assert_eq!(settings.houses.reference, FirstHouseReference::SunSign);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
