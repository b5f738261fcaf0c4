//! Swiss Ephemeris backend (cargo feature `swisseph`).

use crate::ephemeris::adapter::{EphemerisBackend, EphemerisError};
use crate::ephemeris::time::julian_day_to_datetime;
use crate::ephemeris::types::Body;
use chrono::Utc;
use std::env;
use std::path::{Path, PathBuf};
use log::info;
use swisseph::swe::{calc_ut, set_ephe_path};

/// FLG_SWIEPH: use Swiss Ephemeris data files
const FLG_SWIEPH: u32 = 2;

// Swiss Ephemeris body codes: SUN=0 .. PLUTO=9
const BODY_CODES: &[(Body, u32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

/// Swiss Ephemeris backend
pub struct SwissEphemerisBackend {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisBackend {
    /// Create a backend with an optional ephemeris data path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_str = path.to_str().ok_or_else(|| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path is not valid UTF-8.".to_string(),
        })?;
        // The data path is process-wide state inside the Swiss Ephemeris library.
        set_ephe_path(path_str);
        info!("swiss ephemeris data path: {}", path_str);

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisBackend for SwissEphemerisBackend {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn ecliptic_longitude(&self, body: Body, jd: f64) -> Result<f64, EphemerisError> {
        let code = BODY_CODES
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::UnsupportedBody {
                body,
                backend: self.name().to_string(),
            })?;

        let result = calc_ut(jd, code, FLG_SWIEPH).map_err(|e| EphemerisError::CalculationFailed {
            body,
            datetime: julian_day_to_datetime(jd).unwrap_or_else(Utc::now),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        Ok(result.out[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_path_is_rejected() {
        let missing = env::temp_dir().join("urania-no-such-ephemeris-dir");
        let err = SwissEphemerisBackend::new(Some(missing.clone())).err();
        assert!(matches!(
            err,
            Some(EphemerisError::FileNotFound { ref path, .. }) if *path == missing.display().to_string()
        ));
    }

    #[test]
    fn test_explicit_data_path_is_kept() {
        let dir = env::temp_dir();
        let backend = SwissEphemerisBackend::new(Some(dir.clone())).unwrap();
        assert_eq!(backend.ephemeris_path(), dir.as_path());
        assert_eq!(backend.name(), "swisseph");
    }

    #[test]
    fn test_nodes_are_not_sent_to_the_library() {
        let backend = SwissEphemerisBackend::new(Some(env::temp_dir())).unwrap();
        assert!(matches!(
            backend.ecliptic_longitude(Body::NorthNode, 2_451_545.0),
            Err(EphemerisError::UnsupportedBody { body: Body::NorthNode, .. })
        ));
    }
}
