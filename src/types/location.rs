//! Geographic locations whose archive weather is exported.

use chrono_tz::Tz;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("Location name must not be empty")]
    EmptyName,

    #[error("Latitude {latitude} for '{name}' is outside [-90, 90]")]
    LatitudeOutOfRange { name: String, latitude: f64 },

    #[error("Longitude {longitude} for '{name}' is outside [-180, 180]")]
    LongitudeOutOfRange { name: String, longitude: f64 },

    #[error("Unknown timezone '{timezone}' for '{name}'")]
    UnknownTimezone { name: String, timezone: String },
}

/// A named point on the globe together with the timezone the archive should
/// report its timestamps in.
///
/// Locations are immutable once constructed. Use [`Location::new`] to build one;
/// it validates the coordinates and the timezone identifier.
///
/// # Examples
///
/// ```
/// use weather_archive::Location;
///
/// let kaneohe = Location::new("Kaneohe", 21.4014, -157.7979, "Pacific/Honolulu").unwrap();
/// assert_eq!(kaneohe.file_stem(), "kaneohe");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
}

impl Location {
    /// Creates a validated `Location`.
    ///
    /// # Errors
    ///
    /// Returns a [`LocationError`] if the name is empty, a coordinate is out of
    /// range (or not finite), or the timezone is not a known IANA identifier.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
    ) -> Result<Self, LocationError> {
        let name = name.into();
        let timezone = timezone.into();

        if name.trim().is_empty() {
            return Err(LocationError::EmptyName);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange { name, latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange { name, longitude });
        }
        if Tz::from_str(&timezone).is_err() {
            return Err(LocationError::UnknownTimezone { name, timezone });
        }

        Ok(Self {
            name,
            latitude,
            longitude,
            timezone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// The shared prefix of every output file for this location: the name
    /// lowercased, with spaces replaced by underscores. All other characters
    /// (apostrophes included) are kept.
    pub fn file_stem(&self) -> String {
        file_stem(&self.name)
    }
}

pub(crate) fn file_stem(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        let pearl = Location::new("Pearl Harbor", 21.3629, -157.9565, "Pacific/Honolulu").unwrap();
        assert_eq!(pearl.file_stem(), "pearl_harbor");
        assert_eq!(file_stem("Kaneohe"), "kaneohe");
        assert_eq!(file_stem("Makapu'u"), "makapu'u");
    }

    #[test]
    fn test_file_stem_is_idempotent() {
        for name in ["Pearl Harbor", "Kaneohe", "Makapu'u", "Waimea Bay North Shore"] {
            let once = file_stem(name);
            assert_eq!(file_stem(&once), once);
        }
    }

    #[test]
    fn test_rejects_invalid_locations() {
        assert_eq!(
            Location::new("  ", 0.0, 0.0, "UTC"),
            Err(LocationError::EmptyName)
        );
        assert!(matches!(
            Location::new("North", 90.5, 0.0, "UTC"),
            Err(LocationError::LatitudeOutOfRange { .. })
        ));
        assert!(matches!(
            Location::new("East", 0.0, 180.01, "UTC"),
            Err(LocationError::LongitudeOutOfRange { .. })
        ));
        assert!(matches!(
            Location::new("Nowhere", 0.0, f64::NAN, "UTC"),
            Err(LocationError::LongitudeOutOfRange { .. })
        ));
        assert!(matches!(
            Location::new("Atlantis", 0.0, 0.0, "Ocean/Atlantis"),
            Err(LocationError::UnknownTimezone { .. })
        ));
    }

    #[test]
    fn test_accepts_bounds() {
        let pole = Location::new("South Pole", -90.0, 180.0, "Antarctica/McMurdo").unwrap();
        assert_eq!(pole.latitude(), -90.0);
        assert_eq!(pole.longitude(), 180.0);
        assert_eq!(pole.timezone(), "Antarctica/McMurdo");
    }
}
