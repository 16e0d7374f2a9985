//! Literal defaults for the export: the archive endpoint, the requested
//! variables and the locations on O'ahu that are exported.

use crate::types::date_range::{DateRange, DateRangeError};
use crate::types::location::Location;
use std::sync::LazyLock;
use std::time::Duration;

/// Open-Meteo historical weather archive.
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_TIMEZONE: &str = "Pacific/Honolulu";

/// First day exported by the binary.
pub const DEFAULT_START_DATE: &str = "2024-01-01";

/// Last day (inclusive) exported by the binary.
pub const DEFAULT_END_DATE: &str = "2024-12-31";

pub const HOURLY_VARIABLES: [&str; 14] = [
    "temperature_2m",
    "relative_humidity_2m",
    "precipitation",
    "surface_pressure",
    "cloud_cover",
    "cloud_cover_low",
    "cloud_cover_mid",
    "cloud_cover_high",
    "et0_fao_evapotranspiration",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "shortwave_radiation",
    "diffuse_radiation",
];

pub const DAILY_VARIABLES: [&str; 7] = [
    "temperature_2m_max",
    "temperature_2m_min",
    "temperature_2m_mean",
    "daylight_duration",
    "sunshine_duration",
    "precipitation_hours",
    "shortwave_radiation_sum",
];

pub fn default_hourly_variables() -> Vec<String> {
    HOURLY_VARIABLES.iter().map(|v| v.to_string()).collect()
}

pub fn default_daily_variables() -> Vec<String> {
    DAILY_VARIABLES.iter().map(|v| v.to_string()).collect()
}

static DEFAULT_LOCATIONS: LazyLock<Vec<Location>> = LazyLock::new(|| {
    [
        ("Pearl Harbor", 21.3629, -157.9565),
        ("Kaneohe", 21.4014, -157.7979),
        ("Makapu'u", 21.3096, -157.6499),
    ]
    .into_iter()
    .map(|(name, lat, lon)| {
        Location::new(name, lat, lon, DEFAULT_TIMEZONE)
            .unwrap_or_else(|e| panic!("built-in location is invalid: {e}"))
    })
    .collect()
});

/// Pearl Harbor, Kaneohe and Makapu'u.
pub fn default_locations() -> Vec<Location> {
    DEFAULT_LOCATIONS.clone()
}

/// The calendar year 2024, from [`DEFAULT_START_DATE`] to [`DEFAULT_END_DATE`].
///
/// # Errors
///
/// Fails only if the range is not yet in the past.
pub fn default_date_range() -> Result<DateRange, DateRangeError> {
    DateRange::parse(DEFAULT_START_DATE, DEFAULT_END_DATE)
}
