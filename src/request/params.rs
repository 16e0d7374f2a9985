//! Query construction for the archive endpoint.

use crate::types::date_range::DateRange;
use crate::types::frequency::Frequency;
use crate::types::location::Location;

/// The five query parameters sent for one location.
///
/// `hourly` and `daily` hold the requested variable names joined by single
/// commas, in the order they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveParams {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub hourly: String,
    pub daily: String,
}

impl ArchiveParams {
    /// Parameter names in the order they are emitted.
    pub const KEYS: [&'static str; 5] = ["latitude", "longitude", "timezone", "hourly", "daily"];

    /// The parameters as ordered `(name, value)` pairs, exactly one per key in
    /// [`ArchiveParams::KEYS`].
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("timezone", self.timezone.clone()),
            (Frequency::Hourly.response_key(), self.hourly.clone()),
            (Frequency::Daily.response_key(), self.daily.clone()),
        ]
    }

    /// Looks up a single parameter by name.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

/// Builds the archive query for `location`.
///
/// Empty variable lists produce empty strings; whether the archive accepts
/// them is left to the archive.
///
/// # Examples
///
/// ```
/// use weather_archive::{build_params, Location};
///
/// let kaneohe = Location::new("Kaneohe", 21.4014, -157.7979, "Pacific/Honolulu").unwrap();
/// let params = build_params(&kaneohe, &["temperature_2m", "precipitation"], &["sunshine_duration"]);
/// assert_eq!(params.hourly, "temperature_2m,precipitation");
/// assert_eq!(params.daily, "sunshine_duration");
/// ```
pub fn build_params<H, D>(location: &Location, hourly_vars: &[H], daily_vars: &[D]) -> ArchiveParams
where
    H: AsRef<str>,
    D: AsRef<str>,
{
    ArchiveParams {
        latitude: location.latitude(),
        longitude: location.longitude(),
        timezone: location.timezone().to_string(),
        hourly: join_variables(hourly_vars),
        daily: join_variables(daily_vars),
    }
}

fn join_variables<S: AsRef<str>>(vars: &[S]) -> String {
    vars.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

/// A complete archive request: the location parameters plus an optional
/// date window, sent as `start_date`/`end_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub params: ArchiveParams,
    pub date_range: Option<DateRange>,
}

impl ArchiveRequest {
    pub fn new(params: ArchiveParams, date_range: Option<DateRange>) -> Self {
        Self { params, date_range }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.params.entries();
        if let Some(range) = &self.date_range {
            pairs.push(("start_date", range.start_param()));
            pairs.push(("end_date", range.end_param()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HOURLY_VARIABLES, DAILY_VARIABLES};

    fn pearl_harbor() -> Location {
        Location::new("Pearl Harbor", 21.3629, -157.9565, "Pacific/Honolulu").unwrap()
    }

    #[test]
    fn test_params_have_exactly_five_keys() {
        let params = build_params(&pearl_harbor(), &HOURLY_VARIABLES, &DAILY_VARIABLES);
        let keys: Vec<&str> = params.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ArchiveParams::KEYS);
    }

    #[test]
    fn test_variable_lists_round_trip() {
        let params = build_params(&pearl_harbor(), &HOURLY_VARIABLES, &DAILY_VARIABLES);
        let hourly: Vec<&str> = params.hourly.split(',').collect();
        let daily: Vec<&str> = params.daily.split(',').collect();
        assert_eq!(hourly, HOURLY_VARIABLES);
        assert_eq!(daily, DAILY_VARIABLES);
        assert!(!params.hourly.starts_with(',') && !params.hourly.ends_with(','));
    }

    #[test]
    fn test_location_fields() {
        let params = build_params(&pearl_harbor(), &["precipitation"], &["sunshine_duration"]);
        assert_eq!(params.get("latitude").as_deref(), Some("21.3629"));
        assert_eq!(params.get("longitude").as_deref(), Some("-157.9565"));
        assert_eq!(params.get("timezone").as_deref(), Some("Pacific/Honolulu"));
        assert_eq!(params.get("start_date"), None);
    }

    #[test]
    fn test_empty_variable_lists() {
        let empty: [&str; 0] = [];
        let params = build_params(&pearl_harbor(), &empty, &empty);
        assert_eq!(params.hourly, "");
        assert_eq!(params.daily, "");
        assert_eq!(params.entries().len(), 5);
    }

    #[test]
    fn test_date_range_appends_window() {
        let params = build_params(&pearl_harbor(), &["precipitation"], &["sunshine_duration"]);
        let range = DateRange::parse("2024-03-01", "2024-03-31").unwrap();

        let without = ArchiveRequest::new(params.clone(), None);
        assert_eq!(without.query_pairs().len(), 5);

        let with = ArchiveRequest::new(params, Some(range));
        let pairs = with.query_pairs();
        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs[5], ("start_date", "2024-03-01".to_string()));
        assert_eq!(pairs[6], ("end_date", "2024-03-31".to_string()));
    }
}
