//! Defines the two cadences of archive data that are requested and exported.

use std::fmt;

/// Represents the time frequency of an archive series.
///
/// Each frequency names a top-level key in the archive response, a worksheet
/// in the exported workbook and a CSV file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One observation per hour (temperature, humidity, wind, radiation, ...).
    Hourly,
    /// Aggregated values per day (min/max/mean temperature, sunshine duration, ...).
    Daily,
}

impl Frequency {
    /// Both frequencies, in export order.
    pub const ALL: [Frequency; 2] = [Frequency::Hourly, Frequency::Daily];

    /// The key of this series in the archive response body, which is also the
    /// name of the query parameter listing its variables.
    pub fn response_key(&self) -> &'static str {
        match self {
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
        }
    }

    /// The worksheet name used for this series in the exported workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Frequency::Hourly => "Hourly",
            Frequency::Daily => "Daily",
        }
    }

    pub(crate) fn csv_file_suffix(&self) -> String {
        format!("_{}.csv", self.response_key())
    }
}

/// Allows formatting a `Frequency` variant using its response key.
///
/// # Examples
///
/// ```
/// use weather_archive::Frequency;
///
/// assert_eq!(format!("{}", Frequency::Hourly), "hourly");
/// assert_eq!(Frequency::Daily.to_string(), "daily");
/// ```
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response_key())
    }
}
