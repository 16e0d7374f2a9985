//! Runs the fetch and export steps for every configured location, one
//! location at a time.

use crate::config::{default_daily_variables, default_hourly_variables, default_locations};
use crate::error::WeatherExportError;
use crate::materialize::{ExportedFiles, MaterializeOutcome, Materializer, SkipReason};
use crate::request::client::ArchiveSource;
use crate::request::params::{build_params, ArchiveRequest};
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::utils::ensure_output_dir_exists;
use bon::bon;
use log::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::task;

/// What happened to one location during a run.
#[derive(Debug)]
pub enum LocationOutcome {
    /// All three files were written.
    Exported(ExportedFiles),
    /// The response lacked a series; nothing was written.
    Skipped(SkipReason),
    /// The request or the export failed; files written before the failure remain.
    Failed(WeatherExportError),
}

#[derive(Debug)]
pub struct LocationReport {
    pub location: String,
    pub outcome: LocationOutcome,
}

impl LocationReport {
    pub fn is_exported(&self) -> bool {
        matches!(self.outcome, LocationOutcome::Exported(_))
    }
}

impl fmt::Display for LocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            LocationOutcome::Exported(files) => write!(
                f,
                "{}: exported {} hourly and {} daily rows to {}",
                self.location,
                files.hourly_rows,
                files.daily_rows,
                files.paths.workbook.display()
            ),
            LocationOutcome::Skipped(reason) => write!(f, "{}: skipped, {}", self.location, reason),
            LocationOutcome::Failed(e) => write!(f, "{}: failed, {}", self.location, e),
        }
    }
}

/// Fetches archive weather for a set of locations and exports each one.
///
/// Every setting except the source has a default: the three O'ahu locations,
/// the standard hourly and daily variables, the current directory and no
/// date window.
///
/// # Examples
///
/// ```no_run
/// use weather_archive::{ArchiveClient, WeatherExporter, WeatherExportError};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherExportError> {
/// let exporter = WeatherExporter::builder()
///     .source(ArchiveClient::builder().build()?)
///     .output_dir("exports")
///     .build();
///
/// for report in exporter.run().await? {
///     println!("{}", report);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WeatherExporter<S: ArchiveSource> {
    source: S,
    locations: Vec<Location>,
    hourly_variables: Vec<String>,
    daily_variables: Vec<String>,
    materializer: Materializer,
    date_range: Option<DateRange>,
}

#[bon]
impl<S: ArchiveSource> WeatherExporter<S> {
    #[builder]
    pub fn new(
        source: S,
        #[builder(default = default_locations())] locations: Vec<Location>,
        #[builder(default = default_hourly_variables())] hourly_variables: Vec<String>,
        #[builder(default = default_daily_variables())] daily_variables: Vec<String>,
        #[builder(into, default = PathBuf::from("."))] output_dir: PathBuf,
        date_range: Option<DateRange>,
    ) -> Self {
        Self {
            source,
            locations,
            hourly_variables,
            daily_variables,
            materializer: Materializer::new(output_dir),
            date_range,
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn output_dir(&self) -> &Path {
        self.materializer.output_dir()
    }

    /// Processes every location in order and reports the outcome of each.
    ///
    /// Request failures and malformed responses are logged and recorded as
    /// [`LocationOutcome::Failed`]; the remaining locations still run.
    ///
    /// # Errors
    ///
    /// Fails only if the output directory cannot be created, or if an export
    /// task panics. With no locations configured nothing is touched.
    pub async fn run(&self) -> Result<Vec<LocationReport>, WeatherExportError> {
        if self.locations.is_empty() {
            return Ok(Vec::new());
        }
        ensure_output_dir_exists(self.output_dir()).await?;

        let mut reports = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            let outcome = self.process(location).await?;
            reports.push(LocationReport {
                location: location.name().to_string(),
                outcome,
            });
        }

        let exported = reports.iter().filter(|r| r.is_exported()).count();
        info!(
            "Exported {} of {} locations to {}",
            exported,
            reports.len(),
            self.output_dir().display()
        );
        Ok(reports)
    }

    async fn process(&self, location: &Location) -> Result<LocationOutcome, WeatherExportError> {
        let params = build_params(
            location,
            self.hourly_variables.as_slice(),
            self.daily_variables.as_slice(),
        );
        let request = ArchiveRequest::new(params, self.date_range);

        let body = match self.source.fetch(&request).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Request for {} failed: {}", location.name(), e);
                return Ok(LocationOutcome::Failed(e.into()));
            }
        };

        let materializer = self.materializer.clone();
        let owned_location = location.clone();
        let result =
            task::spawn_blocking(move || materializer.materialize(&owned_location, &body)).await?;

        Ok(match result {
            Ok(MaterializeOutcome::Exported(files)) => LocationOutcome::Exported(files),
            Ok(MaterializeOutcome::Skipped(reason)) => LocationOutcome::Skipped(reason),
            Err(e) => {
                warn!("Export for {} failed: {}", location.name(), e);
                LocationOutcome::Failed(e.into())
            }
        })
    }
}
