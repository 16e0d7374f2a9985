//! Validates an archive response for one location and exports its hourly and
//! daily series.

pub mod error;
pub mod export;
pub mod reshape;

use crate::materialize::error::MaterializeError;
use crate::materialize::export::{write_csv, write_workbook, ExportPaths};
use crate::materialize::reshape::{series_to_table, WeatherTable};
use crate::types::frequency::Frequency;
use crate::types::location::Location;
use log::{info, warn};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a location produced no files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The response lacked one or both series.
    MissingSeries { missing: Vec<Frequency> },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSeries { missing } => {
                let keys: Vec<&str> = missing.iter().map(Frequency::response_key).collect();
                write!(f, "response is missing {}", keys.join(" and "))
            }
        }
    }
}

/// The files written for a location and the size of each table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub paths: ExportPaths,
    pub hourly_rows: usize,
    pub daily_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeOutcome {
    Exported(ExportedFiles),
    Skipped(SkipReason),
}

/// Turns archive responses into files inside one output directory.
#[derive(Debug, Clone)]
pub struct Materializer {
    output_dir: PathBuf,
}

impl Materializer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validates `body`, reshapes its series and writes both CSV files and the
    /// workbook for `location`.
    ///
    /// A response without an `hourly` or `daily` series is skipped: nothing is
    /// written and [`MaterializeOutcome::Skipped`] is returned. Existing files
    /// are overwritten. If a later write fails, earlier files stay on disk.
    ///
    /// # Errors
    ///
    /// * [`MaterializeError::Reshape`] if a series is malformed; no files are
    ///   written in that case.
    /// * [`MaterializeError::Export`] if a file cannot be written.
    pub fn materialize(
        &self,
        location: &Location,
        body: &Value,
    ) -> Result<MaterializeOutcome, MaterializeError> {
        let (hourly, daily) = match (
            body.get(Frequency::Hourly.response_key()),
            body.get(Frequency::Daily.response_key()),
        ) {
            (Some(hourly), Some(daily)) => (hourly, daily),
            (hourly, daily) => {
                let missing = [(Frequency::Hourly, hourly), (Frequency::Daily, daily)]
                    .into_iter()
                    .filter(|(_, series)| series.is_none())
                    .map(|(frequency, _)| frequency)
                    .collect();
                let reason = SkipReason::MissingSeries { missing };
                warn!("No data returned for {}: {}", location.name(), reason);
                return Ok(MaterializeOutcome::Skipped(reason));
            }
        };

        let reshape = |frequency: Frequency, series: &Value| {
            series_to_table(frequency, series).map_err(|source| MaterializeError::Reshape {
                location: location.name().to_string(),
                source,
            })
        };
        let hourly = reshape(Frequency::Hourly, hourly)?;
        let daily = reshape(Frequency::Daily, daily)?;

        let paths = ExportPaths::new(&self.output_dir, &location.file_stem());
        self.export(location, &paths, &hourly, &daily)?;
        info!(
            "Exported {} hourly and {} daily rows for {}",
            hourly.height(),
            daily.height(),
            location.name()
        );

        Ok(MaterializeOutcome::Exported(ExportedFiles {
            paths,
            hourly_rows: hourly.height(),
            daily_rows: daily.height(),
        }))
    }

    fn export(
        &self,
        location: &Location,
        paths: &ExportPaths,
        hourly: &WeatherTable,
        daily: &WeatherTable,
    ) -> Result<(), MaterializeError> {
        let export_err = |source| MaterializeError::Export {
            location: location.name().to_string(),
            source,
        };
        for table in [hourly, daily] {
            write_csv(table, paths.csv(table.frequency)).map_err(export_err)?;
        }
        write_workbook(&[hourly, daily], &paths.workbook).map_err(export_err)
    }
}
