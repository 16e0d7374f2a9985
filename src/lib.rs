pub mod config;
mod error;
mod materialize;
mod pipeline;
mod request;
mod types;
mod utils;

pub use error::WeatherExportError;
pub use pipeline::*;

pub use request::client::{ArchiveClient, ArchiveSource};
pub use request::error::ArchiveRequestError;
pub use request::params::{build_params, ArchiveParams, ArchiveRequest};

pub use materialize::error::{ExportError, MaterializeError, ReshapeError};
pub use materialize::export::{read_csv, write_csv, write_workbook, ExportPaths};
pub use materialize::reshape::{series_to_table, WeatherTable};
pub use materialize::{ExportedFiles, MaterializeOutcome, Materializer, SkipReason};

pub use types::date_range::{DateRange, DateRangeError};
pub use types::frequency::Frequency;
pub use types::location::{Location, LocationError};
