use crate::materialize::error::{ExportError, MaterializeError};
use crate::request::error::ArchiveRequestError;
use crate::types::date_range::DateRangeError;
use crate::types::location::LocationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherExportError {
    #[error(transparent)]
    Request(#[from] ArchiveRequestError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error("Background export task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
