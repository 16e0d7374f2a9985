use crate::types::frequency::Frequency;
use polars::error::PolarsError;
use rust_xlsxwriter::XlsxError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReshapeError {
    #[error("The {frequency} series is not a JSON object")]
    NotAnObject { frequency: Frequency },

    #[error("Column '{column}' of the {frequency} series is not an array")]
    NotAnArray { frequency: Frequency, column: String },

    #[error("Column '{column}' of the {frequency} series has {found} values but '{reference}' has {expected}")]
    RaggedSeries {
        frequency: Frequency,
        column: String,
        reference: String,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' of the {frequency} series holds a nested value: {value}")]
    UnsupportedValue {
        frequency: Frequency,
        column: String,
        value: String,
    },

    #[error("Failed to build {frequency} table")]
    Frame {
        frequency: Frequency,
        #[source]
        source: PolarsError,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Output path exists but is not a directory: '{0}'")]
    OutputDirNotADirectory(PathBuf),

    #[error("Failed to read metadata for output directory '{0}'")]
    OutputDirMetadata(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing '{0}'")]
    WriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to read {frequency} table cell at row {row}")]
    CellRead {
        frequency: Frequency,
        row: usize,
        #[source]
        source: PolarsError,
    },

    #[error("{frequency} table does not fit in a worksheet ({rows} rows, {columns} columns)")]
    SheetTooLarge {
        frequency: Frequency,
        rows: usize,
        columns: usize,
    },

    #[error("Failed to write workbook '{0}'")]
    Workbook(PathBuf, #[source] XlsxError),
}

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Malformed series for '{location}'")]
    Reshape {
        location: String,
        #[source]
        source: ReshapeError,
    },

    #[error("Failed to export tables for '{location}'")]
    Export {
        location: String,
        #[source]
        source: ExportError,
    },
}
