//! Writes weather tables to CSV files and a two-sheet XLSX workbook.

use crate::materialize::error::ExportError;
use crate::materialize::reshape::WeatherTable;
use crate::types::frequency::Frequency;
use log::info;
use polars::prelude::*;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const MAX_SHEET_ROWS: usize = 1_048_576;
const MAX_SHEET_COLUMNS: usize = 16_384;

/// The three files written for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub hourly_csv: PathBuf,
    pub daily_csv: PathBuf,
    pub workbook: PathBuf,
}

impl ExportPaths {
    /// `<stem>_hourly.csv`, `<stem>_daily.csv` and `<stem>_weather.xlsx` inside `output_dir`.
    pub fn new(output_dir: &Path, stem: &str) -> Self {
        Self {
            hourly_csv: output_dir.join(format!("{}{}", stem, Frequency::Hourly.csv_file_suffix())),
            daily_csv: output_dir.join(format!("{}{}", stem, Frequency::Daily.csv_file_suffix())),
            workbook: output_dir.join(format!("{}_weather.xlsx", stem)),
        }
    }

    pub fn csv(&self, frequency: Frequency) -> &Path {
        match frequency {
            Frequency::Hourly => &self.hourly_csv,
            Frequency::Daily => &self.daily_csv,
        }
    }
}

/// Writes `table` as comma separated values with a header row and no index
/// column, replacing any existing file.
pub fn write_csv(table: &WeatherTable, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::WriteIo(path.to_path_buf(), e))?;
    let mut frame = table.frame.clone();
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .with_separator(b',')
        .finish(&mut frame)
        .map_err(|e| ExportError::CsvWrite(path.to_path_buf(), e))?;
    info!("Wrote {} rows of {} data to {:?}", table.height(), table.frequency, path);
    Ok(())
}

/// Reads a CSV written by [`write_csv`] back into a frame.
pub fn read_csv(path: &Path) -> Result<DataFrame, ExportError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| ExportError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| ExportError::CsvRead(path.to_path_buf(), e))
}

/// Writes every table to its own worksheet, named after the table's
/// frequency, in a single workbook at `path`.
pub fn write_workbook(tables: &[&WeatherTable], path: &Path) -> Result<(), ExportError> {
    let workbook_err = |e| ExportError::Workbook(path.to_path_buf(), e);
    let header_format = Format::new().set_bold();
    let mut workbook = Workbook::new();

    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(table.frequency.sheet_name())
            .map_err(workbook_err)?;
        write_sheet(sheet, table, &header_format).map_err(|e| match e {
            SheetError::Table(e) => e,
            SheetError::Xlsx(e) => workbook_err(e),
        })?;
    }

    workbook.save(path).map_err(workbook_err)?;
    info!("Wrote workbook with {} sheets to {:?}", tables.len(), path);
    Ok(())
}

enum SheetError {
    Table(ExportError),
    Xlsx(rust_xlsxwriter::XlsxError),
}

impl From<rust_xlsxwriter::XlsxError> for SheetError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SheetError::Xlsx(e)
    }
}

fn write_sheet(sheet: &mut Worksheet, table: &WeatherTable, header_format: &Format) -> Result<(), SheetError> {
    let frame = &table.frame;
    let too_large = || {
        SheetError::Table(ExportError::SheetTooLarge {
            frequency: table.frequency,
            rows: frame.height(),
            columns: frame.width(),
        })
    };
    if frame.height() >= MAX_SHEET_ROWS || frame.width() > MAX_SHEET_COLUMNS {
        return Err(too_large());
    }

    for (col_idx, column) in frame.get_columns().iter().enumerate() {
        let col = ColNum::try_from(col_idx).map_err(|_| too_large())?;
        sheet.write_string_with_format(0, col, column.name().as_str(), header_format)?;

        for row_idx in 0..frame.height() {
            let value = column.get(row_idx).map_err(|source| {
                SheetError::Table(ExportError::CellRead {
                    frequency: table.frequency,
                    row: row_idx,
                    source,
                })
            })?;
            let row = RowNum::try_from(row_idx + 1).map_err(|_| too_large())?;
            write_cell(sheet, row, col, value)?;
        }
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: RowNum, col: ColNum, value: AnyValue<'_>) -> Result<(), SheetError> {
    match value {
        AnyValue::Null => {}
        AnyValue::Boolean(b) => {
            sheet.write_boolean(row, col, b)?;
        }
        AnyValue::String(s) => {
            sheet.write_string(row, col, s)?;
        }
        AnyValue::StringOwned(s) => {
            sheet.write_string(row, col, s.as_str())?;
        }
        other => match other.extract::<f64>() {
            Some(number) => {
                sheet.write_number(row, col, number)?;
            }
            None => {
                sheet.write_string(row, col, other.to_string())?;
            }
        },
    }
    Ok(())
}
