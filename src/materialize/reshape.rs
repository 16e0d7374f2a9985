//! Converts the column-oriented series of an archive response into tables.

use crate::materialize::error::ReshapeError;
use crate::types::frequency::Frequency;
use log::debug;
use polars::prelude::*;
use serde_json::{Map, Value};

/// One exported series: a row per timestamp, a column per response key.
///
/// The table keeps the column order of the response (normally `time` first,
/// then the requested variables).
#[derive(Debug, Clone)]
pub struct WeatherTable {
    pub frequency: Frequency,
    pub frame: DataFrame,
}

impl WeatherTable {
    pub(crate) fn new(frequency: Frequency, frame: DataFrame) -> Self {
        Self { frequency, frame }
    }

    /// Number of rows (observations).
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect()
    }

    /// The row at `idx` as `(column, value)` pairs in column order, or `None`
    /// past the last row.
    pub fn row(&self, idx: usize) -> Option<Vec<(&str, AnyValue<'_>)>> {
        let values = self.frame.get(idx)?;
        Some(self.column_names().into_iter().zip(values).collect())
    }
}

/// Builds the table for one series of an archive response.
///
/// `series` maps each column name to an array of values; every array must
/// have the same length.
///
/// # Errors
///
/// * [`ReshapeError::NotAnObject`] if `series` is not a JSON object.
/// * [`ReshapeError::NotAnArray`] if a column is not an array.
/// * [`ReshapeError::RaggedSeries`] if the arrays differ in length.
/// * [`ReshapeError::UnsupportedValue`] if a column holds nested arrays or objects.
///
/// # Examples
///
/// ```
/// use weather_archive::{series_to_table, Frequency};
/// use serde_json::json;
///
/// let series = json!({"time": ["2024-01-01"], "temperature_2m_max": [27.4]});
/// let table = series_to_table(Frequency::Daily, &series).unwrap();
/// assert_eq!(table.column_names(), vec!["time", "temperature_2m_max"]);
/// assert_eq!(table.height(), 1);
/// ```
pub fn series_to_table(frequency: Frequency, series: &Value) -> Result<WeatherTable, ReshapeError> {
    let object = series
        .as_object()
        .ok_or(ReshapeError::NotAnObject { frequency })?;
    let frame = object_to_frame(frequency, object)?;
    debug!(
        "Reshaped {} series into {} rows x {} columns",
        frequency,
        frame.height(),
        frame.width()
    );
    Ok(WeatherTable::new(frequency, frame))
}

fn object_to_frame(frequency: Frequency, object: &Map<String, Value>) -> Result<DataFrame, ReshapeError> {
    let mut expected: Option<(&str, usize)> = None;
    let mut columns = Vec::with_capacity(object.len());

    for (name, values) in object {
        let values = values.as_array().ok_or_else(|| ReshapeError::NotAnArray {
            frequency,
            column: name.clone(),
        })?;

        match expected {
            None => expected = Some((name.as_str(), values.len())),
            Some((first, len)) if len != values.len() => {
                return Err(ReshapeError::RaggedSeries {
                    frequency,
                    column: name.clone(),
                    reference: first.to_string(),
                    expected: len,
                    found: values.len(),
                });
            }
            Some(_) => {}
        }

        columns.push(json_column(frequency, name, values)?);
    }

    DataFrame::new(columns).map_err(|source| ReshapeError::Frame { frequency, source })
}

/// The narrowest column type that holds every non-null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

fn infer_kind(frequency: Frequency, name: &str, values: &[Value]) -> Result<ColumnKind, ReshapeError> {
    let mut kind: Option<ColumnKind> = None;
    for value in values {
        let value_kind = match value {
            Value::Null => continue,
            Value::Number(n) if n.is_i64() => ColumnKind::Int,
            Value::Number(_) => ColumnKind::Float,
            Value::Bool(_) => ColumnKind::Bool,
            Value::String(_) => ColumnKind::Text,
            Value::Array(_) | Value::Object(_) => {
                return Err(ReshapeError::UnsupportedValue {
                    frequency,
                    column: name.to_string(),
                    value: value.to_string(),
                });
            }
        };
        kind = Some(match (kind, value_kind) {
            (None, k) => k,
            (Some(a), b) if a == b => a,
            (Some(ColumnKind::Int), ColumnKind::Float) | (Some(ColumnKind::Float), ColumnKind::Int) => {
                ColumnKind::Float
            }
            _ => ColumnKind::Text,
        });
    }
    // An all-null column has no evidence either way; numeric is the archive's norm.
    Ok(kind.unwrap_or(ColumnKind::Float))
}

fn json_column(frequency: Frequency, name: &str, values: &[Value]) -> Result<Column, ReshapeError> {
    let kind = infer_kind(frequency, name, values)?;
    let name = PlSmallStr::from(name);
    let column = match kind {
        ColumnKind::Int => Column::new(name, values.iter().map(Value::as_i64).collect::<Vec<_>>()),
        ColumnKind::Float => Column::new(name, values.iter().map(Value::as_f64).collect::<Vec<_>>()),
        ColumnKind::Bool => Column::new(name, values.iter().map(Value::as_bool).collect::<Vec<_>>()),
        ColumnKind::Text => Column::new(
            name,
            values
                .iter()
                .map(|v| match v {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect::<Vec<_>>(),
        ),
    };
    Ok(column)
}
