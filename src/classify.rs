//! Column classification
//!
//! Partitions a result table's columns into temporal, numeric, and
//! categorical sets. Classification is dtype-driven, with one recovery
//! pass: when no column is declared temporal, the classifier looks for a
//! string column that holds parseable dates and promotes the best
//! candidate in place. At most one column is promoted per table.
//!
//! The output counts are the dispatch signature for the rule engine and
//! are recomputed on every call; nothing is cached across tables.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::table::ResultTable;

/// Name tokens that mark a column as a date-recovery candidate before the
/// remaining string columns are tried.
const DATE_NAME_TOKENS: &[&str] = &["date", "month", "year", "day", "time", "dt", "period"];

/// Minimum share of non-null values that must parse as dates for a string
/// column to be promoted to temporal.
const PROMOTION_THRESHOLD: f64 = 0.9;

/// Formats tried, in order, when coercing a string value to a timestamp.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Formats tried when coercing a string value to a calendar date.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%Y%m%d",
];

/// Column partition for one table.
///
/// Lists preserve column declaration order, which is what makes the
/// rule engine's "first N columns of a type" bindings deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub temporal: Vec<String>,
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl Classification {
    pub fn n_temporal(&self) -> usize {
        self.temporal.len()
    }

    pub fn n_numeric(&self) -> usize {
        self.numeric.len()
    }

    pub fn n_categorical(&self) -> usize {
        self.categorical.len()
    }

    /// The (temporal, categorical, numeric) count signature used for rule
    /// dispatch.
    pub fn signature(&self) -> (usize, usize, usize) {
        (self.n_temporal(), self.n_categorical(), self.n_numeric())
    }
}

/// Classify a table's columns.
///
/// Steps:
/// 1. Columns with a declared temporal dtype are temporal.
/// 2. Columns with a numeric dtype (including Boolean) are numeric.
/// 3. If step 1 found nothing, try to recover one date column from the
///    string columns (see [`recover_date_column`]); the promoted column's
///    values are replaced in place with parsed timestamps.
/// 4. Everything else is categorical. Empty tables and all-null columns
///    fall through to categorical.
pub fn classify(table: &mut ResultTable) -> Classification {
    let names = table.column_names();

    let mut temporal = Vec::new();
    let mut numeric = Vec::new();
    for name in &names {
        let Ok(column) = table.data().column(name) else {
            continue;
        };
        if is_temporal_dtype(column.dtype()) {
            temporal.push(name.clone());
        } else if is_numeric_dtype(column.dtype()) {
            numeric.push(name.clone());
        }
    }

    if temporal.is_empty() {
        if let Some(promoted) = recover_date_column(table.data_mut()) {
            temporal.push(promoted);
        }
    }

    let categorical = names
        .into_iter()
        .filter(|n| !temporal.contains(n) && !numeric.contains(n))
        .collect();

    Classification {
        temporal,
        numeric,
        categorical,
    }
}

fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Date | DataType::Datetime(_, _))
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    // Boolean columns count as numeric for signature purposes.
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
    )
}

/// Attempt to parse one string value as a timestamp.
///
/// Tries RFC 3339 first, then the datetime formats, then plain dates
/// (midnight), then the `YYYY-MM` shorthand.
fn parse_temporal(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0).unwrap());
        }
    }
    // Year-month shorthand ("2024-03")
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0).unwrap());
    }

    None
}

fn name_has_date_token(name: &str) -> bool {
    let lower = name.to_lowercase();
    DATE_NAME_TOKENS.iter().any(|t| lower.contains(t))
}

/// Scan string columns for one that holds dates and promote it in place.
///
/// Candidates are string columns whose name contains a date token, in
/// column order, followed by the remaining string columns. The first
/// candidate where at least 90% of the non-null values parse is replaced
/// with a millisecond-precision Datetime column and claimed; scanning
/// stops there. Individual parse failures within a column are tolerated
/// (they become nulls in the promoted column).
fn recover_date_column(df: &mut DataFrame) -> Option<String> {
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    let is_string_col = |name: &String| {
        df.column(name)
            .map(|c| matches!(c.dtype(), DataType::String))
            .unwrap_or(false)
    };

    let mut candidates: Vec<String> = names
        .iter()
        .filter(|n| is_string_col(n) && name_has_date_token(n))
        .cloned()
        .collect();
    candidates.extend(
        names
            .iter()
            .filter(|n| is_string_col(n) && !name_has_date_token(n))
            .cloned(),
    );

    for name in candidates {
        let Ok(column) = df.column(&name) else {
            continue;
        };
        let Ok(ca) = column.as_materialized_series().str() else {
            continue;
        };

        let mut parsed: Vec<Option<i64>> = Vec::with_capacity(ca.len());
        let mut non_null = 0usize;
        let mut hits = 0usize;
        for value in ca.into_iter() {
            match value {
                None => parsed.push(None),
                Some(raw) => {
                    non_null += 1;
                    match parse_temporal(raw) {
                        Some(dt) => {
                            hits += 1;
                            parsed.push(Some(dt.and_utc().timestamp_millis()));
                        }
                        None => parsed.push(None),
                    }
                }
            }
        }

        if non_null == 0 {
            continue;
        }
        let rate = hits as f64 / non_null as f64;
        if rate < PROMOTION_THRESHOLD {
            continue;
        }

        let series = Series::new(name.as_str().into(), parsed);
        let Ok(series) = series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None)) else {
            continue;
        };
        if df.replace(&name, series).is_err() {
            continue;
        }

        tracing::debug!(column = %name, rate, "promoted string column to temporal");
        return Some(name);
    }

    None
}
