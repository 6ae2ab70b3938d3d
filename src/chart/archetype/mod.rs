//! Archetype builder implementations
//!
//! One module per archetype, mirroring the closed [`super::ArchetypeKind`]
//! family. Each module exposes a single `build` function consumed by
//! [`super::ChartSpec::build`]; none of them keep state, and all of them
//! decline with [`ChartOutcome::NoChart`](super::ChartOutcome) instead of
//! failing when their bindings no longer match the table.

pub(crate) mod bubble;
pub(crate) mod date_bar;
pub(crate) mod dual_line;
pub(crate) mod kpi;
pub(crate) mod ranked_bar;
pub(crate) mod scatter;
pub(crate) mod shape_bubble;
pub(crate) mod shape_scatter;
pub(crate) mod stacked_bar;
pub(crate) mod stacked_bar_select;

use crate::chart::types::ChartOutcome;
use crate::table::ResultTable;

/// Check that every bound column still exists in the table.
///
/// Returns the declined outcome when one is missing; the condition is a
/// policy outcome (the table changed under the spec), so it is traced as
/// a warning and never escalated.
pub(crate) fn decline_if_missing(
    table: &ResultTable,
    label: &str,
    columns: &[&str],
) -> Option<ChartOutcome> {
    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| !table.has_column(c))
        .collect();
    if missing.is_empty() {
        return None;
    }
    tracing::warn!(chart = label, missing = ?missing, "declining chart: bound column(s) absent");
    Some(ChartOutcome::no_chart(format!(
        "Missing required column(s) for {}: {}",
        label,
        missing.join(", ")
    )))
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::table::ResultTable;
    use polars::prelude::*;

    /// A millisecond-precision datetime column for builder tests.
    pub fn datetime_column(name: &str, millis: &[i64]) -> Column {
        Series::new(name.into(), millis.to_vec())
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap()
            .into()
    }

    /// day (temporal) + region (categorical) + sales (numeric), 3 rows.
    pub fn dated_table() -> ResultTable {
        let df = DataFrame::new(vec![
            datetime_column("day", &[0, 86_400_000, 172_800_000]),
            Series::new("region".into(), ["n", "s", "n"]).into(),
            Series::new("sales".into(), [10i64, 20, 30]).into(),
        ])
        .unwrap();
        ResultTable::new(df)
    }
}
