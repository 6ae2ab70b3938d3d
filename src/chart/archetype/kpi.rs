//! KPI tiles (archetype 10)
//!
//! Single-row results render as one tile per numeric column (at most
//! four). There is no mark grammar here: in `Direct` mode the tiles go
//! straight to the host's [`TileRenderer`] and the returned record tells
//! the caller rendering already happened; in `Deferred` mode the caller
//! renders from the record itself.

use std::collections::HashMap;

use polars::prelude::*;

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{ChartOutcome, KpiRecord, RenderMode};
use crate::chart::{ArchetypeKind, BuildContext};
use crate::table::ResultTable;

pub(crate) fn build(
    table: &ResultTable,
    ctx: &mut BuildContext,
    numeric_cols: &[String],
    labels: &HashMap<String, String>,
) -> ChartOutcome {
    let label = ArchetypeKind::KpiTiles.label();

    if table.height() != 1 {
        tracing::warn!(rows = table.height(), "KPI tiles require a single-row result");
        return ChartOutcome::no_chart("KPI tiles are designed for single row results only.");
    }
    if numeric_cols.is_empty() {
        return ChartOutcome::no_chart("No numeric columns found for KPI tiles.");
    }
    let bound: Vec<&str> = numeric_cols.iter().map(|s| s.as_str()).collect();
    if let Some(declined) = decline_if_missing(table, label, &bound) {
        return declined;
    }

    let record = KpiRecord::new(numeric_cols.to_vec(), labels.clone());

    if ctx.render_mode == RenderMode::Direct {
        match ctx.tiles.as_deref_mut() {
            Some(renderer) => {
                for col in numeric_cols.iter().take(record.tile_count) {
                    let value = match tile_value(table.data(), col) {
                        Some(v) => format_tile_value(v),
                        None => "n/a".to_string(),
                    };
                    let tile_label = labels.get(col).map(|s| s.as_str()).unwrap_or(col.as_str());
                    renderer.tile(tile_label, &value);
                }
            }
            None => {
                tracing::warn!("direct KPI render requested but no tile renderer provided");
            }
        }
    }

    ChartOutcome::Kpi(record)
}

/// Read the single-row value of a numeric column as f64.
fn tile_value(df: &DataFrame, col: &str) -> Option<f64> {
    let series = df
        .column(col)
        .ok()?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .ok()?;
    series.f64().ok()?.get(0)
}

/// Format a tile value by magnitude: millions as `1.2M`, thousands as
/// `3.4K`, everything else with one decimal.
pub fn format_tile_value(v: f64) -> String {
    if v.abs() >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v.abs() >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        format!("{:.1}", v)
    }
}
