//! Dual axis line chart (archetype 2)
//!
//! Two numeric series over a shared time axis. Each series keeps its own
//! y scale (resolved independently) and a fixed series color so the axes
//! stay attributable.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder};
use crate::chart::ArchetypeKind;
use crate::table::ResultTable;

/// Fixed series colors, first and second numeric column respectively.
const SERIES_COLORS: [&str; 2] = ["blue", "red"];

pub(crate) fn build(
    table: &ResultTable,
    date_col: &str,
    num_col1: &str,
    num_col2: &str,
) -> ChartOutcome {
    let label = ArchetypeKind::DualLine.label();
    if let Some(declined) = decline_if_missing(table, label, &[date_col, num_col1, num_col2]) {
        return declined;
    }

    let series = |num_col: &str, color: &str| {
        LayerSpec::new(Mark::Line)
            .with_mark_color(color)
            .with_x(Channel::temporal(date_col).with_sort(SortOrder::Ascending))
            .with_y(Channel::quantitative(num_col).with_title(num_col))
            .with_tooltip(&[date_col, num_col])
    };

    ChartOutcome::Plot(ChartObject::layered(
        label,
        vec![
            series(num_col1, SERIES_COLORS[0]),
            series(num_col2, SERIES_COLORS[1]),
        ],
        true,
    ))
}
