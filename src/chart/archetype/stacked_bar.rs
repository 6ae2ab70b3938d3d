//! Stacked bar chart by date (archetype 3)
//!
//! Bars over a time axis, stacked from zero, colored by the single
//! categorical column.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder, Stack};
use crate::chart::ArchetypeKind;
use crate::table::ResultTable;

pub(crate) fn build(
    table: &ResultTable,
    date_col: &str,
    text_col: &str,
    numeric_col: &str,
) -> ChartOutcome {
    let label = ArchetypeKind::StackedBar.label();
    if let Some(declined) = decline_if_missing(table, label, &[date_col, text_col, numeric_col]) {
        return declined;
    }

    let layer = LayerSpec::new(Mark::Bar)
        .with_x(Channel::temporal(date_col).with_sort(SortOrder::Ascending))
        .with_y(Channel::quantitative(numeric_col).with_stack(Stack::Zero))
        .with_color(Channel::nominal(text_col))
        .with_tooltip(&[date_col, text_col, numeric_col]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}
