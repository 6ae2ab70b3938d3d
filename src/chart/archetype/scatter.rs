//! Scatter chart (archetype 5)
//!
//! Filled circles over a numeric x/y pair, colored by one categorical
//! column.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark};
use crate::chart::ArchetypeKind;
use crate::table::ResultTable;

/// Fixed point size for scatter marks, in square pixels.
pub(crate) const POINT_SIZE: f64 = 100.0;

pub(crate) fn build(
    table: &ResultTable,
    num_col1: &str,
    num_col2: &str,
    text_col: &str,
) -> ChartOutcome {
    let label = ArchetypeKind::Scatter.label();
    if let Some(declined) = decline_if_missing(table, label, &[num_col1, num_col2, text_col]) {
        return declined;
    }

    let layer = LayerSpec::new(Mark::Circle)
        .with_size(POINT_SIZE)
        .with_x(Channel::quantitative(num_col1))
        .with_y(Channel::quantitative(num_col2))
        .with_color(Channel::nominal(text_col))
        .with_tooltip(&[text_col, num_col1, num_col2]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}
