//! Scatter chart with multiple dimensions (archetype 6)
//!
//! Open points over a numeric x/y pair; the first categorical drives
//! color, the second drives shape, cycling through the fixed 11-symbol
//! palette.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SHAPE_PALETTE};
use crate::chart::ArchetypeKind;
use crate::table::ResultTable;

use super::scatter::POINT_SIZE;

pub(crate) fn build(
    table: &ResultTable,
    num_col1: &str,
    num_col2: &str,
    text_col1: &str,
    text_col2: &str,
) -> ChartOutcome {
    let label = ArchetypeKind::ShapeScatter.label();
    if let Some(declined) =
        decline_if_missing(table, label, &[num_col1, num_col2, text_col1, text_col2])
    {
        return declined;
    }

    let layer = LayerSpec::new(Mark::Point)
        .with_size(POINT_SIZE)
        .with_x(Channel::quantitative(num_col1))
        .with_y(Channel::quantitative(num_col2))
        .with_color(Channel::nominal(text_col1))
        .with_shape(Channel::nominal(text_col2).with_scale_range(&SHAPE_PALETTE))
        .with_tooltip(&[text_col1, text_col2, num_col1, num_col2]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}
