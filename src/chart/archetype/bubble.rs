//! Bubble chart (archetype 7)
//!
//! Scatter over a numeric x/y pair with a third numeric column driving
//! mark size and a categorical column driving color.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark};
use crate::chart::ArchetypeKind;
use crate::table::ResultTable;

pub(crate) fn build(
    table: &ResultTable,
    num_col1: &str,
    num_col2: &str,
    num_col3: &str,
    text_col: &str,
) -> ChartOutcome {
    let label = ArchetypeKind::Bubble.label();
    if let Some(declined) =
        decline_if_missing(table, label, &[num_col1, num_col2, num_col3, text_col])
    {
        return declined;
    }

    let layer = LayerSpec::new(Mark::Circle)
        .with_x(Channel::quantitative(num_col1))
        .with_y(Channel::quantitative(num_col2))
        .with_size_channel(Channel::quantitative(num_col3))
        .with_color(Channel::nominal(text_col))
        .with_tooltip(&[text_col, num_col1, num_col2, num_col3]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}
