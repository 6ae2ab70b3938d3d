//! Multi-dimensional bubble chart (archetype 8)
//!
//! Bubble chart with two categorical dimensions: color from the first,
//! shape from the second via the fixed 11-symbol palette.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SHAPE_PALETTE};
use crate::chart::ArchetypeKind;
use crate::table::ResultTable;

pub(crate) fn build(
    table: &ResultTable,
    num_col1: &str,
    num_col2: &str,
    num_col3: &str,
    text_col1: &str,
    text_col2: &str,
) -> ChartOutcome {
    let label = ArchetypeKind::ShapeBubble.label();
    if let Some(declined) = decline_if_missing(
        table,
        label,
        &[num_col1, num_col2, num_col3, text_col1, text_col2],
    ) {
        return declined;
    }

    let layer = LayerSpec::new(Mark::Point)
        .with_x(Channel::quantitative(num_col1))
        .with_y(Channel::quantitative(num_col2))
        .with_size_channel(Channel::quantitative(num_col3))
        .with_color(Channel::nominal(text_col1))
        .with_shape(Channel::nominal(text_col2).with_scale_range(&SHAPE_PALETTE))
        .with_tooltip(&[text_col1, text_col2, num_col1, num_col2, num_col3]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn table() -> ResultTable {
        ResultTable::new(
            df!(
                "x" => [1i64, 2],
                "y" => [3i64, 4],
                "w" => [10i64, 40],
                "grp" => ["a", "b"],
                "cls" => ["p", "q"],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_build_combines_size_color_and_shape() {
        let outcome = build(&table(), "x", "y", "w", "grp", "cls");
        let chart = outcome.as_plot().unwrap();

        assert_eq!(chart.mark(), Some(Mark::Point));
        let enc = chart.encoding().unwrap();
        assert_eq!(enc.size.as_ref().unwrap().field, "w");
        assert_eq!(enc.color.as_ref().unwrap().field, "grp");
        assert_eq!(
            enc.shape.as_ref().unwrap().scale_range.as_ref().unwrap().len(),
            11
        );
        assert_eq!(enc.tooltip, vec!["grp", "cls", "x", "y", "w"]);
    }

    #[test]
    fn test_build_declines_on_missing_column() {
        assert!(!build(&table(), "x", "y", "w", "grp", "other").is_chart());
    }
}
