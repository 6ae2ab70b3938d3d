//! Ranked bar chart with selectable axis and color (archetype 9)
//!
//! Bars over a render-time choice of categorical x column, sorted by
//! descending y and stacked from zero, with an independent render-time
//! choice of color column. Both choices are scoped to the table
//! fingerprint through the injected selector store.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder, Stack};
use crate::chart::{ArchetypeKind, BuildContext};
use crate::table::ResultTable;
use crate::{naming, selector};

pub(crate) fn build(
    table: &ResultTable,
    ctx: &mut BuildContext,
    numeric_col: &str,
    text_cols: &[String],
) -> ChartOutcome {
    let kind = ArchetypeKind::RankedBar;
    let label = kind.label();

    if text_cols.is_empty() {
        return ChartOutcome::no_chart(format!("No categorical columns bound for {}", label));
    }
    let mut bound: Vec<&str> = vec![numeric_col];
    bound.extend(text_cols.iter().map(|s| s.as_str()));
    if let Some(declined) = decline_if_missing(table, label, &bound) {
        return declined;
    }

    let fingerprint = table.fingerprint();
    let axis_key = naming::selector_key(kind.as_str(), naming::AXIS_ROLE, &fingerprint);
    let color_key = naming::selector_key(kind.as_str(), naming::COLOR_ROLE, &fingerprint);

    let Some(axis_col) = selector::get_or_init(ctx.selectors, &axis_key, text_cols) else {
        return ChartOutcome::no_chart(format!("No categorical columns bound for {}", label));
    };
    let Some(color_col) = selector::get_or_init(ctx.selectors, &color_key, text_cols) else {
        return ChartOutcome::no_chart(format!("No categorical columns bound for {}", label));
    };

    let layer = LayerSpec::new(Mark::Bar)
        .with_x(Channel::nominal(axis_col.as_str()).with_sort(SortOrder::DescendingByY))
        .with_y(Channel::quantitative(numeric_col).with_stack(Stack::Zero))
        .with_color(Channel::nominal(color_col.as_str()).with_title(color_col.as_str()))
        .with_tooltip(&[axis_col.as_str(), color_col.as_str(), numeric_col]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}
