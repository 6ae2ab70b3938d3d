//! Stacked bar chart with selectable colors (archetype 4)
//!
//! Like the stacked bar by date, but the color column is chosen at render
//! time from the full categorical set. The choice is scoped to the table
//! fingerprint through the injected selector store, so it survives
//! re-renders of the same result and resets when the table changes.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder, Stack};
use crate::chart::{ArchetypeKind, BuildContext};
use crate::table::ResultTable;
use crate::{naming, selector};

pub(crate) fn build(
    table: &ResultTable,
    ctx: &mut BuildContext,
    date_col: &str,
    text_cols: &[String],
    numeric_col: &str,
) -> ChartOutcome {
    let kind = ArchetypeKind::StackedBarSelect;
    let label = kind.label();

    if text_cols.is_empty() {
        return ChartOutcome::no_chart(format!("No categorical columns bound for {}", label));
    }
    let mut bound: Vec<&str> = vec![date_col];
    bound.extend(text_cols.iter().map(|s| s.as_str()));
    bound.push(numeric_col);
    if let Some(declined) = decline_if_missing(table, label, &bound) {
        return declined;
    }

    let key = naming::selector_key(kind.as_str(), naming::COLOR_ROLE, &table.fingerprint());
    let Some(selected) = selector::get_or_init(ctx.selectors, &key, text_cols) else {
        return ChartOutcome::no_chart(format!("No categorical columns bound for {}", label));
    };

    let layer = LayerSpec::new(Mark::Bar)
        .with_x(Channel::temporal(date_col).with_sort(SortOrder::Ascending))
        .with_y(Channel::quantitative(numeric_col).with_stack(Stack::Zero))
        .with_color(Channel::nominal(selected.as_str()).with_title(selected.as_str()))
        .with_tooltip(&[date_col, selected.as_str(), numeric_col]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}
