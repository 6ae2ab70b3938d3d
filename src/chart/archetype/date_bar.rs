//! Bar chart by date (archetype 1)
//!
//! One bar per time point: x is the temporal column sorted ascending, y
//! the single numeric column.

use crate::chart::archetype::decline_if_missing;
use crate::chart::types::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder};
use crate::chart::ArchetypeKind;
use crate::table::ResultTable;

pub(crate) fn build(table: &ResultTable, date_col: &str, numeric_col: &str) -> ChartOutcome {
    let label = ArchetypeKind::DateBar.label();
    if let Some(declined) = decline_if_missing(table, label, &[date_col, numeric_col]) {
        return declined;
    }

    let layer = LayerSpec::new(Mark::Bar)
        .with_x(Channel::temporal(date_col).with_sort(SortOrder::Ascending))
        .with_y(Channel::quantitative(numeric_col))
        .with_tooltip(&[date_col, numeric_col]);

    ChartOutcome::Plot(ChartObject::single(label, layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::archetype::testutil::dated_table;
    use crate::chart::types::{ChannelKind, SortOrder};

    #[test]
    fn test_build_encodes_temporal_x_ascending() {
        let table = dated_table();
        let outcome = build(&table, "day", "sales");
        let chart = outcome.as_plot().unwrap();

        assert_eq!(chart.label, "Bar Chart by Date");
        assert_eq!(chart.mark(), Some(Mark::Bar));
        let enc = chart.encoding().unwrap();
        let x = enc.x.as_ref().unwrap();
        assert_eq!(x.field, "day");
        assert_eq!(x.kind, ChannelKind::Temporal);
        assert_eq!(x.sort, Some(SortOrder::Ascending));
        let y = enc.y.as_ref().unwrap();
        assert_eq!(y.field, "sales");
        assert_eq!(y.kind, ChannelKind::Quantitative);
        assert_eq!(enc.tooltip, vec!["day", "sales"]);
    }

    #[test]
    fn test_build_declines_on_missing_column() {
        let table = dated_table();
        let outcome = build(&table, "day", "revenue");
        assert!(!outcome.is_chart());
        assert!(outcome.reason().unwrap().contains("revenue"));
    }
}
