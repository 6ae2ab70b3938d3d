//! Tabular result wrapper
//!
//! A [`ResultTable`] pairs the query result `DataFrame` with the chart
//! metadata the rule engine attaches to it. The metadata is set at most
//! once per result instance; a later attachment attempt is ignored so the
//! first selection made for a result stays authoritative for its lifetime.

use crate::chart::ChartSpec;
use crate::naming;
use polars::prelude::DataFrame;

/// A query result table with optionally attached chart metadata.
#[derive(Debug, Clone)]
pub struct ResultTable {
    df: DataFrame,
    chart_metadata: Option<ChartSpec>,
}

impl ResultTable {
    /// Wrap a query result. No rows are dropped here; the engine applies
    /// its configured row cap when the table is analyzed.
    pub fn new(df: DataFrame) -> Self {
        Self {
            df,
            chart_metadata: None,
        }
    }

    /// The underlying data.
    pub fn data(&self) -> &DataFrame {
        &self.df
    }

    /// Mutable access to the underlying data. Used by the classifier for
    /// in-place date-column promotion and by the engine for row capping.
    pub fn data_mut(&mut self) -> &mut DataFrame {
        &mut self.df
    }

    /// Consume the wrapper and return the data.
    pub fn into_data(self) -> DataFrame {
        self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    /// Truncate to the first `limit` rows. Clears nothing else; metadata
    /// attached before the cap stays valid because column shape is
    /// unchanged.
    pub fn truncate(&mut self, limit: usize) {
        if self.df.height() > limit {
            self.df = self.df.head(Some(limit));
        }
    }

    /// Attach chart metadata. The first attachment wins; subsequent calls
    /// are ignored.
    pub fn attach_metadata(&mut self, spec: ChartSpec) {
        if self.chart_metadata.is_some() {
            tracing::debug!(
                archetype = %spec.kind(),
                "chart metadata already attached; keeping existing selection"
            );
            return;
        }
        self.chart_metadata = Some(spec);
    }

    /// The attached chart metadata, if any.
    pub fn chart_metadata(&self) -> Option<&ChartSpec> {
        self.chart_metadata.as_ref()
    }

    /// Stable fingerprint of the table shape, used to scope interactive
    /// selector state.
    pub fn fingerprint(&self) -> String {
        naming::table_fingerprint(&self.df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> ResultTable {
        ResultTable::new(df!("region" => ["n", "s", "e"], "sales" => [1i64, 2, 3]).unwrap())
    }

    #[test]
    fn test_metadata_set_at_most_once() {
        let mut table = sample();
        assert!(table.chart_metadata().is_none());

        table.attach_metadata(ChartSpec::DateBar {
            date_col: "a".into(),
            numeric_col: "b".into(),
        });
        table.attach_metadata(ChartSpec::Scatter {
            num_col1: "x".into(),
            num_col2: "y".into(),
            text_col: "t".into(),
        });

        // First attachment is kept
        match table.chart_metadata() {
            Some(ChartSpec::DateBar { date_col, .. }) => assert_eq!(date_col, "a"),
            other => panic!("expected DateBar metadata, got {:?}", other),
        }
    }

    #[test]
    fn test_truncate_caps_rows() {
        let mut table = sample();
        table.truncate(2);
        assert_eq!(table.height(), 2);
        // Truncating below the cap is a no-op
        table.truncate(10);
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn test_fingerprint_matches_naming() {
        let table = sample();
        assert_eq!(table.fingerprint(), naming::table_fingerprint(table.data()));
    }

    #[test]
    fn test_has_column() {
        let table = sample();
        assert!(table.has_column("region"));
        assert!(!table.has_column("missing"));
    }
}
