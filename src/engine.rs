//! Chart rule engine
//!
//! An ordered decision list over the column-count signature picks at most
//! one archetype per table. The ordering is behavior: the single-row KPI
//! rule runs before the single-numeric ranked-bar rule, so a single-row,
//! single-numeric, multi-categorical result yields KPI tiles. First match
//! wins; no match is the explicit no-chart outcome, never a failure.
//!
//! Ahead of the counts-based rules sits a configuration-driven override
//! allow-list: recurring dataset shapes (known by their exact column
//! names) can be pinned to a fixed archetype and binding without touching
//! the rule code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::chart::{BuildContext, ChartOutcome, ChartSpec};
use crate::classify::{classify, Classification};
use crate::table::ResultTable;
use crate::{AutovizError, Result};

/// Rows analyzed and charted per result, matching the host's display cap.
pub const DEFAULT_ROW_LIMIT: usize = 5000;

/// One allow-list entry: when every named column is present in the table,
/// force the given spec (provided its own bindings also resolve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub columns: Vec<String>,
    pub spec: ChartSpec,
}

/// Rule engine configuration.
///
/// The default carries the one known recurring dataset shape (a network
/// cell summary identified by its column triple) pinned to the scatter
/// archetype. Hosts can replace or extend the list via
/// [`RuleConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub row_limit: usize,
    pub overrides: Vec<OverrideRule>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            overrides: vec![OverrideRule {
                columns: vec![
                    "cell_id_display".to_string(),
                    "total_tickets".to_string(),
                    "avg_sentiment".to_string(),
                ],
                spec: ChartSpec::Scatter {
                    num_col1: "total_tickets".to_string(),
                    num_col2: "avg_sentiment".to_string(),
                    text_col: "cell_id_display".to_string(),
                },
            }],
        }
    }
}

impl RuleConfig {
    /// A configuration with no overrides and the default row limit.
    pub fn bare() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            overrides: Vec::new(),
        }
    }

    /// Parse a configuration from JSON. Missing fields fall back to the
    /// defaults (including the built-in override list).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AutovizError::Config(format!("invalid rule config: {}", e)))
    }
}

/// Pick the archetype for a classified table.
///
/// Pure over its inputs; re-run it whenever the table changes. Returns
/// `None` when no rule matches.
pub fn select(
    table: &ResultTable,
    classes: &Classification,
    config: &RuleConfig,
) -> Option<ChartSpec> {
    let names = table.column_names();

    // Override allow-list runs ahead of every counts rule.
    for rule in &config.overrides {
        let columns_present = rule.columns.iter().all(|c| names.contains(c));
        if columns_present && rule.spec.bound_columns().iter().all(|c| table.has_column(c)) {
            tracing::debug!(archetype = %rule.spec.kind(), "override allow-list matched");
            return Some(rule.spec.clone());
        }
    }

    let (t, c, n) = classes.signature();

    // Single row with 1-4 numeric columns: KPI tiles. Evaluated before
    // the single-numeric ranked-bar rule; swapping them changes behavior.
    if table.height() == 1 && (1..=4).contains(&n) && c <= 1 {
        return Some(ChartSpec::KpiTiles {
            numeric_cols: classes.numeric.clone(),
            labels: HashMap::new(),
        });
    }

    if t == 1 && c == 0 && n == 1 {
        return Some(ChartSpec::DateBar {
            date_col: classes.temporal[0].clone(),
            numeric_col: classes.numeric[0].clone(),
        });
    }

    if t == 1 && c == 0 && n == 2 {
        return Some(ChartSpec::DualLine {
            date_col: classes.temporal[0].clone(),
            num_col1: classes.numeric[0].clone(),
            num_col2: classes.numeric[1].clone(),
        });
    }

    if t == 1 && c == 1 && n == 1 {
        return Some(ChartSpec::StackedBar {
            date_col: classes.temporal[0].clone(),
            text_col: classes.categorical[0].clone(),
            numeric_col: classes.numeric[0].clone(),
        });
    }

    if t == 1 && c >= 2 && n == 1 {
        // All categorical columns stay selectable, not just the first two
        return Some(ChartSpec::StackedBarSelect {
            date_col: classes.temporal[0].clone(),
            text_cols: classes.categorical.clone(),
            numeric_col: classes.numeric[0].clone(),
        });
    }

    if t == 0 && c == 1 && n == 2 {
        return Some(ChartSpec::Scatter {
            num_col1: classes.numeric[0].clone(),
            num_col2: classes.numeric[1].clone(),
            text_col: classes.categorical[0].clone(),
        });
    }

    if t == 0 && c == 2 && n == 2 {
        return Some(ChartSpec::ShapeScatter {
            num_col1: classes.numeric[0].clone(),
            num_col2: classes.numeric[1].clone(),
            text_col1: classes.categorical[0].clone(),
            text_col2: classes.categorical[1].clone(),
        });
    }

    if t == 0 && c == 1 && n == 3 {
        return Some(ChartSpec::Bubble {
            num_col1: classes.numeric[0].clone(),
            num_col2: classes.numeric[1].clone(),
            num_col3: classes.numeric[2].clone(),
            text_col: classes.categorical[0].clone(),
        });
    }

    if t == 0 && c >= 2 && n >= 3 {
        return Some(ChartSpec::ShapeBubble {
            num_col1: classes.numeric[0].clone(),
            num_col2: classes.numeric[1].clone(),
            num_col3: classes.numeric[2].clone(),
            text_col1: classes.categorical[0].clone(),
            text_col2: classes.categorical[1].clone(),
        });
    }

    if t == 0 && n == 1 {
        // Any non-numeric column can serve as the ranked axis
        let non_numeric: Vec<String> = names
            .into_iter()
            .filter(|name| !classes.numeric.contains(name))
            .collect();
        if !non_numeric.is_empty() {
            let stacked = non_numeric.len() >= 2;
            return Some(ChartSpec::RankedBar {
                numeric_col: classes.numeric[0].clone(),
                text_cols: non_numeric.into_iter().take(5).collect(),
                stacked,
            });
        }
    }

    tracing::debug!(
        temporal = t,
        categorical = c,
        numeric = n,
        "no chart rule matched"
    );
    None
}

/// One-call entry: cap rows, classify, select, and attach the selection
/// as the table's chart metadata.
pub fn choose_chart(table: &mut ResultTable, config: &RuleConfig) -> Option<ChartSpec> {
    if table.height() > config.row_limit {
        tracing::debug!(
            rows = table.height(),
            limit = config.row_limit,
            "capping result rows for chart analysis"
        );
        table.truncate(config.row_limit);
    }

    let classes = classify(table);
    let spec = select(table, &classes, config)?;
    tracing::debug!(archetype = %spec.kind(), "selected chart archetype");
    table.attach_metadata(spec.clone());
    Some(spec)
}

/// Build the chart recorded in the table's attached metadata.
pub fn build_from_metadata(table: &ResultTable, ctx: &mut BuildContext) -> ChartOutcome {
    match table.chart_metadata() {
        Some(spec) => spec.build(table, ctx),
        None => ChartOutcome::no_chart("No chart metadata attached to this result."),
    }
}
