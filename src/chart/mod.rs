//! Chart specifications and builders
//!
//! This module holds the closed family of ten chart archetypes. A
//! [`ChartSpec`] is one archetype plus its concrete column-role bindings
//! for one table; [`ChartSpec::build`] dispatches to the archetype's
//! builder and returns a [`ChartOutcome`].
//!
//! # Architecture
//!
//! - [`ArchetypeKind`]: enum for pattern matching and serialization
//! - [`ChartSpec`]: tagged variant per archetype, carrying role bindings
//! - `archetype::*`: one builder module per archetype
//!
//! Builders are stateless and total: a binding that no longer matches the
//! table (or a table the archetype cannot draw) produces
//! `ChartOutcome::NoChart`, never a panic or an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::selector::SelectorStore;
use crate::table::ResultTable;

pub mod archetype;
pub mod types;
pub mod vega;

pub use types::{
    Channel, ChannelKind, ChartObject, ChartOutcome, Encoding, KpiRecord, LayerSpec, Mark,
    RenderMode, SortOrder, Stack, TileRenderer, MAX_KPI_TILES, SHAPE_PALETTE,
};

/// Enum of all archetype kinds for pattern matching and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeKind {
    DateBar,
    DualLine,
    StackedBar,
    StackedBarSelect,
    Scatter,
    ShapeScatter,
    Bubble,
    ShapeBubble,
    RankedBar,
    KpiTiles,
}

impl ArchetypeKind {
    /// Stable identifier used in selector keys and serialized specs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchetypeKind::DateBar => "date_bar",
            ArchetypeKind::DualLine => "dual_line",
            ArchetypeKind::StackedBar => "stacked_bar",
            ArchetypeKind::StackedBarSelect => "stacked_bar_select",
            ArchetypeKind::Scatter => "scatter",
            ArchetypeKind::ShapeScatter => "shape_scatter",
            ArchetypeKind::Bubble => "bubble",
            ArchetypeKind::ShapeBubble => "shape_bubble",
            ArchetypeKind::RankedBar => "ranked_bar",
            ArchetypeKind::KpiTiles => "kpi_tiles",
        }
    }

    /// Human-readable chart type label shown by the host.
    pub fn label(&self) -> &'static str {
        match self {
            ArchetypeKind::DateBar => "Bar Chart by Date",
            ArchetypeKind::DualLine => "Dual Axis Line Chart",
            ArchetypeKind::StackedBar => "Stacked Bar Chart by Date",
            ArchetypeKind::StackedBarSelect => "Stacked Bar Chart with Selectable Colors",
            ArchetypeKind::Scatter => "Scatter Chart",
            ArchetypeKind::ShapeScatter => "Scatter Chart with Multiple Dimensions",
            ArchetypeKind::Bubble => "Bubble Chart",
            ArchetypeKind::ShapeBubble => "Multi-Dimensional Bubble Chart",
            ArchetypeKind::RankedBar => "Bar Chart with Selectable X-Axis and Color",
            ArchetypeKind::KpiTiles => "KPI Tiles",
        }
    }
}

impl std::fmt::Display for ArchetypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One chart archetype with its concrete column-role bindings.
///
/// Role names follow the archetype's own vocabulary (`date_col`,
/// `num_col1`, `text_cols`, ...). A spec is only renderable against a
/// table that still contains every bound column; builders re-validate at
/// build time since the table may have changed since selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "archetype", rename_all = "snake_case")]
pub enum ChartSpec {
    /// Bar chart over a time axis.
    DateBar { date_col: String, numeric_col: String },
    /// Two line series on a shared time axis with independent y scales.
    DualLine {
        date_col: String,
        num_col1: String,
        num_col2: String,
    },
    /// Stacked bars over a time axis, colored by one categorical column.
    StackedBar {
        date_col: String,
        text_col: String,
        numeric_col: String,
    },
    /// Stacked bars over a time axis with a render-time choice of color
    /// column among all bound categoricals.
    StackedBarSelect {
        date_col: String,
        text_cols: Vec<String>,
        numeric_col: String,
    },
    /// Filled-circle scatter, colored by one categorical column.
    Scatter {
        num_col1: String,
        num_col2: String,
        text_col: String,
    },
    /// Open-point scatter with color and shape categoricals.
    ShapeScatter {
        num_col1: String,
        num_col2: String,
        text_col1: String,
        text_col2: String,
    },
    /// Bubble chart: scatter with a numeric size dimension.
    Bubble {
        num_col1: String,
        num_col2: String,
        num_col3: String,
        text_col: String,
    },
    /// Bubble chart with color and shape categoricals.
    ShapeBubble {
        num_col1: String,
        num_col2: String,
        num_col3: String,
        text_col1: String,
        text_col2: String,
    },
    /// Ranked bars with render-time x-axis and color column choices.
    RankedBar {
        numeric_col: String,
        text_cols: Vec<String>,
        #[serde(default)]
        stacked: bool,
    },
    /// One KPI tile per numeric column of a single-row result.
    KpiTiles {
        numeric_cols: Vec<String>,
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        labels: HashMap<String, String>,
    },
}

impl ChartSpec {
    pub fn kind(&self) -> ArchetypeKind {
        match self {
            ChartSpec::DateBar { .. } => ArchetypeKind::DateBar,
            ChartSpec::DualLine { .. } => ArchetypeKind::DualLine,
            ChartSpec::StackedBar { .. } => ArchetypeKind::StackedBar,
            ChartSpec::StackedBarSelect { .. } => ArchetypeKind::StackedBarSelect,
            ChartSpec::Scatter { .. } => ArchetypeKind::Scatter,
            ChartSpec::ShapeScatter { .. } => ArchetypeKind::ShapeScatter,
            ChartSpec::Bubble { .. } => ArchetypeKind::Bubble,
            ChartSpec::ShapeBubble { .. } => ArchetypeKind::ShapeBubble,
            ChartSpec::RankedBar { .. } => ArchetypeKind::RankedBar,
            ChartSpec::KpiTiles { .. } => ArchetypeKind::KpiTiles,
        }
    }

    /// The human-readable chart type label.
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// Every column name bound to a role, in role order.
    pub fn bound_columns(&self) -> Vec<&str> {
        match self {
            ChartSpec::DateBar {
                date_col,
                numeric_col,
            } => vec![date_col, numeric_col],
            ChartSpec::DualLine {
                date_col,
                num_col1,
                num_col2,
            } => vec![date_col, num_col1, num_col2],
            ChartSpec::StackedBar {
                date_col,
                text_col,
                numeric_col,
            } => vec![date_col, text_col, numeric_col],
            ChartSpec::StackedBarSelect {
                date_col,
                text_cols,
                numeric_col,
            } => {
                let mut cols = vec![date_col.as_str()];
                cols.extend(text_cols.iter().map(|s| s.as_str()));
                cols.push(numeric_col);
                cols
            }
            ChartSpec::Scatter {
                num_col1,
                num_col2,
                text_col,
            } => vec![num_col1, num_col2, text_col],
            ChartSpec::ShapeScatter {
                num_col1,
                num_col2,
                text_col1,
                text_col2,
            } => vec![num_col1, num_col2, text_col1, text_col2],
            ChartSpec::Bubble {
                num_col1,
                num_col2,
                num_col3,
                text_col,
            } => vec![num_col1, num_col2, num_col3, text_col],
            ChartSpec::ShapeBubble {
                num_col1,
                num_col2,
                num_col3,
                text_col1,
                text_col2,
            } => vec![num_col1, num_col2, num_col3, text_col1, text_col2],
            ChartSpec::RankedBar {
                numeric_col,
                text_cols,
                ..
            } => {
                let mut cols = vec![numeric_col.as_str()];
                cols.extend(text_cols.iter().map(|s| s.as_str()));
                cols
            }
            ChartSpec::KpiTiles { numeric_cols, .. } => {
                numeric_cols.iter().map(|s| s.as_str()).collect()
            }
        }
    }

    /// Build the chart for `table`, dispatching to the archetype's
    /// builder.
    pub fn build(&self, table: &ResultTable, ctx: &mut BuildContext) -> ChartOutcome {
        match self {
            ChartSpec::DateBar {
                date_col,
                numeric_col,
            } => archetype::date_bar::build(table, date_col, numeric_col),
            ChartSpec::DualLine {
                date_col,
                num_col1,
                num_col2,
            } => archetype::dual_line::build(table, date_col, num_col1, num_col2),
            ChartSpec::StackedBar {
                date_col,
                text_col,
                numeric_col,
            } => archetype::stacked_bar::build(table, date_col, text_col, numeric_col),
            ChartSpec::StackedBarSelect {
                date_col,
                text_cols,
                numeric_col,
            } => archetype::stacked_bar_select::build(table, ctx, date_col, text_cols, numeric_col),
            ChartSpec::Scatter {
                num_col1,
                num_col2,
                text_col,
            } => archetype::scatter::build(table, num_col1, num_col2, text_col),
            ChartSpec::ShapeScatter {
                num_col1,
                num_col2,
                text_col1,
                text_col2,
            } => archetype::shape_scatter::build(table, num_col1, num_col2, text_col1, text_col2),
            ChartSpec::Bubble {
                num_col1,
                num_col2,
                num_col3,
                text_col,
            } => archetype::bubble::build(table, num_col1, num_col2, num_col3, text_col),
            ChartSpec::ShapeBubble {
                num_col1,
                num_col2,
                num_col3,
                text_col1,
                text_col2,
            } => archetype::shape_bubble::build(
                table, num_col1, num_col2, num_col3, text_col1, text_col2,
            ),
            ChartSpec::RankedBar {
                numeric_col,
                text_cols,
                ..
            } => archetype::ranked_bar::build(table, ctx, numeric_col, text_cols),
            ChartSpec::KpiTiles {
                numeric_cols,
                labels,
            } => archetype::kpi::build(table, ctx, numeric_cols, labels),
        }
    }
}

/// Host-provided context for one build: the selector store that
/// interactive archetypes read and write, the KPI render mode, and an
/// optional tile sink for direct rendering.
pub struct BuildContext<'a> {
    pub selectors: &'a mut dyn SelectorStore,
    pub render_mode: RenderMode,
    pub tiles: Option<&'a mut dyn TileRenderer>,
}

impl<'a> BuildContext<'a> {
    /// Deferred rendering with no tile sink.
    pub fn new(selectors: &'a mut dyn SelectorStore) -> Self {
        Self {
            selectors,
            render_mode: RenderMode::Deferred,
            tiles: None,
        }
    }

    /// Direct rendering through the given tile sink.
    pub fn with_renderer(
        selectors: &'a mut dyn SelectorStore,
        tiles: &'a mut dyn TileRenderer,
    ) -> Self {
        Self {
            selectors,
            render_mode: RenderMode::Direct,
            tiles: Some(tiles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_identifiers_are_snake_case() {
        assert_eq!(ArchetypeKind::DateBar.as_str(), "date_bar");
        assert_eq!(ArchetypeKind::KpiTiles.as_str(), "kpi_tiles");
        assert_eq!(ArchetypeKind::RankedBar.to_string(), "ranked_bar");
    }

    #[test]
    fn test_spec_serde_tagging() {
        let spec = ChartSpec::Scatter {
            num_col1: "a".into(),
            num_col2: "b".into(),
            text_col: "t".into(),
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["archetype"], "scatter");
        assert_eq!(json["num_col1"], "a");

        let back: ChartSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_bound_columns_cover_all_roles() {
        let spec = ChartSpec::ShapeBubble {
            num_col1: "a".into(),
            num_col2: "b".into(),
            num_col3: "c".into(),
            text_col1: "d".into(),
            text_col2: "e".into(),
        };
        assert_eq!(spec.bound_columns(), vec!["a", "b", "c", "d", "e"]);

        let spec = ChartSpec::RankedBar {
            numeric_col: "v".into(),
            text_cols: vec!["x".into(), "y".into()],
            stacked: true,
        };
        assert_eq!(spec.bound_columns(), vec!["v", "x", "y"]);
    }

    #[test]
    fn test_labels_match_archetypes() {
        let spec = ChartSpec::DualLine {
            date_col: "d".into(),
            num_col1: "a".into(),
            num_col2: "b".into(),
        };
        assert_eq!(spec.label(), "Dual Axis Line Chart");
    }
}
