//! Declarative chart object model
//!
//! A [`ChartObject`] is the archetype-independent description of one
//! chart: layers of mark + encoding channels, tooltips over the bound
//! columns, and a human-readable label. It carries no data; the
//! rendering host pairs it with the table (see [`crate::chart::vega`]).
//!
//! KPI tiles are the exception: they have no mark grammar, so their
//! result is a [`KpiRecord`] plus an optional direct render through the
//! host's [`TileRenderer`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed symbol palette cycled through by shape-encoded archetypes.
pub const SHAPE_PALETTE: [&str; 11] = [
    "circle",
    "square",
    "cross",
    "diamond",
    "triangle-up",
    "triangle-down",
    "triangle-right",
    "triangle-left",
    "arrow",
    "wedge",
    "stroke",
];

/// Maximum number of KPI tiles rendered from one result row.
pub const MAX_KPI_TILES: usize = 4;

/// Mark type for one chart layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bar,
    Line,
    /// Filled point
    Circle,
    /// Open point
    Point,
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mark::Bar => "bar",
            Mark::Line => "line",
            Mark::Circle => "circle",
            Mark::Point => "point",
        };
        write!(f, "{}", s)
    }
}

/// Measurement level of an encoding channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Temporal,
    Quantitative,
    Nominal,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Temporal => "temporal",
            ChannelKind::Quantitative => "quantitative",
            ChannelKind::Nominal => "nominal",
        }
    }
}

/// Sort directive for an axis channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    /// Sort categories by descending y value
    DescendingByY,
}

/// Stacking directive for a y channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stack {
    Zero,
}

/// One encoding channel: a column bound to a visual dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub field: String,
    pub kind: ChannelKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Stack>,
    /// Axis or legend title override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fixed scale range (the shape palette, for shape channels)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_range: Option<Vec<String>>,
}

impl Channel {
    fn new(field: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            field: field.into(),
            kind,
            sort: None,
            stack: None,
            title: None,
            scale_range: None,
        }
    }

    pub fn temporal(field: impl Into<String>) -> Self {
        Self::new(field, ChannelKind::Temporal)
    }

    pub fn quantitative(field: impl Into<String>) -> Self {
        Self::new(field, ChannelKind::Quantitative)
    }

    pub fn nominal(field: impl Into<String>) -> Self {
        Self::new(field, ChannelKind::Nominal)
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_stack(mut self, stack: Stack) -> Self {
        self.stack = Some(stack);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_scale_range(mut self, range: &[&str]) -> Self {
        self.scale_range = Some(range.iter().map(|s| s.to_string()).collect());
        self
    }
}

/// Channel assignments for one layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Channel>,
    /// Columns surfaced in the hover tooltip, in display order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tooltip: Vec<String>,
}

/// One mark layer with its encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub mark: Mark,
    /// Fixed mark size in square pixels (scatter/bubble points)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Fixed mark color (the dual-axis line pair)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub encoding: Encoding,
}

impl LayerSpec {
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            size: None,
            color: None,
            encoding: Encoding::default(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_mark_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_x(mut self, channel: Channel) -> Self {
        self.encoding.x = Some(channel);
        self
    }

    pub fn with_y(mut self, channel: Channel) -> Self {
        self.encoding.y = Some(channel);
        self
    }

    pub fn with_color(mut self, channel: Channel) -> Self {
        self.encoding.color = Some(channel);
        self
    }

    pub fn with_size_channel(mut self, channel: Channel) -> Self {
        self.encoding.size = Some(channel);
        self
    }

    pub fn with_shape(mut self, channel: Channel) -> Self {
        self.encoding.shape = Some(channel);
        self
    }

    pub fn with_tooltip(mut self, columns: &[&str]) -> Self {
        self.encoding.tooltip = columns.iter().map(|c| c.to_string()).collect();
        self
    }
}

/// A complete declarative chart: one or more layers plus a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartObject {
    /// Human-readable chart type label shown by the host
    pub label: String,
    pub layers: Vec<LayerSpec>,
    /// Resolve y scales independently across layers (dual-axis charts)
    #[serde(default)]
    pub independent_y: bool,
}

impl ChartObject {
    /// A single-layer chart.
    pub fn single(label: impl Into<String>, layer: LayerSpec) -> Self {
        Self {
            label: label.into(),
            layers: vec![layer],
            independent_y: false,
        }
    }

    /// A multi-layer chart.
    pub fn layered(label: impl Into<String>, layers: Vec<LayerSpec>, independent_y: bool) -> Self {
        Self {
            label: label.into(),
            layers,
            independent_y,
        }
    }

    /// The first layer's mark, if any.
    pub fn mark(&self) -> Option<Mark> {
        self.layers.first().map(|l| l.mark)
    }

    /// The first layer's encoding, if any.
    pub fn encoding(&self) -> Option<&Encoding> {
        self.layers.first().map(|l| &l.encoding)
    }
}

/// Whether the KPI builder renders tiles itself or leaves that to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Render through the provided [`TileRenderer`] and return the record
    Direct,
    /// Return the record only
    Deferred,
}

/// Host-side sink for directly rendered KPI tiles.
pub trait TileRenderer {
    fn tile(&mut self, label: &str, value: &str);
}

/// Result record for the KPI tile archetype, returned so callers can tell
/// that rendering already happened (or perform it themselves).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    /// Always `"kpi_tiles"`
    pub kind: String,
    pub numeric_cols: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub labels: HashMap<String, String>,
    pub tile_count: usize,
}

impl KpiRecord {
    pub const KIND: &'static str = "kpi_tiles";

    pub fn new(numeric_cols: Vec<String>, labels: HashMap<String, String>) -> Self {
        let tile_count = numeric_cols.len().min(MAX_KPI_TILES);
        Self {
            kind: Self::KIND.to_string(),
            numeric_cols,
            labels,
            tile_count,
        }
    }
}

/// The single observable outcome of building a chart.
///
/// Every failure mode in classification, selection, and building folds
/// into `NoChart`; builders never panic and never return errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChartOutcome {
    Plot(ChartObject),
    Kpi(KpiRecord),
    NoChart {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl ChartOutcome {
    /// "No chart" with a diagnostic the host may display.
    pub fn no_chart(reason: impl Into<String>) -> Self {
        ChartOutcome::NoChart {
            reason: Some(reason.into()),
        }
    }

    /// "No chart" with nothing to say.
    pub fn none() -> Self {
        ChartOutcome::NoChart { reason: None }
    }

    pub fn is_chart(&self) -> bool {
        !matches!(self, ChartOutcome::NoChart { .. })
    }

    pub fn as_plot(&self) -> Option<&ChartObject> {
        match self {
            ChartOutcome::Plot(chart) => Some(chart),
            _ => None,
        }
    }

    pub fn as_kpi(&self) -> Option<&KpiRecord> {
        match self {
            ChartOutcome::Kpi(record) => Some(record),
            _ => None,
        }
    }

    /// The diagnostic for a declined build, if one was given.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ChartOutcome::NoChart { reason } => reason.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_builders() {
        let ch = Channel::temporal("day")
            .with_sort(SortOrder::Ascending)
            .with_title("Day");
        assert_eq!(ch.field, "day");
        assert_eq!(ch.kind, ChannelKind::Temporal);
        assert_eq!(ch.sort, Some(SortOrder::Ascending));
        assert_eq!(ch.title.as_deref(), Some("Day"));
    }

    #[test]
    fn test_layer_builder_chain() {
        let layer = LayerSpec::new(Mark::Circle)
            .with_size(100.0)
            .with_x(Channel::quantitative("a"))
            .with_y(Channel::quantitative("b"))
            .with_color(Channel::nominal("c"))
            .with_tooltip(&["c", "a", "b"]);
        assert_eq!(layer.mark, Mark::Circle);
        assert_eq!(layer.size, Some(100.0));
        assert_eq!(layer.encoding.tooltip, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_shape_palette_has_eleven_symbols() {
        assert_eq!(SHAPE_PALETTE.len(), 11);
        assert_eq!(SHAPE_PALETTE[0], "circle");
        assert_eq!(SHAPE_PALETTE[10], "stroke");
    }

    #[test]
    fn test_kpi_record_caps_tile_count() {
        let cols: Vec<String> = (0..6).map(|i| format!("m{i}")).collect();
        let record = KpiRecord::new(cols, HashMap::new());
        assert_eq!(record.tile_count, MAX_KPI_TILES);
        assert_eq!(record.kind, "kpi_tiles");
    }

    #[test]
    fn test_outcome_accessors() {
        let plot = ChartOutcome::Plot(ChartObject::single("t", LayerSpec::new(Mark::Bar)));
        assert!(plot.is_chart());
        assert!(plot.as_plot().is_some());
        assert!(plot.reason().is_none());

        let none = ChartOutcome::no_chart("why");
        assert!(!none.is_chart());
        assert_eq!(none.reason(), Some("why"));
    }

    #[test]
    fn test_chart_object_roundtrips_through_serde() {
        let chart = ChartObject::single(
            "Scatter Chart",
            LayerSpec::new(Mark::Circle)
                .with_size(100.0)
                .with_x(Channel::quantitative("a"))
                .with_y(Channel::quantitative("b")),
        );
        let json = serde_json::to_string(&chart).unwrap();
        let back: ChartObject = serde_json::from_str(&json).unwrap();
        assert_eq!(chart, back);
    }
}
