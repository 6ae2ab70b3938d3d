//! Vega-Lite output
//!
//! Converts a [`ChartObject`] plus its table into a Vega-Lite v6 JSON
//! specification for web-based rendering hosts.
//!
//! # Mapping Strategy
//!
//! - autoviz mark → Vega-Lite mark type (with fixed size/color params)
//! - encoding channels → Vega-Lite encoding channels
//! - dual-axis layers → Vega-Lite layer composition with independent
//!   y-scale resolution
//! - Polars DataFrame → Vega-Lite inline data (temporal values as
//!   ISO-8601 strings)

use crate::chart::types::{Channel, ChartObject, LayerSpec, Mark, SortOrder, Stack};
use crate::{AutovizError, Result};
use polars::prelude::*;
use serde_json::{json, Map, Value};

/// Vega-Lite schema version emitted in `$schema`.
const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v6.json";

impl ChartObject {
    /// Render this chart and its data as a Vega-Lite v6 specification.
    pub fn to_vega_lite(&self, df: &DataFrame) -> Result<Value> {
        let values = dataframe_to_values(df)?;

        let mut spec = Map::new();
        spec.insert("$schema".to_string(), json!(VEGA_LITE_SCHEMA));
        spec.insert("title".to_string(), json!(self.label));
        spec.insert("data".to_string(), json!({ "values": values }));

        match self.layers.as_slice() {
            [] => {
                return Err(AutovizError::Render(
                    "chart object has no layers".to_string(),
                ))
            }
            [layer] => {
                spec.insert("mark".to_string(), mark_to_json(layer));
                spec.insert("encoding".to_string(), encoding_to_json(layer));
            }
            layers => {
                let rendered: Vec<Value> = layers
                    .iter()
                    .map(|layer| {
                        json!({
                            "mark": mark_to_json(layer),
                            "encoding": encoding_to_json(layer),
                        })
                    })
                    .collect();
                spec.insert("layer".to_string(), json!(rendered));
                if self.independent_y {
                    spec.insert(
                        "resolve".to_string(),
                        json!({ "scale": { "y": "independent" } }),
                    );
                }
            }
        }

        Ok(Value::Object(spec))
    }
}

/// Map a layer's mark to a Vega-Lite mark object.
/// Always includes `clip: true` so marks don't render outside plot bounds.
fn mark_to_json(layer: &LayerSpec) -> Value {
    let mark_type = match layer.mark {
        Mark::Bar => "bar",
        Mark::Line => "line",
        Mark::Circle => "circle",
        Mark::Point => "point",
    };
    let mut mark = Map::new();
    mark.insert("type".to_string(), json!(mark_type));
    mark.insert("clip".to_string(), json!(true));
    if let Some(size) = layer.size {
        mark.insert("size".to_string(), json!(size));
    }
    if let Some(color) = &layer.color {
        mark.insert("color".to_string(), json!(color));
    }
    Value::Object(mark)
}

fn channel_to_json(channel: &Channel) -> Value {
    let mut obj = Map::new();
    obj.insert("field".to_string(), json!(channel.field));
    obj.insert("type".to_string(), json!(channel.kind.as_str()));
    if let Some(sort) = channel.sort {
        let directive = match sort {
            SortOrder::Ascending => "ascending",
            SortOrder::DescendingByY => "-y",
        };
        obj.insert("sort".to_string(), json!(directive));
    }
    if let Some(Stack::Zero) = channel.stack {
        obj.insert("stack".to_string(), json!("zero"));
    }
    if let Some(title) = &channel.title {
        obj.insert("axis".to_string(), json!({ "title": title }));
    }
    if let Some(range) = &channel.scale_range {
        obj.insert("scale".to_string(), json!({ "range": range }));
    }
    Value::Object(obj)
}

fn encoding_to_json(layer: &LayerSpec) -> Value {
    let enc = &layer.encoding;
    let mut obj = Map::new();
    if let Some(x) = &enc.x {
        obj.insert("x".to_string(), channel_to_json(x));
    }
    if let Some(y) = &enc.y {
        obj.insert("y".to_string(), channel_to_json(y));
    }
    if let Some(color) = &enc.color {
        obj.insert("color".to_string(), channel_to_json(color));
    }
    if let Some(size) = &enc.size {
        obj.insert("size".to_string(), channel_to_json(size));
    }
    if let Some(shape) = &enc.shape {
        obj.insert("shape".to_string(), channel_to_json(shape));
    }
    if !enc.tooltip.is_empty() {
        let fields: Vec<Value> = enc.tooltip.iter().map(|f| json!({ "field": f })).collect();
        obj.insert("tooltip".to_string(), json!(fields));
    }
    Value::Object(obj)
}

/// Convert a DataFrame to Vega-Lite inline data values (array of objects).
pub fn dataframe_to_values(df: &DataFrame) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(df.height());
    let column_names = df.get_column_names();

    for row_idx in 0..df.height() {
        let mut row_obj = Map::new();

        for (col_idx, col_name) in column_names.iter().enumerate() {
            let column = df.get_columns().get(col_idx).ok_or_else(|| {
                AutovizError::Render(format!("Failed to get column {}", col_name))
            })?;
            let value = series_value_at(column.as_materialized_series(), row_idx)?;
            row_obj.insert(col_name.to_string(), value);
        }

        values.push(Value::Object(row_obj));
    }

    Ok(values)
}

/// Get a single value from a series at a given index as a JSON value.
fn series_value_at(series: &Series, idx: usize) -> Result<Value> {
    use DataType::*;

    match series.dtype() {
        Int8 => {
            let ca = series
                .i8()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to i8: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        Int16 => {
            let ca = series
                .i16()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to i16: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        Int32 => {
            let ca = series
                .i32()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to i32: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        Int64 => {
            let ca = series
                .i64()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to i64: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        Float32 => {
            let ca = series
                .f32()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to f32: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        Float64 => {
            let ca = series
                .f64()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to f64: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        Boolean => {
            let ca = series
                .bool()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to bool: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        String => {
            let ca = series
                .str()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to string: {}", e)))?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }
        Date => {
            // Days since epoch to ISO date string: "YYYY-MM-DD"
            let ca = series
                .date()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to date: {}", e)))?;
            if let Some(days) = ca.0.get(idx) {
                let unix_epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
                let date = unix_epoch + chrono::Duration::days(days as i64);
                Ok(json!(date.format("%Y-%m-%d").to_string()))
            } else {
                Ok(Value::Null)
            }
        }
        Datetime(time_unit, _) => {
            // Timestamp to ISO datetime: "YYYY-MM-DDTHH:MM:SS.sssZ"
            let ca = series
                .datetime()
                .map_err(|e| AutovizError::Render(format!("Failed to cast to datetime: {}", e)))?;
            if let Some(timestamp) = ca.0.get(idx) {
                let micros = match time_unit {
                    TimeUnit::Microseconds => timestamp,
                    TimeUnit::Milliseconds => timestamp * 1_000,
                    TimeUnit::Nanoseconds => timestamp / 1_000,
                };
                let secs = micros / 1_000_000;
                let nsecs = ((micros % 1_000_000) * 1000) as u32;
                let dt = chrono::DateTime::<chrono::Utc>::from_timestamp(secs, nsecs)
                    .unwrap_or_else(|| {
                        chrono::DateTime::<chrono::Utc>::from_timestamp(0, 0).unwrap()
                    });
                Ok(json!(dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()))
            } else {
                Ok(Value::Null)
            }
        }
        _ => {
            // Fallback: convert to string
            Ok(json!(series
                .get(idx)
                .map(|v| v.to_string())
                .unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::types::{Channel, ChartObject, LayerSpec, Mark, SortOrder, Stack};

    fn date_series(name: &str, millis: &[i64]) -> Column {
        Series::new(name.into(), millis.to_vec())
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap()
            .into()
    }

    #[test]
    fn test_single_layer_bar_spec() {
        let df = DataFrame::new(vec![
            date_series("day", &[0, 86_400_000]),
            Series::new("sales".into(), [10i64, 20]).into(),
        ])
        .unwrap();

        let chart = ChartObject::single(
            "Bar Chart by Date",
            LayerSpec::new(Mark::Bar)
                .with_x(Channel::temporal("day").with_sort(SortOrder::Ascending))
                .with_y(Channel::quantitative("sales"))
                .with_tooltip(&["day", "sales"]),
        );
        let vl = chart.to_vega_lite(&df).unwrap();

        assert_eq!(vl["mark"]["type"], "bar");
        assert_eq!(vl["encoding"]["x"]["type"], "temporal");
        assert_eq!(vl["encoding"]["x"]["sort"], "ascending");
        assert_eq!(vl["encoding"]["y"]["type"], "quantitative");
        assert_eq!(vl["title"], "Bar Chart by Date");

        // Temporal values are ISO strings
        let data_values = vl["data"]["values"].as_array().unwrap();
        assert!(data_values[0]["day"].as_str().unwrap().starts_with("1970-01-01"));
        assert_eq!(data_values[0]["sales"], 10);
    }

    #[test]
    fn test_layered_spec_resolves_y_independent() {
        let df = DataFrame::new(vec![
            date_series("day", &[0]),
            Series::new("a".into(), [1i64]).into(),
            Series::new("b".into(), [2i64]).into(),
        ])
        .unwrap();

        let chart = ChartObject::layered(
            "Dual Axis Line Chart",
            vec![
                LayerSpec::new(Mark::Line)
                    .with_mark_color("blue")
                    .with_x(Channel::temporal("day").with_sort(SortOrder::Ascending))
                    .with_y(Channel::quantitative("a").with_title("a")),
                LayerSpec::new(Mark::Line)
                    .with_mark_color("red")
                    .with_x(Channel::temporal("day").with_sort(SortOrder::Ascending))
                    .with_y(Channel::quantitative("b").with_title("b")),
            ],
            true,
        );
        let vl = chart.to_vega_lite(&df).unwrap();

        let layers = vl["layer"].as_array().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0]["mark"]["color"], "blue");
        assert_eq!(layers[1]["mark"]["color"], "red");
        assert_eq!(layers[0]["encoding"]["y"]["axis"]["title"], "a");
        assert_eq!(vl["resolve"]["scale"]["y"], "independent");
    }

    #[test]
    fn test_stack_sort_and_shape_range() {
        let df = df!(
            "cat" => ["a", "b"],
            "grp" => ["x", "y"],
            "v" => [1i64, 2],
        )
        .unwrap();

        let chart = ChartObject::single(
            "Bar Chart with Selectable X-Axis and Color",
            LayerSpec::new(Mark::Bar)
                .with_x(Channel::nominal("cat").with_sort(SortOrder::DescendingByY))
                .with_y(Channel::quantitative("v").with_stack(Stack::Zero))
                .with_shape(
                    Channel::nominal("grp").with_scale_range(&crate::chart::SHAPE_PALETTE),
                ),
        );
        let vl = chart.to_vega_lite(&df).unwrap();

        assert_eq!(vl["encoding"]["x"]["sort"], "-y");
        assert_eq!(vl["encoding"]["y"]["stack"], "zero");
        let range = vl["encoding"]["shape"]["scale"]["range"].as_array().unwrap();
        assert_eq!(range.len(), 11);
        assert_eq!(range[0], "circle");
    }

    #[test]
    fn test_null_values_serialize_as_null() {
        let df = df!(
            "cat" => [Some("a"), None],
            "v" => [Some(1i64), None],
        )
        .unwrap();
        let values = dataframe_to_values(&df).unwrap();
        assert_eq!(values[1]["cat"], Value::Null);
        assert_eq!(values[1]["v"], Value::Null);
    }

    #[test]
    fn test_tooltip_fields_cover_bound_columns() {
        let df = df!("a" => [1i64], "b" => [2i64], "t" => ["x"]).unwrap();
        let chart = ChartObject::single(
            "Scatter Chart",
            LayerSpec::new(Mark::Circle)
                .with_size(100.0)
                .with_x(Channel::quantitative("a"))
                .with_y(Channel::quantitative("b"))
                .with_color(Channel::nominal("t"))
                .with_tooltip(&["t", "a", "b"]),
        );
        let vl = chart.to_vega_lite(&df).unwrap();
        let tooltip = vl["encoding"]["tooltip"].as_array().unwrap();
        assert_eq!(tooltip.len(), 3);
        assert_eq!(tooltip[0]["field"], "t");
        assert_eq!(vl["mark"]["size"], 100.0);
    }

    #[test]
    fn test_empty_chart_is_render_error() {
        let df = df!("a" => [1i64]).unwrap();
        let chart = ChartObject {
            label: "broken".to_string(),
            layers: vec![],
            independent_y: false,
        };
        assert!(chart.to_vega_lite(&df).is_err());
    }
}
