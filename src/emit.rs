//! Chart source code regeneration
//!
//! Turns a [`ChartSpec`] back into standalone, human-readable Rust source:
//! a self-contained `create_chart` function over this crate's public API
//! that rebuilds the same chart object the live builder constructs, with
//! every column name interpolated as a literal. Interactive archetypes
//! embed their selector init/reset logic; the KPI archetype embeds the
//! tile loop and magnitude formatting. A missing or unusable spec emits a
//! function that returns a descriptive no-chart outcome.
//!
//! The output exists so a chart discovered interactively can be persisted
//! or transplanted into another host as ordinary declarative code.

use std::fmt::Write;

use crate::chart::{ArchetypeKind, ChartSpec};
use crate::VERSION;

/// Render the spec as a standalone chart function.
///
/// `None` (or a spec whose required bindings are empty) produces an
/// error-signalling function body instead.
pub fn emit_source(spec: Option<&ChartSpec>) -> String {
    match spec {
        None => emit_error_fn("No valid chart type found in metadata. Please provide chart configuration."),
        Some(spec) => match invalid_reason(spec) {
            Some(reason) => emit_error_fn(&reason),
            None => emit_chart_fn(spec),
        },
    }
}

/// A spec the emitter cannot turn into a working function.
fn invalid_reason(spec: &ChartSpec) -> Option<String> {
    match spec {
        ChartSpec::KpiTiles { numeric_cols, .. } if numeric_cols.is_empty() => Some(format!(
            "Missing required columns for {}",
            ArchetypeKind::KpiTiles.label()
        )),
        ChartSpec::StackedBarSelect { text_cols, .. } if text_cols.is_empty() => Some(format!(
            "Missing required columns for {}",
            ArchetypeKind::StackedBarSelect.label()
        )),
        ChartSpec::RankedBar { text_cols, .. } if text_cols.is_empty() => Some(format!(
            "Missing required columns for {}",
            ArchetypeKind::RankedBar.label()
        )),
        _ => None,
    }
}

fn emit_error_fn(message: &str) -> String {
    let mut src = header();
    src.push_str("use autoviz::chart::ChartOutcome;\n");
    src.push_str("use autoviz::DataFrame;\n");
    src.push('\n');
    src.push_str("/// Chart regeneration stub: the result carried no usable chart\n");
    src.push_str("/// specification.\n");
    src.push_str("pub fn create_chart(_df: &DataFrame) -> ChartOutcome {\n");
    let _ = writeln!(src, "    ChartOutcome::no_chart({})", quote(message));
    src.push_str("}\n");
    src
}

fn emit_chart_fn(spec: &ChartSpec) -> String {
    match spec {
        ChartSpec::DateBar {
            date_col,
            numeric_col,
        } => emit_date_bar(date_col, numeric_col),
        ChartSpec::DualLine {
            date_col,
            num_col1,
            num_col2,
        } => emit_dual_line(date_col, num_col1, num_col2),
        ChartSpec::StackedBar {
            date_col,
            text_col,
            numeric_col,
        } => emit_stacked_bar(date_col, text_col, numeric_col),
        ChartSpec::StackedBarSelect {
            date_col,
            text_cols,
            numeric_col,
        } => emit_stacked_bar_select(date_col, text_cols, numeric_col),
        ChartSpec::Scatter {
            num_col1,
            num_col2,
            text_col,
        } => emit_scatter(num_col1, num_col2, text_col),
        ChartSpec::ShapeScatter {
            num_col1,
            num_col2,
            text_col1,
            text_col2,
        } => emit_shape_scatter(num_col1, num_col2, text_col1, text_col2),
        ChartSpec::Bubble {
            num_col1,
            num_col2,
            num_col3,
            text_col,
        } => emit_bubble(num_col1, num_col2, num_col3, text_col),
        ChartSpec::ShapeBubble {
            num_col1,
            num_col2,
            num_col3,
            text_col1,
            text_col2,
        } => emit_shape_bubble(num_col1, num_col2, num_col3, text_col1, text_col2),
        ChartSpec::RankedBar {
            numeric_col,
            text_cols,
            ..
        } => emit_ranked_bar(numeric_col, text_cols),
        ChartSpec::KpiTiles {
            numeric_cols,
            labels,
        } => emit_kpi(numeric_cols, labels),
    }
}

// ============================================================================
// Text building blocks
// ============================================================================

fn header() -> String {
    format!("// Generated by autoviz v{}\n\n", VERSION)
}

/// A Rust string literal for a column name, quotes and escapes included.
fn quote(name: &str) -> String {
    format!("{:?}", name)
}

/// A Rust array literal over column names: `["a", "b"]`.
fn array_literal(cols: &[&str]) -> String {
    let quoted: Vec<String> = cols.iter().map(|c| quote(c)).collect();
    format!("[{}]", quoted.join(", "))
}

/// The required-column guard shared by every generated function.
fn missing_check(src: &mut String, cols: &[&str], label: &str) {
    let _ = writeln!(src, "    for col in {} {{", array_literal(cols));
    src.push_str("        if df.column(col).is_err() {\n");
    src.push_str("            return ChartOutcome::no_chart(format!(\n");
    let _ = writeln!(
        src,
        "                \"Missing required column `{{col}}` for {}\"",
        label
    );
    src.push_str("            ));\n");
    src.push_str("        }\n");
    src.push_str("    }\n\n");
}

fn doc_line(src: &mut String, label: &str) {
    let _ = writeln!(src, "/// {} over this query's result shape.", label);
}

fn plain_fn_open(src: &mut String, label: &str, cols: &[&str]) {
    doc_line(src, label);
    src.push_str("pub fn create_chart(df: &DataFrame) -> ChartOutcome {\n");
    missing_check(src, cols, label);
}

fn plain_fn_close(src: &mut String, label: &str) {
    let _ = writeln!(
        src,
        "    ChartOutcome::Plot(ChartObject::single({}, layer))",
        quote(label)
    );
    src.push_str("}\n");
}

// ============================================================================
// Per-archetype emitters
// ============================================================================

fn emit_date_bar(date_col: &str, numeric_col: &str) -> String {
    let label = ArchetypeKind::DateBar.label();
    let mut src = header();
    src.push_str(
        "use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder};\n",
    );
    src.push_str("use autoviz::DataFrame;\n\n");
    plain_fn_open(&mut src, label, &[date_col, numeric_col]);

    src.push_str("    let layer = LayerSpec::new(Mark::Bar)\n");
    let _ = writeln!(
        src,
        "        .with_x(Channel::temporal({}).with_sort(SortOrder::Ascending))",
        quote(date_col)
    );
    let _ = writeln!(
        src,
        "        .with_y(Channel::quantitative({}))",
        quote(numeric_col)
    );
    let _ = writeln!(
        src,
        "        .with_tooltip(&{});\n",
        array_literal(&[date_col, numeric_col])
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_dual_line(date_col: &str, num_col1: &str, num_col2: &str) -> String {
    let label = ArchetypeKind::DualLine.label();
    let mut src = header();
    src.push_str(
        "use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder};\n",
    );
    src.push_str("use autoviz::DataFrame;\n\n");
    doc_line(&mut src, label);
    src.push_str("pub fn create_chart(df: &DataFrame) -> ChartOutcome {\n");
    missing_check(&mut src, &[date_col, num_col1, num_col2], label);

    for (var, num_col, color) in [("first", num_col1, "blue"), ("second", num_col2, "red")] {
        let _ = writeln!(src, "    let {} = LayerSpec::new(Mark::Line)", var);
        let _ = writeln!(src, "        .with_mark_color({})", quote(color));
        let _ = writeln!(
            src,
            "        .with_x(Channel::temporal({}).with_sort(SortOrder::Ascending))",
            quote(date_col)
        );
        let _ = writeln!(
            src,
            "        .with_y(Channel::quantitative({}).with_title({}))",
            quote(num_col),
            quote(num_col)
        );
        let _ = writeln!(
            src,
            "        .with_tooltip(&{});",
            array_literal(&[date_col, num_col])
        );
    }
    src.push('\n');
    let _ = writeln!(
        src,
        "    ChartOutcome::Plot(ChartObject::layered({}, vec![first, second], true))",
        quote(label)
    );
    src.push_str("}\n");
    src
}

fn emit_stacked_bar(date_col: &str, text_col: &str, numeric_col: &str) -> String {
    let label = ArchetypeKind::StackedBar.label();
    let mut src = header();
    src.push_str("use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder, Stack};\n");
    src.push_str("use autoviz::DataFrame;\n\n");
    plain_fn_open(&mut src, label, &[date_col, text_col, numeric_col]);

    src.push_str("    let layer = LayerSpec::new(Mark::Bar)\n");
    let _ = writeln!(
        src,
        "        .with_x(Channel::temporal({}).with_sort(SortOrder::Ascending))",
        quote(date_col)
    );
    let _ = writeln!(
        src,
        "        .with_y(Channel::quantitative({}).with_stack(Stack::Zero))",
        quote(numeric_col)
    );
    let _ = writeln!(src, "        .with_color(Channel::nominal({}))", quote(text_col));
    let _ = writeln!(
        src,
        "        .with_tooltip(&{});\n",
        array_literal(&[date_col, text_col, numeric_col])
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_stacked_bar_select(date_col: &str, text_cols: &[String], numeric_col: &str) -> String {
    let label = ArchetypeKind::StackedBarSelect.label();
    let text_refs: Vec<&str> = text_cols.iter().map(|s| s.as_str()).collect();
    let mut bound = vec![date_col];
    bound.extend(text_refs.iter().copied());
    bound.push(numeric_col);

    let mut src = header();
    src.push_str("use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder, Stack};\n");
    src.push_str("use autoviz::selector::{self, SelectorStore};\n");
    src.push_str("use autoviz::{naming, DataFrame};\n\n");
    doc_line(&mut src, label);
    src.push_str(
        "pub fn create_chart(df: &DataFrame, selectors: &mut dyn SelectorStore) -> ChartOutcome {\n",
    );
    missing_check(&mut src, &bound, label);

    let _ = writeln!(src, "    let text_cols = {};", array_literal(&text_refs));
    src.push_str("    let fingerprint = naming::table_fingerprint(df);\n");
    let _ = writeln!(
        src,
        "    let key = naming::selector_key({}, naming::COLOR_ROLE, &fingerprint);",
        quote(ArchetypeKind::StackedBarSelect.as_str())
    );
    src.push_str(
        "    let options: Vec<String> = text_cols.iter().map(|c| c.to_string()).collect();\n",
    );
    src.push_str("    let Some(selected) = selector::get_or_init(selectors, &key, &options) else {\n");
    src.push_str("        return ChartOutcome::no_chart(\n");
    let _ = writeln!(
        src,
        "            {},",
        quote(&format!("No categorical columns bound for {}", label))
    );
    src.push_str("        );\n");
    src.push_str("    };\n\n");

    src.push_str("    let layer = LayerSpec::new(Mark::Bar)\n");
    let _ = writeln!(
        src,
        "        .with_x(Channel::temporal({}).with_sort(SortOrder::Ascending))",
        quote(date_col)
    );
    let _ = writeln!(
        src,
        "        .with_y(Channel::quantitative({}).with_stack(Stack::Zero))",
        quote(numeric_col)
    );
    src.push_str(
        "        .with_color(Channel::nominal(selected.as_str()).with_title(selected.as_str()))\n",
    );
    let _ = writeln!(
        src,
        "        .with_tooltip(&[{}, selected.as_str(), {}]);\n",
        quote(date_col),
        quote(numeric_col)
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_scatter(num_col1: &str, num_col2: &str, text_col: &str) -> String {
    let label = ArchetypeKind::Scatter.label();
    let mut src = header();
    src.push_str("use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark};\n");
    src.push_str("use autoviz::DataFrame;\n\n");
    plain_fn_open(&mut src, label, &[num_col1, num_col2, text_col]);

    src.push_str("    let layer = LayerSpec::new(Mark::Circle)\n");
    src.push_str("        .with_size(100.0)\n");
    let _ = writeln!(src, "        .with_x(Channel::quantitative({}))", quote(num_col1));
    let _ = writeln!(src, "        .with_y(Channel::quantitative({}))", quote(num_col2));
    let _ = writeln!(src, "        .with_color(Channel::nominal({}))", quote(text_col));
    let _ = writeln!(
        src,
        "        .with_tooltip(&{});\n",
        array_literal(&[text_col, num_col1, num_col2])
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_shape_scatter(
    num_col1: &str,
    num_col2: &str,
    text_col1: &str,
    text_col2: &str,
) -> String {
    let label = ArchetypeKind::ShapeScatter.label();
    let mut src = header();
    src.push_str("use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SHAPE_PALETTE};\n");
    src.push_str("use autoviz::DataFrame;\n\n");
    plain_fn_open(&mut src, label, &[num_col1, num_col2, text_col1, text_col2]);

    src.push_str("    let layer = LayerSpec::new(Mark::Point)\n");
    src.push_str("        .with_size(100.0)\n");
    let _ = writeln!(src, "        .with_x(Channel::quantitative({}))", quote(num_col1));
    let _ = writeln!(src, "        .with_y(Channel::quantitative({}))", quote(num_col2));
    let _ = writeln!(src, "        .with_color(Channel::nominal({}))", quote(text_col1));
    let _ = writeln!(
        src,
        "        .with_shape(Channel::nominal({}).with_scale_range(&SHAPE_PALETTE))",
        quote(text_col2)
    );
    let _ = writeln!(
        src,
        "        .with_tooltip(&{});\n",
        array_literal(&[text_col1, text_col2, num_col1, num_col2])
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_bubble(num_col1: &str, num_col2: &str, num_col3: &str, text_col: &str) -> String {
    let label = ArchetypeKind::Bubble.label();
    let mut src = header();
    src.push_str("use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark};\n");
    src.push_str("use autoviz::DataFrame;\n\n");
    plain_fn_open(&mut src, label, &[num_col1, num_col2, num_col3, text_col]);

    src.push_str("    let layer = LayerSpec::new(Mark::Circle)\n");
    let _ = writeln!(src, "        .with_x(Channel::quantitative({}))", quote(num_col1));
    let _ = writeln!(src, "        .with_y(Channel::quantitative({}))", quote(num_col2));
    let _ = writeln!(
        src,
        "        .with_size_channel(Channel::quantitative({}))",
        quote(num_col3)
    );
    let _ = writeln!(src, "        .with_color(Channel::nominal({}))", quote(text_col));
    let _ = writeln!(
        src,
        "        .with_tooltip(&{});\n",
        array_literal(&[text_col, num_col1, num_col2, num_col3])
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_shape_bubble(
    num_col1: &str,
    num_col2: &str,
    num_col3: &str,
    text_col1: &str,
    text_col2: &str,
) -> String {
    let label = ArchetypeKind::ShapeBubble.label();
    let mut src = header();
    src.push_str("use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SHAPE_PALETTE};\n");
    src.push_str("use autoviz::DataFrame;\n\n");
    plain_fn_open(
        &mut src,
        label,
        &[num_col1, num_col2, num_col3, text_col1, text_col2],
    );

    src.push_str("    let layer = LayerSpec::new(Mark::Point)\n");
    let _ = writeln!(src, "        .with_x(Channel::quantitative({}))", quote(num_col1));
    let _ = writeln!(src, "        .with_y(Channel::quantitative({}))", quote(num_col2));
    let _ = writeln!(
        src,
        "        .with_size_channel(Channel::quantitative({}))",
        quote(num_col3)
    );
    let _ = writeln!(src, "        .with_color(Channel::nominal({}))", quote(text_col1));
    let _ = writeln!(
        src,
        "        .with_shape(Channel::nominal({}).with_scale_range(&SHAPE_PALETTE))",
        quote(text_col2)
    );
    let _ = writeln!(
        src,
        "        .with_tooltip(&{});\n",
        array_literal(&[text_col1, text_col2, num_col1, num_col2, num_col3])
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_ranked_bar(numeric_col: &str, text_cols: &[String]) -> String {
    let label = ArchetypeKind::RankedBar.label();
    let text_refs: Vec<&str> = text_cols.iter().map(|s| s.as_str()).collect();
    let mut bound = vec![numeric_col];
    bound.extend(text_refs.iter().copied());

    let mut src = header();
    src.push_str("use autoviz::chart::{Channel, ChartObject, ChartOutcome, LayerSpec, Mark, SortOrder, Stack};\n");
    src.push_str("use autoviz::selector::{self, SelectorStore};\n");
    src.push_str("use autoviz::{naming, DataFrame};\n\n");
    doc_line(&mut src, label);
    src.push_str(
        "pub fn create_chart(df: &DataFrame, selectors: &mut dyn SelectorStore) -> ChartOutcome {\n",
    );
    missing_check(&mut src, &bound, label);

    let _ = writeln!(src, "    let text_cols = {};", array_literal(&text_refs));
    src.push_str("    let fingerprint = naming::table_fingerprint(df);\n");
    let _ = writeln!(
        src,
        "    let axis_key = naming::selector_key({}, naming::AXIS_ROLE, &fingerprint);",
        quote(ArchetypeKind::RankedBar.as_str())
    );
    let _ = writeln!(
        src,
        "    let color_key = naming::selector_key({}, naming::COLOR_ROLE, &fingerprint);",
        quote(ArchetypeKind::RankedBar.as_str())
    );
    src.push_str(
        "    let options: Vec<String> = text_cols.iter().map(|c| c.to_string()).collect();\n",
    );
    for (var, key) in [("axis_col", "axis_key"), ("color_col", "color_key")] {
        let _ = writeln!(
            src,
            "    let Some({}) = selector::get_or_init(selectors, &{}, &options) else {{",
            var, key
        );
        src.push_str("        return ChartOutcome::no_chart(\n");
        let _ = writeln!(
            src,
            "            {},",
            quote(&format!("No categorical columns bound for {}", label))
        );
        src.push_str("        );\n");
        src.push_str("    };\n");
    }
    src.push('\n');

    src.push_str("    let layer = LayerSpec::new(Mark::Bar)\n");
    src.push_str(
        "        .with_x(Channel::nominal(axis_col.as_str()).with_sort(SortOrder::DescendingByY))\n",
    );
    let _ = writeln!(
        src,
        "        .with_y(Channel::quantitative({}).with_stack(Stack::Zero))",
        quote(numeric_col)
    );
    src.push_str(
        "        .with_color(Channel::nominal(color_col.as_str()).with_title(color_col.as_str()))\n",
    );
    let _ = writeln!(
        src,
        "        .with_tooltip(&[axis_col.as_str(), color_col.as_str(), {}]);\n",
        quote(numeric_col)
    );
    plain_fn_close(&mut src, label);
    src
}

fn emit_kpi(
    numeric_cols: &[String],
    labels: &std::collections::HashMap<String, String>,
) -> String {
    let label = ArchetypeKind::KpiTiles.label();
    let numeric_refs: Vec<&str> = numeric_cols.iter().map(|s| s.as_str()).collect();

    let mut src = header();
    src.push_str("use autoviz::chart::{ChartOutcome, KpiRecord, RenderMode, TileRenderer};\n");
    src.push_str("use autoviz::DataFrame;\n");
    src.push_str("use polars::prelude::*;\n");
    src.push_str("use std::collections::HashMap;\n\n");
    doc_line(&mut src, label);
    src.push_str("pub fn create_chart(\n");
    src.push_str("    df: &DataFrame,\n");
    src.push_str("    renderer: &mut dyn TileRenderer,\n");
    src.push_str("    mode: RenderMode,\n");
    src.push_str(") -> ChartOutcome {\n");
    src.push_str("    if df.height() != 1 {\n");
    src.push_str("        return ChartOutcome::no_chart(\n");
    src.push_str("            \"KPI tiles are designed for single row results only.\",\n");
    src.push_str("        );\n");
    src.push_str("    }\n\n");
    let _ = writeln!(src, "    let numeric_cols = {};", array_literal(&numeric_refs));
    src.push_str("    for col in numeric_cols {\n");
    src.push_str("        if df.column(col).is_err() {\n");
    src.push_str("            return ChartOutcome::no_chart(format!(\n");
    let _ = writeln!(
        src,
        "                \"Missing required column `{{col}}` for {}\"",
        label
    );
    src.push_str("            ));\n");
    src.push_str("        }\n");
    src.push_str("    }\n\n");

    if labels.is_empty() {
        src.push_str("    let labels: HashMap<String, String> = HashMap::new();\n");
    } else {
        // Keep the generated map stable regardless of hash order
        let mut pairs: Vec<(&String, &String)> = labels.iter().collect();
        pairs.sort();
        src.push_str("    let labels: HashMap<String, String> = HashMap::from([\n");
        for (col, text) in pairs {
            let _ = writeln!(
                src,
                "        ({}.to_string(), {}.to_string()),",
                quote(col),
                quote(text)
            );
        }
        src.push_str("    ]);\n");
    }
    src.push_str("    let record = KpiRecord::new(\n");
    src.push_str("        numeric_cols.iter().map(|c| c.to_string()).collect(),\n");
    src.push_str("        labels.clone(),\n");
    src.push_str("    );\n\n");

    src.push_str("    if mode == RenderMode::Direct {\n");
    src.push_str("        for col in numeric_cols.into_iter().take(record.tile_count) {\n");
    src.push_str("            let value = df\n");
    src.push_str("                .column(col)\n");
    src.push_str("                .ok()\n");
    src.push_str(
        "                .and_then(|c| c.as_materialized_series().cast(&DataType::Float64).ok())\n",
    );
    src.push_str("                .and_then(|s| s.f64().ok().and_then(|ca| ca.get(0)));\n");
    src.push_str("            let formatted = match value {\n");
    src.push_str(
        "                Some(v) if v.abs() >= 1_000_000.0 => format!(\"{:.1}M\", v / 1_000_000.0),\n",
    );
    src.push_str(
        "                Some(v) if v.abs() >= 1_000.0 => format!(\"{:.1}K\", v / 1_000.0),\n",
    );
    src.push_str("                Some(v) => format!(\"{:.1}\", v),\n");
    src.push_str("                None => \"n/a\".to_string(),\n");
    src.push_str("            };\n");
    src.push_str("            let tile_label = labels.get(col).map(|s| s.as_str()).unwrap_or(col);\n");
    src.push_str("            renderer.tile(tile_label, &formatted);\n");
    src.push_str("        }\n");
    src.push_str("    }\n\n");
    src.push_str("    ChartOutcome::Kpi(record)\n");
    src.push_str("}\n");
    src
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn all_specs() -> Vec<ChartSpec> {
        vec![
            ChartSpec::DateBar {
                date_col: "day".into(),
                numeric_col: "sales".into(),
            },
            ChartSpec::DualLine {
                date_col: "day".into(),
                num_col1: "revenue".into(),
                num_col2: "orders".into(),
            },
            ChartSpec::StackedBar {
                date_col: "day".into(),
                text_col: "region".into(),
                numeric_col: "sales".into(),
            },
            ChartSpec::StackedBarSelect {
                date_col: "day".into(),
                text_cols: vec!["region".into(), "segment".into()],
                numeric_col: "sales".into(),
            },
            ChartSpec::Scatter {
                num_col1: "x".into(),
                num_col2: "y".into(),
                text_col: "grp".into(),
            },
            ChartSpec::ShapeScatter {
                num_col1: "x".into(),
                num_col2: "y".into(),
                text_col1: "grp".into(),
                text_col2: "cls".into(),
            },
            ChartSpec::Bubble {
                num_col1: "x".into(),
                num_col2: "y".into(),
                num_col3: "w".into(),
                text_col: "grp".into(),
            },
            ChartSpec::ShapeBubble {
                num_col1: "x".into(),
                num_col2: "y".into(),
                num_col3: "w".into(),
                text_col1: "grp".into(),
                text_col2: "cls".into(),
            },
            ChartSpec::RankedBar {
                numeric_col: "sales".into(),
                text_cols: vec!["country".into(), "channel".into()],
                stacked: true,
            },
            ChartSpec::KpiTiles {
                numeric_cols: vec!["revenue".into(), "orders".into()],
                labels: HashMap::new(),
            },
        ]
    }

    #[test]
    fn test_every_archetype_emits_a_complete_function() {
        for spec in all_specs() {
            let src = emit_source(Some(&spec));
            assert!(
                src.contains("pub fn create_chart("),
                "{}: no function",
                spec.kind()
            );
            assert!(src.contains("ChartOutcome"), "{}: no outcome type", spec.kind());
            // Every bound column appears as a literal
            for col in spec.bound_columns() {
                assert!(
                    src.contains(&format!("{:?}", col)),
                    "{}: column {} not interpolated",
                    spec.kind(),
                    col
                );
            }
        }
    }

    #[test]
    fn test_emission_is_deterministic() {
        for spec in all_specs() {
            assert_eq!(emit_source(Some(&spec)), emit_source(Some(&spec)));
        }
    }

    #[test]
    fn test_date_bar_source_mirrors_builder_encoding() {
        let spec = ChartSpec::DateBar {
            date_col: "day".into(),
            numeric_col: "sales".into(),
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains(r#"Channel::temporal("day").with_sort(SortOrder::Ascending)"#));
        assert!(src.contains(r#"Channel::quantitative("sales")"#));
        assert!(src.contains(r#".with_tooltip(&["day", "sales"])"#));
        assert!(src.contains(r#"ChartObject::single("Bar Chart by Date", layer)"#));
    }

    #[test]
    fn test_dual_line_source_keeps_fixed_colors_and_layering() {
        let spec = ChartSpec::DualLine {
            date_col: "day".into(),
            num_col1: "revenue".into(),
            num_col2: "orders".into(),
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains(r#".with_mark_color("blue")"#));
        assert!(src.contains(r#".with_mark_color("red")"#));
        assert!(src.contains("vec![first, second], true"));
        assert!(src.contains(r#"Channel::quantitative("revenue").with_title("revenue")"#));
    }

    #[test]
    fn test_stacked_variants_stack_from_zero() {
        let plain = emit_source(Some(&ChartSpec::StackedBar {
            date_col: "day".into(),
            text_col: "region".into(),
            numeric_col: "sales".into(),
        }));
        assert!(plain.contains(r#"Channel::quantitative("sales").with_stack(Stack::Zero)"#));
        assert!(plain.contains(r#".with_color(Channel::nominal("region"))"#));
    }

    #[test]
    fn test_interactive_source_embeds_selector_logic() {
        let spec = ChartSpec::StackedBarSelect {
            date_col: "day".into(),
            text_cols: vec!["region".into(), "segment".into()],
            numeric_col: "sales".into(),
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains("selectors: &mut dyn SelectorStore"));
        assert!(src.contains(r#"let text_cols = ["region", "segment"];"#));
        assert!(src.contains("naming::table_fingerprint(df)"));
        assert!(src.contains(r#"naming::selector_key("stacked_bar_select", naming::COLOR_ROLE"#));
        assert!(src.contains("selector::get_or_init"));
    }

    #[test]
    fn test_ranked_bar_source_has_independent_axis_and_color_keys() {
        let spec = ChartSpec::RankedBar {
            numeric_col: "sales".into(),
            text_cols: vec!["country".into(), "channel".into()],
            stacked: true,
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains("naming::AXIS_ROLE"));
        assert!(src.contains("naming::COLOR_ROLE"));
        assert!(src.contains("SortOrder::DescendingByY"));
        assert!(src.contains("Stack::Zero"));
    }

    #[test]
    fn test_shape_archetypes_reference_palette() {
        let spec = ChartSpec::ShapeScatter {
            num_col1: "x".into(),
            num_col2: "y".into(),
            text_col1: "grp".into(),
            text_col2: "cls".into(),
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains("with_scale_range(&SHAPE_PALETTE)"));
    }

    #[test]
    fn test_kpi_source_embeds_tile_loop_and_formatting() {
        let spec = ChartSpec::KpiTiles {
            numeric_cols: vec!["revenue".into(), "orders".into()],
            labels: HashMap::new(),
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains("mode: RenderMode"));
        assert!(src.contains("df.height() != 1"));
        assert!(src.contains(r#"let numeric_cols = ["revenue", "orders"];"#));
        assert!(src.contains(r#"format!("{:.1}M", v / 1_000_000.0)"#));
        assert!(src.contains(r#"format!("{:.1}K", v / 1_000.0)"#));
        assert!(src.contains("renderer.tile"));
    }

    #[test]
    fn test_kpi_custom_labels_are_interpolated() {
        let mut labels = HashMap::new();
        labels.insert("revenue".to_string(), "Total Revenue".to_string());
        let spec = ChartSpec::KpiTiles {
            numeric_cols: vec!["revenue".into()],
            labels,
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains(r#"("revenue".to_string(), "Total Revenue".to_string())"#));
    }

    #[test]
    fn test_missing_spec_emits_error_body() {
        let src = emit_source(None);
        assert!(src.contains("pub fn create_chart(_df: &DataFrame) -> ChartOutcome"));
        assert!(src.contains("No valid chart type found in metadata"));
        assert!(src.contains("ChartOutcome::no_chart"));
    }

    #[test]
    fn test_empty_bindings_emit_error_body() {
        let spec = ChartSpec::KpiTiles {
            numeric_cols: vec![],
            labels: HashMap::new(),
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains("Missing required columns for KPI Tiles"));
        assert!(!src.contains("KpiRecord::new"));

        let spec = ChartSpec::RankedBar {
            numeric_col: "v".into(),
            text_cols: vec![],
            stacked: false,
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains("Missing required columns for Bar Chart with Selectable"));
    }

    #[test]
    fn test_quoted_literals_escape_special_characters() {
        let spec = ChartSpec::DateBar {
            date_col: "day \"quoted\"".into(),
            numeric_col: "sales".into(),
        };
        let src = emit_source(Some(&spec));
        assert!(src.contains(r#""day \"quoted\"""#));
    }
}
