/*!
autoviz Command Line Interface

Runs the chart-selection pipeline against a CSV file: suggest an
archetype, render the chosen chart as Vega-Lite JSON, or emit standalone
Rust source that regenerates it.
*/

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use autoviz::chart::{BuildContext, ChartOutcome, TileRenderer};
use autoviz::{choose_chart, emit, MemorySelectorStore, ResultTable, RuleConfig, VERSION};
use polars::prelude::*;

#[derive(Parser)]
#[command(name = "autoviz")]
#[command(about = "Automatic chart selection for tabular query results")]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a chart archetype for a CSV file
    Suggest {
        /// Path to the CSV file
        file: PathBuf,

        /// Rule config JSON (row limit, override allow-list)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Render the chosen chart as Vega-Lite JSON
    Render {
        /// Path to the CSV file
        file: PathBuf,

        /// Rule config JSON (row limit, override allow-list)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Emit standalone Rust source regenerating the chosen chart
    Emit {
        /// Path to the CSV file
        file: PathBuf,

        /// Rule config JSON (row limit, override allow-list)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Prints KPI tiles as `label: value` lines.
struct StdoutTiles;

impl TileRenderer for StdoutTiles {
    fn tile(&mut self, label: &str, value: &str) {
        println!("{label}: {value}");
    }
}

fn read_csv(path: &Path) -> anyhow::Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(1000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RuleConfig> {
    match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)?;
            Ok(RuleConfig::from_json(&text)?)
        }
        None => Ok(RuleConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest {
            file,
            config,
            format,
        } => {
            let config = load_config(config.as_deref())?;
            let mut table = ResultTable::new(read_csv(&file)?);
            match choose_chart(&mut table, &config) {
                Some(spec) => match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&spec)?),
                    "pretty" => {
                        println!("Archetype: {} ({})", spec.kind(), spec.label());
                        println!("Bound columns: {}", spec.bound_columns().join(", "));
                    }
                    _ => {
                        eprintln!("Unknown format: {}", format);
                        std::process::exit(1);
                    }
                },
                None => println!("No appropriate chart found for this data."),
            }
        }

        Commands::Render { file, config } => {
            let config = load_config(config.as_deref())?;
            let mut table = ResultTable::new(read_csv(&file)?);
            if choose_chart(&mut table, &config).is_none() {
                println!("No appropriate chart found for this data.");
                return Ok(());
            }

            let mut selectors = MemorySelectorStore::new();
            let mut tiles = StdoutTiles;
            let mut ctx = BuildContext::with_renderer(&mut selectors, &mut tiles);
            match autoviz::engine::build_from_metadata(&table, &mut ctx) {
                ChartOutcome::Plot(chart) => {
                    let vl = chart.to_vega_lite(table.data())?;
                    println!("{}", serde_json::to_string_pretty(&vl)?);
                }
                ChartOutcome::Kpi(record) => {
                    // Tiles already printed by the renderer
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                ChartOutcome::NoChart { reason } => {
                    println!(
                        "{}",
                        reason.unwrap_or_else(|| {
                            "No appropriate chart found for this data.".to_string()
                        })
                    );
                }
            }
        }

        Commands::Emit { file, config } => {
            let config = load_config(config.as_deref())?;
            let mut table = ResultTable::new(read_csv(&file)?);
            choose_chart(&mut table, &config);
            println!("{}", emit::emit_source(table.chart_metadata()));
        }
    }

    Ok(())
}
