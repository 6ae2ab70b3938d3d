/*!
# autoviz - Automatic Chart Selection

Deterministic chart selection for tabular query results.

autoviz is the visualization core of a chat-driven analytics front-end:
a natural-language question becomes SQL elsewhere, the SQL becomes a
tabular result, and this crate decides how that result should be drawn.
Given an arbitrary [`DataFrame`] it classifies the columns, walks a
priority-ordered rule table to pick one of ten chart archetypes, and
produces both a renderable declarative chart object and standalone source
code that regenerates the same chart outside the live session.

## Example

```rust,ignore
use autoviz::{choose_chart, BuildContext, MemorySelectorStore, ResultTable, RuleConfig};

let mut table = ResultTable::new(df);
let config = RuleConfig::default();

if let Some(spec) = choose_chart(&mut table, &config) {
    let mut selectors = MemorySelectorStore::new();
    let mut ctx = BuildContext::new(&mut selectors);
    let outcome = spec.build(&table, &mut ctx);
    // outcome is a ChartObject, a KPI record, or an explicit "no chart"
}
```

## Architecture

The pipeline is classify → select → build | emit:
- **classify** partitions columns into temporal / numeric / categorical,
  recovering string-encoded date columns along the way
- **select** dispatches on the column-count signature through an ordered
  decision list (plus a configurable override allow-list) to a
  [`ChartSpec`]
- **build** turns a spec into a declarative [`ChartObject`] (or a KPI
  tile record), degrading to "no chart" rather than failing
- **emit** renders the spec back out as a self-contained Rust function

## Core Components

- [`classify`] - Column classification and date recovery
- [`engine`] - Rule table and chart selection
- [`chart`] - Chart specifications, builders, and Vega-Lite output
- [`selector`] - Interactive column-selector state
- [`emit`] - Chart source code regeneration
*/

pub mod chart;
pub mod classify;
pub mod emit;
pub mod engine;
pub mod naming;
pub mod selector;
pub mod table;

// Re-export key types for convenience
pub use chart::{BuildContext, ChartObject, ChartOutcome, ChartSpec, KpiRecord, RenderMode};
pub use classify::{classify, Classification};
pub use engine::{choose_chart, RuleConfig};
pub use selector::{MemorySelectorStore, SelectorStore};
pub use table::ResultTable;

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum AutovizError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Chart rendering error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AutovizError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
