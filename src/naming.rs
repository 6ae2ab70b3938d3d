//! Centralized naming conventions for autoviz-generated identifiers.
//!
//! All synthetic keys use the double-underscore prefix/suffix pattern to
//! avoid collision with user-defined names.
//!
//! # Categories
//!
//! - **Selector keys**: Keys scoping interactive column selections to one
//!   table shape (`__autoviz_select_<archetype>_<role>_<fingerprint>__`)
//! - **Fingerprints**: Stable per-table hashes derived from shape and
//!   column names

use const_format::concatcp;
use polars::prelude::DataFrame;
use std::hash::{DefaultHasher, Hash, Hasher};

// ============================================================================
// Base Building Blocks
// ============================================================================

/// Base prefix for all autoviz identifiers
const AUTOVIZ_PREFIX: &str = "__autoviz_";

/// Suffix for all autoviz identifiers (double underscore)
const AUTOVIZ_SUFFIX: &str = "__";

/// Full prefix for selector keys: `__autoviz_select_`
const SELECT_PREFIX: &str = concatcp!(AUTOVIZ_PREFIX, "select_");

// ============================================================================
// Selector Roles
// ============================================================================

/// Selector role for the interactive x-axis column choice
pub const AXIS_ROLE: &str = "axis";

/// Selector role for the interactive color column choice
pub const COLOR_ROLE: &str = "color";

// ============================================================================
// Constructor Functions
// ============================================================================

/// Compute a stable fingerprint for a table's shape.
///
/// The fingerprint is derived from the row count, column count, and the
/// column name sequence, so successive results with an identical shape map
/// to the same fingerprint while a reshaped result gets a fresh one. It is
/// stable for the lifetime of the process, which matches the lifetime of
/// the selector state it scopes.
///
/// # Example
/// ```
/// use autoviz::naming;
/// use polars::prelude::*;
///
/// let df = df!("region" => ["north", "south"], "sales" => [1, 2]).unwrap();
/// let fp = naming::table_fingerprint(&df);
/// assert_eq!(fp.len(), 16); // 64-bit hash, hex encoded
/// assert_eq!(fp, naming::table_fingerprint(&df));
/// ```
pub fn table_fingerprint(df: &DataFrame) -> String {
    let mut hasher = DefaultHasher::new();
    df.height().hash(&mut hasher);
    df.width().hash(&mut hasher);
    for name in df.get_column_names() {
        name.as_str().hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}

/// Build the selector-state key for one interactive chart dimension.
///
/// Format: `__autoviz_select_<archetype>_<role>_<fingerprint>__`
///
/// # Example
/// ```
/// use autoviz::naming;
///
/// let key = naming::selector_key("ranked_bar", naming::AXIS_ROLE, "deadbeef");
/// assert_eq!(key, "__autoviz_select_ranked_bar_axis_deadbeef__");
/// ```
pub fn selector_key(archetype: &str, role: &str, fingerprint: &str) -> String {
    format!("{SELECT_PREFIX}{archetype}_{role}_{fingerprint}{AUTOVIZ_SUFFIX}")
}

// ============================================================================
// Tests
// ============================================================================
