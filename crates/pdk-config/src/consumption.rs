//! Unused-key guard.
//!
//! Serde silently ignores keys that no struct field reads, so a typo such as
//! `demo.step_dealy_ms` would otherwise fall back to the default without a
//! word. Consumers decide whether leftovers are a warning or a hard failure.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{collect_leaf_pointers, sorted_unique};

/// JSON-pointer prefixes read by [`crate::DeskConfig`]. Keep in sync with its fields.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/currency/symbol",
    "/currency/decimals",
    "/currency/group_separator",
    "/fare/affirmative",
    "/demo/step_delay_ms",
    "/demo/buy_threshold",
    "/demo/sell_threshold",
    "/logging/filter",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Leaf pointers not covered by any consumed prefix (sorted, unique).
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// With `Fail`, returns an error when any unused leaf exists; `Warn` always returns the report.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    // An empty config collapses to the single root leaf "/".
    let unused = leaves
        .into_iter()
        .filter(|lp| lp != "/")
        .filter(|lp| !CONSUMED_POINTERS.iter().any(|cp| is_prefix_pointer(cp, lp)));

    let report = UnusedKeyReport {
        unused_leaf_pointers: sorted_unique(unused),
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. First few: {:?}",
            report.unused_leaf_pointers.len(),
            report.unused_leaf_pointers.iter().take(12).collect::<Vec<_>>()
        );
    }

    Ok(report)
}

/// "/a/b" consumes "/a/b" and "/a/b/c" but not "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}
