// SPDX-License-Identifier: PMPL-1.0-or-later
//! JSON exchange format for snapshots and scan results.
//!
//! Field names follow the camelCase data model (`boundsInScreen`,
//! `contentDescription`, `isClickable`, ...). Unset optional fields and
//! default flags are omitted. Results also carry the derived `issueCount`
//! and `errorCount`, which are ignored when reading.

use crate::error::Result;
use crate::model::UiNode;
use crate::result::ScanResult;
use serde_json::Value as Json;
use std::path::Path;

/// Serialize a scan result, including derived counts
pub fn to_json(result: &ScanResult) -> Result<String> {
    let mut value = serde_json::to_value(result)?;
    if let Json::Object(map) = &mut value {
        map.insert("issueCount".to_string(), Json::from(result.issue_count()));
        map.insert("errorCount".to_string(), Json::from(result.error_count()));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Rebuild a scan result from its JSON form
pub fn result_from_json(json: &str) -> Result<ScanResult> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a captured tree
pub fn tree_to_json(root: &UiNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(root)?)
}

/// Rebuild a captured tree from JSON
pub fn tree_from_json(json: &str) -> Result<UiNode> {
    Ok(serde_json::from_str(json)?)
}

/// Read a captured tree from a JSON file
pub fn read_tree(path: &Path) -> Result<UiNode> {
    let content = std::fs::read_to_string(path)?;
    tree_from_json(&content)
}
