//! @acp:module "Records"
//! @acp:summary "Filtering and summary statistics over in-memory record lists"
//! @acp:domain records
//! @acp:layer service
//!
//! Dashboard data (students, fees, assignments, audits) is loaded as plain
//! JSON objects. Nothing is indexed or cached: every query refilters the
//! full list, so the same input and filters always give the same answer.

pub mod filter;
pub mod stats;

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

pub use filter::{filter_records, Filter, MatchMode};
pub use stats::{average, count_by, percentage, sum, FieldTotal, GroupCount, Summary};

use crate::error::{DeskError, Result};

/// Query over a record list
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    pub filters: Vec<Filter>,
    /// Numeric field to total over the matches
    pub sum_field: Option<String>,
    /// Field to group the matches by
    pub group_field: Option<String>,
}

impl RecordQuery {
    /// Filter and summarise
    pub fn run<'a>(&self, records: &'a [Value]) -> (Vec<&'a Value>, Summary) {
        let matched = filter_records(records, &self.filters);

        let sum = self.sum_field.as_ref().map(|field| FieldTotal {
            field: field.clone(),
            sum: stats::sum(matched.iter().copied(), field),
            average: stats::average(matched.iter().copied(), field),
        });

        let groups = self
            .group_field
            .as_ref()
            .map(|field| count_by(matched.iter().copied(), field))
            .unwrap_or_default();

        let summary = Summary {
            total: records.len(),
            matched: matched.len(),
            matched_percentage: percentage(matched.len(), records.len()),
            sum,
            groups,
        };

        (matched, summary)
    }
}

/// Load records from JSON or YAML files. Each file holds either a list of
/// objects or a single object.
pub fn load_records(paths: &[PathBuf]) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    for path in paths {
        let loaded = load_file(path)?;
        debug!("Loaded {} records from {}", loaded.len(), path.display());
        records.extend(loaded);
    }
    Ok(records)
}

fn load_file(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => return Err(DeskError::UnsupportedRecords(path.to_path_buf())),
    };

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        _ => Err(DeskError::UnsupportedRecords(path.to_path_buf())),
    }
}

/// Expand glob patterns into concrete files, keeping plain paths as given
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(pattern));
            continue;
        }
        let mut matched: Vec<PathBuf> = glob::glob(pattern)?.filter_map(|p| p.ok()).collect();
        matched.sort();
        paths.extend(matched);
    }
    Ok(paths)
}
