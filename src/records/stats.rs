//! @acp:module "Record Statistics"
//! @acp:summary "Counts, percentages and sums for summary cards"
//! @acp:domain records
//! @acp:layer logic

use serde::Serialize;
use serde_json::Value;

use super::filter::{field_text, field_value};

/// Percentage of `part` in `whole`, rounded to two decimals; 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 * 100.0 / whole as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Numeric reading of a field; numeric strings such as `"1,200"` count
pub fn numeric_field(record: &Value, field: &str) -> Option<f64> {
    match field_value(record, field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}

/// Sum of a numeric field, skipping records where it is absent or not numeric
pub fn sum<'a, I>(records: I, field: &str) -> f64
where
    I: IntoIterator<Item = &'a Value>,
{
    records
        .into_iter()
        .filter_map(|r| numeric_field(r, field))
        .sum()
}

/// Mean of a numeric field, `None` when no record carries it
pub fn average<'a, I>(records: I, field: &str) -> Option<f64>
where
    I: IntoIterator<Item = &'a Value>,
{
    let values: Vec<f64> = records
        .into_iter()
        .filter_map(|r| numeric_field(r, field))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(round2(values.iter().sum::<f64>() / values.len() as f64))
    }
}

/// Group size per distinct field value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCount {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Count records per field value, ordered by first appearance.
/// Records without the field are grouped under `"(none)"`.
pub fn count_by<'a, I>(records: I, field: &str) -> Vec<GroupCount>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut groups: Vec<(String, usize)> = Vec::new();
    let mut total = 0;

    for record in records {
        total += 1;
        let key = field_text(record, field).unwrap_or_else(|| "(none)".to_string());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => groups.push((key, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(value, count)| GroupCount {
            value,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Summary shown above a filtered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub matched: usize,
    pub matched_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<FieldTotal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldTotal {
    pub field: String,
    pub sum: f64,
    pub average: Option<f64>,
}
