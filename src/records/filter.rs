//! @acp:module "Record Filters"
//! @acp:summary "Case-insensitive field predicates over record lists"
//! @acp:domain records
//! @acp:layer logic

use serde_json::Value;

/// How a filter compares the field with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Whole value equal, ignoring case
    Exact,
    /// Value contained in the field, ignoring case
    Contains,
}

/// One field predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
    pub mode: MatchMode,
}

impl Filter {
    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode: MatchMode::Exact,
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode: MatchMode::Contains,
        }
    }

    /// Whether `record` satisfies this filter. Missing fields never match.
    pub fn matches(&self, record: &Value) -> bool {
        let Some(actual) = field_text(record, &self.field) else {
            return false;
        };
        let actual = actual.to_lowercase();
        let wanted = self.value.to_lowercase();
        match self.mode {
            MatchMode::Exact => actual == wanted,
            MatchMode::Contains => actual.contains(&wanted),
        }
    }
}

/// Parses `field=value` (exact) or `field~value` (substring)
impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let exact = s.find('=');
        let contains = s.find('~');
        let (idx, mode) = match (exact, contains) {
            (Some(e), Some(c)) if c < e => (c, MatchMode::Contains),
            (Some(e), _) => (e, MatchMode::Exact),
            (None, Some(c)) => (c, MatchMode::Contains),
            (None, None) => {
                return Err(format!(
                    "Invalid filter '{}'. Use field=value or field~text",
                    s
                ))
            }
        };

        let field = s[..idx].trim();
        if field.is_empty() {
            return Err(format!("Missing field name in filter '{}'", s));
        }
        Ok(Filter {
            field: field.to_string(),
            value: s[idx + 1..].trim().to_string(),
            mode,
        })
    }
}

/// Look up a field, allowing dotted paths such as `guardian.name`
pub fn field_value<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    field
        .split('.')
        .try_fold(record, |current, key| current.as_object()?.get(key))
}

/// Field rendered as text; scalars only
pub fn field_text(record: &Value, field: &str) -> Option<String> {
    match field_value(record, field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Records matching every filter, in their original order
pub fn filter_records<'a>(records: &'a [Value], filters: &[Filter]) -> Vec<&'a Value> {
    records
        .iter()
        .filter(|record| filters.iter().all(|f| f.matches(record)))
        .collect()
}
