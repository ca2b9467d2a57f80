//! Custom field extraction and selection
//!
//! Jira exposes site-defined fields as `customfield_<n>` members whose JSON
//! shape depends on the field type. Extraction flattens each of them into a
//! single string; selection picks the catalog entries a user asked to see.

use crate::models::{CustomFields, Issue, IssueTypeField};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

static CUSTOM_FIELD_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^customfield_[0-9]+$").expect("custom field key regex"));

/// Structural failures while extracting custom fields
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Malformed issue payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Unable to parse fields for {key}")]
    MissingFieldsSection { key: String },
}

pub fn is_custom_field_key(key: &str) -> bool {
    CUSTOM_FIELD_KEY.is_match(key)
}

/// Populate `issue.fields.custom_fields` from the raw issue payload.
///
/// Fields whose value cannot be reduced to a string are left out. The issue
/// is not modified when the payload is invalid JSON or has no `fields` object.
pub fn populate_custom_fields(raw: &[u8], issue: &mut Issue) -> Result<(), ExtractError> {
    let payload: Map<String, Value> = serde_json::from_slice(raw)?;

    let fields = match payload.get("fields") {
        Some(Value::Object(fields)) => fields,
        _ => {
            return Err(ExtractError::MissingFieldsSection {
                key: issue.key.clone(),
            })
        }
    };

    let mut custom_fields = CustomFields::new();
    for (key, value) in fields {
        if !is_custom_field_key(key) {
            continue;
        }
        match resolve_value(value) {
            Some(resolved) => {
                custom_fields.insert(key.clone(), resolved);
            }
            None => tracing::debug!(issue = %issue.key, field = %key, "Skipping custom field"),
        }
    }

    issue.fields.custom_fields = custom_fields;
    Ok(())
}

/// Reduce a custom field value to a string, if its shape allows it.
///
/// For arrays of objects the `value` of the last element that has one wins.
pub fn resolve_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Object(obj) => string_member(obj),
        Value::Array(items) => {
            let mut resolved = None;
            for item in items {
                let Value::Object(obj) = item else {
                    return None;
                };
                if let Some(s) = string_member(obj) {
                    resolved = Some(s);
                }
            }
            resolved
        }
        Value::Null | Value::Bool(_) => None,
    }
}

fn string_member(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("value") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

// serde_json prints integral floats as `42.0`; f64's Display does not.
fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

/// Pick the catalog entries for the requested field ids.
///
/// Each id is the numeric suffix of a `customfield_<n>` key. Output follows
/// request order; within one id, catalog order. Unmatched ids are dropped.
pub fn select_custom_fields<S: AsRef<str>>(
    requested: &[S],
    catalog: &[IssueTypeField],
) -> Vec<IssueTypeField> {
    let mut selected = Vec::new();
    for id in requested {
        let key = format!("customfield_{}", id.as_ref());
        for field in catalog {
            if field.key == key {
                selected.push(field.clone());
            }
        }
    }
    selected
}
