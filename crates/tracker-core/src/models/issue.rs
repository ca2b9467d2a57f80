//! Issue data model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Normalized custom field values keyed by `customfield_<n>`
pub type CustomFields = BTreeMap<String, String>;

const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub key: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default, rename = "issuetype")]
    pub issue_type: Option<Named>,
    #[serde(default)]
    pub status: Option<Named>,
    #[serde(default)]
    pub priority: Option<Named>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub comment: Option<CommentList>,
    /// Filled by [`crate::populate_custom_fields`], never by serde
    #[serde(skip_deserializing)]
    pub custom_fields: CustomFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommentList {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub created: Option<String>,
}

impl Issue {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: Fields::default(),
        }
    }

    /// Keep only the `n` most recent comments
    pub fn retain_recent_comments(&mut self, n: usize) {
        if let Some(list) = self.fields.comment.as_mut() {
            let len = list.comments.len();
            if len > n {
                list.comments.drain(..len - n);
            }
        }
    }

    pub fn comments(&self) -> &[Comment] {
        self.fields
            .comment
            .as_ref()
            .map(|c| c.comments.as_slice())
            .unwrap_or_default()
    }

    pub fn custom_field(&self, key: &str) -> Option<&str> {
        self.fields.custom_fields.get(key).map(String::as_str)
    }
}

impl Fields {
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created.as_deref().and_then(parse_timestamp)
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated.as_deref().and_then(parse_timestamp)
    }
}

impl Comment {
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created.as_deref().and_then(parse_timestamp)
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s, JIRA_TIMESTAMP_FORMAT).ok()
}

/// Expand a bare issue number into a full key using the configured project.
///
/// `"123"` with project `"PROJ"` becomes `"PROJ-123"`. Anything that is not
/// purely numeric is upper-cased. Without a project the input is returned as is.
pub fn resolve_issue_key(project: Option<&str>, input: &str) -> String {
    let project = match project {
        Some(p) if !p.trim().is_empty() => p,
        _ => return input.to_string(),
    };

    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}", project, input)
    } else {
        input.to_uppercase()
    }
}

/// Flatten a description or comment body into plain text.
///
/// REST v2 returns plain strings; v3 returns Atlassian Document Format trees,
/// whose `text` leaves are concatenated with block nodes separated by newlines.
pub fn body_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) => {
            let mut out = String::new();
            collect_text(value, &mut out);
            out.trim_end().to_string()
        }
        _ => String::new(),
    }
}

fn collect_text(node: &Value, out: &mut String) {
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        out.push_str(text);
    }
    if node.get("type").and_then(Value::as_str) == Some("hardBreak") {
        out.push('\n');
    }
    if let Some(children) = node.get("content").and_then(Value::as_array) {
        for child in children {
            collect_text(child, out);
        }
        if matches!(
            node.get("type").and_then(Value::as_str),
            Some("paragraph" | "heading" | "codeBlock" | "listItem")
        ) {
            out.push('\n');
        }
    }
}
