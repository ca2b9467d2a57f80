//! Custom field catalog records

use serde::{Deserialize, Serialize};

/// One entry of the site's custom field catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueTypeField {
    pub name: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<FieldSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSchema {
    pub datatype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
}

impl IssueTypeField {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            schema: None,
        }
    }

    /// Numeric suffix of the key, e.g. `"10020"` for `customfield_10020`
    pub fn id(&self) -> Option<&str> {
        self.key.strip_prefix("customfield_")
    }
}
