//! Site configuration

use crate::models::IssueTypeField;
use crate::{custom_fields::is_custom_field_key, Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub server: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub installation: Installation,
    #[serde(default)]
    pub auth_type: AuthType,
    #[serde(default)]
    pub project: Option<ProjectConfig>,
    #[serde(default)]
    pub issue: IssueConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Installation {
    #[default]
    Cloud,
    Local,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Basic,
    Bearer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    pub key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueConfig {
    #[serde(default)]
    pub fields: IssueFieldsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueFieldsConfig {
    #[serde(default)]
    pub custom: Vec<IssueTypeField>,
}

impl Config {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            login: String::new(),
            installation: Installation::default(),
            auth_type: AuthType::default(),
            project: None,
            issue: IssueConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.server.starts_with("http://") && !self.server.starts_with("https://") {
            return Err(Error::Validation(
                "Server must start with http:// or https://".to_string(),
            ));
        }

        if self.auth_type == AuthType::Basic && self.login.trim().is_empty() {
            return Err(Error::Validation(
                "Login cannot be empty with basic auth".to_string(),
            ));
        }

        if let Some(ref project) = self.project {
            if project.key.trim().is_empty() {
                return Err(Error::Validation("Project key cannot be empty".to_string()));
            }
        }

        for field in &self.issue.fields.custom {
            if !is_custom_field_key(&field.key) {
                return Err(Error::Validation(format!(
                    "Invalid custom field key '{}'. Expected customfield_<number>",
                    field.key
                )));
            }
        }

        Ok(())
    }

    pub fn project_key(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.key.as_str())
    }

    /// The site's custom field catalog
    pub fn configured_custom_fields(&self) -> Result<Vec<IssueTypeField>> {
        if self.issue.fields.custom.is_empty() {
            return Err(Error::NotFound(
                "No custom fields configured for this site".to_string(),
            ));
        }
        Ok(self.issue.fields.custom.clone())
    }
}

impl Installation {
    /// REST API version served by this kind of installation
    pub fn api_version(&self) -> u8 {
        match self {
            Installation::Cloud => 3,
            Installation::Local => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_config() -> Config {
        Config {
            login: "me@example.com".to_string(),
            ..Config::new("https://example.atlassian.net")
        }
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: Config =
            serde_json::from_str(r#"{"server": "https://jira.local", "login": "me"}"#).unwrap();
        assert_eq!(config.installation, Installation::Cloud);
        assert_eq!(config.auth_type, AuthType::Basic);
        assert!(config.project_key().is_none());
        assert!(config.issue.fields.custom.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_custom_fields() {
        let config: Config = serde_json::from_str(
            r#"{
                "server": "https://jira.local",
                "login": "me",
                "installation": "local",
                "auth_type": "bearer",
                "project": {"key": "PROJ"},
                "issue": {"fields": {"custom": [
                    {"name": "Epic", "key": "customfield_10", "schema": {"datatype": "string"}},
                    {"name": "Sprint", "key": "customfield_20", "schema": {"datatype": "array", "items": "json"}}
                ]}}
            }"#,
        )
        .unwrap();

        assert_eq!(config.installation.api_version(), 2);
        assert_eq!(config.auth_type, AuthType::Bearer);
        assert_eq!(config.project_key(), Some("PROJ"));

        let fields = config.configured_custom_fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].schema.as_ref().unwrap().items.as_deref(), Some("json"));
    }

    #[test]
    fn test_validation() {
        assert!(basic_config().validate().is_ok());

        let config = Config {
            server: "example.atlassian.net".to_string(),
            ..basic_config()
        };
        assert!(config.validate().is_err());

        let config = Config {
            login: "".to_string(),
            ..basic_config()
        };
        assert!(config.validate().is_err());

        let config = Config {
            auth_type: AuthType::Bearer,
            login: "".to_string(),
            ..basic_config()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_custom_key() {
        let mut config = basic_config();
        config
            .issue
            .fields
            .custom
            .push(IssueTypeField::new("summary", "Summary"));
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_no_custom_fields_configured() {
        let config = basic_config();
        assert!(matches!(
            config.configured_custom_fields(),
            Err(Error::NotFound(_))
        ));
    }
}
