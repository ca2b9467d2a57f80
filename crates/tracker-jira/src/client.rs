//! JIRA REST client

use crate::{Error, JiraAuth, Result};
use reqwest::{header, StatusCode};
use tracker_core::models::{AuthType, Config, Installation, Issue};
use tracker_core::populate_custom_fields;

pub struct JiraClient {
    http: reqwest::Client,
    server: String,
    installation: Installation,
    auth: JiraAuth,
}

impl JiraClient {
    pub fn new(server: impl Into<String>, installation: Installation, auth: JiraAuth) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            server: server.into().trim_end_matches('/').to_string(),
            installation,
            auth,
        })
    }

    /// Build a client from the site configuration, resolving the API token
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = JiraAuth::token_for(&config.login)?;
        let auth = match config.auth_type {
            AuthType::Basic => JiraAuth::basic(config.login.clone(), token),
            AuthType::Bearer => JiraAuth::bearer(token),
        };
        Self::new(config.server.clone(), config.installation, auth)
    }

    pub fn issue_url(&self, key: &str) -> String {
        format!(
            "{}/rest/api/{}/issue/{}",
            self.server,
            self.installation.api_version(),
            key
        )
    }

    async fn fetch_issue_bytes(&self, key: &str) -> Result<Vec<u8>> {
        let url = self.issue_url(key);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!("Response {} ({} bytes)", status, body.len());

        check_status(status, &body, key)?;
        Ok(body.to_vec())
    }

    /// Fetch the issue and return the response body untouched
    pub async fn get_issue_raw(&self, key: &str) -> Result<String> {
        let body = self.fetch_issue_bytes(key).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Fetch and decode an issue.
    ///
    /// Custom fields are only extracted when `fetch_custom_fields` is set;
    /// comments are trimmed to the `num_comments` most recent.
    pub async fn get_issue(
        &self,
        key: &str,
        fetch_custom_fields: bool,
        num_comments: usize,
    ) -> Result<Issue> {
        let body = self.fetch_issue_bytes(key).await?;
        decode_issue(key, &body, fetch_custom_fields, num_comments)
    }
}

pub(crate) fn decode_issue(
    key: &str,
    body: &[u8],
    fetch_custom_fields: bool,
    num_comments: usize,
) -> Result<Issue> {
    // Structural payload errors are reported by the extractor
    let custom_fields = if fetch_custom_fields {
        let mut scratch = Issue::new(key);
        populate_custom_fields(body, &mut scratch)?;
        Some(scratch.fields.custom_fields)
    } else {
        None
    };

    let mut issue: Issue = serde_json::from_slice(body)?;
    if let Some(custom_fields) = custom_fields {
        tracing::debug!(
            "Extracted {} custom fields for {}",
            custom_fields.len(),
            issue.key
        );
        issue.fields.custom_fields = custom_fields;
    }
    issue.retain_recent_comments(num_comments);
    Ok(issue)
}

fn check_status(status: StatusCode, body: &[u8], key: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::NOT_FOUND => Err(Error::NotFound(format!("Issue {}", key))),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Auth(format!(
            "Server rejected credentials ({})",
            status
        ))),
        _ => Err(Error::Api(format!(
            "{}: {}",
            status,
            String::from_utf8_lossy(body).trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::ExtractError;

    fn client(server: &str, installation: Installation) -> JiraClient {
        JiraClient::new(server, installation, JiraAuth::bearer("t")).unwrap()
    }

    #[test]
    fn test_issue_url() {
        let cloud = client("https://example.atlassian.net/", Installation::Cloud);
        assert_eq!(
            cloud.issue_url("PROJ-1"),
            "https://example.atlassian.net/rest/api/3/issue/PROJ-1"
        );

        let local = client("http://jira.local", Installation::Local);
        assert_eq!(
            local.issue_url("PROJ-1"),
            "http://jira.local/rest/api/2/issue/PROJ-1"
        );
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK, b"", "PROJ-1").is_ok());
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, b"", "PROJ-1"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED, b"", "PROJ-1"),
            Err(Error::Auth(_))
        ));

        let err = check_status(StatusCode::BAD_GATEWAY, b" upstream down \n", "PROJ-1").unwrap_err();
        assert_eq!(err.to_string(), "JIRA API error: 502 Bad Gateway: upstream down");
    }

    #[test]
    fn test_decode_issue_without_custom_fields() {
        let body = br#"{"key": "PROJ-1", "fields": {"summary": "s", "customfield_1": "x"}}"#;
        let issue = decode_issue("PROJ-1", body, false, 1).unwrap();
        assert!(issue.fields.custom_fields.is_empty());

        let issue = decode_issue("PROJ-1", body, true, 1).unwrap();
        assert_eq!(issue.custom_field("customfield_1"), Some("x"));
    }

    #[test]
    fn test_decode_issue_structural_errors() {
        let err = decode_issue("PROJ-1", br#"{"key": "PROJ-1", "fields": "x"}"#, true, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::Extract(ExtractError::MissingFieldsSection { ref key }) if key == "PROJ-1"
        ));

        let err = decode_issue("PROJ-1", br#"{"key": "PROJ-1"}"#, true, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::Extract(ExtractError::MissingFieldsSection { .. })
        ));

        let err = decode_issue("PROJ-1", b"<html>", true, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::Extract(ExtractError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_decode_issue_without_fields_skipping_custom() {
        let err = decode_issue("PROJ-1", br#"{"key": "PROJ-1"}"#, false, 1).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
