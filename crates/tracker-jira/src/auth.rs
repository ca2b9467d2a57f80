//! JIRA authentication

use crate::{Error, Result};
use base64::Engine;

pub const TOKEN_ENV_VAR: &str = "JIRA_API_TOKEN";
const KEYRING_SERVICE: &str = "tracker";

#[derive(Clone)]
pub enum JiraAuth {
    Basic { username: String, api_token: String },
    Bearer { token: String },
}

impl JiraAuth {
    pub fn basic(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            api_token: api_token.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        match self {
            JiraAuth::Basic {
                username,
                api_token,
            } => {
                let credentials = format!("{}:{}", username, api_token);
                format!(
                    "Basic {}",
                    base64::engine::general_purpose::STANDARD.encode(credentials)
                )
            }
            JiraAuth::Bearer { token } => format!("Bearer {}", token),
        }
    }

    /// Look up the API token: `JIRA_API_TOKEN` first, then the OS keyring.
    pub fn token_for(login: &str) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                return Ok(token);
            }
        }

        let entry = keyring::Entry::new(KEYRING_SERVICE, login)?;
        token_from_entry(&entry, login)
    }
}

fn token_from_entry(entry: &keyring::Entry, login: &str) -> Result<String> {
    match entry.get_password() {
        Ok(token) => Ok(token),
        Err(keyring::Error::NoEntry) => Err(Error::Auth(format!(
            "No API token found. Set {} or store one in the keyring for '{}'",
            TOKEN_ENV_VAR, login
        ))),
        Err(e) => Err(e.into()),
    }
}

impl std::fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JiraAuth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            JiraAuth::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyring::credential::CredentialBuilderApi;
    use serial_test::serial;

    #[test]
    fn test_basic_header() {
        let auth = JiraAuth::basic("me@example.com", "secret");
        assert_eq!(auth.header_value(), "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0");
    }

    #[test]
    fn test_bearer_header() {
        let auth = JiraAuth::bearer("pat-123");
        assert_eq!(auth.header_value(), "Bearer pat-123");
    }

    #[test]
    fn test_debug_hides_secret() {
        let auth = JiraAuth::basic("me", "secret");
        let debug = format!("{:?}", auth);
        assert!(debug.contains("me"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    #[serial]
    fn test_token_from_env() {
        std::env::set_var(TOKEN_ENV_VAR, "from-env");
        let token = JiraAuth::token_for("me@example.com");
        std::env::remove_var(TOKEN_ENV_VAR);
        assert_eq!(token.unwrap(), "from-env");
    }

    fn mock_entry(login: &str) -> keyring::Entry {
        let credential = keyring::mock::default_credential_builder()
            .build(None, KEYRING_SERVICE, login)
            .unwrap();
        keyring::Entry::new_with_credential(credential)
    }

    #[test]
    fn test_token_from_keyring_entry() {
        let entry = mock_entry("me@example.com");
        entry.set_password("stored-token").unwrap();

        let token = token_from_entry(&entry, "me@example.com").unwrap();
        assert_eq!(token, "stored-token");
    }

    #[test]
    fn test_token_missing_from_keyring() {
        let entry = mock_entry("me@example.com");
        let err = token_from_entry(&entry, "me@example.com").unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }
}
