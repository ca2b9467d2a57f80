//! Tracker JIRA Integration
//!
//! Client library for fetching issues from the JIRA REST API.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::JiraAuth;
pub use client::JiraClient;
pub use error::{Error, Result};
