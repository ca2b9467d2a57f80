pub mod config;
pub mod field;
pub mod issue;

pub use config::{AuthType, Config, Installation, IssueConfig, ProjectConfig};
pub use field::{FieldSchema, IssueTypeField};
pub use issue::{
    body_text, resolve_issue_key, Comment, CommentList, CustomFields, Fields, Issue, Named, User,
};
