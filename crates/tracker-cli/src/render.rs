//! Plain-text issue rendering

use std::fmt::Write;
use tracker_core::models::{body_text, Issue, IssueTypeField};

const SEPARATOR: &str = "------------------------------------------------------------";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Default)]
pub struct IssueOption {
    pub num_comments: usize,
    pub custom_fields: Vec<IssueTypeField>,
}

pub struct IssueView<'a> {
    pub server: String,
    pub issue: &'a Issue,
    pub plain: bool,
    pub options: IssueOption,
}

impl IssueView<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out).expect("write to String");
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        let issue = self.issue;
        let fields = &issue.fields;

        let issue_type = fields.issue_type.as_ref().map_or("Issue", |t| t.name.as_str());
        let status = fields.status.as_ref().map_or("-", |s| s.name.as_str());
        writeln!(out, "{}  [{}] {}", issue.key, issue_type, status)?;
        writeln!(out, "{}", fields.summary)?;
        self.separator(out)?;

        let priority = fields.priority.as_ref().map_or("-", |p| p.name.as_str());
        let assignee = fields
            .assignee
            .as_ref()
            .map_or("Unassigned", |u| u.display_name.as_str());
        let reporter = fields.reporter.as_ref().map_or("-", |u| u.display_name.as_str());
        writeln!(out, "Priority: {}", priority)?;
        writeln!(out, "Assignee: {}", assignee)?;
        writeln!(out, "Reporter: {}", reporter)?;
        if !fields.labels.is_empty() {
            writeln!(out, "Labels: {}", fields.labels.join(", "))?;
        }
        if let Some(created) = fields.created_at() {
            writeln!(out, "Created: {}", created.format(DATE_FORMAT))?;
        }
        if let Some(updated) = fields.updated_at() {
            writeln!(out, "Updated: {}", updated.format(DATE_FORMAT))?;
        }

        for field in &self.options.custom_fields {
            let value = issue.custom_field(&field.key).unwrap_or("-");
            writeln!(out, "{}: {}", field.name, value)?;
        }

        let description = fields.description.as_ref().map(body_text).unwrap_or_default();
        if !description.is_empty() {
            self.separator(out)?;
            writeln!(out, "{}", description)?;
        }

        let comments = issue.comments();
        if self.options.num_comments > 0 && !comments.is_empty() {
            self.separator(out)?;
            let total = fields.comment.as_ref().map_or(0, |c| c.total);
            writeln!(out, "Comments ({} of {})", comments.len(), total)?;
            for comment in comments.iter().rev() {
                let author = comment.author.as_ref().map_or("Unknown", |u| u.display_name.as_str());
                match comment.created_at() {
                    Some(ts) => writeln!(out, "\n{} on {}", author, ts.format(DATE_FORMAT))?,
                    None => writeln!(out, "\n{}", author)?,
                }
                writeln!(out, "{}", body_text(&comment.body))?;
            }
        }

        self.separator(out)?;
        writeln!(out, "{}/browse/{}", self.server, issue.key)
    }

    fn separator(&self, out: &mut String) -> std::fmt::Result {
        if self.plain {
            writeln!(out)
        } else {
            writeln!(out, "{}", SEPARATOR)
        }
    }
}
