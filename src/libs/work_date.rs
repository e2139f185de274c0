//! Work date resolution.
//!
//! Jira does not record "when work started" directly, so it is inferred from
//! the changelog. Rules are tried in order and the first one that yields a
//! parseable timestamp wins:
//!
//! 1. the earliest transition of the status field to the in-progress status;
//! 2. the earliest reassignment to the issue's current assignee;
//! 3. the creation timestamp.
//!
//! Entries whose timestamp does not parse are skipped. When no rule yields a
//! date the issue simply has none.

use crate::api::jira::{JiraHistory, JiraIssue};
use chrono::{DateTime, FixedOffset};

/// Jira's timestamp layout, e.g. `2025-01-15T10:30:00.000-0300`.
pub const JIRA_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Day and month, e.g. `15/01`.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m";

const STATUS_FIELD: &str = "status";
const ASSIGNEE_FIELD: &str = "assignee";

pub fn parse_jira_time(value: &str) -> Option<DateTime<FixedOffset>> {
    match DateTime::parse_from_str(value, JIRA_TIME_FORMAT) {
        Ok(ts) => Some(ts),
        Err(err) => {
            tracing::warn!(value, %err, "skipping unparseable Jira timestamp");
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkDateResolver {
    in_progress_status: String,
}

impl WorkDateResolver {
    pub fn new(in_progress_status: &str) -> Self {
        Self {
            in_progress_status: in_progress_status.to_string(),
        }
    }

    pub fn resolve(&self, issue: &JiraIssue) -> Option<DateTime<FixedOffset>> {
        self.in_progress_date(issue)
            .or_else(|| assignment_date(issue))
            .or_else(|| created_date(issue))
    }

    /// Resolved date in `DD/MM` form, empty when nothing applies.
    pub fn display_date(&self, issue: &JiraIssue) -> String {
        self.resolve(issue)
            .map(|ts| ts.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    fn in_progress_date(&self, issue: &JiraIssue) -> Option<DateTime<FixedOffset>> {
        earliest(histories(issue).filter(|history| {
            history.items.iter().any(|item| {
                item.field == STATUS_FIELD && item.to_label.as_deref() == Some(self.in_progress_status.as_str())
            })
        }))
    }
}

fn assignment_date(issue: &JiraIssue) -> Option<DateTime<FixedOffset>> {
    let account_id = issue.fields.assignee.as_ref()?.account_id.as_str();
    earliest(histories(issue).filter(|history| {
        history
            .items
            .iter()
            .any(|item| item.field == ASSIGNEE_FIELD && item.to.as_deref() == Some(account_id))
    }))
}

fn created_date(issue: &JiraIssue) -> Option<DateTime<FixedOffset>> {
    parse_jira_time(issue.fields.created.as_deref()?)
}

fn histories(issue: &JiraIssue) -> impl Iterator<Item = &JiraHistory> {
    issue.changelog.iter().flat_map(|changelog| changelog.histories.iter())
}

fn earliest<'a>(histories: impl Iterator<Item = &'a JiraHistory>) -> Option<DateTime<FixedOffset>> {
    histories.filter_map(|history| parse_jira_time(&history.created)).min()
}
