//! Issue repository: where report issues come from.
//!
//! [`IssueRepository`] is the seam the report service depends on. The Jira
//! implementation builds a JQL query for the reporting window, asks for the
//! changelog to be expanded, and maps every raw issue into an [`Issue`] with
//! its resolved work date.

use crate::api::jira::{Jira, JiraConfig, JiraIssue};
use crate::libs::error::ReportError;
use crate::libs::issue::{Issue, IssueCollection};
use crate::libs::work_date::WorkDateResolver;
use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Fields requested for every issue.
pub const SEARCH_FIELDS: [&str; 6] = ["key", "summary", "description", "status", "created", "assignee"];

/// Expansion that adds the change history to each issue.
pub const SEARCH_EXPAND: &str = "changelog";

const JQL_DATE_FORMAT: &str = "%Y-%m-%d";

#[allow(async_fn_in_trait)]
pub trait IssueRepository {
    /// Fetches the caller's issues worked on between `start` and `end` (inclusive).
    ///
    /// With `include_qa` the issues where the caller is the QA user are
    /// included too. The result is sorted by work date.
    ///
    /// # Errors
    ///
    /// Fails on transport or API errors, and with
    /// [`ReportError::NoIssuesFound`] when the window holds no issues.
    async fn fetch_issues(&self, start: NaiveDate, end: NaiveDate, include_qa: bool) -> Result<IssueCollection>;
}

#[derive(Debug)]
pub struct JiraRepository {
    jira: Jira,
    resolver: WorkDateResolver,
}

impl JiraRepository {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let jira = Jira::new(config).context("Failed to create Jira client")?;
        Ok(Self {
            jira,
            resolver: WorkDateResolver::new(&config.in_progress_status),
        })
    }
}

impl IssueRepository for JiraRepository {
    async fn fetch_issues(&self, start: NaiveDate, end: NaiveDate, include_qa: bool) -> Result<IssueCollection> {
        let config = self.jira.config();
        let jql = build_jql(start, end, include_qa, config);
        tracing::debug!(%jql, "searching Jira issues");

        let raw = self
            .jira
            .search(&jql, &SEARCH_FIELDS, SEARCH_EXPAND)
            .await
            .context("Issue search failed")?;

        if raw.is_empty() {
            return Err(ReportError::NoIssuesFound.into());
        }

        Ok(map_issues(&raw, config, &self.resolver))
    }
}

/// Builds the search query for a reporting window.
///
/// The base condition selects issues assigned to the caller that either moved
/// to the in-progress status or were created within the window. With
/// `include_qa` the same condition on the QA field is OR'ed in.
pub fn build_jql(start: NaiveDate, end: NaiveDate, include_qa: bool, config: &JiraConfig) -> String {
    let first_day = start.format(JQL_DATE_FORMAT).to_string();
    let last_day = end.format(JQL_DATE_FORMAT).to_string();

    let window = format!(
        "(status changed to '{}' during ('{}', '{}') OR created >= '{}' AND created <= '{}')",
        config.in_progress_status, first_day, last_day, first_day, last_day
    );
    let base = format!("assignee = currentUser() AND {}", window);

    if include_qa {
        let qa = format!("'{}' = currentUser() AND {}", config.qa_field, window);
        format!("({}) OR ({})", base, qa)
    } else {
        base
    }
}

/// Converts raw Jira issues into report issues, sorted by work date.
pub fn map_issues(raw: &[JiraIssue], config: &JiraConfig, resolver: &WorkDateResolver) -> IssueCollection {
    let mut issues: IssueCollection = raw.iter().map(|issue| to_issue(issue, config, resolver)).collect();
    issues.sort_by_work_date();
    issues
}

pub fn to_issue(raw: &JiraIssue, config: &JiraConfig, resolver: &WorkDateResolver) -> Issue {
    Issue::new(
        &raw.key,
        raw.fields.summary.as_deref().unwrap_or_default(),
        &extract_description(raw),
        resolver.resolve(raw),
        &config.issue_url(&raw.key),
    )
}

/// First inline text of the rich-text description, or an empty string.
pub fn extract_description(raw: &JiraIssue) -> String {
    raw.fields
        .description
        .as_ref()
        .and_then(|doc| doc.first_text())
        .unwrap_or_default()
        .to_string()
}
