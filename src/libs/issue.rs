//! Report data model: issues, the user identity, and the render-ready aggregate.

use crate::libs::work_date::DISPLAY_DATE_FORMAT;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A Jira issue as it appears in the report.
///
/// Fields are fixed at construction. The work timestamp is kept for
/// ordering; templates only see the `DD/MM` display string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    key: String,
    summary: String,
    description: String,
    date: String,
    url: String,
    #[serde(skip)]
    worked_at: Option<DateTime<FixedOffset>>,
}

impl Issue {
    pub fn new(
        key: &str,
        summary: &str,
        description: &str,
        worked_at: Option<DateTime<FixedOffset>>,
        url: &str,
    ) -> Self {
        let date = worked_at
            .map(|ts| ts.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_default();
        Issue {
            key: key.to_string(),
            summary: summary.to_string(),
            description: description.to_string(),
            date,
            url: url.to_string(),
            worked_at,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `DD/MM` work date, empty when none could be resolved.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn worked_at(&self) -> Option<DateTime<FixedOffset>> {
        self.worked_at
    }
}

/// Ordered issues of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IssueCollection {
    items: Vec<Issue>,
}

impl IssueCollection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Issue] {
        &self.items
    }

    /// Stable chronological sort on the work timestamp.
    ///
    /// Issues without a resolvable date come first.
    pub fn sort_by_work_date(&mut self) {
        self.items.sort_by_key(|issue| issue.worked_at);
    }
}

impl FromIterator<Issue> for IssueCollection {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a IssueCollection {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Identity printed on the report header. Comes from configuration only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub company_name: String,
    pub cnpj: String,
    pub user_name: String,
}

impl User {
    pub fn new(company_name: &str, cnpj: &str, user_name: &str) -> Self {
        User {
            company_name: company_name.to_string(),
            cnpj: cnpj.to_string(),
            user_name: user_name.to_string(),
        }
    }
}

/// Everything a template needs to render one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub user: User,
    pub issues: IssueCollection,
    /// `MM/YYYY` of the reported month.
    pub date_worked: String,
}

impl ReportData {
    pub fn new(user: User, issues: IssueCollection, date_worked: &str) -> Self {
        ReportData {
            user,
            issues,
            date_worked: date_worked.to_string(),
        }
    }
}
