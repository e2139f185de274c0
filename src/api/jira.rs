use crate::libs::error::ReportError;
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const SEARCH_URL: &str = "rest/api/3/search/jql";
const BROWSE_URL: &str = "browse";

/// Number of issues requested per search page.
pub const PAGE_SIZE: u32 = 100;

pub const DEFAULT_IN_PROGRESS_STATUS: &str = "In Progress";
pub const DEFAULT_QA_FIELD: &str = "QA[User Picker (single user)]";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub jql: &'a str,
    pub fields: &'a [&'a str],
    pub expand: &'a str,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
    pub next_page_token: Option<String>,
    pub is_last: Option<bool>,
}

impl SearchPage {
    /// A page is final when Jira says so or hands back no continuation token.
    pub fn next_token(&self) -> Option<&str> {
        match self.is_last {
            Some(true) => None,
            _ => self.next_page_token.as_deref(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JiraIssue {
    pub key: String,
    #[serde(default)]
    pub fields: JiraIssueFields,
    pub changelog: Option<JiraChangelog>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct JiraIssueFields {
    pub summary: Option<String>,
    pub description: Option<AdfNode>,
    pub created: Option<String>,
    pub assignee: Option<JiraUser>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    pub account_id: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct JiraChangelog {
    #[serde(default)]
    pub histories: Vec<JiraHistory>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct JiraHistory {
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub items: Vec<JiraHistoryItem>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct JiraHistoryItem {
    pub field: String,
    /// Raw target value, an account id for assignee changes.
    pub to: Option<String>,
    /// Human readable target value, a status name for status changes.
    #[serde(rename = "toString")]
    pub to_label: Option<String>,
}

/// A node of an Atlassian Document Format tree (rich text descriptions).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AdfNode {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<AdfNode>,
    pub text: Option<String>,
}

impl AdfNode {
    /// Text of the first inline node of the first block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first()?.content.first()?.text.as_deref()
    }
}

#[derive(Clone)]
pub struct JiraConfig {
    pub api_url: String,
    pub email: String,
    pub api_token: String,
    /// Status name that marks the start of work on an issue.
    pub in_progress_status: String,
    /// Custom field holding the QA user.
    pub qa_field: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("api_url", &self.api_url)
            .field("email", &self.email)
            .field("api_token", &"***")
            .field("in_progress_status", &self.in_progress_status)
            .field("qa_field", &self.qa_field)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl JiraConfig {
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url(), BROWSE_URL, key)
    }
}

#[derive(Debug)]
pub struct Jira {
    client: Client,
    config: JiraConfig,
}

impl Jira {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let credentials = format!("{}:{}", config.email, config.api_token);
        let mut auth = HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(credentials)))
            .context("Jira credentials contain characters not allowed in a header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// Runs a JQL search and follows continuation tokens until the last page.
    pub async fn search(&self, jql: &str, fields: &[&str], expand: &str) -> Result<Vec<JiraIssue>> {
        let mut issues = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let request = SearchRequest {
                jql,
                fields,
                expand,
                max_results: PAGE_SIZE,
                next_page_token: next_page_token.take(),
            };
            let page = self.search_page(&request).await?;
            tracing::debug!(count = page.issues.len(), "received search page");

            next_page_token = page.next_token().map(str::to_owned);
            issues.extend(page.issues);

            if next_page_token.is_none() {
                return Ok(issues);
            }
        }
    }

    async fn search_page(&self, request: &SearchRequest<'_>) -> Result<SearchPage> {
        let url = format!("{}/{}", self.config.base_url(), SEARCH_URL);
        let res = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach Jira at {}", url))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ReportError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        res.json::<SearchPage>().await.context("Failed to decode Jira search response")
    }
}
