//! API client modules for external service integrations.
//!
//! Only Jira is spoken to: the client authenticates with an account email and
//! API token (HTTP basic auth) and exposes the JQL search endpoint with
//! changelog expansion, following continuation tokens until every page of a
//! result set has been read.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jira_reporter::api::{Jira, JiraConfig};
//!
//! # async fn run(config: &JiraConfig) -> anyhow::Result<()> {
//! let jira = Jira::new(config)?;
//! let issues = jira.search("assignee = currentUser()", &["summary"], "changelog").await?;
//! # Ok(())
//! # }
//! ```

pub mod jira;

pub use jira::{Jira, JiraConfig};
