//! Display implementation for jira-reporter messages.
//!
//! All user-facing text lives here so that wording stays consistent and the
//! call sites only deal with typed [`Message`] values.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigLoadFailed => "Failed to load configuration".to_string(),
            Message::EnvFileLoaded(path) => format!("Loaded environment from {}", path),

            // === FETCH MESSAGES ===
            Message::FetchingIssues(first, last) => format!("Fetching Jira issues from {} to {}...", first, last),
            Message::IncludingQaIssues => "Including issues where you are the QA".to_string(),
            Message::IssuesFound(count) => format!("{} issue(s) found", count),
            Message::IssuesUndated(count) => format!("{} issue(s) have no resolvable work date", count),

            // === RENDER MESSAGES ===
            Message::RenderingHtml(path) => format!("Rendering HTML to {}", path),
            Message::ConvertingDocx(converter, path) => format!("Converting to DOCX with {}: {}", converter, path),
            Message::IntermediateRemoved(path) => format!("Removed intermediate file {}", path),
            Message::IntermediateKept(path) => {
                format!("Intermediate HTML left at {}; delete it before generating this report again", path)
            }
            Message::ReportExists(path) => {
                format!("{} already exists; delete it or choose another name with --name", path)
            }

            // === REPORT MESSAGES ===
            Message::ReportGenerated(path) => format!("Report {} generated successfully!", path),
            Message::ReportFailed(error) => format!("Failed to generate report: {}", error),
        };
        write!(f, "{}", text)
    }
}
