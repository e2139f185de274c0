//! # Jira Reporter
//!
//! A command-line utility that collects a month of Jira activity and renders
//! it as a report.
//!
//! ## Features
//!
//! - **Issue Collection**: JQL search for issues you worked on in a month,
//!   optionally including those where you are the QA
//! - **Work Dates**: Inferred from the changelog (start of progress,
//!   assignment) with the creation date as fallback
//! - **HTML Reports**: Rendered from an editable template
//! - **DOCX Reports**: Converted from the HTML through LibreOffice
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jira_reporter::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
