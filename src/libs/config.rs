//! Configuration management for jira-reporter.
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file in the working directory. They are loaded once in `main` and
//! handed by reference to every component that needs them; nothing reads the
//! environment after that.
//!
//! ## Variables
//!
//! | Variable                  | Required | Meaning                                   |
//! |---------------------------|----------|-------------------------------------------|
//! | `URL`                     | yes      | Jira base URL (`https://acme.atlassian.net`) |
//! | `EMAIL`                   | yes      | Jira account email                        |
//! | `API_KEY`                 | yes      | Jira API token                            |
//! | `COMPANY_NAME`            | yes      | Company printed on the report             |
//! | `CNPJ`                    | yes      | Company tax identifier                    |
//! | `USER_NAME`               | yes      | Person the report belongs to              |
//! | `JIRA_IN_PROGRESS_STATUS` | no       | Status marking work start (`In Progress`) |
//! | `JIRA_QA_FIELD`           | no       | QA user field (`QA[User Picker (single user)]`) |
//! | `REPORT_TEMPLATE`         | no       | HTML template path (`template.html`)      |
//! | `HTTP_TIMEOUT_SECS`       | no       | Jira request timeout (30)                 |
//! | `CONVERSION_TIMEOUT_SECS` | no       | LibreOffice timeout (120)                 |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jira_reporter::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("Reporting for {}", config.user.user_name);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::api::jira::{JiraConfig, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_IN_PROGRESS_STATUS, DEFAULT_QA_FIELD};
use crate::libs::error::ReportError;
use crate::libs::issue::User;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const URL: &str = "URL";
pub const EMAIL: &str = "EMAIL";
pub const API_KEY: &str = "API_KEY";
pub const COMPANY_NAME: &str = "COMPANY_NAME";
pub const CNPJ: &str = "CNPJ";
pub const USER_NAME: &str = "USER_NAME";
pub const IN_PROGRESS_STATUS: &str = "JIRA_IN_PROGRESS_STATUS";
pub const QA_FIELD: &str = "JIRA_QA_FIELD";
pub const REPORT_TEMPLATE: &str = "REPORT_TEMPLATE";
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const CONVERSION_TIMEOUT_SECS: &str = "CONVERSION_TIMEOUT_SECS";

pub const DEFAULT_TEMPLATE_PATH: &str = "template.html";
pub const DEFAULT_CONVERSION_TIMEOUT_SECS: u64 = 120;

/// Identity printed on every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserConfig {
    pub company_name: String,
    pub cnpj: String,
    pub user_name: String,
}

/// Rendering settings shared by the report generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub template_path: PathBuf,
    pub conversion_timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            conversion_timeout_secs: DEFAULT_CONVERSION_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jira: JiraConfig,
    pub user: UserConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Loads `.env` (when present) and reads the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `.env` exists but cannot be read, or when a required
    /// variable is missing.
    pub fn load() -> Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => msg_debug!(Message::EnvFileLoaded(path.display().to_string())),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err).context("Failed to load .env file"),
        }
        Ok(Self::from_lookup(|key| env::var(key).ok())?)
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Required variables are checked in a fixed order and the first missing
    /// one is reported. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| optional(key).ok_or(ReportError::MissingConfig(key));
        let seconds = |key: &'static str, default: u64| -> Result<u64, ReportError> {
            match optional(key) {
                None => Ok(default),
                Some(raw) => match raw.parse::<u64>() {
                    Ok(value) if value > 0 => Ok(value),
                    _ => Err(ReportError::InvalidConfig {
                        var: key,
                        reason: format!("expected a positive number of seconds, got '{}'", raw),
                    }),
                },
            }
        };

        let jira = JiraConfig {
            api_url: required(URL)?,
            email: required(EMAIL)?,
            api_token: required(API_KEY)?,
            in_progress_status: optional(IN_PROGRESS_STATUS).unwrap_or_else(|| DEFAULT_IN_PROGRESS_STATUS.to_string()),
            qa_field: optional(QA_FIELD).unwrap_or_else(|| DEFAULT_QA_FIELD.to_string()),
            timeout_secs: seconds(HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?,
        };

        let user = UserConfig {
            company_name: required(COMPANY_NAME)?,
            cnpj: required(CNPJ)?,
            user_name: required(USER_NAME)?,
        };

        let render = RenderConfig {
            template_path: optional(REPORT_TEMPLATE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH)),
            conversion_timeout_secs: seconds(CONVERSION_TIMEOUT_SECS, DEFAULT_CONVERSION_TIMEOUT_SECS)?,
        };

        Ok(Config { jira, user, render })
    }

    pub fn report_user(&self) -> User {
        User::new(&self.user.company_name, &self.user.cnpj, &self.user.user_name)
    }
}
