//! Report assembly.
//!
//! [`ReportService::generate`] runs the whole pipeline for one report:
//!
//! 1. **Validate**: the format is supported and has a registered generator
//! 2. **Resolve period**: explicit `MM/YYYY` or the previous month
//! 3. **Fetch**: issues for the period from the repository
//! 4. **Assemble**: user identity, issues and period label into [`ReportData`]
//! 5. **Resolve paths**: output directory and time-qualified file name
//! 6. **Render**: HTML first, then DOCX conversion when requested
//!
//! Any failure aborts the run. A failed DOCX conversion leaves the
//! intermediate HTML file where it was written.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jira_reporter::libs::config::Config;
//! use jira_reporter::libs::render::default_generators;
//! use jira_reporter::libs::report::{ReportOptions, ReportService};
//! use jira_reporter::libs::repository::JiraRepository;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let repo = JiraRepository::new(&config.jira)?;
//! let service = ReportService::new(&config, repo, default_generators(&config.render));
//! let path = service.generate(&ReportOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::config::Config;
use crate::libs::error::ReportError;
use crate::libs::issue::ReportData;
use crate::libs::messages::Message;
use crate::libs::period::ReportPeriod;
use crate::libs::render::GeneratorMap;
use crate::libs::repository::IssueRepository;
use crate::{msg_debug, msg_info, msg_success, msg_warning};
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory used when no output path is given.
pub const DEFAULT_REPORT_DIR: &str = "reports";

/// Base file name used when no report name is given.
pub const DEFAULT_REPORT_NAME: &str = "report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Html,
    Docx,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Docx => "docx",
        }
    }

    /// File extension, identical to the format name.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "docx" => Ok(ReportFormat::Docx),
            _ => Err(ReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Base file name, `report` when absent.
    pub name: Option<String>,
    /// Output directory, `reports` when absent.
    pub path: Option<PathBuf>,
    /// Requested format; validated by the service.
    pub format: String,
    /// Explicit `MM/YYYY`; previous month when absent.
    pub date: Option<String>,
    /// Also include issues where the user is the QA.
    pub include_qa: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            name: None,
            path: None,
            format: ReportFormat::Html.to_string(),
            date: None,
            include_qa: false,
        }
    }
}

/// Files touched while producing one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub directory: PathBuf,
    /// Where the HTML is rendered. Same as `output` for HTML reports.
    pub html: PathBuf,
    /// Final report file.
    pub output: PathBuf,
}

impl ReportPaths {
    /// Builds `{base}_{day}_{MM_YYYY}.{ext}` inside `directory`.
    pub fn new(directory: &Path, base: &str, day: u32, period: &ReportPeriod, format: ReportFormat) -> Self {
        let file_name = format!("{}_{}_{}.{}", base, day, period.file_label(), format.extension());
        let output = directory.join(file_name);
        let html = match format {
            ReportFormat::Html => output.clone(),
            ReportFormat::Docx => output.with_extension(ReportFormat::Html.extension()),
        };
        ReportPaths {
            directory: directory.to_path_buf(),
            html,
            output,
        }
    }
}

pub struct ReportService<'a, R> {
    config: &'a Config,
    repo: R,
    generators: GeneratorMap,
    today: Option<NaiveDate>,
}

impl<'a, R: IssueRepository> ReportService<'a, R> {
    pub fn new(config: &'a Config, repo: R, generators: GeneratorMap) -> Self {
        Self {
            config,
            repo,
            generators,
            today: None,
        }
    }

    /// Pins "today", which drives the default period and the file name day.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Generates one report and returns the path of the final file.
    pub async fn generate(&self, options: &ReportOptions) -> Result<PathBuf> {
        let format = self.validate_format(&options.format)?;
        let today = self.today();

        let period = ReportPeriod::resolve(options.date.as_deref(), today)?;
        let data = self.fetch_report_data(&period, options.include_qa).await?;
        let paths = self.resolve_paths(options, format, today, &period)?;

        self.render(&data, &paths, format).await?;

        msg_success!(Message::ReportGenerated(paths.output.display().to_string()));
        Ok(paths.output)
    }

    fn validate_format(&self, requested: &str) -> Result<ReportFormat> {
        let format: ReportFormat = requested.parse()?;
        for needed in [ReportFormat::Html, format] {
            if !self.generators.contains_key(&needed) {
                return Err(ReportError::GeneratorUnavailable(needed.to_string()).into());
            }
        }
        Ok(format)
    }

    async fn fetch_report_data(&self, period: &ReportPeriod, include_qa: bool) -> Result<ReportData> {
        msg_info!(Message::FetchingIssues(
            period.first_day.format("%d/%m/%Y").to_string(),
            period.last_day.format("%d/%m/%Y").to_string()
        ));
        if include_qa {
            msg_info!(Message::IncludingQaIssues);
        }

        let issues = self
            .repo
            .fetch_issues(period.first_day, period.last_day, include_qa)
            .await
            .context("Failed to fetch Jira data")?;

        msg_info!(Message::IssuesFound(issues.len()));
        let undated = issues.iter().filter(|issue| issue.date().is_empty()).count();
        if undated > 0 {
            msg_warning!(Message::IssuesUndated(undated));
        }

        Ok(ReportData::new(self.config.report_user(), issues, &period.label()))
    }

    fn resolve_paths(
        &self,
        options: &ReportOptions,
        format: ReportFormat,
        today: NaiveDate,
        period: &ReportPeriod,
    ) -> Result<ReportPaths> {
        let directory = options
            .path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));

        fs::create_dir_all(&directory)
            .with_context(|| format!("Failed to create directory {}", directory.display()))?;

        let base = options
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_REPORT_NAME);

        let paths = ReportPaths::new(&directory, base, today.day(), period, format);
        tracing::debug!(html = %paths.html.display(), output = %paths.output.display(), "resolved report paths");
        Ok(paths)
    }

    async fn render(&self, data: &ReportData, paths: &ReportPaths, format: ReportFormat) -> Result<()> {
        let html = self
            .generators
            .get(&ReportFormat::Html)
            .ok_or_else(|| ReportError::GeneratorUnavailable(ReportFormat::Html.to_string()))?;
        html.generate(data, paths).await?;

        if format == ReportFormat::Docx {
            let docx = self
                .generators
                .get(&ReportFormat::Docx)
                .ok_or_else(|| ReportError::GeneratorUnavailable(ReportFormat::Docx.to_string()))?;

            if let Err(err) = docx.generate(data, paths).await {
                msg_warning!(Message::IntermediateKept(paths.html.display().to_string()));
                return Err(err);
            }

            fs::remove_file(&paths.html)
                .with_context(|| format!("Failed to remove intermediate file {}", paths.html.display()))?;
            msg_debug!(Message::IntermediateRemoved(paths.html.display().to_string()));
        }
        Ok(())
    }
}
