//! Monthly report command.
//!
//! Wires the configured Jira repository and the default generators into a
//! [`ReportService`] and runs it once with the options taken from the
//! command line.

use crate::libs::{
    config::Config,
    messages::Message,
    render::default_generators,
    report::{ReportOptions, ReportService},
    repository::JiraRepository,
};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Base name of the report file
    ///
    /// The final name is `{name}_{day}_{MM_YYYY}.{ext}`, with `report`
    /// used when no name is given.
    #[arg(short, long)]
    name: Option<String>,

    /// Directory where the report is saved (default: `reports`)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Report format: `html` or `docx`
    ///
    /// DOCX output requires LibreOffice (`libreoffice` or `soffice` on PATH).
    #[arg(short, long, default_value = "html")]
    format: String,

    /// Month of the report in MM/YYYY format (e.g. 01/2025)
    ///
    /// Defaults to the previous calendar month.
    #[arg(short, long)]
    date: Option<String>,

    /// Include issues where you are set as the QA user
    #[arg(short, long)]
    qa: bool,

    /// HTML template to render (overrides REPORT_TEMPLATE)
    #[arg(short, long)]
    template: Option<PathBuf>,
}

impl From<&ReportArgs> for ReportOptions {
    fn from(args: &ReportArgs) -> Self {
        ReportOptions {
            name: args.name.clone(),
            path: args.path.clone(),
            format: args.format.clone(),
            date: args.date.clone(),
            include_qa: args.qa,
        }
    }
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let mut config = Config::load().context(Message::ConfigLoadFailed)?;
    if let Some(template) = &args.template {
        config.render.template_path = template.clone();
    }

    let repo = JiraRepository::new(&config.jira)?;
    let generators = default_generators(&config.render);
    let service = ReportService::new(&config, repo, generators);

    service.generate(&ReportOptions::from(&args)).await?;
    Ok(())
}
