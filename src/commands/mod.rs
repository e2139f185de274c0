pub mod report;

use anyhow::Result;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Generate a monthly report of your Jira activity")]
pub struct Cli {
    #[command(flatten)]
    report: report::ReportArgs,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        report::cmd(cli.report).await
    }
}
