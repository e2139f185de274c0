use jira_reporter::commands::Cli;
use jira_reporter::libs::messages::{macros::is_debug_mode, Message};
use jira_reporter::msg_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn setup_logging() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jira_reporter=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    match Cli::menu().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            msg_error!(Message::ReportFailed(format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}
