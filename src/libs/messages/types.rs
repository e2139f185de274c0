#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigLoadFailed,
    EnvFileLoaded(String),    // path

    // === FETCH MESSAGES ===
    FetchingIssues(String, String), // first day, last day
    IncludingQaIssues,
    IssuesFound(usize),
    IssuesUndated(usize),

    // === RENDER MESSAGES ===
    RenderingHtml(String),          // path
    ConvertingDocx(String, String), // converter, path
    IntermediateRemoved(String),    // path
    IntermediateKept(String),       // path
    ReportExists(String),           // path

    // === REPORT MESSAGES ===
    ReportGenerated(String), // path
    ReportFailed(String),    // error
}
