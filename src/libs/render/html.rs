use super::template::Template;
use super::ReportGenerator;
use crate::libs::issue::ReportData;
use crate::libs::messages::Message;
use crate::libs::report::{ReportFormat, ReportPaths};
use crate::msg_debug;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Renders report data through an HTML template file.
#[derive(Debug, Clone)]
pub struct HtmlGenerator {
    template_path: PathBuf,
}

impl HtmlGenerator {
    pub fn new(template_path: &Path) -> Self {
        Self {
            template_path: template_path.to_path_buf(),
        }
    }

    /// Loads the template and writes the rendered report to `writer`.
    ///
    /// The template is read on every call so edits apply without a rebuild.
    pub fn render<W: Write>(&self, writer: &mut W, data: &ReportData) -> Result<()> {
        let source = fs::read_to_string(&self.template_path)
            .with_context(|| format!("Failed to read template {}", self.template_path.display()))?;
        let template = Template::parse(&source)
            .with_context(|| format!("Failed to parse template {}", self.template_path.display()))?;

        let context = serde_json::to_value(data).context("Failed to serialize report data")?;
        let html = template.render(&context).context("Failed to execute template")?;

        writer.write_all(html.as_bytes()).context("Failed to write report")?;
        Ok(())
    }
}

#[async_trait]
impl ReportGenerator for HtmlGenerator {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    async fn generate(&self, data: &ReportData, paths: &ReportPaths) -> Result<()> {
        msg_debug!(Message::RenderingHtml(paths.html.display().to_string()));

        // Render in memory so a broken template leaves no file behind.
        let mut rendered = Vec::new();
        self.render(&mut rendered, data)?;

        let file = match OpenOptions::new().write(true).create_new(true).open(&paths.html) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(err).with_context(|| Message::ReportExists(paths.html.display().to_string()));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to create file {}", paths.html.display()));
            }
        };

        let mut writer = BufWriter::new(file);
        writer
            .write_all(&rendered)
            .with_context(|| format!("Failed to write file {}", paths.html.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write file {}", paths.html.display()))?;
        Ok(())
    }
}
