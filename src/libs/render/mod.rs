//! Report generators.
//!
//! Each output format is a [`ReportGenerator`]. The report service looks
//! generators up in a [`GeneratorMap`] keyed by format, so adding a format
//! means adding a generator and registering it in [`default_generators`].
//!
//! HTML is always rendered first; DOCX is produced from that HTML file.

pub mod docx;
pub mod html;
pub mod template;

use crate::libs::config::RenderConfig;
use crate::libs::issue::ReportData;
use crate::libs::report::{ReportFormat, ReportPaths};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub use docx::DocxGenerator;
pub use html::HtmlGenerator;

#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Format this generator produces.
    fn format(&self) -> ReportFormat;

    /// Produces this generator's output for `data` at the locations in `paths`.
    ///
    /// The HTML generator writes `paths.html`; the DOCX generator reads
    /// `paths.html` and writes `paths.output`.
    async fn generate(&self, data: &ReportData, paths: &ReportPaths) -> Result<()>;
}

pub type GeneratorMap = HashMap<ReportFormat, Box<dyn ReportGenerator>>;

/// Registers a generator under the format it reports.
pub fn register(map: &mut GeneratorMap, generator: Box<dyn ReportGenerator>) {
    map.insert(generator.format(), generator);
}

/// HTML and DOCX generators configured from `config`.
pub fn default_generators(config: &RenderConfig) -> GeneratorMap {
    let mut map = GeneratorMap::new();
    register(&mut map, Box::new(HtmlGenerator::new(&config.template_path)));
    register(&mut map, Box::new(DocxGenerator::new(config.conversion_timeout_secs)));
    map
}
