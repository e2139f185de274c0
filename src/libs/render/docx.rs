//! DOCX output through LibreOffice.
//!
//! LibreOffice is driven headless:
//!
//! ```text
//! libreoffice --headless --convert-to "docx:MS Word 2007 XML" --outdir <dir> <file.html>
//! ```
//!
//! It always names its output after the input (`<file>.docx` in `<dir>`), so
//! the result is renamed when the requested path differs. The process is
//! bounded by a timeout and killed when it expires.

use super::ReportGenerator;
use crate::libs::error::ReportError;
use crate::libs::issue::ReportData;
use crate::libs::messages::Message;
use crate::libs::report::{ReportFormat, ReportPaths};
use crate::msg_info;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Executable names tried, in order, when looking for LibreOffice.
pub const CONVERTER_CANDIDATES: [&str; 2] = ["libreoffice", "soffice"];

const CONVERT_FILTER: &str = "docx:MS Word 2007 XML";

#[derive(Debug, Clone)]
pub struct DocxGenerator {
    candidates: Vec<PathBuf>,
    timeout: Duration,
}

impl DocxGenerator {
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_candidates(CONVERTER_CANDIDATES.iter().map(PathBuf::from).collect(), timeout_secs)
    }

    /// Uses an explicit list of converter names or paths instead of the defaults.
    pub fn with_candidates(candidates: Vec<PathBuf>, timeout_secs: u64) -> Self {
        Self {
            candidates,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// First candidate that resolves to an executable file.
    ///
    /// Candidates with a directory component are checked as given; bare
    /// names are searched on `PATH`.
    pub fn find_converter(&self) -> Result<PathBuf, ReportError> {
        let search_path = env::var_os("PATH").unwrap_or_default();
        self.candidates
            .iter()
            .find_map(|candidate| locate(candidate, &search_path))
            .ok_or(ReportError::ConverterNotFound)
    }

    /// Converts `html` into `docx`.
    pub async fn convert(&self, html: &Path, docx: &Path) -> Result<()> {
        let converter = self.find_converter()?;
        let out_dir = match docx.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        msg_info!(Message::ConvertingDocx(converter.display().to_string(), html.display().to_string()));

        let run = Command::new(&converter)
            .arg("--headless")
            .arg("--convert-to")
            .arg(CONVERT_FILTER)
            .arg("--outdir")
            .arg(&out_dir)
            .arg(html)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(result) => result.with_context(|| format!("Failed to run {}", converter.display()))?,
            Err(_) => return Err(ReportError::ConversionTimedOut(self.timeout.as_secs()).into()),
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            let detail = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{} - {}", output.status, stderr)
            };
            return Err(ReportError::ConversionFailed(detail).into());
        }

        // LibreOffice can exit 0 without writing anything (e.g. a locked profile).
        let produced = converted_path(html, &out_dir);
        if !produced.is_file() {
            let mut detail = format!("no output written to {}", produced.display());
            if !stderr.is_empty() {
                detail = format!("{} - {}", detail, stderr);
            }
            return Err(ReportError::ConversionFailed(detail).into());
        }
        if produced != docx {
            fs::rename(&produced, docx)
                .with_context(|| format!("Failed to rename {} to {}", produced.display(), docx.display()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ReportGenerator for DocxGenerator {
    fn format(&self) -> ReportFormat {
        ReportFormat::Docx
    }

    async fn generate(&self, _data: &ReportData, paths: &ReportPaths) -> Result<()> {
        self.convert(&paths.html, &paths.output).await
    }
}

/// Where LibreOffice writes the conversion of `html` into `out_dir`.
pub fn converted_path(html: &Path, out_dir: &Path) -> PathBuf {
    let mut name = html.file_stem().map(OsString::from).unwrap_or_default();
    name.push(".docx");
    out_dir.join(name)
}

fn locate(candidate: &Path, search_path: &OsString) -> Option<PathBuf> {
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    env::split_paths(search_path)
        .flat_map(|dir| executable_names(candidate).into_iter().map(move |name| dir.join(name)))
        .find(|path| is_executable(path))
}

#[cfg(windows)]
fn executable_names(candidate: &Path) -> Vec<PathBuf> {
    vec![candidate.to_path_buf(), candidate.with_extension("exe")]
}

#[cfg(not(windows))]
fn executable_names(candidate: &Path) -> Vec<PathBuf> {
    vec![candidate.to_path_buf()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
