pub mod plot;
pub mod report;
pub mod table;

use crate::domain::{SweepError, SweepResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub use plot::{PlotConfig, check_plot_path, render_svg, write_plot};
pub use report::{SweepReport, write_report};
pub use table::{TableFormat, render_table, write_table};

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Writes `content` next to `path` first and renames it into place, so a
/// crash never leaves a truncated artifact behind.
pub fn write_text_atomic(path: &Path, content: &str) -> SweepResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| SweepError::sink(path, source))?;

    let mut staged = NamedTempFile::new_in(parent).map_err(|source| SweepError::sink(path, source))?;
    staged
        .write_all(normalize_text_artifact(content).as_bytes())
        .and_then(|()| staged.flush())
        .map_err(|source| SweepError::sink(path, source))?;
    staged
        .persist(path)
        .map_err(|source| SweepError::sink(path, source.error))?;
    Ok(())
}
