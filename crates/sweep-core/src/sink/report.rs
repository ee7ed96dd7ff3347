use super::write_text_atomic;
use crate::domain::{ExecutionMode, SweepError, SweepResult};
use serde::Serialize;
use std::path::Path;

/// Machine-readable summary of one sweep run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub evaluator: String,
    pub mode: ExecutionMode,
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub workers: usize,
    pub threads: usize,
    pub chunk_lengths: Vec<usize>,
    pub elapsed_seconds: f64,
    pub output_min: f64,
    pub output_max: f64,
}

pub fn write_report(path: &Path, report: &SweepReport) -> SweepResult<()> {
    let json =
        serde_json::to_string_pretty(report).map_err(|source| SweepError::sink(path, source))?;
    write_text_atomic(path, &json)
}
