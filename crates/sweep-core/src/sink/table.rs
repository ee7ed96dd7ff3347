use super::write_text_atomic;
use crate::domain::{ResultSpace, SweepResult};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFormat {
    pub input_label: String,
    pub output_label: String,
    pub input_precision: usize,
    pub output_precision: usize,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            input_label: "Wavelength (um)".to_string(),
            output_label: "T".to_string(),
            input_precision: 3,
            output_precision: 6,
        }
    }
}

/// Header line followed by one `input\toutput` row per sample, in index order.
pub fn render_table(results: &ResultSpace, format: &TableFormat) -> String {
    let mut table = format!("{}\t{}\n", format.input_label, format.output_label);
    for result in results {
        table.push_str(&format!(
            "{:.ip$}\t{:.op$}\n",
            result.input,
            result.output,
            ip = format.input_precision,
            op = format.output_precision,
        ));
    }
    table
}

pub fn write_table(path: &Path, results: &ResultSpace, format: &TableFormat) -> SweepResult<()> {
    write_text_atomic(path, &render_table(results, format))
}
