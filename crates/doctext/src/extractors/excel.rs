//! Excel (.xlsx) extractor.

use crate::core::blocking::run_blocking;
use crate::core::config::{ExtractionConfig, SpreadsheetConfig};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, FormatTag};
use crate::{DoctextError, Result};
use async_trait::async_trait;
use calamine::{Data, DataType, Range, Reader, Xlsx, open_workbook_from_rs};
use std::io::Cursor;

/// Renders worksheets of an xlsx workbook as comma-delimited text using calamine.
///
/// Only the first worksheet is rendered unless `spreadsheet.all_sheets` is set, in
/// which case sheets follow each other separated by a blank line.
pub struct ExcelExtractor;

impl ExcelExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExcelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ExcelExtractor {
    fn name(&self) -> &str {
        "excel-extractor"
    }

    fn description(&self) -> &str {
        "Renders xlsx worksheets as comma-delimited rows using calamine"
    }
}

/// Render the workbook in `content` as delimited text.
pub fn extract_workbook_text(content: &[u8], options: &SpreadsheetConfig) -> Result<String> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(content))
        .map_err(|e| DoctextError::malformed_with_source("Invalid xlsx workbook", e))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        return Err(DoctextError::malformed("Workbook has no worksheets"));
    }

    let take = if options.all_sheets { sheet_names.len() } else { 1 };
    let mut rendered = Vec::with_capacity(take);

    for name in sheet_names.iter().take(take) {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| DoctextError::malformed_with_source(format!("Failed to read worksheet '{}'", name), e))?;
        rendered.push(range_to_delimited(&range));
    }

    Ok(rendered.join("\n"))
}

/// One line per row, cells joined with commas, every line newline-terminated.
fn range_to_delimited(range: &Range<Data>) -> String {
    let mut out = String::new();
    for row in range.rows() {
        let line: Vec<String> = row.iter().map(|cell| quote_field(&format_cell(cell))).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn format_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => format_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::Error(e) => e.to_string(),
    }
}

/// Integral values print without a fractional part (`30`, not `30.0`).
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// RFC 4180 quoting: wrap in quotes when the field holds a delimiter, quote or line break.
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[async_trait]
impl DocumentExtractor for ExcelExtractor {
    async fn extract_bytes(&self, content: &[u8], config: &ExtractionConfig) -> Result<ExtractionResult> {
        let owned = content.to_vec();
        let options = config.spreadsheet.clone();
        let text = run_blocking("Excel extraction", move || extract_workbook_text(&owned, &options)).await?;
        Ok(ExtractionResult::new(text))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Xlsx]
    }
}
