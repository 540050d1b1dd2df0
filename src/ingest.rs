//! Spreadsheet ingestion
//!
//! `.xlsx` bytes -> `Grid` (first worksheet only). Columns are absolute sheet
//! columns: column A is always index 0 even when the used range starts later.

use crate::error::{ReportError, Result};
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;
use student_report_common::{Cell, Grid, Row};

pub const XLSX_EXTENSION: &str = ".xlsx";

/// File chosen for upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Size in KB as shown next to the file name
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

/// Extension and size gates, checked before any parse
pub fn validate_upload(name: &str, size: u64, limit: u64) -> Result<()> {
    if !name.ends_with(XLSX_EXTENSION) {
        return Err(ReportError::InvalidFileType);
    }
    if size > limit {
        return Err(ReportError::FileTooLarge { size, limit });
    }
    Ok(())
}

/// Read a file from disk. The gates run on metadata, so rejected files are never read.
pub async fn read_upload(path: &Path, limit: u64) -> Result<UploadedFile> {
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.display().to_string()));
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let size = tokio::fs::metadata(path).await?.len();
    validate_upload(&name, size, limit)?;

    let bytes = tokio::fs::read(path).await?;
    Ok(UploadedFile::new(name, bytes))
}

/// Parse workbook bytes into a grid
pub fn parse_workbook(bytes: &[u8]) -> Result<Grid> {
    let mut workbook = open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(bytes)).map_err(|e| {
        log::warn!("workbook open failed: {}", e);
        ReportError::SpreadsheetRead(e.to_string())
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::SpreadsheetRead("workbook has no worksheets".into()))?
        .map_err(|e| {
            log::warn!("worksheet read failed: {}", e);
            ReportError::SpreadsheetRead(e.to_string())
        })?;

    let leading_columns = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let rows: Vec<Row> = range
        .rows()
        .filter_map(|cells| convert_row(cells, leading_columns))
        .collect();

    log::info!("parsed {} rows (first column offset {})", rows.len(), leading_columns);
    Ok(Grid::new(rows))
}

/// Validate then parse
pub fn ingest(upload: &UploadedFile, limit: u64) -> Result<Grid> {
    validate_upload(&upload.name, upload.size, limit)?;
    parse_workbook(&upload.bytes)
}

/// Blank rows are skipped, trailing blanks trimmed
fn convert_row(cells: &[Data], leading_columns: usize) -> Option<Row> {
    let mut converted: Vec<Cell> = Vec::with_capacity(leading_columns + cells.len());
    converted.resize(leading_columns, Cell::Empty);
    converted.extend(cells.iter().map(convert_cell));

    while converted.last().is_some_and(Cell::is_empty) {
        converted.pop();
    }
    if converted.is_empty() {
        None
    } else {
        Some(Row::new(converted))
    }
}

fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extension_first() {
        let err = validate_upload("marks.csv", 10 * 1024 * 1024, 5 * 1024 * 1024).unwrap_err();
        assert!(matches!(err, ReportError::InvalidFileType));
        assert_eq!(err.to_string(), "Only Excel (.xlsx) files are allowed.");
    }

    #[test]
    fn test_validate_extension_is_case_sensitive() {
        assert!(validate_upload("marks.XLSX", 1, 10).is_err());
        assert!(validate_upload("marks.xls", 1, 10).is_err());
        assert!(validate_upload("marks.xlsx", 1, 10).is_ok());
    }

    #[test]
    fn test_validate_size_limit() {
        let limit = 5 * 1024 * 1024;
        assert!(validate_upload("a.xlsx", limit, limit).is_ok());
        let err = validate_upload("a.xlsx", limit + 1, limit).unwrap_err();
        assert_eq!(err.to_string(), "File size must be under 5MB.");
    }

    #[test]
    fn test_parse_garbage_fails_recoverably() {
        let err = parse_workbook(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, ReportError::SpreadsheetRead(_)));
        assert_eq!(err.to_string(), "Failed to read Excel file.");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_convert_row_pads_and_trims() {
        let row = convert_row(
            &[Data::String("x".into()), Data::Int(3), Data::Empty, Data::Empty],
            2,
        )
        .unwrap();
        assert_eq!(
            row.cells(),
            &[Cell::Empty, Cell::Empty, Cell::text("x"), Cell::Number(3.0)]
        );
    }

    #[test]
    fn test_convert_row_blank_is_skipped() {
        assert!(convert_row(&[Data::Empty, Data::Empty], 0).is_none());
        assert!(convert_row(&[], 3).is_none());
    }

    #[test]
    fn test_convert_cell_other_types_become_text() {
        assert_eq!(convert_cell(&Data::Bool(true)), Cell::text("true"));
        assert_eq!(convert_cell(&Data::Float(6.5)), Cell::Number(6.5));
    }
}
