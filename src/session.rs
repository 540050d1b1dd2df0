//! Session state
//!
//! Uploaded grid, selected student and selected charts for one run. Created
//! empty and passed to every view explicitly.

use crate::error::{ReportError, Result};
use crate::ingest::{self, UploadedFile};
use student_report_common::{ChartKind, ChartSet, Grid, Row};

/// Name and size of the file behind the current grid
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    file: Option<FileInfo>,
    header_rows: usize,
    max_upload_bytes: u64,
    selected_student: Option<Row>,
    selected_charts: ChartSet,
    last_error: Option<String>,
}

impl Session {
    pub fn new(header_rows: usize, max_upload_bytes: u64) -> Self {
        Self {
            grid: Grid::default(),
            file: None,
            header_rows,
            max_upload_bytes,
            selected_student: None,
            selected_charts: ChartSet::new(),
            last_error: None,
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.layout.header_rows, config.max_upload_bytes)
    }

    /// Validate and parse an upload.
    ///
    /// - validation errors only record the inline message
    /// - parse errors forget the chosen file but keep the previous grid
    /// - success replaces the grid and drops any selection
    pub fn upload(&mut self, upload: &UploadedFile) -> Result<()> {
        if let Err(e) = ingest::validate_upload(&upload.name, upload.size, self.max_upload_bytes) {
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        match ingest::parse_workbook(&upload.bytes) {
            Ok(grid) => {
                self.grid = grid;
                self.file = Some(FileInfo { name: upload.name.clone(), size: upload.size });
                self.last_error = None;
                self.reset_selection();
                Ok(())
            }
            Err(e) => {
                self.file = None;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Forget the uploaded file and its data
    pub fn remove_file(&mut self) {
        self.grid = Grid::default();
        self.file = None;
        self.last_error = None;
        self.reset_selection();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn file(&self) -> Option<&FileInfo> {
        self.file.as_ref()
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn has_data(&self) -> bool {
        !self.grid.is_empty()
    }

    /// Inline message of the last failed upload
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn data_rows(&self) -> &[Row] {
        self.grid.data_rows(self.header_rows)
    }

    /// Copy a data row (0-based, after the header rows) into the selection
    pub fn select_student(&mut self, index: usize) -> Result<&Row> {
        if !self.has_data() {
            return Err(ReportError::NoData);
        }
        let row = self
            .data_rows()
            .get(index)
            .cloned()
            .ok_or_else(|| ReportError::StudentNotFound(format!("row {}", index + 1)))?;
        Ok(&*self.selected_student.insert(row))
    }

    pub fn selected_student(&self) -> Option<&Row> {
        self.selected_student.as_ref()
    }

    pub fn selected_charts(&self) -> &ChartSet {
        &self.selected_charts
    }

    pub fn toggle_chart(&mut self, kind: ChartKind) -> bool {
        self.selected_charts.toggle(kind)
    }

    pub fn set_chart(&mut self, kind: ChartKind, selected: bool) {
        self.selected_charts.set(kind, selected);
    }

    /// Chart modal dismissed without proceeding. The student stays selected.
    pub fn cancel_report(&mut self) {
        self.selected_charts.clear();
    }

    fn reset_selection(&mut self) {
        self.selected_student = None;
        self.selected_charts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(2, 1024);
        assert!(!session.has_data());
        assert!(session.selected_student().is_none());
        assert!(session.selected_charts().is_empty());
        assert!(session.file().is_none());
    }

    #[test]
    fn test_select_without_data() {
        let mut session = Session::new(2, 1024);
        assert!(matches!(session.select_student(0), Err(ReportError::NoData)));
    }

    #[test]
    fn test_wrong_extension_keeps_state() {
        let mut session = Session::new(2, 1024);
        let err = session.upload(&UploadedFile::new("marks.csv", vec![1, 2, 3])).unwrap_err();
        assert!(matches!(err, ReportError::InvalidFileType));
        assert_eq!(session.last_error(), Some("Only Excel (.xlsx) files are allowed."));
        assert!(!session.has_data());
    }

    #[test]
    fn test_corrupt_upload_clears_file() {
        let mut session = Session::new(2, 1024);
        let err = session.upload(&UploadedFile::new("marks.xlsx", b"garbage".to_vec())).unwrap_err();
        assert!(matches!(err, ReportError::SpreadsheetRead(_)));
        assert!(session.file().is_none());
        assert_eq!(session.last_error(), Some("Failed to read Excel file."));
    }

    #[test]
    fn test_chart_toggles_and_cancel() {
        let mut session = Session::new(2, 1024);
        assert!(session.toggle_chart(ChartKind::Pie));
        session.set_chart(ChartKind::Bar, true);
        assert_eq!(session.selected_charts().len(), 2);

        session.cancel_report();
        assert!(session.selected_charts().is_empty());
    }
}
