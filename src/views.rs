//! View models for the report flow
//!
//! upload -> student list -> chart selection -> report. Each view checks its
//! precondition and returns the inline "no data" error instead of failing
//! further down.

use crate::error::{ReportError, Result};
use crate::session::Session;
use student_report_common::{Cell, ChartKind, ColumnLayout, Report, Row};

/// One line of the student list
#[derive(Debug, Clone, PartialEq)]
pub struct StudentEntry {
    /// Index into the session's data rows
    pub index: usize,
    pub number: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentPage {
    pub number_header: String,
    pub name_header: String,
    pub entries: Vec<StudentEntry>,
    pub page: usize,
    pub total_pages: usize,
    pub total_students: usize,
}

impl StudentPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Pages needed for `count` items; an empty list still has one page
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Student list page (1-based, clamped into range)
pub fn students_view(
    session: &Session,
    layout: &ColumnLayout,
    page: usize,
    page_size: usize,
) -> Result<StudentPage> {
    if !session.has_data() {
        return Err(ReportError::NoData);
    }

    let rows = session.data_rows();
    let page_size = page_size.max(1);
    let total_pages = total_pages(rows.len(), page_size);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;

    let labels = session.grid().row(layout.label_row);
    let header = |column: usize| labels.map(|r| r.cell(column).to_string()).unwrap_or_default();

    let entries = rows
        .iter()
        .enumerate()
        .skip(start)
        .take(page_size)
        .map(|(index, row)| StudentEntry {
            index,
            number: row.cell(layout.number_column).to_string(),
            name: row.cell(layout.name_column).to_string(),
        })
        .collect();

    Ok(StudentPage {
        number_header: header(layout.number_column),
        name_header: header(layout.name_column),
        entries,
        page,
        total_pages,
        total_students: rows.len(),
    })
}

/// Find a data row by student number or name (exact, case-insensitive for names)
pub fn find_student(session: &Session, layout: &ColumnLayout, key: &str) -> Result<usize> {
    if !session.has_data() {
        return Err(ReportError::NoData);
    }
    let key = key.trim();
    let rows = session.data_rows();

    rows.iter()
        .position(|r| r.cell(layout.number_column).to_string() == key)
        .or_else(|| {
            rows.iter().position(|r| {
                r.cell(layout.name_column).to_string().to_lowercase() == key.to_lowercase()
            })
        })
        .ok_or_else(|| ReportError::StudentNotFound(key.to_string()))
}

/// Chart selection modal
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSelection {
    pub number: String,
    pub name: String,
    pub options: Vec<(ChartKind, bool)>,
}

impl ChartSelection {
    /// "Generate Report" is enabled once any chart is checked
    pub fn can_proceed(&self) -> bool {
        self.options.iter().any(|(_, checked)| *checked)
    }
}

pub fn chart_selection_view(session: &Session, layout: &ColumnLayout) -> Result<ChartSelection> {
    let student = session.selected_student().ok_or(ReportError::NoStudentSelected)?;
    let charts = session.selected_charts();
    Ok(ChartSelection {
        number: student.cell(layout.number_column).to_string(),
        name: student.cell(layout.name_column).to_string(),
        options: ChartKind::ALL.iter().map(|k| (*k, charts.contains(*k))).collect(),
    })
}

/// Report preview. Nothing is computed without a selected student.
pub fn report_view(session: &Session, layout: &ColumnLayout, remarks: Option<&str>) -> Result<Report> {
    let student = session.selected_student().ok_or(ReportError::NoStudentSelected)?;
    Ok(Report::assemble(student, layout, session.selected_charts(), remarks))
}

/// Uploaded sheet preview: first row as header, then up to `max_rows` rows
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub file_name: Option<String>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub truncated: bool,
}

pub fn preview_view(session: &Session, max_rows: usize) -> Result<Preview> {
    let grid = session.grid();
    let header_row = grid.row(0).ok_or(ReportError::NoData)?;
    let body = &grid.rows()[1..];

    Ok(Preview {
        file_name: session.file().map(|f| f.name.clone()),
        header: display_cells(header_row),
        rows: body.iter().take(max_rows).map(display_cells).collect(),
        truncated: body.len() > max_rows,
    })
}

fn display_cells(row: &Row) -> Vec<String> {
    row.cells().iter().map(Cell::to_string).collect()
}
