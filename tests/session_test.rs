//! Session flow: upload, select, cancel, report preconditions

use student_report::error::ReportError;
use student_report::ingest::UploadedFile;
use student_report::session::Session;
use student_report::views;
use student_report_common::{Cell, ChartKind, ColumnLayout, Grid, Row};

const LIMIT: u64 = 5 * 1024 * 1024;

fn fixture_bytes() -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Assessment").unwrap();
    sheet.write_string(1, 0, "Roll No").unwrap();
    sheet.write_string(1, 1, "Student").unwrap();
    for i in 0..23u32 {
        sheet.write_number(i + 2, 0, (i + 1) as f64).unwrap();
        sheet.write_string(i + 2, 1, &format!("Student {}", i + 1)).unwrap();
        for col in 2..17u16 {
            sheet.write_string(i + 2, col, "moderate").unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

fn loaded_session() -> Session {
    let mut session = Session::new(2, LIMIT);
    session.upload(&UploadedFile::new("class.xlsx", fixture_bytes())).unwrap();
    session
}

/// Non-.xlsx upload leaves a loaded grid untouched
#[test]
fn test_wrong_type_keeps_grid() {
    let mut session = loaded_session();
    let before: Grid = session.grid().clone();

    let err = session.upload(&UploadedFile::new("class.ods", vec![0; 10])).unwrap_err();
    assert_eq!(err.to_string(), "Only Excel (.xlsx) files are allowed.");
    assert_eq!(session.grid(), &before);
    assert_eq!(session.file().map(|f| f.name.as_str()), Some("class.xlsx"));
}

/// Oversized upload is rejected without parsing
#[test]
fn test_oversized_upload() {
    let mut session = Session::new(2, LIMIT);
    let mut upload = UploadedFile::new("big.xlsx", b"not parsed".to_vec());
    upload.size = LIMIT + 1;

    let err = session.upload(&upload).unwrap_err();
    assert!(matches!(err, ReportError::FileTooLarge { .. }));
    assert_eq!(session.last_error(), Some("File size must be under 5MB."));
    assert!(!session.has_data());
}

/// Report without a selected student computes nothing
#[test]
fn test_report_requires_student() {
    let session = loaded_session();
    let err = views::report_view(&session, &ColumnLayout::default(), None).unwrap_err();
    assert_eq!(err.to_string(), "No student selected.");
}

#[test]
fn test_pagination() {
    let session = loaded_session();
    let layout = ColumnLayout::default();

    let first = views::students_view(&session, &layout, 1, 10).unwrap();
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.total_students, 23);
    assert_eq!(first.entries.len(), 10);
    assert_eq!(first.number_header, "Roll No");
    assert!(!first.has_previous());
    assert!(first.has_next());

    let last = views::students_view(&session, &layout, 99, 10).unwrap();
    assert_eq!(last.page, 3);
    assert_eq!(last.entries.len(), 3);
    assert_eq!(last.entries[0].index, 20);
    assert_eq!(last.entries[0].name, "Student 21");

    let clamped = views::students_view(&session, &layout, 0, 10).unwrap();
    assert_eq!(clamped.page, 1);
}

#[test]
fn test_select_and_report() {
    let mut session = loaded_session();
    let layout = ColumnLayout::default();

    let index = views::find_student(&session, &layout, "student 5").unwrap();
    assert_eq!(index, 4);
    assert_eq!(views::find_student(&session, &layout, "12").unwrap(), 11);
    assert!(matches!(
        views::find_student(&session, &layout, "nobody"),
        Err(ReportError::StudentNotFound(_))
    ));

    let row = session.select_student(index).unwrap();
    assert_eq!(row.cell(1), &Cell::text("Student 5"));

    let modal = views::chart_selection_view(&session, &layout).unwrap();
    assert!(!modal.can_proceed());

    session.toggle_chart(ChartKind::Radar);
    session.toggle_chart(ChartKind::Bar);
    let modal = views::chart_selection_view(&session, &layout).unwrap();
    assert!(modal.can_proceed());

    let report = views::report_view(&session, &layout, Some("  ")).unwrap();
    assert_eq!(report.student.name, "Student 5");
    assert_eq!(report.charts, vec![ChartKind::Bar, ChartKind::Radar]);
    assert_eq!(report.overall_score, 6.0);
    assert!(report.remarks.is_none());

    // same selection, same report
    let again = views::report_view(&session, &layout, None).unwrap();
    assert_eq!(report, again);
}

#[test]
fn test_cancel_clears_charts_and_upload_resets_selection() {
    let mut session = loaded_session();
    session.select_student(0).unwrap();
    session.set_chart(ChartKind::Pie, true);

    session.cancel_report();
    assert!(session.selected_charts().is_empty());
    assert_eq!(session.selected_student().map(|r| r.cell(1).to_string()), Some("Student 1".to_string()));

    session.select_student(1).unwrap();
    session.upload(&UploadedFile::new("class.xlsx", fixture_bytes())).unwrap();
    assert!(session.selected_student().is_none());

    session.remove_file();
    assert!(!session.has_data());
    assert!(matches!(session.select_student(0), Err(ReportError::NoData)));
}

#[test]
fn test_preview_truncates() {
    let session = loaded_session();
    let preview = views::preview_view(&session, 5).unwrap();
    assert_eq!(preview.file_name.as_deref(), Some("class.xlsx"));
    assert_eq!(preview.header, vec!["Assessment".to_string()]);
    assert_eq!(preview.rows.len(), 5);
    assert!(preview.truncated);
    assert_eq!(preview.rows[0], vec!["Roll No".to_string(), "Student".to_string()]);
}

#[test]
fn test_selected_row_is_a_copy() {
    let mut session = loaded_session();
    let selected: Row = session.select_student(2).unwrap().clone();
    assert_eq!(session.selected_student(), Some(&selected));
    assert_eq!(&session.data_rows()[2], &selected);
}

/// A corrupt re-upload forgets the file but keeps the loaded grid
#[test]
fn test_parse_error_keeps_previous_grid() {
    let mut session = loaded_session();
    let before: Grid = session.grid().clone();

    let err = session.upload(&UploadedFile::new("x.xlsx", b"garbage".to_vec())).unwrap_err();
    assert!(matches!(err, ReportError::SpreadsheetRead(_)));
    assert_eq!(session.grid(), &before);
    assert!(session.file().is_none());
    assert_eq!(session.last_error(), Some("Failed to read Excel file."));
    assert_eq!(session.data_rows().len(), 23);
}
