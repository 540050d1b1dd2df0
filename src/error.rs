use thiserror::Error;

pub const INVALID_FILE_TYPE_MESSAGE: &str = "Only Excel (.xlsx) files are allowed.";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File size must be under 5MB.";
pub const READ_FAILED_MESSAGE: &str = "Failed to read Excel file.";
pub const NO_DATA_MESSAGE: &str = "No data found. Please upload Excel file first.";
pub const NO_STUDENT_MESSAGE: &str = "No student selected.";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{}", INVALID_FILE_TYPE_MESSAGE)]
    InvalidFileType,

    #[error("{}", FILE_TOO_LARGE_MESSAGE)]
    FileTooLarge { size: u64, limit: u64 },

    #[error("{}", READ_FAILED_MESSAGE)]
    SpreadsheetRead(String),

    #[error("{}", NO_DATA_MESSAGE)]
    NoData,

    #[error("{}", NO_STUDENT_MESSAGE)]
    NoStudentSelected,

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Select at least one chart.")]
    NoChartsSelected,

    #[error("Chart rendering error ({chart}): {reason}")]
    ChartRender { chart: String, reason: String },

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("Export cancelled")]
    Cancelled,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] student_report_common::Error),
}

impl ReportError {
    /// Input validation, parse and precondition errors: shown inline, state kept
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidFileType
                | ReportError::FileTooLarge { .. }
                | ReportError::SpreadsheetRead(_)
                | ReportError::NoData
                | ReportError::NoStudentSelected
                | ReportError::StudentNotFound(_)
                | ReportError::NoChartsSelected
        )
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
