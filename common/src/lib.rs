//! Student Report Common Library
//!
//! Domain logic shared by every front-end: sheet types, column layout,
//! scoring, remarks, report assembly and PDF page planning.

pub mod types;
pub mod layout;
pub mod error;
pub mod scoring;
pub mod remarks;
pub mod report;
pub mod export;

pub use types::{Cell, ChartKind, ChartSet, Grid, Row};
pub use layout::{Category, CategoryColumn, ColumnLayout};
pub use error::{Error, Result};
pub use scoring::{derive_category_score, derive_overall_score, derive_scores, grade_to_score, CategoryScore};
pub use remarks::{select_remark, RemarkSet, RemarkTier};
pub use report::{ChartPoint, ParameterRemark, PieSlice, Report, StudentIdentity};
