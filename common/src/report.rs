//! Report assembly
//!
//! Scores, remarks and chart selection of one student gathered into the
//! payload that both the preview and the exported document are built from.

use crate::error::Result;
use crate::layout::{Category, ColumnLayout};
use crate::remarks::{RemarkSet, RemarkTier};
use crate::scoring::{derive_overall_score, derive_scores};
use crate::types::{ChartKind, ChartSet, Row};
use serde::{Deserialize, Serialize};

/// Student identity as displayed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub number: String,
    pub name: String,
}

impl StudentIdentity {
    pub fn from_row(row: &Row, layout: &ColumnLayout) -> Self {
        Self {
            number: row.cell(layout.number_column).to_string(),
            name: row.cell(layout.name_column).to_string(),
        }
    }
}

/// (parameter, score, remark) of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRemark {
    pub parameter: String,
    pub category: Category,
    pub score: f64,
    pub tier: RemarkTier,
    pub remark: String,
}

/// Bar / radar data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub parameter: String,
    pub score: f64,
}

/// Pie slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

/// Assembled report of one student
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub student: StudentIdentity,
    pub parameters: Vec<ParameterRemark>,
    pub chart_data: Vec<ChartPoint>,
    pub pie_data: Vec<PieSlice>,
    pub overall_score: f64,
    pub charts: Vec<ChartKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl Report {
    /// Derive everything for one student row
    pub fn assemble(
        student: &Row,
        layout: &ColumnLayout,
        charts: &ChartSet,
        remarks: Option<&str>,
    ) -> Self {
        let scores = derive_scores(student, layout);

        let parameters: Vec<ParameterRemark> = scores
            .iter()
            .map(|s| {
                let tier = RemarkTier::for_score(s.score);
                ParameterRemark {
                    parameter: s.category.name().to_string(),
                    category: s.category,
                    score: s.score,
                    tier,
                    remark: RemarkSet::for_category(s.category).get(tier).to_string(),
                }
            })
            .collect();

        let chart_data: Vec<ChartPoint> = parameters
            .iter()
            .map(|p| ChartPoint { parameter: p.parameter.clone(), score: p.score })
            .collect();

        let pie_data = chart_data
            .iter()
            .map(|p| PieSlice { name: p.parameter.clone(), value: p.score })
            .collect();

        let values: Vec<f64> = scores.iter().map(|s| s.score).collect();

        Self {
            student: StudentIdentity::from_row(student, layout),
            parameters,
            chart_data,
            pie_data,
            overall_score: derive_overall_score(&values),
            charts: charts.to_vec(),
            remarks: remarks
                .filter(|r| !r.trim().is_empty())
                .map(str::to_string),
        }
    }

    pub fn score_of(&self, category: Category) -> Option<f64> {
        self.parameters
            .iter()
            .find(|p| p.category == category)
            .map(|p| p.score)
    }

    /// "<name>_Report.<ext>" with characters unsafe in file names replaced
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}_Report.{}", sanitize_file_stem(&self.student.name), extension)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "student".to_string()
    } else {
        cleaned
    }
}
