//! Score derivation
//!
//! Grade labels (high / moderate / low) become numbers, three grades make a
//! category score, five category scores make the overall score. Every
//! function here is pure and total.

use crate::layout::{Category, ColumnLayout, GRADES_PER_CATEGORY};
use crate::types::{Cell, Row};
use serde::{Deserialize, Serialize};

pub const HIGH_SCORE: f64 = 8.0;
pub const MODERATE_SCORE: f64 = 6.0;
pub const LOW_SCORE: f64 = 4.0;

/// Grade label to number. Unknown labels, numbers and blanks count as 0.
pub fn grade_to_score(cell: &Cell) -> f64 {
    let Some(label) = cell.as_text() else {
        return 0.0;
    };
    match label.to_lowercase().as_str() {
        "high" => HIGH_SCORE,
        "moderate" => MODERATE_SCORE,
        "low" => LOW_SCORE,
        _ => 0.0,
    }
}

/// Round half away from zero to 2 decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of the three grades starting at `start`, rounded to 2 decimals
pub fn derive_category_score(row: &Row, start: usize) -> f64 {
    let total: f64 = (start..start + GRADES_PER_CATEGORY)
        .map(|i| grade_to_score(row.cell(i)))
        .sum();
    round2(total / GRADES_PER_CATEGORY as f64)
}

/// Mean of the category scores, rounded to 2 decimals. Empty input gives 0.
pub fn derive_overall_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    round2(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Score of one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
}

/// Every category of the layout, in report order
pub fn derive_scores(row: &Row, layout: &ColumnLayout) -> Vec<CategoryScore> {
    layout
        .ordered()
        .into_iter()
        .map(|(category, start)| CategoryScore {
            category,
            score: derive_category_score(row, start),
        })
        .collect()
}
