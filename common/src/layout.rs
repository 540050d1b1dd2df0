//! Column layout of the assessment sheet
//!
//! Which columns hold the student number, the name, and the three grade
//! columns of each evaluation category. All positional assumptions about the
//! sheet live here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grade columns per category
pub const GRADES_PER_CATEGORY: usize = 3;

/// Evaluation categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Discipline,
    Consistency,
    #[serde(rename = "Self-Motivation")]
    SelfMotivation,
    Accountability,
    #[serde(rename = "Stress Handling")]
    StressHandling,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Discipline,
        Category::Consistency,
        Category::SelfMotivation,
        Category::Accountability,
        Category::StressHandling,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Discipline => "Discipline",
            Category::Consistency => "Consistency",
            Category::SelfMotivation => "Self-Motivation",
            Category::Accountability => "Accountability",
            Category::StressHandling => "Stress Handling",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First grade column of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryColumn {
    pub category: Category,
    pub start_column: usize,
}

/// Sheet layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnLayout {
    /// Rows before the first student (title row + label row)
    pub header_rows: usize,
    /// Header row whose labels name the columns
    pub label_row: usize,
    pub number_column: usize,
    pub name_column: usize,
    pub categories: Vec<CategoryColumn>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            header_rows: 2,
            label_row: 1,
            number_column: 0,
            name_column: 1,
            categories: vec![
                CategoryColumn { category: Category::Discipline, start_column: 2 },
                CategoryColumn { category: Category::Consistency, start_column: 5 },
                CategoryColumn { category: Category::SelfMotivation, start_column: 8 },
                CategoryColumn { category: Category::Accountability, start_column: 11 },
                CategoryColumn { category: Category::StressHandling, start_column: 14 },
            ],
        }
    }
}

impl ColumnLayout {
    /// Start column of a category
    pub fn start_of(&self, category: Category) -> Option<usize> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.start_column)
    }

    /// Every category exactly once, label row inside the header block
    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let count = self.categories.iter().filter(|c| c.category == category).count();
            if count != 1 {
                return Err(Error::Layout(format!(
                    "category {} must appear exactly once (found {})",
                    category, count
                )));
            }
        }
        if self.header_rows > 0 && self.label_row >= self.header_rows {
            return Err(Error::Layout(format!(
                "label row {} is outside the {} header rows",
                self.label_row, self.header_rows
            )));
        }
        Ok(())
    }

    /// Categories in report order with their start columns
    pub fn ordered(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .filter_map(|c| self.start_of(*c).map(|start| (*c, start)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offsets() {
        let layout = ColumnLayout::default();
        let offsets: Vec<usize> = layout.ordered().iter().map(|(_, s)| *s).collect();
        assert_eq!(offsets, vec![2, 5, 8, 11, 14]);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_category() {
        let mut layout = ColumnLayout::default();
        layout.categories.pop();
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("Stress Handling"));
    }

    #[test]
    fn test_validate_label_row() {
        let layout = ColumnLayout { label_row: 3, ..ColumnLayout::default() };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&Category::SelfMotivation).unwrap();
        assert_eq!(json, "\"Self-Motivation\"");
        let parsed: Category = serde_json::from_str("\"Stress Handling\"").unwrap();
        assert_eq!(parsed, Category::StressHandling);
    }

    #[test]
    fn test_layout_from_partial_json() {
        let layout: ColumnLayout = serde_json::from_str(r#"{"headerRows": 1, "labelRow": 0}"#).unwrap();
        assert_eq!(layout.header_rows, 1);
        assert_eq!(layout.categories.len(), 5);
    }
}
