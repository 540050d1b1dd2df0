//! Grid and selection types
//!
//! Shared by the CLI and any other front-end:
//! - Cell / Row / Grid: the in-memory spreadsheet
//! - ChartKind / ChartSet: the charts chosen for a report

use serde::{Deserialize, Serialize};
use std::fmt;

/// One spreadsheet cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Cell {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            // 101.0 -> "101"
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Empty => Ok(()),
        }
    }
}

/// One spreadsheet row. Reads past the end yield `Cell::Empty`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Cell>);

static EMPTY_CELL: Cell = Cell::Empty;

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn cell(&self, index: usize) -> &Cell {
        self.0.get(index).unwrap_or(&EMPTY_CELL)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

/// Uploaded sheet: header rows followed by data rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// No rows means nothing has been uploaded yet
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows after the header block
    pub fn data_rows(&self, header_rows: usize) -> &[Row] {
        self.rows.get(header_rows..).unwrap_or(&[])
    }
}

/// Chart kinds offered for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Radar,
}

impl ChartKind {
    /// Render order in documents
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Pie, ChartKind::Radar];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Graph",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Radar => "Radar Chart",
        }
    }

    /// Heading shown above the chart
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Subject Scores",
            ChartKind::Pie => "Parameter Distribution",
            ChartKind::Radar => "Performance Overview",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" | "bar graph" => Ok(ChartKind::Bar),
            "pie" | "pie chart" => Ok(ChartKind::Pie),
            "radar" | "radar chart" => Ok(ChartKind::Radar),
            _ => Err(format!("Unknown chart: {}. Use bar, pie, or radar", s)),
        }
    }
}

/// Set of selected charts. Iteration always follows `ChartKind::ALL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSet {
    bar: bool,
    pie: bool,
    radar: bool,
}

impl ChartSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self { bar: true, pie: true, radar: true }
    }

    fn slot(&mut self, kind: ChartKind) -> &mut bool {
        match kind {
            ChartKind::Bar => &mut self.bar,
            ChartKind::Pie => &mut self.pie,
            ChartKind::Radar => &mut self.radar,
        }
    }

    pub fn contains(&self, kind: ChartKind) -> bool {
        match kind {
            ChartKind::Bar => self.bar,
            ChartKind::Pie => self.pie,
            ChartKind::Radar => self.radar,
        }
    }

    pub fn set(&mut self, kind: ChartKind, selected: bool) {
        *self.slot(kind) = selected;
    }

    /// Flip membership, returns the new state
    pub fn toggle(&mut self, kind: ChartKind) -> bool {
        let slot = self.slot(kind);
        *slot = !*slot;
        *slot
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        !(self.bar || self.pie || self.radar)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = ChartKind> + '_ {
        ChartKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }

    pub fn to_vec(&self) -> Vec<ChartKind> {
        self.iter().collect()
    }
}

impl FromIterator<ChartKind> for ChartSet {
    fn from_iter<I: IntoIterator<Item = ChartKind>>(iter: I) -> Self {
        let mut set = ChartSet::new();
        for kind in iter {
            set.set(kind, true);
        }
        set
    }
}
