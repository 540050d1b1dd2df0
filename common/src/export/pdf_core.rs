//! PDF page planning shared by every PDF writer.
//!
//! Coordinates are millimetres measured from the top-left corner of an A4
//! portrait page. Text positions are baselines; chart positions are the top
//! edge of the image. Writers flip the y axis for their backend.

use crate::report::Report;
use crate::types::ChartKind;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

pub const LEFT_MM: f32 = 20.0;
pub const INDENT_MM: f32 = 25.0;
pub const TOP_MM: f32 = 20.0;
/// Blocks reaching below this start a new page
pub const PAGE_BOTTOM_MM: f32 = 287.0;
pub const CONTENT_WIDTH_MM: f32 = 170.0;

pub const CHART_WIDTH_MM: f32 = 170.0;
pub const CHART_HEIGHT_MM: f32 = 90.0;
pub const CHART_ADVANCE_MM: f32 = 100.0;

pub const TITLE_SIZE_PT: f32 = 18.0;
pub const BODY_SIZE_PT: f32 = 12.0;

pub const WRAPPED_LINE_MM: f32 = 7.0;
pub const SCORE_LINE_MM: f32 = 8.0;

pub const DOCUMENT_TITLE: &str = "Student Test Report";

/// pt -> mm (1pt = 25.4/72 mm)
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Average Helvetica glyph width in em
const AVG_GLYPH_EM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Positioned content
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x_mm: f32,
        y_mm: f32,
        size_pt: f32,
        weight: FontWeight,
        text: String,
    },
    Chart {
        kind: ChartKind,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedPage {
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub title: String,
    pub pages: Vec<PlannedPage>,
}

impl DocumentPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text element in page order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.elements.iter()).filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Chart { .. } => None,
        })
    }

    /// Charts placed in the document, in order
    pub fn charts(&self) -> Vec<ChartKind> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter_map(|e| match e {
                Element::Chart { kind, .. } => Some(*kind),
                Element::Text { .. } => None,
            })
            .collect()
    }
}

/// Estimated rendered width of a Helvetica string
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_GLYPH_EM * PT_TO_MM
}

/// Greedy word wrap to the given width. Words longer than a line are split.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    let glyph_mm = size_pt * AVG_GLYPH_EM * PT_TO_MM;
    let max_chars = ((max_width_mm / glyph_mm).floor() as usize).max(1);

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Vertical cursor that opens pages as content runs out
struct PageCursor {
    pages: Vec<PlannedPage>,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: vec![PlannedPage::default()],
            y: TOP_MM,
        }
    }

    /// Make room for a block of the given height
    fn reserve(&mut self, height_mm: f32) {
        let page_has_content = self.pages.last().is_some_and(|p| !p.elements.is_empty());
        if self.y + height_mm > PAGE_BOTTOM_MM && page_has_content {
            self.pages.push(PlannedPage::default());
            self.y = TOP_MM;
        }
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn text(&mut self, x_mm: f32, size_pt: f32, weight: FontWeight, text: impl Into<String>) {
        let y_mm = self.y;
        self.push(Element::Text { x_mm, y_mm, size_pt, weight, text: text.into() });
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }
}

/// Lay out a report. Only charts in `rendered` are placed, in render order.
pub fn plan_document(report: &Report, rendered: &[ChartKind]) -> DocumentPlan {
    let mut cursor = PageCursor::new();

    let title_x = A4_WIDTH_MM / 2.0 - text_width_mm(DOCUMENT_TITLE, TITLE_SIZE_PT) / 2.0;
    cursor.text(title_x, TITLE_SIZE_PT, FontWeight::Bold, DOCUMENT_TITLE);
    cursor.advance(20.0);

    cursor.text(LEFT_MM, BODY_SIZE_PT, FontWeight::Regular, format!("Student Name: {}", report.student.name));
    cursor.advance(10.0);
    cursor.text(LEFT_MM, BODY_SIZE_PT, FontWeight::Regular, format!("Student Number: {}", report.student.number));
    cursor.advance(15.0);

    for kind in ChartKind::ALL.iter().filter(|k| rendered.contains(k)) {
        cursor.reserve(CHART_HEIGHT_MM);
        let y_mm = cursor.y;
        cursor.push(Element::Chart {
            kind: *kind,
            x_mm: LEFT_MM,
            y_mm,
            width_mm: CHART_WIDTH_MM,
            height_mm: CHART_HEIGHT_MM,
        });
        cursor.advance(CHART_ADVANCE_MM);
    }

    cursor.reserve(10.0 + SCORE_LINE_MM);
    cursor.text(LEFT_MM, BODY_SIZE_PT, FontWeight::Bold, "Parameter Scores:");
    cursor.advance(10.0);
    for point in &report.chart_data {
        cursor.reserve(SCORE_LINE_MM);
        cursor.text(
            INDENT_MM,
            BODY_SIZE_PT,
            FontWeight::Regular,
            format!("{}: {:.2} / 10", point.parameter, point.score),
        );
        cursor.advance(SCORE_LINE_MM);
    }
    cursor.advance(5.0);

    cursor.reserve(10.0 + WRAPPED_LINE_MM);
    cursor.text(LEFT_MM, BODY_SIZE_PT, FontWeight::Bold, "Detailed Evaluation:");
    cursor.advance(10.0);
    for item in &report.parameters {
        let lines = wrap_text(
            &format!("{}: {}", item.parameter, item.remark),
            CONTENT_WIDTH_MM,
            BODY_SIZE_PT,
        );
        cursor.reserve(lines.len() as f32 * WRAPPED_LINE_MM);
        for line in lines {
            cursor.text(LEFT_MM, BODY_SIZE_PT, FontWeight::Regular, line);
            cursor.advance(WRAPPED_LINE_MM);
        }
        cursor.advance(5.0);
    }
    cursor.advance(10.0);

    cursor.reserve(15.0);
    cursor.text(
        LEFT_MM,
        BODY_SIZE_PT,
        FontWeight::Bold,
        format!("Overall Rating: {:.2} / 10", report.overall_score),
    );
    cursor.advance(15.0);

    if let Some(remarks) = &report.remarks {
        cursor.reserve(10.0 + WRAPPED_LINE_MM);
        cursor.text(LEFT_MM, BODY_SIZE_PT, FontWeight::Bold, "Remarks:");
        cursor.advance(10.0);
        for line in wrap_text(remarks, CONTENT_WIDTH_MM, BODY_SIZE_PT) {
            cursor.reserve(WRAPPED_LINE_MM);
            cursor.text(LEFT_MM, BODY_SIZE_PT, FontWeight::Regular, line);
            cursor.advance(WRAPPED_LINE_MM);
        }
    }

    DocumentPlan {
        title: format!("{} - {}", DOCUMENT_TITLE, report.student.name),
        pages: cursor.pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnLayout;
    use crate::types::{Cell, ChartSet, Row};

    fn report(remarks: Option<&str>) -> Report {
        let mut cells = vec![Cell::from(7i64), Cell::from("Ravi")];
        cells.extend(std::iter::repeat("high").take(15).map(Cell::from));
        Report::assemble(&Row::new(cells), &ColumnLayout::default(), &ChartSet::all(), remarks)
    }

    fn chart_y(plan: &DocumentPlan, kind: ChartKind) -> (usize, f32) {
        for (i, page) in plan.pages.iter().enumerate() {
            for e in &page.elements {
                if let Element::Chart { kind: k, y_mm, .. } = e {
                    if *k == kind {
                        return (i, *y_mm);
                    }
                }
            }
        }
        panic!("chart {:?} not placed", kind);
    }

    #[test]
    fn test_plan_without_charts_fits_one_page() {
        let plan = plan_document(&report(None), &[]);
        assert_eq!(plan.page_count(), 1);
        assert!(plan.charts().is_empty());

        let texts: Vec<&str> = plan.texts().collect();
        assert_eq!(texts[0], DOCUMENT_TITLE);
        assert!(texts.contains(&"Student Name: Ravi"));
        assert!(texts.contains(&"Student Number: 7"));
        assert!(texts.contains(&"Discipline: 8.00 / 10"));
        assert!(texts.contains(&"Overall Rating: 8.00 / 10"));
        assert!(!texts.contains(&"Remarks:"));
    }

    #[test]
    fn test_charts_follow_fixed_order_and_break_pages() {
        let plan = plan_document(&report(None), &[ChartKind::Radar, ChartKind::Pie, ChartKind::Bar]);
        assert_eq!(plan.charts(), vec![ChartKind::Bar, ChartKind::Pie, ChartKind::Radar]);

        assert_eq!(chart_y(&plan, ChartKind::Bar), (0, 65.0));
        assert_eq!(chart_y(&plan, ChartKind::Pie), (0, 165.0));
        // 265 + 90 runs past the bottom
        assert_eq!(chart_y(&plan, ChartKind::Radar), (1, TOP_MM));
    }

    #[test]
    fn test_unrendered_chart_is_omitted() {
        let plan = plan_document(&report(None), &[ChartKind::Pie]);
        assert_eq!(plan.charts(), vec![ChartKind::Pie]);
        assert_eq!(chart_y(&plan, ChartKind::Pie), (0, 65.0));
    }

    #[test]
    fn test_elements_stay_above_page_bottom() {
        let long = "word ".repeat(600);
        let plan = plan_document(&report(Some(&long)), &ChartKind::ALL);
        assert!(plan.page_count() >= 3);
        for page in &plan.pages {
            for e in &page.elements {
                match e {
                    Element::Text { y_mm, .. } => assert!(*y_mm <= PAGE_BOTTOM_MM),
                    Element::Chart { y_mm, height_mm, .. } => {
                        assert!(y_mm + height_mm <= PAGE_BOTTOM_MM)
                    }
                }
            }
        }
        assert!(plan.texts().any(|t| t == "Remarks:"));
    }

    #[test]
    fn test_wrap_text() {
        // room for 7 glyphs
        let glyph_mm = 12.0 * 0.5 * PT_TO_MM;
        let lines = wrap_text("aaa bbb ccc", glyph_mm * 7.5, 12.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);

        assert!(wrap_text("", 170.0, 12.0).is_empty());

        let long_word = "x".repeat(200);
        let lines = wrap_text(&long_word, 170.0, 12.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), long_word);
    }

    #[test]
    fn test_wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("Discipline: fine", 170.0, 12.0), vec!["Discipline: fine"]);
    }
}
