//! Chart rasterization
//!
//! Bar, pie and radar charts drawn with plotters into an in-memory RGB buffer.

use crate::error::{ReportError, Result};
use image::RgbImage;
use plotters::prelude::*;
use plotters::coord::Shift;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use student_report_common::{ChartKind, Report};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Highest possible category score
pub const MAX_SCORE: f64 = 10.0;

const BAR_COLOR: RGBColor = RGBColor(0x3b, 0x82, 0xf6);
const TEXT_COLOR: RGBColor = RGBColor(0x1f, 0x29, 0x37);
const GRID_COLOR: RGBColor = RGBColor(0xd1, 0xd5, 0xdb);
const SLICE_COLORS: [RGBColor; 5] = [
    RGBColor(0x3b, 0x82, 0xf6),
    RGBColor(0x10, 0xb9, 0x81),
    RGBColor(0xf5, 0x9e, 0x0b),
    RGBColor(0xef, 0x44, 0x44),
    RGBColor(0x8b, 0x5c, 0xf6),
];

/// Turns one chart of a report into an image
pub trait ChartRenderer: Send + Sync {
    fn render(&self, kind: ChartKind, report: &Report) -> Result<RgbImage>;
}

/// plotters bitmap renderer
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, kind: ChartKind, report: &Report) -> Result<RgbImage> {
        let (w, h) = (self.width, self.height);
        let mut buffer = vec![0u8; (w as usize) * (h as usize) * 3];

        let drawn = {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            draw_chart(&root, kind, report).and_then(|_| root.present().map_err(Into::into))
        };
        drawn.map_err(|e| ReportError::ChartRender {
            chart: kind.label().to_string(),
            reason: e.to_string(),
        })?;

        RgbImage::from_raw(w, h, buffer).ok_or_else(|| ReportError::ChartRender {
            chart: kind.label().to_string(),
            reason: "pixel buffer size mismatch".into(),
        })
    }
}

fn draw_chart(root: &Area<'_>, kind: ChartKind, report: &Report) -> DrawResult {
    root.fill(&WHITE)?;
    match kind {
        ChartKind::Bar => draw_bar(root, report),
        ChartKind::Pie => draw_pie(root, report),
        ChartKind::Radar => draw_radar(root, report),
    }
}

fn draw_bar(root: &Area<'_>, report: &Report) -> DrawResult {
    let names: Vec<String> = report.chart_data.iter().map(|p| p.parameter.clone()).collect();
    let count = names.len().max(1) as u32;

    let mut chart = ChartBuilder::on(root)
        .caption(ChartKind::Bar.title(), ("sans-serif", 40).into_font())
        .margin(30)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..count).into_segmented(), 0f64..MAX_SCORE)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count as usize)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .label_style(("sans-serif", 24).into_font())
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BAR_COLOR.filled())
            .margin(40)
            .data(report.chart_data.iter().enumerate().map(|(i, p)| (i as u32, p.score))),
    )?;

    let label_style = TextStyle::from(("sans-serif", 26).into_font())
        .color(&TEXT_COLOR)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(report.chart_data.iter().enumerate().map(|(i, p)| {
        Text::new(
            format!("{:.2}", p.score),
            (SegmentValue::CenterOf(i as u32), (p.score + 0.15).min(MAX_SCORE)),
            label_style.clone(),
        )
    }))?;

    Ok(())
}

fn draw_pie(root: &Area<'_>, report: &Report) -> DrawResult {
    let (w, h) = root.dim_in_pixel();
    let title_style = TextStyle::from(("sans-serif", 40).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(ChartKind::Pie.title(), (w as i32 / 2, 20), title_style))?;

    let center = (w as i32 / 2, h as i32 / 2 + 10);
    let radius = (h.min(w) as f64 * 0.32).max(10.0);
    let values: Vec<f64> = report.pie_data.iter().map(|s| s.value).collect();

    let wedges = pie_wedges(&values, center, radius, 90);
    if wedges.is_empty() {
        root.draw(&Circle::new(center, radius as i32, GRID_COLOR.stroke_width(2)))?;
    }

    let label_style = TextStyle::from(("sans-serif", 24).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    for wedge in &wedges {
        let color = SLICE_COLORS[wedge.index % SLICE_COLORS.len()];
        root.draw(&Polygon::new(wedge.points.clone(), color.filled()))?;

        let slice = &report.pie_data[wedge.index];
        let label_at = polar(center, radius + 45.0, wedge.mid_angle);
        root.draw(&Text::new(
            format!("{}: {:.2}", slice.name, slice.value),
            label_at,
            label_style.clone(),
        ))?;
    }

    // legend row
    let legend_y = h as i32 - 40;
    let slot = w as i32 / report.pie_data.len().max(1) as i32;
    let legend_style = TextStyle::from(("sans-serif", 22).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
    for (i, slice) in report.pie_data.iter().enumerate() {
        let x = slot * i as i32 + 30;
        let color = SLICE_COLORS[i % SLICE_COLORS.len()];
        root.draw(&Rectangle::new([(x, legend_y - 10), (x + 20, legend_y + 10)], color.filled()))?;
        root.draw(&Text::new(slice.name.clone(), (x + 28, legend_y), legend_style.clone()))?;
    }

    Ok(())
}

fn draw_radar(root: &Area<'_>, report: &Report) -> DrawResult {
    let (w, h) = root.dim_in_pixel();
    let title_style = TextStyle::from(("sans-serif", 40).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(ChartKind::Radar.title(), (w as i32 / 2, 20), title_style))?;

    let center = (w as i32 / 2, h as i32 / 2 + 30);
    let radius = (h.min(w) as f64 * 0.33).max(10.0);
    let axes = report.chart_data.len();
    if axes < 3 {
        return Err("radar chart needs at least three parameters".into());
    }

    for ring in [2.0, 4.0, 6.0, 8.0, MAX_SCORE] {
        let mut points = radar_vertices(&vec![ring; axes], MAX_SCORE, center, radius);
        points.push(points[0]);
        root.draw(&PathElement::new(points, GRID_COLOR.stroke_width(1)))?;
    }

    let label_style = TextStyle::from(("sans-serif", 24).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    let outer = radar_vertices(&vec![MAX_SCORE; axes], MAX_SCORE, center, radius);
    for (i, end) in outer.iter().enumerate() {
        root.draw(&PathElement::new(vec![center, *end], GRID_COLOR.stroke_width(1)))?;
        let label_at = polar(center, radius + 40.0, axis_angle(i, axes));
        root.draw(&Text::new(report.chart_data[i].parameter.clone(), label_at, label_style.clone()))?;
    }

    let scores: Vec<f64> = report.chart_data.iter().map(|p| p.score).collect();
    let shape = radar_vertices(&scores, MAX_SCORE, center, radius);
    root.draw(&Polygon::new(shape.clone(), BAR_COLOR.mix(0.6).filled()))?;
    let mut outline = shape;
    outline.push(outline[0]);
    root.draw(&PathElement::new(outline, BAR_COLOR.stroke_width(3)))?;

    Ok(())
}

/// Pie slice outline
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    /// Index into the pie data
    pub index: usize,
    pub mid_angle: f64,
    pub points: Vec<(i32, i32)>,
}

/// Slices clockwise from 12 o'clock. Zero values get no slice; an all-zero pie is empty.
pub fn pie_wedges(values: &[f64], center: (i32, i32), radius: f64, steps_per_turn: usize) -> Vec<Wedge> {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut wedges = Vec::new();
    let mut start = -PI / 2.0;
    for (index, value) in values.iter().enumerate() {
        if !value.is_finite() || *value <= 0.0 {
            continue;
        }
        let sweep = value / total * 2.0 * PI;
        let steps = ((sweep / (2.0 * PI)) * steps_per_turn as f64).ceil().max(1.0) as usize;

        let mut points = vec![center];
        for s in 0..=steps {
            let angle = start + sweep * s as f64 / steps as f64;
            points.push(polar(center, radius, angle));
        }
        wedges.push(Wedge { index, mid_angle: start + sweep / 2.0, points });
        start += sweep;
    }
    wedges
}

/// Angle of the i-th radar axis, first axis pointing up
pub fn axis_angle(i: usize, axes: usize) -> f64 {
    -PI / 2.0 + 2.0 * PI * i as f64 / axes.max(1) as f64
}

/// Radar polygon vertices, values clamped to `0..=max`
pub fn radar_vertices(values: &[f64], max: f64, center: (i32, i32), radius: f64) -> Vec<(i32, i32)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let ratio = if v.is_finite() { (v / max).clamp(0.0, 1.0) } else { 0.0 };
            polar(center, radius * ratio, axis_angle(i, values.len()))
        })
        .collect()
}

fn polar(center: (i32, i32), r: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (r * angle.cos()).round() as i32,
        center.1 + (r * angle.sin()).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_report_common::{Cell, ChartSet, ColumnLayout, Row};

    fn report_with_grades(grade: &str) -> Report {
        let mut cells = vec![Cell::from(1i64), Cell::from("Asha")];
        cells.extend(std::iter::repeat(grade).take(15).map(Cell::from));
        Report::assemble(&Row::new(cells), &ColumnLayout::default(), &ChartSet::all(), None)
    }

    #[test]
    fn test_plotters_renders_every_chart() {
        let renderer = PlottersRenderer::new(1700, 900);
        for report in [report_with_grades("high"), report_with_grades("n/a")] {
            for kind in ChartKind::ALL {
                let image = renderer.render(kind, &report).unwrap();
                assert_eq!(image.dimensions(), (1700, 900));
            }
        }
    }

    #[test]
    fn test_pie_wedges_cover_circle() {
        let wedges = pie_wedges(&[1.0, 1.0, 2.0], (100, 100), 50.0, 100);
        assert_eq!(wedges.len(), 3);
        // first slice starts at 12 o'clock
        assert_eq!(wedges[0].points[1], (100, 50));
        // last slice ends back at 12 o'clock
        assert_eq!(*wedges[2].points.last().unwrap(), (100, 50));
        assert!((wedges[2].mid_angle - PI).abs() < 1e-9);
    }

    #[test]
    fn test_pie_wedges_skip_zero_and_empty() {
        let wedges = pie_wedges(&[0.0, 4.0, 0.0], (0, 0), 10.0, 36);
        assert_eq!(wedges.len(), 1);
        assert_eq!(wedges[0].index, 1);

        assert!(pie_wedges(&[0.0; 5], (0, 0), 10.0, 36).is_empty());
        assert!(pie_wedges(&[], (0, 0), 10.0, 36).is_empty());
    }

    #[test]
    fn test_radar_vertices() {
        let v = radar_vertices(&[10.0, 0.0, 5.0, 20.0], 10.0, (100, 100), 40.0);
        assert_eq!(v[0], (100, 60));
        assert_eq!(v[1], (100, 100));
        // pointing down at half radius
        assert_eq!(v[2], (100, 120));
        // clamped to the outer ring, pointing left
        assert_eq!(v[3], (60, 100));
    }
}
