pub mod charts;
pub mod pdf;

use crate::error::{ReportError, Result};
use charts::ChartRenderer;
use image::RgbImage;
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use student_report_common::export::pdf_core::plan_document;
use student_report_common::{ChartKind, Report};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Json,
    Both,
}

impl ReportFormat {
    pub fn includes_pdf(&self) -> bool {
        matches!(self, ReportFormat::Pdf | ReportFormat::Both)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::Both)
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "json" => Ok(ReportFormat::Json),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use pdf, json, or both", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Pdf => write!(f, "pdf"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Both => write!(f, "both"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Directory, or a file path whose stem names the outputs
    pub output: PathBuf,
    pub format: ReportFormat,
}

#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub paths: Vec<PathBuf>,
    /// Charts left out of the PDF, with the reason
    pub skipped: Vec<(ChartKind, String)>,
}

/// Progress ticks used by `export_report` for `format`
pub fn step_count(report: &Report, format: ReportFormat) -> u64 {
    let mut steps = 0;
    if format.includes_pdf() {
        // charts + plan + render + write
        steps += report.charts.len() as u64 + 3;
    }
    if format.includes_json() {
        steps += 1;
    }
    steps
}

fn output_path_for(output: &Path, report: &Report, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(report.file_name(extension))
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        match output.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => parent.join(format!("{}.{}", stem, extension)),
            None => parent.join(report.file_name(extension)),
        }
    }
}

/// Rasterize, plan, render and write, strictly in that order.
///
/// A chart that fails to render is logged, reported in `skipped` and left
/// out of the document. The file is only touched by the last step.
pub async fn export_report(
    report: &Report,
    renderer: Arc<dyn ChartRenderer>,
    options: &ExportOptions,
    progress: &ProgressBar,
) -> Result<ExportOutcome> {
    let mut outcome = ExportOutcome::default();

    if options.output.extension().is_none() {
        tokio::fs::create_dir_all(&options.output).await?;
    }

    if options.format.includes_pdf() {
        let images = rasterize_charts(report, renderer, progress, &mut outcome.skipped).await;
        let rendered: Vec<ChartKind> = report.charts.iter().copied().filter(|k| images.contains_key(k)).collect();

        progress.set_message("Planning pages");
        let plan = plan_document(report, &rendered);
        log::debug!("document planned: {} page(s)", plan.page_count());
        progress.inc(1);

        progress.set_message("Rendering PDF");
        let bytes = tokio::task::spawn_blocking(move || pdf::render_pdf(&plan, &images))
            .await
            .map_err(|e| ReportError::PdfGeneration(e.to_string()))??;
        progress.inc(1);

        progress.set_message("Writing PDF");
        let path = output_path_for(&options.output, report, "pdf");
        tokio::fs::write(&path, bytes).await?;
        log::info!("PDF written: {}", path.display());
        progress.inc(1);
        outcome.paths.push(path);
    }

    if options.format.includes_json() {
        progress.set_message("Writing JSON");
        let path = output_path_for(&options.output, report, "json");
        tokio::fs::write(&path, report.to_json()?).await?;
        log::info!("JSON written: {}", path.display());
        progress.inc(1);
        outcome.paths.push(path);
    }

    Ok(outcome)
}

async fn rasterize_charts(
    report: &Report,
    renderer: Arc<dyn ChartRenderer>,
    progress: &ProgressBar,
    skipped: &mut Vec<(ChartKind, String)>,
) -> HashMap<ChartKind, RgbImage> {
    let shared = Arc::new(report.clone());
    let mut images = HashMap::new();

    for kind in ChartKind::ALL.iter().copied().filter(|k| report.charts.contains(k)) {
        progress.set_message(format!("Drawing {}", kind.label()));
        let renderer = Arc::clone(&renderer);
        let data = Arc::clone(&shared);

        let result = tokio::task::spawn_blocking(move || renderer.render(kind, &data)).await;
        match result {
            Ok(Ok(image)) => {
                images.insert(kind, image);
            }
            Ok(Err(e)) => {
                log::warn!("{} skipped: {}", kind.label(), e);
                skipped.push((kind, e.to_string()));
            }
            Err(e) => {
                log::warn!("{} skipped: renderer panicked: {}", kind.label(), e);
                skipped.push((kind, format!("renderer panicked: {}", e)));
            }
        }
        progress.inc(1);
    }
    images
}
