use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use student_report::{cli, config, error, export, ingest, interactive, session, views};
use cli::{Cli, Commands};
use config::Config;
use export::charts::PlottersRenderer;
use export::{ExportOptions, ReportFormat};
use session::Session;
use student_report_common::{ChartKind, Report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Preview { file } => {
            let session = load_session(&file, &config).await?;
            let preview = views::preview_view(&session, config.preview_rows)?;

            if let Some(name) = &preview.file_name {
                println!("{}\n", name);
            }
            println!("{}", preview.header.join(" | "));
            for row in &preview.rows {
                println!("{}", row.join(" | "));
            }
            if preview.truncated {
                println!("... (first {} rows shown)", config.preview_rows);
            }
        }

        Commands::Students { file, page } => {
            let session = load_session(&file, &config).await?;
            let view = views::students_view(&session, &config.layout, page, config.page_size)?;

            println!("{:>6}  {}", view.number_header, view.name_header);
            for entry in &view.entries {
                println!("{:>6}  {}", entry.number, entry.name);
            }
            println!(
                "\npage {} of {} ({} students)",
                view.page, view.total_pages, view.total_students
            );
        }

        Commands::Report { file, student, charts, remarks, format, output } => {
            println!("student-report - report\n");

            println!("[1/3] Reading {}...", file.display());
            let mut session = load_session(&file, &config).await?;
            println!("✔ {} students\n", session.data_rows().len());

            println!("[2/3] Scoring...");
            let report = match student {
                Some(key) => {
                    let index = views::find_student(&session, &config.layout, &key)?;
                    session.select_student(index)?;
                    let charts = if charts.is_empty() { ChartKind::ALL.to_vec() } else { charts };
                    for kind in charts {
                        session.set_chart(kind, true);
                    }
                    views::report_view(&session, &config.layout, remarks.as_deref())?
                }
                None => match interactive::run_interactive(&mut session, &config)? {
                    Some(report) => report,
                    None => {
                        println!("Nothing exported");
                        return Ok(());
                    }
                },
            };
            print_summary(&report);

            println!("[3/3] Exporting...");
            run_export(&report, &config, format, output).await?;
            println!("\n✅ Done");
        }

        Commands::Interactive { file, format, output } => {
            println!("student-report - interactive\n");
            let mut session = load_session(&file, &config).await?;

            let Some(report) = interactive::run_interactive(&mut session, &config)? else {
                println!("Nothing exported");
                return Ok(());
            };
            print_summary(&report);
            run_export(&report, &config, format, output).await?;
            println!("\n✅ Done");
        }

        Commands::Config { show, init } => {
            if init {
                let path = match &cli.config {
                    Some(p) => p.clone(),
                    None => Config::config_path()?,
                };
                Config::default().save(&path)?;
                println!("✔ Wrote default config: {}", path.display());
            }

            if show || !init {
                println!("Config:");
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

async fn load_session(file: &Path, config: &Config) -> anyhow::Result<Session> {
    let upload = ingest::read_upload(file, config.max_upload_bytes).await?;
    log::debug!("{}: {:.1} KB", upload.name, upload.size_kb());

    let mut session = Session::from_config(config);
    session.upload(&upload)?;
    Ok(session)
}

fn print_summary(report: &Report) {
    println!("\n{} ({})", report.student.name, report.student.number);
    for p in &report.parameters {
        println!("  {:<16} {:>5.2} / 10", p.parameter, p.score);
    }
    println!("  {:<16} {:>5.2} / 10\n", "Overall", report.overall_score);
}

async fn run_export(
    report: &Report,
    config: &Config,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let output = output
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let options = ExportOptions { output, format };
    let renderer = Arc::new(PlottersRenderer::new(config.chart_width, config.chart_height));

    let pb = ProgressBar::new(export::step_count(report, format));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let outcome = tokio::select! {
        result = export::export_report(report, renderer, &options, &pb) => result?,
        _ = tokio::signal::ctrl_c() => {
            pb.abandon_with_message("cancelled");
            return Err(error::ReportError::Cancelled.into());
        }
    };
    pb.finish_and_clear();

    for (kind, reason) in &outcome.skipped {
        println!("⚠ {} skipped: {}", kind.label(), reason);
    }
    for path in &outcome.paths {
        println!("✔ Saved: {}", path.display());
    }
    Ok(())
}
