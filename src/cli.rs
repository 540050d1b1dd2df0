use crate::export::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use student_report_common::ChartKind;

#[derive(Parser)]
#[command(name = "student-report")]
#[command(about = "Student assessment report generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ~/.config/student-report/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the first rows of a workbook
    Preview {
        #[arg(required = true)]
        file: PathBuf,
    },

    /// List students, one page at a time
    Students {
        #[arg(required = true)]
        file: PathBuf,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Generate one student's report
    Report {
        #[arg(required = true)]
        file: PathBuf,

        /// Student number or name (interactive picker when omitted)
        #[arg(short, long)]
        student: Option<String>,

        /// Charts to include (bar,pie,radar); needs --student
        #[arg(short, long, value_delimiter = ',', requires = "student")]
        charts: Vec<ChartKind>,

        /// Free-text remarks appended to the report; needs --student
        #[arg(short, long, requires = "student")]
        remarks: Option<String>,

        /// Output format (pdf/json/both)
        #[arg(short, long, default_value = "pdf")]
        format: ReportFormat,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pick a student and charts interactively, then export
    Interactive {
        #[arg(required = true)]
        file: PathBuf,

        /// Output format (pdf/json/both)
        #[arg(short, long, default_value = "pdf")]
        format: ReportFormat,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or create the config file
    Config {
        /// Print the effective config
        #[arg(long)]
        show: bool,

        /// Write the default config file
        #[arg(long)]
        init: bool,
    },
}
