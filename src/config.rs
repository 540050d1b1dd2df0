use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use student_report_common::ColumnLayout;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub layout: ColumnLayout,
    pub max_upload_bytes: u64,
    /// Students per list page
    pub page_size: usize,
    /// Rows shown by `preview`
    pub preview_rows: usize,
    pub chart_width: u32,
    pub chart_height: u32,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            page_size: 10,
            preview_rows: 50,
            // 170x90mm at 254dpi
            chart_width: 1700,
            chart_height: 900,
            output_dir: None,
        }
    }
}

impl Config {
    /// Explicit path first, then the per-user file, then defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(ReportError::FileNotFound(p.display().to_string()));
                }
                p.to_path_buf()
            }
            None => {
                let p = Self::config_path()?;
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("config loaded from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReportError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("student-report").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if self.page_size == 0 {
            return Err(ReportError::Config("pageSize must be at least 1".into()));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ReportError::Config("chart size must be non-zero".into()));
        }
        Ok(())
    }
}
