// file: src/exporter/json.rs
// description: json export utilities for lint results

use crate::error::{ManifestError, Result};
use crate::models::FileReport;
use crate::pipeline::{FileFailure, LintRun};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct ReportTotals {
    pub files: usize,
    pub requirements: usize,
    pub errors: usize,
    pub warnings: usize,
    pub unreadable: usize,
}

#[derive(Debug, Serialize)]
pub struct LintReportDocument<'a> {
    pub generated_at: String,
    pub tool_version: &'static str,
    pub totals: ReportTotals,
    pub files: &'a [FileReport],
    pub failures: &'a [FileFailure],
}

impl<'a> LintReportDocument<'a> {
    pub fn from_run(run: &'a LintRun) -> Self {
        let summary = run.summary();
        Self {
            generated_at: Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION"),
            totals: ReportTotals {
                files: run.reports.len(),
                requirements: run.reports.iter().map(|r| r.requirement_count).sum(),
                errors: summary.errors,
                warnings: summary.warnings,
                unreadable: run.failures.len(),
            },
            files: &run.reports,
            failures: &run.failures,
        }
    }
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }

    pub fn render_run(&self, run: &LintRun) -> Result<String> {
        self.render(&LintReportDocument::from_run(run))
    }

    pub fn write_run(&self, run: &LintRun, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ManifestError::file_operation(parent, e))?;
        }

        let mut rendered = self.render_run(run)?;
        rendered.push('\n');
        fs::write(output, rendered).map_err(|e| ManifestError::file_operation(output, e))?;

        info!("Lint report written to {}", output.display());
        Ok(())
    }
}
