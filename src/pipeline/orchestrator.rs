// file: src/pipeline/orchestrator.rs
// description: concurrent lint runs over discovered manifest files
// reference: futures buffer_unordered fan-out over tokio file reads

use crate::config::Config;
use crate::discovery::ScannedManifest;
use crate::error::{ManifestError, Result};
use crate::lint::{LintSummary, Linter};
use crate::models::FileReport;
use crate::parser::ManifestParser;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LintRun {
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
    pub stats: PipelineStats,
}

impl LintRun {
    pub fn summary(&self) -> LintSummary {
        LintSummary::from_diagnostics(self.reports.iter().flat_map(|r| r.diagnostics.iter()))
    }

    /// Unreadable files always fail the run.
    pub fn is_failure(&self, deny_warnings: bool) -> bool {
        !self.failures.is_empty() || self.summary().is_failure(deny_warnings)
    }
}

pub struct LintPipeline {
    parser: Arc<ManifestParser>,
    linter: Arc<Linter>,
    parallel_workers: usize,
    show_progress: bool,
    colored: bool,
}

impl LintPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            parser: Arc::new(ManifestParser::new()),
            linter: Arc::new(Linter::new(&config.lint)?),
            parallel_workers: config.pipeline.parallel_workers.max(1),
            show_progress: false,
            colored: true,
        })
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored = colored;
        self
    }

    /// Parses and lints `content` as if it had been read from `path`.
    pub fn lint_content(&self, path: &str, content: &str) -> FileReport {
        let manifest = self.parser.parse(content);
        let diagnostics = self.linter.lint(&manifest);
        FileReport::new(path.to_string(), content, &manifest, diagnostics)
    }

    pub async fn run(&self, files: Vec<ScannedManifest>) -> LintRun {
        info!("Linting {} manifest files", files.len());

        let tracker = Arc::new(if self.show_progress && files.len() > 1 {
            ProgressTracker::with_options(files.len(), self.colored, true)
        } else {
            ProgressTracker::hidden(files.len())
        });

        let results = stream::iter(files.into_iter().map(|file| {
            let parser = Arc::clone(&self.parser);
            let linter = Arc::clone(&self.linter);
            let tracker = Arc::clone(&tracker);

            async move {
                tracker.set_message(file.relative_path.clone());
                let result = tokio::fs::read_to_string(&file.path)
                    .await
                    .map_err(|e| ManifestError::file_operation(&file.path, e))
                    .map(|content| {
                        let manifest = parser.parse(&content);
                        let diagnostics = linter.lint(&manifest);
                        FileReport::new(file.relative_path.clone(), &content, &manifest, diagnostics)
                    });

                match &result {
                    Ok(report) => {
                        tracker.inc_files_linted(report.diagnostics.len(), report.file_size)
                    }
                    Err(_) => tracker.inc_files_failed(),
                }

                (file, result)
            }
        }))
        .buffer_unordered(self.parallel_workers)
        .collect::<Vec<_>>()
        .await;

        let mut run = LintRun::default();

        for (file, result) in results {
            match result {
                Ok(report) => {
                    debug!(
                        "Linted {}: {} errors, {} warnings",
                        report.path,
                        report.error_count(),
                        report.warning_count()
                    );
                    run.reports.push(report);
                }
                Err(e) => {
                    error!("Failed to lint {}: {}", file.relative_path, e);
                    run.failures.push(FileFailure {
                        path: file.relative_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        run.reports.sort_by(|a, b| a.path.cmp(&b.path));
        run.failures.sort_by(|a, b| a.path.cmp(&b.path));
        tracker.finish();
        run.stats = tracker.get_stats();

        info!(
            "Lint complete in {} ms: {} files, {} diagnostics",
            run.stats.duration_ms, run.stats.files_linted, run.stats.diagnostics_found
        );
        run
    }
}
