// file: src/exporter/text.rs
// description: human readable rendering of lint runs, sections and import audits

use crate::imports::ImportAudit;
use crate::models::{Diagnostic, Section, Severity};
use crate::pipeline::LintRun;
use crate::utils::logging::{format_error, format_success, format_warning};
use colored::Colorize;

pub struct TextReporter;

impl TextReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_diagnostic(&self, path: &str, diagnostic: &Diagnostic) -> String {
        let code = match diagnostic.severity {
            Severity::Error => diagnostic.rule.code().red().bold(),
            Severity::Warning => diagnostic.rule.code().yellow().bold(),
        };

        format!(
            "{}:{}: {} [{}] {}",
            path.bold(),
            diagnostic.line,
            code,
            diagnostic.rule.name().dimmed(),
            diagnostic.message
        )
    }

    pub fn format_run(&self, run: &LintRun) -> String {
        let mut lines = Vec::new();

        for report in &run.reports {
            for diagnostic in &report.diagnostics {
                lines.push(self.format_diagnostic(&report.path, diagnostic));
            }
        }

        for failure in &run.failures {
            lines.push(format_error(&format!("{}: {}", failure.path, failure.error)));
        }

        let summary = run.summary();
        let totals = format!(
            "{} file(s) checked: {} error(s), {} warning(s)",
            run.reports.len(),
            summary.errors,
            summary.warnings
        );

        lines.push(if summary.errors > 0 || !run.failures.is_empty() {
            format_error(&totals)
        } else if summary.warnings > 0 {
            format_warning(&totals)
        } else {
            format_success(&totals)
        });

        let stats = &run.stats;
        if stats.files_linted + stats.files_failed > 0 {
            lines.push(
                format!(
                    "{} ms, {:.1} files/s, {:.0}% readable",
                    stats.duration_ms,
                    stats.files_per_second(),
                    stats.success_rate()
                )
                .dimmed()
                .to_string(),
            );
        }

        lines.join("\n")
    }

    pub fn format_sections(&self, sections: &[Section]) -> String {
        let mut out = Vec::new();

        for section in sections {
            let title = section.title.as_deref().unwrap_or("(ungrouped)");
            out.push(format!("{} ({})", title.cyan().bold(), section.entries.len()));
            for entry in &section.entries {
                out.push(format!("  {:>4}  {}", entry.line, entry.requirement));
            }
        }

        out.join("\n")
    }

    pub fn format_import_audit(&self, audit: &ImportAudit) -> String {
        let mut out = Vec::new();

        for missing in &audit.missing {
            let first = missing
                .sites
                .first()
                .map(|site| format!("{}:{}", site.file, site.line))
                .unwrap_or_default();
            out.push(format!(
                "{} '{}' is imported ({}) but '{}' is not declared",
                "missing".red().bold(),
                missing.module,
                first,
                missing.distribution
            ));
        }

        for unused in &audit.unused {
            out.push(format!(
                "{} '{}' (line {}) is never imported",
                "unused".yellow(),
                unused.name,
                unused.line
            ));
        }

        let totals = format!(
            "{} declared package(s), {} third-party import(s), {} missing, {} unused",
            audit.declared,
            audit.third_party_imports,
            audit.missing.len(),
            audit.unused.len()
        );
        out.push(if audit.is_clean() {
            format_success(&totals)
        } else {
            format_error(&totals)
        });

        out.join("\n")
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parser::ManifestParser;
    use crate::pipeline::{LintPipeline, PipelineStats};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_run_lists_diagnostics() {
        plain();
        let pipeline = LintPipeline::new(&Config::default_config()).unwrap();
        let run = LintRun {
            reports: vec![pipeline.lint_content("requirements.txt", "numpy\nnumpy\n")],
            ..LintRun::default()
        };

        let text = TextReporter::new().format_run(&run);

        assert!(text.contains("requirements.txt:2: E004 [duplicate-package]"));
        assert!(text.contains("1 file(s) checked: 1 error(s), 0 warning(s)"));
        assert!(!text.contains("files/s"));
    }

    #[test]
    fn test_format_run_reports_throughput() {
        plain();
        let run = LintRun {
            stats: PipelineStats {
                files_linted: 3,
                files_failed: 1,
                duration_ms: 500,
                ..PipelineStats::default()
            },
            ..LintRun::default()
        };

        let text = TextReporter::new().format_run(&run);
        assert!(text.ends_with("500 ms, 6.0 files/s, 75% readable"));
    }

    #[test]
    fn test_format_sections() {
        plain();
        let manifest = ManifestParser::new().parse("# Web framework libraries\nfastapi\nuvicorn\n");
        let text = TextReporter::new().format_sections(&manifest.sections());

        assert!(text.starts_with("Web framework libraries (2)"));
        assert!(text.contains("     2  fastapi"));
    }
}
