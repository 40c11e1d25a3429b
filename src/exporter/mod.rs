// file: src/exporter/mod.rs
// description: report rendering module exports
// reference: internal module structure

pub mod json;
pub mod text;

pub use json::{JsonExporter, LintReportDocument, ReportTotals};
pub use text::TextReporter;
