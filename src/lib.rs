// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod discovery;
pub mod error;
pub mod exporter;
pub mod imports;
pub mod lint;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use config::{Config, DiscoveryConfig, ImportsConfig, LintConfig, PipelineConfig};
pub use discovery::{ManifestScanner, ScannedManifest};
pub use error::{ManifestError, Result};
pub use exporter::{JsonExporter, TextReporter};
pub use imports::{ImportAudit, ImportAuditor, ImportScanner};
pub use lint::{LintSummary, Linter};
pub use models::{Diagnostic, FileReport, Manifest, Requirement, RuleCode, Severity};
pub use parser::{ManifestNormalizer, ManifestParser};
pub use pipeline::{LintPipeline, LintRun, PipelineStats, ProgressTracker};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/requirements.txt"
    ));

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _parser = ManifestParser::new();
    }

    #[test]
    fn test_fixture_manifest_is_clean() {
        let manifest = ManifestParser::new().parse(FIXTURE);
        let linter = Linter::new(&LintConfig::default()).unwrap();

        assert_eq!(linter.lint(&manifest), vec![]);
        assert!(manifest.find("transformers").is_some_and(|r| r.extras == ["torch"]));
    }

    #[test]
    fn test_fixture_sections() {
        let manifest = ManifestParser::new().parse(FIXTURE);
        let titles: Vec<String> = manifest
            .sections()
            .into_iter()
            .filter_map(|section| section.title)
            .collect();

        assert_eq!(
            titles,
            vec![
                "Core numerical libraries",
                "Machine learning libraries",
                "NLP libraries",
                "Web framework libraries",
                "Document extraction libraries",
            ]
        );
    }

    #[test]
    fn test_fixture_is_already_normalized() {
        let manifest = ManifestParser::new().parse(FIXTURE);
        assert!(ManifestNormalizer::new().is_normalized(&manifest, FIXTURE));
    }
}
