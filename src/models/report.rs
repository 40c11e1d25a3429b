// file: src/models/report.rs
// description: per-file lint report with content hashing
// reference: internal data structures

use crate::models::diagnostic::{Diagnostic, Severity};
use crate::models::manifest::Manifest;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub content_hash: String,
    pub file_size: u64,
    pub requirement_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn new(path: String, content: &str, manifest: &Manifest, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path,
            content_hash: Self::compute_hash(content),
            file_size: content.len() as u64,
            requirement_count: manifest.requirement_count(),
            diagnostics,
        }
    }

    fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleCode;

    #[test]
    fn test_report_creation() {
        let diagnostics = vec![
            Diagnostic::new(RuleCode::DuplicatePackage, 2, "dup"),
            Diagnostic::new(RuleCode::UnsupportedOption, 3, "opt"),
        ];
        let report = FileReport::new(
            "requirements.txt".to_string(),
            "numpy\n",
            &Manifest::default(),
            diagnostics,
        );

        assert_eq!(report.file_size, 6);
        assert_eq!(report.content_hash.len(), 64);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_hash_consistency() {
        let hash1 = FileReport::compute_hash("numpy\n");
        let hash2 = FileReport::compute_hash("numpy\n");
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, FileReport::compute_hash("pandas\n"));
    }
}
