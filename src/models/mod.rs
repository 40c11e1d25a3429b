// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod diagnostic;
pub mod manifest;
pub mod report;
pub mod requirement;

pub use diagnostic::{Diagnostic, RuleCode, Severity};
pub use manifest::{LineKind, Manifest, ManifestLine, ParseIssue, Section, SectionEntry};
pub use report::FileReport;
pub use requirement::{Comparator, Requirement, VersionSpecifier};
