// file: src/lint/mod.rs
// description: manifest lint module exports
// reference: internal module structure

pub mod linter;

pub use linter::{LintSummary, Linter};
