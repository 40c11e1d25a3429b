// file: src/imports/mod.rs
// description: python import audit module exports
// reference: internal module structure

pub mod audit;
pub mod mapping;
pub mod scanner;

pub use audit::{ImportAudit, ImportAuditor, MissingImport, UnusedPackage};
pub use scanner::{ImportScanner, ImportSet, ImportSite};
