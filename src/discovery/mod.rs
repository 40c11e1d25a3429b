// file: src/discovery/mod.rs
// description: manifest discovery module exports
// reference: internal module structure

pub mod scanner;

pub use scanner::{ManifestScanner, ScannedManifest};
