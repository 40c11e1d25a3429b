// file: src/parser/mod.rs
// description: manifest parsing module exports
// reference: internal module structure

pub mod manifest;
pub mod normalizer;
pub mod patterns;
pub mod requirement;

pub use manifest::ManifestParser;
pub use normalizer::ManifestNormalizer;
pub use requirement::{normalize_name, parse_requirement};
