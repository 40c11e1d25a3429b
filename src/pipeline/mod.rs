// file: src/pipeline/mod.rs
// description: lint pipeline module exports
// reference: internal module structure

pub mod orchestrator;
pub mod progress;

pub use orchestrator::{FileFailure, LintPipeline, LintRun};
pub use progress::{PipelineStats, ProgressTracker};
