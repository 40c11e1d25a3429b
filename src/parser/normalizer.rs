// file: src/parser/normalizer.rs
// description: Manifest normalization for formatting consistency
// reference: pip requirements file format

use crate::models::{LineKind, Manifest, ManifestLine, Requirement};
use crate::parser::requirement::normalize_name;
use std::collections::HashSet;

pub struct ManifestNormalizer;

impl ManifestNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, manifest: &Manifest) -> String {
        let mut output: Vec<String> = Vec::new();

        for line in &manifest.lines {
            let rendered = self.render_line(line);

            if rendered.is_empty() && output.last().is_none_or(|prev| prev.is_empty()) {
                continue;
            }

            output.push(rendered);
        }

        while output.last().is_some_and(|last| last.is_empty()) {
            output.pop();
        }

        if output.is_empty() {
            return String::new();
        }

        let mut text = output.join("\n");
        text.push('\n');
        text
    }

    /// True when `content` is already in the form [`normalize`](Self::normalize) produces.
    pub fn is_normalized(&self, manifest: &Manifest, content: &str) -> bool {
        self.normalize(manifest) == content
    }

    fn render_line(&self, line: &ManifestLine) -> String {
        let body = match &line.kind {
            LineKind::Blank => return String::new(),
            LineKind::Comment { text } if text.is_empty() => return "#".to_string(),
            LineKind::Comment { text } => return format!("# {}", text),
            LineKind::Option { flag, value } => match value {
                Some(value) => format!("{} {}", flag, value),
                None => flag.clone(),
            },
            LineKind::Requirement(req) => self.dedupe_extras(req).to_string(),
            LineKind::Invalid(_) => return line.raw.trim().to_string(),
        };

        match &line.inline_comment {
            Some(comment) => format!("{}  # {}", body, comment),
            None => body,
        }
    }

    fn dedupe_extras(&self, req: &Requirement) -> Requirement {
        let mut seen = HashSet::new();
        let mut req = req.clone();
        req.extras.retain(|extra| seen.insert(normalize_name(extra)));
        req
    }
}

impl Default for ManifestNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
