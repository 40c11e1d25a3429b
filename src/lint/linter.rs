// file: src/lint/linter.rs
// description: manifest lint rules producing ordered diagnostics
// reference: manifest syntax checks (valid identifiers, extras, duplicates)

use crate::config::LintConfig;
use crate::error::Result;
use crate::models::{Diagnostic, LineKind, Manifest, Requirement, RuleCode, Severity};
use crate::parser::normalize_name;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub struct Linter {
    disabled: HashSet<RuleCode>,
}

impl Linter {
    pub fn new(config: &LintConfig) -> Result<Self> {
        let mut disabled: HashSet<RuleCode> = config.disabled()?.into_iter().collect();

        if !config.require_pins {
            disabled.insert(RuleCode::Unpinned);
        }
        if config.allow_options {
            disabled.insert(RuleCode::UnsupportedOption);
        }

        Ok(Self { disabled })
    }

    pub fn is_enabled(&self, rule: RuleCode) -> bool {
        !self.disabled.contains(&rule)
    }

    pub fn lint(&self, manifest: &Manifest) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut first_seen: HashMap<&str, (usize, &str)> = HashMap::new();

        for line in &manifest.lines {
            match &line.kind {
                LineKind::Blank | LineKind::Comment { .. } => {}
                LineKind::Invalid(issue) => {
                    self.push(&mut diagnostics, issue.rule, line.number, issue.message.clone());
                }
                LineKind::Option { flag, .. } => {
                    self.push(
                        &mut diagnostics,
                        RuleCode::UnsupportedOption,
                        line.number,
                        format!("'{}' is a pip option, not a package reference", flag),
                    );
                }
                LineKind::Requirement(req) => {
                    if let Some((first_line, first_name)) =
                        first_seen.get(req.normalized_name.as_str())
                    {
                        self.push(
                            &mut diagnostics,
                            RuleCode::DuplicatePackage,
                            line.number,
                            format!(
                                "'{}' is already declared as '{}' on line {}",
                                req.name, first_name, first_line
                            ),
                        );
                    } else {
                        first_seen.insert(req.normalized_name.as_str(), (line.number, req.name.as_str()));
                    }

                    self.check_extras(&mut diagnostics, line.number, req);

                    if !req.is_pinned() {
                        self.push(
                            &mut diagnostics,
                            RuleCode::Unpinned,
                            line.number,
                            format!("'{}' has no version constraint", req.name),
                        );
                    }
                }
            }
        }

        if manifest.requirement_count() == 0 {
            let line = manifest.lines.len().max(1);
            self.push(
                &mut diagnostics,
                RuleCode::EmptyManifest,
                line,
                "manifest does not declare any packages",
            );
        }

        diagnostics.sort_by(|a, b| a.line.cmp(&b.line).then(a.rule.cmp(&b.rule)));
        debug!("Lint produced {} diagnostics", diagnostics.len());
        diagnostics
    }

    fn check_extras(&self, diagnostics: &mut Vec<Diagnostic>, line: usize, req: &Requirement) {
        let mut seen = HashSet::new();
        for extra in &req.extras {
            if !seen.insert(normalize_name(extra)) {
                self.push(
                    diagnostics,
                    RuleCode::DuplicateExtra,
                    line,
                    format!("extra '{}' is listed more than once on '{}'", extra, req.name),
                );
            }
        }
    }

    fn push(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
        rule: RuleCode,
        line: usize,
        message: impl Into<String>,
    ) {
        if self.is_enabled(rule) {
            diagnostics.push(Diagnostic::new(rule, line, message));
        }
    }
}

/// Outcome of a lint pass over one manifest, reduced to counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl LintSummary {
    pub fn from_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        diagnostics
            .into_iter()
            .fold(Self::default(), |mut acc, d| {
                match d.severity {
                    Severity::Error => acc.errors += 1,
                    Severity::Warning => acc.warnings += 1,
                }
                acc
            })
    }

    pub fn is_failure(&self, deny_warnings: bool) -> bool {
        self.errors > 0 || (deny_warnings && self.warnings > 0)
    }
}
