// file: src/models/diagnostic.rs
// description: lint findings, rule codes and severities
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCode {
    InvalidName,
    MalformedExtras,
    InvalidSpecifier,
    DuplicatePackage,
    MalformedLine,
    DuplicateExtra,
    UnsupportedOption,
    Unpinned,
    EmptyManifest,
}

impl RuleCode {
    pub const ALL: [RuleCode; 9] = [
        RuleCode::InvalidName,
        RuleCode::MalformedExtras,
        RuleCode::InvalidSpecifier,
        RuleCode::DuplicatePackage,
        RuleCode::MalformedLine,
        RuleCode::DuplicateExtra,
        RuleCode::UnsupportedOption,
        RuleCode::Unpinned,
        RuleCode::EmptyManifest,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RuleCode::InvalidName => "E001",
            RuleCode::MalformedExtras => "E002",
            RuleCode::InvalidSpecifier => "E003",
            RuleCode::DuplicatePackage => "E004",
            RuleCode::MalformedLine => "E005",
            RuleCode::DuplicateExtra => "W001",
            RuleCode::UnsupportedOption => "W002",
            RuleCode::Unpinned => "W003",
            RuleCode::EmptyManifest => "W004",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuleCode::InvalidName => "invalid-name",
            RuleCode::MalformedExtras => "malformed-extras",
            RuleCode::InvalidSpecifier => "invalid-specifier",
            RuleCode::DuplicatePackage => "duplicate-package",
            RuleCode::MalformedLine => "malformed-line",
            RuleCode::DuplicateExtra => "duplicate-extra",
            RuleCode::UnsupportedOption => "unsupported-option",
            RuleCode::Unpinned => "unpinned",
            RuleCode::EmptyManifest => "empty-manifest",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            RuleCode::InvalidName
            | RuleCode::MalformedExtras
            | RuleCode::InvalidSpecifier
            | RuleCode::DuplicatePackage
            | RuleCode::MalformedLine => Severity::Error,
            RuleCode::DuplicateExtra
            | RuleCode::UnsupportedOption
            | RuleCode::Unpinned
            | RuleCode::EmptyManifest => Severity::Warning,
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for RuleCode {
    type Err = String;

    /// Accepts either the stable code (`E004`) or the rule name (`duplicate-package`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RuleCode::ALL
            .iter()
            .copied()
            .find(|rule| {
                rule.code().eq_ignore_ascii_case(wanted) || rule.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown lint rule: {}", wanted))
    }
}

impl Serialize for RuleCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for RuleCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: RuleCode,
    pub rule_name: String,
    pub severity: Severity,
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(rule: RuleCode, line: usize, message: impl Into<String>) -> Self {
        Self {
            rule,
            rule_name: rule.name().to_string(),
            severity: rule.default_severity(),
            line,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
