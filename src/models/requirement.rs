// file: src/models/requirement.rs
// description: requirement entry model with canonical rendering
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "~=")]
    Compatible,
    #[serde(rename = "===")]
    Arbitrary,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
}

impl Comparator {
    /// Longest operators first so that prefix matching is unambiguous.
    pub const BY_LENGTH: [Comparator; 8] = [
        Comparator::Arbitrary,
        Comparator::Compatible,
        Comparator::Equal,
        Comparator::NotEqual,
        Comparator::LessEqual,
        Comparator::GreaterEqual,
        Comparator::Less,
        Comparator::Greater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Compatible => "~=",
            Comparator::Arbitrary => "===",
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
            Comparator::LessEqual => "<=",
            Comparator::GreaterEqual => ">=",
            Comparator::Less => "<",
            Comparator::Greater => ">",
        }
    }

    pub fn strip_from(text: &str) -> Option<(Comparator, &str)> {
        Self::BY_LENGTH
            .iter()
            .find_map(|op| text.strip_prefix(op.as_str()).map(|rest| (*op, rest)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSpecifier {
    pub comparator: Comparator,
    pub version: String,
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator.as_str(), self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub normalized_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specifiers: Vec<VersionSpecifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Requirement {
    pub fn is_pinned(&self) -> bool {
        self.url.is_some() || !self.specifiers.is_empty()
    }

    pub fn has_extras(&self) -> bool {
        !self.extras.is_empty()
    }
}

/// Renders the canonical single-line form, e.g. `transformers[torch]>=4.0 ; python_version>"3.8"`.
impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if self.has_extras() {
            write!(f, "[{}]", self.extras.join(","))?;
        }

        if let Some(url) = &self.url {
            write!(f, " @ {}", url)?;
        } else if !self.specifiers.is_empty() {
            let specs: Vec<String> = self.specifiers.iter().map(|s| s.to_string()).collect();
            write!(f, "{}", specs.join(","))?;
        }

        if let Some(marker) = &self.marker {
            write!(f, " ; {}", marker)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(name: &str) -> Requirement {
        Requirement {
            name: name.to_string(),
            normalized_name: name.to_lowercase(),
            extras: vec![],
            specifiers: vec![],
            url: None,
            marker: None,
        }
    }

    #[test]
    fn test_comparator_prefers_longest_operator() {
        assert_eq!(
            Comparator::strip_from("===1.0"),
            Some((Comparator::Arbitrary, "1.0"))
        );
        assert_eq!(
            Comparator::strip_from("==1.0"),
            Some((Comparator::Equal, "1.0"))
        );
        assert_eq!(
            Comparator::strip_from("<=2"),
            Some((Comparator::LessEqual, "2"))
        );
        assert_eq!(Comparator::strip_from("1.0"), None);
    }

    #[test]
    fn test_display_bare_name() {
        assert_eq!(requirement("numpy").to_string(), "numpy");
    }

    #[test]
    fn test_display_full_requirement() {
        let mut req = requirement("transformers");
        req.extras = vec!["torch".to_string(), "sentencepiece".to_string()];
        req.specifiers = vec![
            VersionSpecifier {
                comparator: Comparator::GreaterEqual,
                version: "4.0".to_string(),
            },
            VersionSpecifier {
                comparator: Comparator::Less,
                version: "5".to_string(),
            },
        ];
        req.marker = Some("python_version >= \"3.9\"".to_string());

        assert_eq!(
            req.to_string(),
            "transformers[torch,sentencepiece]>=4.0,<5 ; python_version >= \"3.9\""
        );
    }

    #[test]
    fn test_pinned_detection() {
        let mut req = requirement("pandas");
        assert!(!req.is_pinned());

        req.url = Some("https://example.com/pandas.whl".to_string());
        assert!(req.is_pinned());
    }
}
