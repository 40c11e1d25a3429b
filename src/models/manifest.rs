// file: src/models/manifest.rs
// description: parsed manifest model with line classification and sections
// reference: internal data structures

use crate::models::diagnostic::RuleCode;
use crate::models::requirement::Requirement;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    pub rule: RuleCode,
    pub message: String,
}

impl ParseIssue {
    pub fn new(rule: RuleCode, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    Blank,
    Comment { text: String },
    Option { flag: String, value: Option<String> },
    Requirement(Requirement),
    Invalid(ParseIssue),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestLine {
    pub number: usize,
    pub raw: String,
    #[serde(flatten)]
    pub kind: LineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_comment: Option<String>,
}

impl ManifestLine {
    pub fn requirement(&self) -> Option<&Requirement> {
        match &self.kind {
            LineKind::Requirement(req) => Some(req),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
    pub line: usize,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: Option<String>,
    pub line: usize,
    pub entries: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub lines: Vec<ManifestLine>,
}

impl Manifest {
    pub fn new(lines: Vec<ManifestLine>) -> Self {
        Self { lines }
    }

    pub fn requirements(&self) -> impl Iterator<Item = (usize, &Requirement)> {
        self.lines
            .iter()
            .filter_map(|line| line.requirement().map(|req| (line.number, req)))
    }

    pub fn requirement_count(&self) -> usize {
        self.requirements().count()
    }

    pub fn find(&self, normalized_name: &str) -> Option<&Requirement> {
        self.requirements()
            .map(|(_, req)| req)
            .find(|req| req.normalized_name == normalized_name)
    }

    /// Groups requirements under the comment that opened their block.
    ///
    /// A comment opens a section when it is the first non-blank line of the
    /// file or directly follows a blank line. Requirements seen before any
    /// such comment land in an untitled section. Sections without entries
    /// are dropped.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = vec![Section {
            title: None,
            line: 0,
            entries: Vec::new(),
        }];
        let mut after_break = true;

        for line in &self.lines {
            match &line.kind {
                LineKind::Blank => {
                    after_break = true;
                    continue;
                }
                LineKind::Comment { text } if after_break => {
                    sections.push(Section {
                        title: Some(text.clone()),
                        line: line.number,
                        entries: Vec::new(),
                    });
                }
                LineKind::Requirement(req) => {
                    if let Some(current) = sections.last_mut() {
                        current.entries.push(SectionEntry {
                            line: line.number,
                            requirement: req.clone(),
                        });
                    }
                }
                _ => {}
            }
            after_break = false;
        }

        sections.retain(|section| !section.entries.is_empty());
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(number: usize, kind: LineKind) -> ManifestLine {
        ManifestLine {
            number,
            raw: String::new(),
            kind,
            inline_comment: None,
        }
    }

    fn comment(number: usize, text: &str) -> ManifestLine {
        line(
            number,
            LineKind::Comment {
                text: text.to_string(),
            },
        )
    }

    fn req(number: usize, name: &str) -> ManifestLine {
        line(
            number,
            LineKind::Requirement(Requirement {
                name: name.to_string(),
                normalized_name: name.to_string(),
                extras: vec![],
                specifiers: vec![],
                url: None,
                marker: None,
            }),
        )
    }

    #[test]
    fn test_sections_follow_comment_headers() {
        let manifest = Manifest::new(vec![
            comment(1, "Core"),
            req(2, "numpy"),
            req(3, "pandas"),
            line(4, LineKind::Blank),
            comment(5, "Web"),
            req(6, "fastapi"),
        ]);

        let sections = manifest.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title.as_deref(), Some("Core"));
        assert_eq!(sections[0].entries.len(), 2);
        assert_eq!(sections[1].title.as_deref(), Some("Web"));
        assert_eq!(sections[1].entries[0].requirement.name, "fastapi");
    }

    #[test]
    fn test_comment_under_requirement_does_not_open_section() {
        let manifest = Manifest::new(vec![
            comment(1, "Core"),
            req(2, "numpy"),
            comment(3, "pinned later"),
            req(4, "scipy"),
        ]);

        let sections = manifest.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].entries.len(), 2);
    }

    #[test]
    fn test_requirements_before_header_are_untitled() {
        let manifest = Manifest::new(vec![
            req(1, "numpy"),
            line(2, LineKind::Blank),
            comment(3, "NLP"),
            req(4, "nltk"),
        ]);

        let sections = manifest.sections();
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[1].title.as_deref(), Some("NLP"));
    }

    #[test]
    fn test_find_by_normalized_name() {
        let manifest = Manifest::new(vec![req(1, "spacy")]);
        assert!(manifest.find("spacy").is_some());
        assert!(manifest.find("gensim").is_none());
        assert_eq!(manifest.requirement_count(), 1);
    }
}
