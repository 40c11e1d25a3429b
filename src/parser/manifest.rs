// file: src/parser/manifest.rs
// description: line-oriented manifest parsing into classified lines
// reference: pip requirements file format

use crate::models::{LineKind, Manifest, ManifestLine};
use crate::parser::patterns::INLINE_COMMENT;
use crate::parser::requirement::parse_requirement;
use tracing::debug;

pub struct ManifestParser;

impl ManifestParser {
    pub fn new() -> Self {
        Self
    }

    /// Classifies every line of `content`. Parsing never fails: problems are
    /// recorded as [`LineKind::Invalid`] and surfaced later by the linter.
    pub fn parse(&self, content: &str) -> Manifest {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let lines: Vec<ManifestLine> = content
            .lines()
            .enumerate()
            .map(|(idx, raw)| self.parse_line(idx + 1, raw))
            .collect();

        debug!("Parsed {} manifest lines", lines.len());
        Manifest::new(lines)
    }

    fn parse_line(&self, number: usize, raw: &str) -> ManifestLine {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return ManifestLine {
                number,
                raw: raw.to_string(),
                kind: LineKind::Blank,
                inline_comment: None,
            };
        }

        if let Some(text) = trimmed.strip_prefix('#') {
            return ManifestLine {
                number,
                raw: raw.to_string(),
                kind: LineKind::Comment {
                    text: text.trim().to_string(),
                },
                inline_comment: None,
            };
        }

        let (body, inline_comment) = split_inline_comment(trimmed);

        let kind = if body.starts_with('-') {
            parse_option(body)
        } else {
            match parse_requirement(body) {
                Ok(req) => LineKind::Requirement(req),
                Err(issue) => LineKind::Invalid(issue),
            }
        };

        ManifestLine {
            number,
            raw: raw.to_string(),
            kind,
            inline_comment,
        }
    }
}

impl Default for ManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

fn split_inline_comment(line: &str) -> (&str, Option<String>) {
    match INLINE_COMMENT.find(line) {
        Some(found) => {
            let comment = line[found.end()..].trim();
            let comment = (!comment.is_empty()).then(|| comment.to_string());
            (line[..found.start()].trim_end(), comment)
        }
        None => (line, None),
    }
}

fn parse_option(body: &str) -> LineKind {
    let split_at = body
        .char_indices()
        .find(|&(_, c)| c.is_whitespace() || c == '=');

    let (flag, value) = match split_at {
        Some((idx, separator)) => {
            let value = body[idx + separator.len_utf8()..].trim();
            (&body[..idx], (!value.is_empty()).then(|| value.to_string()))
        }
        None => (body, None),
    };

    LineKind::Option {
        flag: flag.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_classification() {
        let content = "# Core numerical libraries\nnumpy\n\npandas  # dataframes\n-r base.txt\nnum$py\n";
        let manifest = ManifestParser::new().parse(content);

        assert_eq!(manifest.lines.len(), 6);
        assert!(matches!(manifest.lines[0].kind, LineKind::Comment { ref text } if text == "Core numerical libraries"));
        assert_eq!(manifest.lines[1].requirement().map(|r| r.name.as_str()), Some("numpy"));
        assert!(manifest.lines[2].is_blank());
        assert_eq!(manifest.lines[3].inline_comment.as_deref(), Some("dataframes"));
        assert_eq!(manifest.lines[3].requirement().map(|r| r.name.as_str()), Some("pandas"));
        assert_eq!(
            manifest.lines[4].kind,
            LineKind::Option {
                flag: "-r".to_string(),
                value: Some("base.txt".to_string()),
            }
        );
        assert!(matches!(manifest.lines[5].kind, LineKind::Invalid(ref issue) if issue.rule == RuleCode::InvalidName));
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let manifest = ManifestParser::new().parse("\n\nspacy");
        assert_eq!(manifest.lines[2].number, 3);
        assert_eq!(manifest.requirements().next().map(|(n, _)| n), Some(3));
    }

    #[test]
    fn test_option_with_equals() {
        let manifest = ManifestParser::new().parse("--index-url=https://pypi.org/simple");
        assert_eq!(
            manifest.lines[0].kind,
            LineKind::Option {
                flag: "--index-url".to_string(),
                value: Some("https://pypi.org/simple".to_string()),
            }
        );
    }

    #[test]
    fn test_option_with_multibyte_separator() {
        let manifest = ManifestParser::new().parse("-r\u{a0}base.txt\n--index-url\u{3000}https://pypi.org/simple\n");

        assert_eq!(
            manifest.lines[0].kind,
            LineKind::Option {
                flag: "-r".to_string(),
                value: Some("base.txt".to_string()),
            }
        );
        assert_eq!(
            manifest.lines[1].kind,
            LineKind::Option {
                flag: "--index-url".to_string(),
                value: Some("https://pypi.org/simple".to_string()),
            }
        );
    }

    #[test]
    fn test_url_fragment_is_not_a_comment() {
        let manifest = ManifestParser::new().parse("pkg @ https://host/pkg.zip#egg=pkg");
        let req = manifest.lines[0].requirement().unwrap();
        assert_eq!(req.url.as_deref(), Some("https://host/pkg.zip#egg=pkg"));
        assert_eq!(manifest.lines[0].inline_comment, None);
    }

    #[test]
    fn test_crlf_and_bom() {
        let manifest = ManifestParser::new().parse("\u{feff}numpy\r\npandas\r\n");
        let names: Vec<&str> = manifest.requirements().map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(names, vec!["numpy", "pandas"]);
    }

    #[test]
    fn test_empty_content() {
        let manifest = ManifestParser::new().parse("");
        assert!(manifest.lines.is_empty());
        assert_eq!(manifest.requirement_count(), 0);
    }
}
