// file: src/parser/requirement.rs
// description: single requirement parsing (name, extras qualifier, constraints, marker)
// reference: PEP 508 dependency specifiers, simplified

use crate::models::{Comparator, ParseIssue, Requirement, RuleCode, VersionSpecifier};
use crate::parser::patterns::{NAME_SEPARATORS, URL_MARKER_SEPARATOR, VERSION, is_valid_identifier};

/// Lowercases the name and collapses every run of `-`, `_` and `.` into `-`.
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Parses the text of a requirement line with any inline comment already removed.
pub fn parse_requirement(text: &str) -> Result<Requirement, ParseIssue> {
    let text = text.trim();
    let (body, marker) = split_marker(text)?;

    let name_end = body
        .find(|c: char| c.is_whitespace() || "[]()<>=!~;,@".contains(c))
        .unwrap_or(body.len());
    let name = &body[..name_end];

    if name.is_empty() {
        return Err(ParseIssue::new(
            RuleCode::MalformedLine,
            format!("expected a package name at the start of '{}'", text),
        ));
    }

    if !is_valid_identifier(name) {
        return Err(ParseIssue::new(
            RuleCode::InvalidName,
            format!("'{}' is not a valid package name", name),
        ));
    }

    let mut rest = body[name_end..].trim_start();
    let mut extras = Vec::new();

    if let Some(after_bracket) = rest.strip_prefix('[') {
        let close = after_bracket.find(']').ok_or_else(|| {
            ParseIssue::new(
                RuleCode::MalformedExtras,
                format!("unclosed extras qualifier on '{}'", name),
            )
        })?;
        extras = parse_extras(name, &after_bracket[..close])?;
        rest = after_bracket[close + 1..].trim_start();
    } else if rest.starts_with(']') {
        return Err(ParseIssue::new(
            RuleCode::MalformedExtras,
            format!("unexpected ']' after '{}'", name),
        ));
    }

    let mut url = None;
    let mut specifiers = Vec::new();

    if let Some(location) = rest.strip_prefix('@') {
        let location = location.trim();
        if location.is_empty() {
            return Err(ParseIssue::new(
                RuleCode::MalformedLine,
                format!("missing URL after '@' for '{}'", name),
            ));
        }
        url = Some(location.to_string());
    } else if !rest.is_empty() {
        specifiers = parse_specifiers(name, rest)?;
    }

    Ok(Requirement {
        name: name.to_string(),
        normalized_name: normalize_name(name),
        extras,
        specifiers,
        url,
        marker,
    })
}

fn split_marker(text: &str) -> Result<(&str, Option<String>), ParseIssue> {
    // URLs may legally contain ';', so a url requirement needs whitespace before the marker
    let first_semicolon = text.find(';').unwrap_or(text.len());
    let has_url = text[..first_semicolon].contains('@');

    let position = if has_url {
        URL_MARKER_SEPARATOR
            .find(text)
            .map(|m| (m.start(), m.end()))
    } else {
        text.find(';').map(|idx| (idx, idx + 1))
    };

    match position {
        None => Ok((text, None)),
        Some((start, end)) => {
            let marker = text[end..].trim();
            if marker.is_empty() {
                return Err(ParseIssue::new(
                    RuleCode::MalformedLine,
                    "empty environment marker after ';'",
                ));
            }
            Ok((text[..start].trim_end(), Some(marker.to_string())))
        }
    }
}

fn parse_extras(name: &str, inner: &str) -> Result<Vec<String>, ParseIssue> {
    if inner.trim().is_empty() {
        return Err(ParseIssue::new(
            RuleCode::MalformedExtras,
            format!("empty extras qualifier on '{}'", name),
        ));
    }

    inner
        .split(',')
        .map(str::trim)
        .map(|extra| {
            if extra.is_empty() {
                Err(ParseIssue::new(
                    RuleCode::MalformedExtras,
                    format!("empty item in extras qualifier of '{}'", name),
                ))
            } else if !is_valid_identifier(extra) {
                Err(ParseIssue::new(
                    RuleCode::MalformedExtras,
                    format!("'{}' is not a valid extra name for '{}'", extra, name),
                ))
            } else {
                Ok(extra.to_string())
            }
        })
        .collect()
}

fn parse_specifiers(name: &str, text: &str) -> Result<Vec<VersionSpecifier>, ParseIssue> {
    let text = match text.strip_prefix('(') {
        Some(inner) => inner.strip_suffix(')').ok_or_else(|| {
            ParseIssue::new(
                RuleCode::InvalidSpecifier,
                format!("unbalanced parenthesis in constraint of '{}'", name),
            )
        })?,
        None => text,
    };

    text.split(',')
        .map(str::trim)
        .map(|item| parse_specifier(name, item))
        .collect()
}

fn parse_specifier(name: &str, item: &str) -> Result<VersionSpecifier, ParseIssue> {
    let invalid = |reason: &str| {
        ParseIssue::new(
            RuleCode::InvalidSpecifier,
            format!("invalid version constraint '{}' on '{}': {}", item, name, reason),
        )
    };

    if item.is_empty() {
        return Err(invalid("empty constraint"));
    }

    let (comparator, version) =
        Comparator::strip_from(item).ok_or_else(|| invalid("missing comparison operator"))?;
    let version = version.trim();

    if version.is_empty() {
        return Err(invalid("missing version"));
    }

    if !VERSION.is_match(version) {
        return Err(invalid("unexpected characters in version"));
    }

    if version.contains('*') {
        let wildcard_ok = matches!(comparator, Comparator::Equal | Comparator::NotEqual)
            && version.ends_with(".*")
            && !version[..version.len() - 2].contains('*');
        if !wildcard_ok {
            return Err(invalid("wildcards are only allowed as a trailing '.*' with == or !="));
        }
    }

    Ok(VersionSpecifier {
        comparator,
        version: version.to_string(),
    })
}
