//! Path queries over the merged element tree.
//!
//! Supported syntax, a subset of XPath location paths:
//!
//! - `/a/b` absolute path from the document node
//! - `//b` descendants at any depth
//! - `b/c` relative path from a context element
//! - `*` any element, `.` the context element
//! - `[@attr]` and `[@attr='value']` predicates, repeatable

use std::collections::HashSet;

use super::xml::Element;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Context,
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Predicate {
    attribute: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
    predicates: Vec<Predicate>,
}

/// A compiled path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    absolute: bool,
    steps: Vec<Step>,
}

impl Query {
    /// Compile a query expression.
    pub fn parse(expr: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidQuery {
            expr: expr.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty expression"));
        }

        let segments = split_segments(trimmed).map_err(|reason| invalid(&reason))?;
        let absolute = trimmed.starts_with('/');
        // An absolute path yields an empty first segment before the leading slash.
        let rest = if absolute { &segments[1..] } else { &segments[..] };

        let mut steps = Vec::new();
        let mut axis = Axis::Child;
        for segment in rest {
            if segment.is_empty() {
                if axis == Axis::Descendant {
                    return Err(invalid("too many consecutive slashes"));
                }
                axis = Axis::Descendant;
                continue;
            }
            steps.push(parse_step(segment, axis).map_err(|reason| invalid(&reason))?);
            axis = Axis::Child;
        }

        if steps.is_empty() || rest.last().map(|s| s.is_empty()).unwrap_or(true) {
            return Err(invalid("path must end with a step"));
        }

        Ok(Self { absolute, steps })
    }

    /// Evaluate against a document root. Relative queries start at
    /// `context`, or at the root when no context is given.
    ///
    /// Results are in traversal order without duplicates.
    pub fn select<'a>(&self, root: &'a Element, context: Option<&'a Element>) -> Vec<&'a Element> {
        let mut steps = self.steps.iter();
        let mut current: Vec<&'a Element> = if self.absolute {
            // The document node has the root element as its only child.
            match steps.next() {
                Some(first) => {
                    let mut selected = Vec::new();
                    if first.axis == Axis::Descendant {
                        collect_descendants(root, first, &mut selected);
                    }
                    if first.matches(root) {
                        selected.insert(0, root);
                    }
                    selected
                }
                None => return Vec::new(),
            }
        } else {
            vec![context.unwrap_or(root)]
        };

        for step in steps {
            let mut next = Vec::new();
            let mut seen = HashSet::new();
            for element in &current {
                let mut candidates = Vec::new();
                step.apply(element, &mut candidates);
                for candidate in candidates {
                    if seen.insert(candidate as *const Element) {
                        next.push(candidate);
                    }
                }
            }
            current = next;
            if current.is_empty() {
                break;
            }
        }

        current
    }
}

impl Step {
    fn matches(&self, element: &Element) -> bool {
        let name_ok = match &self.test {
            NameTest::Any | NameTest::Context => true,
            NameTest::Name(name) => element.name() == name,
        };
        name_ok
            && self.predicates.iter().all(|p| match &p.value {
                Some(value) => element.attribute(&p.attribute) == Some(value.as_str()),
                None => element.attribute(&p.attribute).is_some(),
            })
    }

    /// Elements selected by this step from `from`.
    fn apply<'a>(&self, from: &'a Element, out: &mut Vec<&'a Element>) {
        if self.test == NameTest::Context {
            if self.matches(from) {
                out.push(from);
            }
            if self.axis == Axis::Descendant {
                collect_descendants(from, self, out);
            }
            return;
        }

        match self.axis {
            Axis::Child => out.extend(from.child_elements().filter(|e| self.matches(e))),
            Axis::Descendant => collect_descendants(from, self, out),
        }
    }
}

fn collect_descendants<'a>(from: &'a Element, step: &Step, out: &mut Vec<&'a Element>) {
    for child in from.child_elements() {
        if step.matches(child) {
            out.push(child);
        }
        collect_descendants(child, step, out);
    }
}

/// Split on `/` outside predicates and quoted strings.
fn split_segments(expr: &str) -> std::result::Result<Vec<String>, String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in expr.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                current.push(c);
            }
            (None, '[') => {
                depth += 1;
                current.push(c);
            }
            (None, ']') => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ']'".to_string())?;
                current.push(c);
            }
            (None, '/') if depth == 0 => segments.push(std::mem::take(&mut current)),
            (None, c) => current.push(c),
        }
    }

    if quote.is_some() {
        return Err("unterminated string literal".to_string());
    }
    if depth != 0 {
        return Err("unbalanced '['".to_string());
    }
    segments.push(current);
    Ok(segments)
}

fn parse_step(segment: &str, axis: Axis) -> std::result::Result<Step, String> {
    let (name, mut rest) = match segment.find('[') {
        Some(idx) => (segment[..idx].trim(), &segment[idx..]),
        None => (segment.trim(), ""),
    };

    let test = match name {
        "*" => NameTest::Any,
        "." => NameTest::Context,
        _ if is_name(name) => NameTest::Name(name.to_string()),
        _ => return Err(format!("invalid element name {:?}", name)),
    };

    let mut predicates = Vec::new();
    while !rest.is_empty() {
        let first_close = rest
            .find(']')
            .ok_or_else(|| "unterminated predicate".to_string())?;
        // Quoted values may contain ']'.
        let body_end = match rest.find(['\'', '"']) {
            Some(open) if open < first_close => close_after_quote(rest, open)
                .ok_or_else(|| "unterminated predicate".to_string())?,
            _ => first_close,
        };
        let body = rest[1..body_end].trim();
        predicates.push(parse_predicate(body)?);
        rest = rest[body_end + 1..].trim_start();
        if !rest.is_empty() && !rest.starts_with('[') {
            return Err(format!("unexpected {:?} after predicate", rest));
        }
    }

    Ok(Step {
        axis,
        test,
        predicates,
    })
}

/// Index of the first `]` after the quoted string opened at `open`.
fn close_after_quote(predicate: &str, open: usize) -> Option<usize> {
    let quote = predicate[open..].chars().next()?;
    let close = predicate[open + 1..].find(quote)? + open + 1;
    predicate[close..].find(']').map(|idx| idx + close)
}

fn parse_predicate(body: &str) -> std::result::Result<Predicate, String> {
    let body = body
        .strip_prefix('@')
        .ok_or_else(|| format!("unsupported predicate [{}]", body))?;

    match body.split_once('=') {
        None => {
            let attribute = body.trim();
            if !is_name(attribute) {
                return Err(format!("invalid attribute name {:?}", attribute));
            }
            Ok(Predicate {
                attribute: attribute.to_string(),
                value: None,
            })
        }
        Some((attribute, value)) => {
            let attribute = attribute.trim();
            if !is_name(attribute) {
                return Err(format!("invalid attribute name {:?}", attribute));
            }
            let value = value.trim();
            let unquoted = value
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                .ok_or_else(|| format!("predicate value {} must be quoted", value))?;
            Ok(Predicate {
                attribute: attribute.to_string(),
                value: Some(unquoted.to_string()),
            })
        }
    }
}

fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
