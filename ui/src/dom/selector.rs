//! The selector subset used across the site.
//!
//! Grammar: compounds separated by whitespace (descendant combinator). A
//! compound is an optional tag followed by any number of `#id`, `.class`,
//! `[attr]`, `[attr=value]`, `[attr^=prefix]` and `:not(.class)` parts.
//! Attribute values may be quoted. This is what [`super::MemoryDom`]
//! evaluates; the browser backend hands the same strings to
//! `querySelectorAll`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected `{found}` at byte {at} in `{selector}`")]
    Unexpected {
        selector: String,
        found: char,
        at: usize,
    },
    #[error("unterminated `{open}` in `{selector}`")]
    Unterminated { selector: String, open: char },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttrTest {
    pub name: String,
    pub op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrTest>,
    pub not_classes: Vec<String>,
}

/// What a selector needs to know about an element.
pub trait Subject {
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attr(&self, name: &str) -> Option<&str>;
}

impl<T: Subject + ?Sized> Subject for &T {
    fn tag(&self) -> &str {
        (**self).tag()
    }

    fn has_class(&self, class: &str) -> bool {
        (**self).has_class(class)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        (**self).attr(name)
    }
}

impl Compound {
    pub fn matches<S: Subject + ?Sized>(&self, subject: &S) -> bool {
        if let Some(tag) = &self.tag {
            if !subject.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if subject.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| subject.has_class(class)) {
            return false;
        }
        if self.not_classes.iter().any(|class| subject.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|test| match (&test.op, subject.attr(&test.name)) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(expected), Some(actual)) => actual == expected,
            (AttrOp::Prefix(prefix), Some(actual)) => actual.starts_with(prefix.as_str()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        let mut parts = Vec::new();
        for chunk in split_compounds(selector)? {
            parts.push(parse_compound(selector, chunk)?);
        }
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { parts })
    }

    /// `path[0]` is the candidate, the rest are its ancestors, nearest first.
    pub fn matches_path<S: Subject>(&self, path: &[S]) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        let Some((node, ancestors)) = path.split_first() else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        let mut ancestors = ancestors.iter();
        rest.iter()
            .rev()
            .all(|compound| ancestors.any(|ancestor| compound.matches(ancestor)))
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.parts
    }
}

fn split_compounds(selector: &str) -> Result<Vec<&str>, SelectorError> {
    let mut chunks = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (at, ch) in selector.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if ch.is_whitespace() && depth == 0 {
            if let Some(begin) = start.take() {
                chunks.push(&selector[begin..at]);
            }
        } else if start.is_none() {
            start = Some(at);
        }
    }
    if depth > 0 {
        return Err(SelectorError::Unterminated {
            selector: selector.to_string(),
            open: '[',
        });
    }
    if let Some(begin) = start {
        chunks.push(&selector[begin..]);
    }
    Ok(chunks)
}

fn is_ident(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn parse_compound(selector: &str, chunk: &str) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let bytes: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut i = 0;

    let ident_from = |start: usize| -> (String, usize) {
        let mut end = start;
        while end < bytes.len() && is_ident(bytes[end].1) {
            end += 1;
        }
        (bytes[start..end].iter().map(|(_, c)| *c).collect(), end)
    };
    let unexpected = |i: usize| SelectorError::Unexpected {
        selector: selector.to_string(),
        found: bytes[i].1,
        at: bytes[i].0,
    };

    if let Some((_, ch)) = bytes.first() {
        if is_ident(*ch) || *ch == '*' {
            if *ch == '*' {
                i = 1;
            } else {
                let (tag, end) = ident_from(0);
                compound.tag = Some(tag);
                i = end;
            }
        }
    }

    while i < bytes.len() {
        match bytes[i].1 {
            '#' => {
                let (id, end) = ident_from(i + 1);
                if id.is_empty() {
                    return Err(unexpected(i));
                }
                compound.id = Some(id);
                i = end;
            }
            '.' => {
                let (class, end) = ident_from(i + 1);
                if class.is_empty() {
                    return Err(unexpected(i));
                }
                compound.classes.push(class);
                i = end;
            }
            '[' => {
                let close = bytes[i..]
                    .iter()
                    .position(|(_, c)| *c == ']')
                    .map(|offset| i + offset)
                    .ok_or_else(|| SelectorError::Unterminated {
                        selector: selector.to_string(),
                        open: '[',
                    })?;
                let inner: String = bytes[i + 1..close].iter().map(|(_, c)| *c).collect();
                compound.attrs.push(parse_attr(&inner));
                i = close + 1;
            }
            ':' => {
                let rest: String = bytes[i..].iter().map(|(_, c)| *c).collect();
                let Some(body) = rest.strip_prefix(":not(") else {
                    return Err(unexpected(i));
                };
                let close = body.find(')').ok_or_else(|| SelectorError::Unterminated {
                    selector: selector.to_string(),
                    open: '(',
                })?;
                for class in body[..close].split('.').filter(|c| !c.is_empty()) {
                    compound.not_classes.push(class.trim().to_string());
                }
                i += ":not(".len() + close + 1;
            }
            _ => return Err(unexpected(i)),
        }
    }

    Ok(compound)
}

fn parse_attr(inner: &str) -> AttrTest {
    let unquote = |raw: &str| raw.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    if let Some((name, value)) = inner.split_once("^=") {
        AttrTest {
            name: name.trim().to_string(),
            op: AttrOp::Prefix(unquote(value)),
        }
    } else if let Some((name, value)) = inner.split_once('=') {
        AttrTest {
            name: name.trim().to_string(),
            op: AttrOp::Equals(unquote(value)),
        }
    } else {
        AttrTest {
            name: inner.trim().to_string(),
            op: AttrOp::Exists,
        }
    }
}
