//! Pattern expansion: turns one regex-flavoured route pattern into concrete path templates.
//!
//! Route patterns use a restricted regex dialect:
//!
//! - literal text, copied verbatim
//! - named capture groups `(?P<name>...)`, rewritten to `{name}` placeholders
//! - optional groups `(...)?` or `(?:...)?`, expanded into a "present" and an "absent" variant
//! - anchors and leftover punctuation (`^`, `$`, `(`, `)`, `?`), stripped from the output
//!
//! The pattern is first tokenized into literal, capture and optional segments. Variants are then generated from
//! that structure with a worklist, sorted by their pre-substitution text, and finally
//! rendered into templates.
//!
//! # Example
//!
//! ```
//! use route_pattern_oapi::expander::PatternExpander;
//!
//! let paths = PatternExpander::expand("sys", "tools/hash(/(?P<urlalgorithm>.+))?").unwrap();
//! let templates: Vec<_> = paths.iter().map(|p| p.template.as_str()).collect();
//! assert_eq!(templates, vec!["/sys/tools/hash", "/sys/tools/hash/{urlalgorithm}"]);
//! ```

use crate::error::{Error, Result};
use crate::route::RoutePattern;
use indexmap::IndexSet;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashSet, VecDeque};

/// Opening of a named capture group, anchored at the current position
static CAPTURE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\?P<(\w+)>").expect("capture group regex is valid"));

/// Regex punctuation that never survives into a rendered path
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[()$?^]").expect("punctuation regex is valid"));

const CAPTURE_PREFIX: &str = "(?P<";
const NON_CAPTURING_PREFIX: &str = "(?:";

/// Upper bound on independent optional groups in one pattern.
pub const MAX_OPTIONAL_GROUPS: usize = 2;

/// One concrete path template derived from a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedPath {
    /// Path such as `/sys/auth/{path}/tune`
    pub template: String,
    /// Parameter names in the order their placeholders appear in `template`
    pub params: IndexSet<String>,
}

impl ExpandedPath {
    /// Whether `name` is bound by a placeholder in this path
    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains(name)
    }
}

/// A structural piece of a tokenized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Verbatim text, possibly still carrying punctuation to strip
    Literal(String),
    /// A named capture group and its original source text
    Capture { name: String, raw: String },
    /// An optional group's content
    Optional(Vec<Segment>),
}

/// Expands route patterns into [`ExpandedPath`]s.
pub struct PatternExpander;

impl PatternExpander {
    /// Expands `raw` mounted under `root` into every concrete path it can match.
    ///
    /// Output order is the lexicographic order of the variant strings before capture
    /// groups are substituted, so the result is stable across runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPattern`] when the pattern has unbalanced parentheses,
    /// an unterminated or unnamed capture group, a `(?` group other than `(?P<name>` or
    /// `(?:`, nested optional groups, or more than
    /// [`MAX_OPTIONAL_GROUPS`] optional groups.
    pub fn expand(root: &str, raw: &str) -> Result<Vec<ExpandedPath>> {
        debug!("Expanding pattern '{}' under root '{}'", raw, root);

        let body = raw.trim_end_matches('$');
        let segments = Tokenizer::new(body)
            .tokenize()
            .map_err(|reason| Error::MalformedPattern {
                root: root.to_string(),
                pattern: raw.to_string(),
                reason,
            })?;

        let mut variants = expand_optionals(segments);
        variants.sort_by_cached_key(|variant| variant_text(variant));

        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(variants.len());
        for variant in &variants {
            let path = render(root, variant);
            if seen.insert(path.template.clone()) {
                paths.push(path);
            } else {
                debug!("Dropping duplicate template {}", path.template);
            }
        }

        debug!("Pattern '{}' expanded to {} path(s)", raw, paths.len());
        Ok(paths)
    }

    /// Expands a [`RoutePattern`].
    pub fn expand_route(pattern: &RoutePattern) -> Result<Vec<ExpandedPath>> {
        Self::expand(&pattern.root, &pattern.raw)
    }
}

/// Replaces each optional group with its present/absent alternatives until none remain.
fn expand_optionals(segments: Vec<Segment>) -> Vec<Vec<Segment>> {
    let mut pending = VecDeque::from([segments]);
    let mut done = Vec::new();

    while let Some(variant) = pending.pop_front() {
        let idx = variant
            .iter()
            .position(|segment| matches!(segment, Segment::Optional(_)));

        match idx {
            Some(idx) => {
                let mut absent = variant;
                let Segment::Optional(inner) = absent.remove(idx) else {
                    unreachable!("position matched an optional segment");
                };
                let mut present = absent.clone();
                present.splice(idx..idx, inner);
                pending.push_back(present);
                pending.push_back(absent);
            }
            None => done.push(variant),
        }
    }

    done
}

/// The variant's text before capture groups are substituted.
fn variant_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text.as_str(),
            Segment::Capture { raw, .. } => raw.as_str(),
            Segment::Optional(_) => "",
        })
        .collect()
}

fn render(root: &str, segments: &[Segment]) -> ExpandedPath {
    let mut params = IndexSet::new();
    let mut body = String::new();

    for segment in segments {
        match segment {
            Segment::Literal(text) => body.push_str(text),
            Segment::Capture { name, .. } => {
                params.insert(name.clone());
                body.push('{');
                body.push_str(name);
                body.push('}');
            }
            Segment::Optional(_) => {}
        }
    }

    let template = format!("/{}/{}", root, body);
    ExpandedPath {
        template: PUNCTUATION.replace_all(&template, "").into_owned(),
        params,
    }
}

fn contains_optional(segments: &[Segment]) -> bool {
    segments
        .iter()
        .any(|segment| matches!(segment, Segment::Optional(_)))
}

/// Splits a pattern into literal, capture and optional segments.
struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    optional_groups: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            optional_groups: 0,
        }
    }

    fn tokenize(mut self) -> std::result::Result<Vec<Segment>, String> {
        self.sequence(false)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Reads segments until end of input, or until an unconsumed `)` when `nested`.
    fn sequence(&mut self, nested: bool) -> std::result::Result<Vec<Segment>, String> {
        let mut segments = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            match c {
                '(' => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    self.group(&mut segments)?;
                }
                ')' if nested => break,
                ')' => return Err(format!("unbalanced ')' at offset {}", self.pos)),
                _ => {
                    literal.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(segments)
    }

    /// Parses the group starting at the current `(`.
    fn group(&mut self, out: &mut Vec<Segment>) -> std::result::Result<(), String> {
        let src = self.src;
        let start = self.pos;
        let rest = &src[start..];

        if let Some(caps) = CAPTURE_OPEN.captures(rest) {
            let name = caps[1].to_string();
            let close = self
                .closing_paren(start + caps[0].len())
                .ok_or_else(|| format!("unterminated capture group '{}' at offset {}", name, start))?;
            self.pos = close + 1;

            let capture = Segment::Capture {
                name,
                raw: src[start..self.pos].to_string(),
            };
            if self.eat('?') {
                return self.optional(out, vec![capture], start);
            }
            out.push(capture);
            return Ok(());
        }

        if rest.starts_with(CAPTURE_PREFIX) {
            return Err(format!("invalid capture group name at offset {}", start));
        }

        if rest.starts_with(NON_CAPTURING_PREFIX) {
            self.pos += NON_CAPTURING_PREFIX.len();
        } else if rest.starts_with("(?") {
            return Err(format!("unsupported group syntax at offset {}", start));
        } else {
            self.pos += 1;
        }

        let inner = self.sequence(true)?;
        if !self.eat(')') {
            return Err(format!("unbalanced '(' at offset {}", start));
        }

        if self.eat('?') {
            self.optional(out, inner, start)
        } else {
            // Plain groups are transparent; their delimiters get stripped on render.
            out.push(Segment::Literal("(".to_string()));
            out.extend(inner);
            out.push(Segment::Literal(")".to_string()));
            Ok(())
        }
    }

    fn optional(
        &mut self,
        out: &mut Vec<Segment>,
        inner: Vec<Segment>,
        start: usize,
    ) -> std::result::Result<(), String> {
        if contains_optional(&inner) {
            return Err(format!("nested optional group at offset {}", start));
        }
        self.optional_groups += 1;
        if self.optional_groups > MAX_OPTIONAL_GROUPS {
            return Err(format!(
                "more than {} independent optional groups",
                MAX_OPTIONAL_GROUPS
            ));
        }
        out.push(Segment::Optional(inner));
        Ok(())
    }

    /// Byte offset of the `)` closing a group whose body starts at `from`.
    ///
    /// Parentheses that are escaped or inside a character class do not count.
    fn closing_paren(&self, from: usize) -> Option<usize> {
        let mut depth = 1usize;
        let mut escaped = false;
        let mut in_class = false;

        for (offset, c) in self.src[from..].char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '[' => in_class = true,
                ']' => in_class = false,
                _ if in_class => {}
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(from + offset);
                    }
                }
                _ => {}
            }
        }
        None
    }
}
