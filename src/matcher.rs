use std::{
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::segments::{parse_candidate, DEFAULT_SEPARATOR};
use crate::validator::{DefaultValidator, PatternValidator, DOUBLE_WILDCARD, SINGLE_WILDCARD};
use crate::{Error, Result};

const TRACE_MATCHING: bool = cfg!(feature = "trace-matching");

/// Capability of deciding whether an identity URI satisfies a rule.
pub trait IdentityMatcher {
    /// Checks if the given candidate URI matches the compiled pattern.
    ///
    /// Never fails: a candidate that is not a well-formed URI does not match.
    fn matches(&self, candidate: &str) -> bool;

    /// Compiled pattern segments, in order.
    fn segments(&self) -> &[String];
}

/// Compiled, immutable form of a wildcard pattern.
///
/// Each segment is a literal, a single wildcard `*` that matches exactly one
/// candidate segment, or a trailing double wildcard `**` that matches
/// everything from its position on.
///
/// ```
/// use spiffe_wildcard::{compile, IdentityMatcher};
///
/// let matcher = compile("spiffe://example.org/ns/*/sa/**").unwrap();
/// assert!(matcher.matches("spiffe://example.org/ns/prod/sa/web"));
/// assert!(!matcher.matches("spiffe://example.org/ns/prod"));
/// ```
///
/// Two matchers are equal when they have the same separator and segments,
/// so `spiffe://a` and `spiffe://a/` compare equal. The pattern text is kept
/// for display only.
///
/// With the default separator a matcher serializes as its pattern string.
/// Otherwise it serializes as `{"pattern": ..., "separator": ...}`. Both
/// forms deserialize, with `separator` defaulting to `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MatcherDef", into = "MatcherDef")]
pub struct Matcher {
    pattern: String,
    separator: char,
    segments: Vec<String>,
}

impl Matcher {
    /// Original pattern text the matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn separator(&self) -> char {
        self.separator
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.separator == other.separator && self.segments == other.segments
    }
}

impl Eq for Matcher {}

impl Hash for Matcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.separator.hash(state);
        self.segments.hash(state);
    }
}

impl IdentityMatcher for Matcher {
    fn matches(&self, candidate: &str) -> bool {
        let candidate = match parse_candidate(candidate, self.separator) {
            Ok(view) => view,
            Err(_) => return false,
        };
        match_segments(&self.segments, candidate.segments())
    }

    fn segments(&self) -> &[String] {
        &self.segments
    }
}

fn match_segments(acl: &[String], uri: &[String]) -> bool {
    if TRACE_MATCHING {
        trace!(
            uri = %uri.join("!"),
            uri_len = uri.len(),
            acl = %acl.join("!"),
            acl_len = acl.len(),
            "comparing"
        );
    }

    let min_len = acl.len().min(uri.len());

    for (acl_segment, uri_segment) in acl.iter().zip(uri) {
        if TRACE_MATCHING {
            trace!(%acl_segment, %uri_segment, "segment");
        }

        if acl_segment == SINGLE_WILDCARD || acl_segment == uri_segment {
            continue;
        } else if acl_segment == DOUBLE_WILDCARD {
            // everything from here on matches
            return true;
        } else {
            return false;
        }
    }

    if acl.len() == uri.len() {
        return true;
    }

    // `**` right after the end of the candidate, e.g. `a/**` against `a`.
    // Validation guarantees it is the last pattern segment.
    matches!(acl.get(min_len), Some(segment) if segment == DOUBLE_WILDCARD)
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for Matcher {
    type Err = Error;

    fn from_str(pattern: &str) -> Result<Self> {
        compile(pattern)
    }
}

impl TryFrom<&str> for Matcher {
    type Error = Error;

    fn try_from(pattern: &str) -> Result<Self> {
        compile(pattern)
    }
}

impl TryFrom<String> for Matcher {
    type Error = Error;

    fn try_from(pattern: String) -> Result<Self> {
        compile(&pattern)
    }
}

impl From<Matcher> for String {
    fn from(matcher: Matcher) -> Self {
        matcher.pattern
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MatcherDef {
    Pattern(String),
    WithSeparator {
        pattern: String,
        #[serde(default = "default_separator")]
        separator: char,
    },
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

impl TryFrom<MatcherDef> for Matcher {
    type Error = Error;

    fn try_from(def: MatcherDef) -> Result<Self> {
        match def {
            MatcherDef::Pattern(pattern) => compile(&pattern),
            MatcherDef::WithSeparator { pattern, separator } => {
                compile_with_separator(&pattern, separator)
            }
        }
    }
}

impl From<Matcher> for MatcherDef {
    fn from(matcher: Matcher) -> Self {
        if matcher.separator == DEFAULT_SEPARATOR {
            MatcherDef::Pattern(matcher.pattern)
        } else {
            MatcherDef::WithSeparator {
                pattern: matcher.pattern,
                separator: matcher.separator,
            }
        }
    }
}

/// Creates a new `Matcher` given a pattern, using `/` as the separator.
pub fn compile(pattern: &str) -> Result<Matcher> {
    compile_with_separator(pattern, DEFAULT_SEPARATOR)
}

/// Creates new `Matcher`s for every pattern, using `/` as the separator.
///
/// Stops at the first invalid pattern and returns its error.
pub fn compile_list<I, S>(patterns: I) -> Result<Vec<Matcher>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| compile(pattern.as_ref()))
        .collect()
}

/// Creates a new `Matcher` and panics if the pattern is invalid.
///
/// Only for patterns known to be valid, such as constants. Never call this
/// with input that comes from outside the program.
pub fn compile_or_panic(pattern: &str) -> Matcher {
    match compile(pattern) {
        Ok(matcher) => matcher,
        Err(e) => panic!("invalid wildcard pattern {:?}: {}", pattern, e),
    }
}

/// Creates a new `Matcher` given a pattern and a separator.
///
/// The separator is used both for the pattern and for every candidate the
/// matcher is tested against.
pub fn compile_with_separator(pattern: &str, separator: char) -> Result<Matcher> {
    let segments = DefaultValidator.validate(pattern, separator)?;

    Ok(Matcher {
        pattern: pattern.to_owned(),
        separator,
        segments,
    })
}
