use tracing::debug;

use crate::segments::{split_segments, SPIFFE_PREFIX};
use crate::{Error, Result};

pub const SINGLE_WILDCARD: &str = "*";
pub const DOUBLE_WILDCARD: &str = "**";

/// Turns a raw pattern into the segments of a `Matcher`, or rejects it.
pub trait PatternValidator {
    fn validate(&self, pattern: &str, separator: char) -> Result<Vec<String>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator;

impl PatternValidator for DefaultValidator {
    fn validate(&self, pattern: &str, separator: char) -> Result<Vec<String>> {
        validate_pattern(pattern, separator)
    }
}

/// Validates a pattern and returns its segments.
///
/// Checks run in a fixed order and stop at the first failure:
/// empty input, prefix, `**` placement, then every segment.
pub fn validate_pattern(pattern: &str, separator: char) -> Result<Vec<String>> {
    if pattern.is_empty() {
        return Err(Error::EmptyPattern);
    }

    if !pattern.starts_with(SPIFFE_PREFIX) {
        return Err(Error::InvalidPrefix);
    }

    if has_inner_double_wildcard(pattern, separator) {
        return Err(Error::InvalidDoubleWildcard);
    }

    if pattern.ends_with(separator) {
        debug!(%pattern, "pattern has a trailing separator, it is ignored");
    }

    let segments = split_segments(pattern, separator);
    for segment in &segments {
        validate_segment(segment)?;
    }

    Ok(segments.into_iter().map(str::to_owned).collect())
}

/// True when the first `**` is anywhere but the very end of the pattern,
/// right after a separator or the prefix.
fn has_inner_double_wildcard(pattern: &str, separator: char) -> bool {
    let index = match pattern.find(DOUBLE_WILDCARD) {
        Some(index) => index,
        None => return false,
    };

    if index < pattern.len() - DOUBLE_WILDCARD.len() {
        return true;
    }

    let head = &pattern[..index];
    head != SPIFFE_PREFIX && !head.ends_with(separator)
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.len() > 2 && segment.contains(DOUBLE_WILDCARD) {
        return Err(Error::InvalidDoubleWildcard);
    }

    if segment.len() > 1 && segment != DOUBLE_WILDCARD && segment.contains(SINGLE_WILDCARD) {
        return Err(Error::InvalidSingleWildcard);
    }

    if segment.is_empty() {
        return Err(Error::InvalidSegment);
    }

    Ok(())
}
