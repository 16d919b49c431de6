use crate::{Error, Result};

/// Scheme prefix every identity URI and pattern must start with.
pub const SPIFFE_PREFIX: &str = "spiffe://";

/// Separator used by `compile` and friends when none is given.
pub const DEFAULT_SEPARATOR: char = '/';

/// Splits the path portion of an identity URI into segments.
///
/// Expects a string that has already been checked for the `spiffe://` prefix.
/// A single trailing separator is dropped before splitting, so
/// `spiffe://a/b` and `spiffe://a/b/` yield the same segments. Empty segments
/// are returned as-is; rejecting them is up to the caller.
pub fn split_segments(uri: &str, separator: char) -> Vec<&str> {
    let path = uri.strip_prefix(SPIFFE_PREFIX).unwrap_or(uri);
    let path = path.strip_suffix(separator).unwrap_or(path);
    path.split(separator).collect()
}

/// Read-only, ordered path segments of a parsed identity URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentView(Vec<String>);

impl SegmentView {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl AsRef<[String]> for SegmentView {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

/// Parses a candidate identity URI into its segments.
///
/// Candidates are not patterns: `*` and `**` are ordinary segment values here.
pub fn parse_candidate(uri: &str, separator: char) -> Result<SegmentView> {
    if uri.is_empty() {
        return Err(Error::EmptyPattern);
    }

    if !uri.starts_with(SPIFFE_PREFIX) {
        return Err(Error::InvalidPrefix);
    }

    let segments = split_segments(uri, separator);
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(Error::InvalidSegment);
    }

    Ok(SegmentView(
        segments.into_iter().map(str::to_owned).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    #[test_case("spiffe://a", &["a"] ; "single segment")]
    #[test_case("spiffe://a/b/c", &["a", "b", "c"] ; "several segments")]
    #[test_case("spiffe://a/b/", &["a", "b"] ; "trailing separator dropped")]
    #[test_case("spiffe://a//b", &["a", "", "b"] ; "empty segment kept")]
    #[test_case("spiffe://", &[""] ; "empty path")]
    #[test_case("spiffe:///", &[""] ; "lone trailing separator")]
    fn split_segments_default_separator(uri: &str, expected: &[&str]) {
        assert_eq!(expected, split_segments(uri, DEFAULT_SEPARATOR).as_slice());
    }

    #[test]
    fn split_segments_drops_only_one_trailing_separator() {
        assert_eq!(vec!["a", ""], split_segments("spiffe://a//", '/'));
    }

    #[test]
    fn split_segments_custom_separator() {
        assert_eq!(
            vec!["example.org", "ns", "prod"],
            split_segments("spiffe://example.org:ns:prod:", ':')
        );
        // the prefix slashes are not treated as separators
        assert_eq!(vec!["a/b"], split_segments("spiffe://a/b", ':'));
    }

    #[test]
    fn parse_candidate_ok() {
        let view = parse_candidate("spiffe://example.org/ns/prod/", '/').unwrap();

        assert_eq!(3, view.len());
        assert!(!view.is_empty());
        assert_eq!(
            vec!["example.org", "ns", "prod"],
            view.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn parse_candidate_keeps_wildcards_literal() {
        let view = parse_candidate("spiffe://a/*/**", '/').unwrap();
        assert_eq!(&["a", "*", "**"], view.segments());
    }

    #[test]
    fn parse_candidate_errors() {
        assert_matches!(parse_candidate("", '/'), Err(Error::EmptyPattern));
        assert_matches!(
            parse_candidate("https://example.org", '/'),
            Err(Error::InvalidPrefix)
        );
        assert_matches!(
            parse_candidate("spiffe://a//b", '/'),
            Err(Error::InvalidSegment)
        );
        assert_matches!(parse_candidate("spiffe://", '/'), Err(Error::InvalidSegment));
    }
}
