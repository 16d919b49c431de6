//! Wildcard matching of SPIFFE identity URIs.
//!
//! Patterns are `spiffe://` URIs whose segments are literals, a single `*`
//! that matches exactly one segment, or a trailing `**` that matches
//! everything after it. A trailing separator is optional on both sides, so
//! `spiffe://foo/bar` and `spiffe://foo/bar/` are treated as equivalent.
//! Less powerful than regular expressions, and harder to get wrong.
#![deny(rust_2018_idioms)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]
mod acl;
mod errors;
mod matcher;
mod segments;
mod validator;

pub use acl::{Acl, AclBuilder, Decision, Effect};
pub use errors::{Error, Result};
pub use matcher::{
    compile, compile_list, compile_or_panic, compile_with_separator, IdentityMatcher, Matcher,
};
pub use segments::{parse_candidate, split_segments, SegmentView, DEFAULT_SEPARATOR, SPIFFE_PREFIX};
pub use validator::{
    validate_pattern, DefaultValidator, PatternValidator, DOUBLE_WILDCARD, SINGLE_WILDCARD,
};
