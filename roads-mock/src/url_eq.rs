//! URL equivalence that ignores the order of query parameters.
//!
//! Two URLs are equivalent when scheme, authority and path are equal as
//! written (only the scheme is compared case-insensitively, nothing is
//! normalised) and their query strings hold the same `(key, value)` pairs, counted with
//! multiplicity. Values are compared percent-decoded, so `path=1%2C2` and
//! `path=1,2` are the same parameter. Pairs with an empty value are dropped
//! before comparison.

use std::fmt;
use thiserror::Error;
use url::Url;

pub type QueryPairs = Vec<(String, String)>;

/// Which side of a comparison a URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

/// The part of a URL before its query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Scheme,
    Authority,
    Path,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Scheme => write!(f, "scheme"),
            Component::Authority => write!(f, "authority"),
            Component::Path => write!(f, "path"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Expected => write!(f, "expected"),
            Side::Actual => write!(f, "actual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlMismatch {
    #[error("{side} URL {url:?} could not be parsed: {source}")]
    Invalid {
        side: Side,
        url: String,
        source: url::ParseError,
    },
    #[error("{component} differs: expected {expected:?}, actual {actual:?}")]
    Location {
        component: Component,
        expected: String,
        actual: String,
    },
    #[error("query parameters differ: expected {expected:?}, actual {actual:?}")]
    Query {
        expected: QueryPairs,
        actual: QueryPairs,
    },
}

#[derive(Debug)]
struct UrlParts {
    scheme: String,
    authority: String,
    path: String,
    query: QueryPairs,
}

impl UrlParts {
    fn parse(raw: &str, side: Side) -> Result<Self, UrlMismatch> {
        let url = Url::parse(raw).map_err(|source| UrlMismatch::Invalid {
            side,
            url: raw.into(),
            source,
        })?;

        let mut query: QueryPairs = url
            .query_pairs()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        query.sort();

        let location = raw
            .find(|c: char| c == '?' || c == '#')
            .map_or(raw, |end| &raw[..end]);
        let (scheme, rest) = location.split_once(':').unwrap_or(("", location));
        let (authority, path) = match rest.strip_prefix("//") {
            Some(hierarchical) => hierarchical
                .find('/')
                .map_or((hierarchical, ""), |start| hierarchical.split_at(start)),
            None => ("", rest),
        };

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            authority: authority.into(),
            path: path.into(),
            query,
        })
    }

    fn components(&self) -> [(Component, &str); 3] {
        [
            (Component::Scheme, self.scheme.as_str()),
            (Component::Authority, self.authority.as_str()),
            (Component::Path, self.path.as_str()),
        ]
    }
}

/// Compare two URLs, naming the component that differs.
pub fn compare_urls(expected: &str, actual: &str) -> Result<(), UrlMismatch> {
    let expected = UrlParts::parse(expected, Side::Expected)?;
    let actual = UrlParts::parse(actual, Side::Actual)?;

    let components = expected.components().into_iter().zip(actual.components());
    for ((component, wanted), (_, found)) in components {
        if wanted != found {
            return Err(UrlMismatch::Location {
                component,
                expected: wanted.into(),
                actual: found.into(),
            });
        }
    }

    if expected.query != actual.query {
        return Err(UrlMismatch::Query {
            expected: expected.query,
            actual: actual.query,
        });
    }

    Ok(())
}

pub fn urls_equivalent(first: &str, second: &str) -> bool {
    compare_urls(first, second).is_ok()
}

/// Panic with a diagnostic when the URLs are not equivalent.
#[track_caller]
pub fn assert_url_eq<S1: AsRef<str>, S2: AsRef<str>>(expected: S1, actual: S2) {
    if let Err(mismatch) = compare_urls(expected.as_ref(), actual.as_ref()) {
        panic!("assertion failed: URLs are not equivalent\n  {}", mismatch);
    }
}
