use crate::{responder::Responder, MockResponse, RecordedCall};
use hyper::Method;
use regex::Regex;

/// What a fixture matches a request URL against.
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// Exact path; the query string is ignored.
    Path(String),
    /// Matched against the path followed by the query string, if any.
    Regex(Regex),
}

impl UrlPattern {
    pub fn matches(&self, call: &RecordedCall) -> bool {
        match self {
            UrlPattern::Path(path) => call.path() == path.as_str(),
            UrlPattern::Regex(regex) => regex.is_match(call.path_and_query()),
        }
    }
}

impl From<&str> for UrlPattern {
    fn from(path: &str) -> Self {
        UrlPattern::Path(path.into())
    }
}

impl From<String> for UrlPattern {
    fn from(path: String) -> Self {
        UrlPattern::Path(path)
    }
}

impl From<Regex> for UrlPattern {
    fn from(regex: Regex) -> Self {
        UrlPattern::Regex(regex)
    }
}

/// A canned answer registered against a method and URL pattern.
#[derive(Debug)]
pub struct Fixture {
    method: Method,
    pattern: UrlPattern,
    responder: Box<dyn Responder>,
    remaining: Option<usize>,
}

impl Fixture {
    pub fn new<P, R>(method: Method, pattern: P, responder: R) -> Self
    where
        P: Into<UrlPattern>,
        R: Responder + 'static,
    {
        Self {
            method,
            pattern: pattern.into(),
            responder: Box::new(responder),
            remaining: None,
        }
    }

    pub fn response<P: Into<UrlPattern>>(method: Method, pattern: P, response: MockResponse) -> Self {
        Self::new(method, pattern, response)
    }

    /// Limit the fixture to `times` matches; afterwards it no longer matches.
    pub fn times(mut self, times: usize) -> Self {
        self.remaining = Some(times);
        self
    }

    pub fn once(self) -> Self {
        self.times(1)
    }

    pub fn matches(&self, call: &RecordedCall) -> bool {
        self.remaining != Some(0)
            && self.method.as_str().eq_ignore_ascii_case(&call.method)
            && self.pattern.matches(call)
    }

    pub(crate) fn respond(&mut self, call: &RecordedCall) -> MockResponse {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        self.responder.respond(call)
    }
}
