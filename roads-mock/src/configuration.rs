use crate::{fixture::Fixture, responder::Responder, MockResponse, UrlPattern};
use hyper::Method;

/// Fixtures and options installed by [`activate`](crate::activate) for one session.
#[derive(Debug)]
pub struct MockConfiguration {
    fixtures: Vec<Fixture>,
    fail_on_unmatched: bool,
}

impl MockConfiguration {
    pub fn new() -> Self {
        Self {
            fixtures: Vec::new(),
            fail_on_unmatched: true,
        }
    }

    /// Register a canned response, served for every matching request.
    pub fn register_response<P, S1, S2>(
        &mut self,
        method: Method,
        pattern: P,
        body: S1,
        status_code: u16,
        content_type: S2,
    ) -> &mut Self
    where
        P: Into<UrlPattern>,
        S1: Into<String>,
        S2: Into<String>,
    {
        let response = MockResponse::new(status_code)
            .with_content_type(content_type)
            .with_body(body);

        self.register(Fixture::response(method, pattern, response))
    }

    pub fn register_responder<P, R>(&mut self, method: Method, pattern: P, responder: R) -> &mut Self
    where
        P: Into<UrlPattern>,
        R: Responder + 'static,
    {
        self.register(Fixture::new(method, pattern, responder))
    }

    pub fn register(&mut self, fixture: Fixture) -> &mut Self {
        self.fixtures.push(fixture);
        self
    }

    /// When set (the default), requests no fixture matched fail the session.
    pub fn set_fail_on_unmatched(&mut self, value: bool) -> &mut Self {
        self.fail_on_unmatched = value;
        self
    }

    pub fn fail_on_unmatched(&self) -> bool {
        self.fail_on_unmatched
    }

    pub(crate) fn into_fixtures(self) -> Vec<Fixture> {
        self.fixtures
    }
}

impl Default for MockConfiguration {
    fn default() -> Self {
        Self::new()
    }
}
