use std::collections::HashMap;

/// A request intercepted by the mock server, in the order it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    /// Full URL including scheme, authority and query string.
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedCall {
    /// Path followed by the query string, if any.
    pub fn path_and_query(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| rest);

        without_scheme
            .find('/')
            .map_or("/", |index| &without_scheme[index..])
    }

    /// Path component of the recorded URL, without the query string.
    pub fn path(&self) -> &str {
        let path_and_query = self.path_and_query();

        path_and_query
            .split_once('?')
            .map_or(path_and_query, |(path, _)| path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl MockResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// A 200 response carrying `body` as `application/json`.
    pub fn json<S: Into<String>>(body: S) -> Self {
        Self::new(200)
            .with_content_type("application/json")
            .with_body(body)
    }

    pub fn with_body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    pub fn with_content_type<S: Into<String>>(self, content_type: S) -> Self {
        self.with_header("content-type", content_type)
    }
}
