use crate::{error::Error, fixture::Fixture, MockConfiguration, MockResponse, RecordedCall};
use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard, PoisonError};

lazy_static! {
    static ref REGISTRY: Mutex<Registry> = Mutex::new(Registry::new());
}

/// Lock the process-wide registry. A panic in another test must not wedge the
/// rest of the suite, so poisoning is ignored.
pub(crate) fn registry() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
pub(crate) struct Registry {
    fixtures: Vec<Fixture>,
    calls: Vec<RecordedCall>,
    unmatched: Vec<RecordedCall>,
    errors: Vec<Error>,
    fail_on_unmatched: bool,
}

impl Registry {
    fn new() -> Self {
        Registry {
            fixtures: Vec::new(),
            calls: Vec::new(),
            unmatched: Vec::new(),
            errors: Vec::new(),
            fail_on_unmatched: true,
        }
    }

    pub(crate) fn install(&mut self, configuration: MockConfiguration) {
        self.reset();
        self.fail_on_unmatched = configuration.fail_on_unmatched();
        self.fixtures = configuration.into_fixtures();
    }

    pub(crate) fn register(&mut self, fixture: Fixture) {
        self.fixtures.push(fixture);
    }

    /// Record `call` and answer it with the first fixture that still matches.
    pub(crate) fn dispatch(&mut self, call: RecordedCall) -> MockResponse {
        self.calls.push(call.clone());

        match self.fixtures.iter_mut().find(|fixture| fixture.matches(&call)) {
            Some(fixture) => {
                let response = fixture.respond(&call);
                tracing::debug!(
                    method = %call.method,
                    url = %call.url,
                    status = response.status_code,
                    "served fixture"
                );
                response
            }
            None => {
                tracing::warn!(method = %call.method, url = %call.url, "no fixture matched");
                let response = MockResponse::new(404)
                    .with_content_type("text/plain")
                    .with_body(format!("no fixture registered for {} {}", call.method, call.url));
                self.unmatched.push(call);
                response
            }
        }
    }

    pub(crate) fn record_error(&mut self, error: Error) {
        tracing::error!(%error, "mock server failed to answer a request");
        self.errors.push(error);
    }

    pub(crate) fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// The first thing that went wrong during the session, if anything did.
    pub(crate) fn take_failure(&mut self) -> Option<Error> {
        if !self.errors.is_empty() {
            return Some(self.errors.remove(0));
        }

        if self.fail_on_unmatched && !self.unmatched.is_empty() {
            let call = self.unmatched.remove(0);
            return Some(Error::UnmatchedRequest {
                method: call.method,
                url: call.url,
            });
        }

        None
    }

    pub(crate) fn reset(&mut self) {
        self.fixtures.clear();
        self.calls.clear();
        self.unmatched.clear();
        self.errors.clear();
        self.fail_on_unmatched = true;
    }
}
