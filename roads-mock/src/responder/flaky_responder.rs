use super::Responder;
use crate::{MockResponse, RecordedCall};

/// Fails the first `failures` calls, then succeeds on every call after.
///
/// The default fails exactly once with an empty 500, which is enough to make a
/// retrying client reissue its request.
#[derive(Debug, Clone)]
pub struct FlakyResponder {
    calls: u32,
    failures: u32,
    failure: MockResponse,
    success: MockResponse,
}

impl FlakyResponder {
    pub fn new(success: MockResponse) -> Self {
        Self {
            calls: 0,
            failures: 1,
            failure: MockResponse::new(500),
            success,
        }
    }

    pub fn with_failures(mut self, failures: u32) -> Self {
        self.failures = failures;
        self
    }

    pub fn with_failure(mut self, failure: MockResponse) -> Self {
        self.failure = failure;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl Responder for FlakyResponder {
    fn respond(&mut self, _call: &RecordedCall) -> MockResponse {
        let failing = self.calls < self.failures;
        self.calls = self.calls.saturating_add(1);

        if failing {
            self.failure.clone()
        } else {
            self.success.clone()
        }
    }
}
