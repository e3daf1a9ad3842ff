mod flaky_responder;

use crate::{MockResponse, RecordedCall};
use std::fmt::{self, Debug};

pub use flaky_responder::FlakyResponder;

/// Produces the response for each call a fixture matches.
pub trait Responder: Debug + Send {
    fn respond(&mut self, call: &RecordedCall) -> MockResponse;
}

impl Responder for MockResponse {
    fn respond(&mut self, _call: &RecordedCall) -> MockResponse {
        self.clone()
    }
}

/// Adapts a closure into a [`Responder`].
pub struct FnResponder<F> {
    func: F,
}

impl<F> Responder for FnResponder<F>
where
    F: FnMut(&RecordedCall) -> MockResponse + Send,
{
    fn respond(&mut self, call: &RecordedCall) -> MockResponse {
        (self.func)(call)
    }
}

impl<F> Debug for FnResponder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResponder").finish_non_exhaustive()
    }
}

pub fn responder_fn<F>(func: F) -> FnResponder<F>
where
    F: FnMut(&RecordedCall) -> MockResponse + Send,
{
    FnResponder { func }
}
