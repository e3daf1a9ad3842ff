mod configuration;
mod data;
mod error;
mod fixture;
pub mod logging;
mod registry;
pub mod responder;
mod runner;
mod session;
pub mod url_eq;
mod util;

pub use configuration::MockConfiguration;
pub use data::{MockResponse, RecordedCall};
pub use error::Error;
pub use fixture::{Fixture, UrlPattern};
pub use hyper::Method;
pub use responder::{responder_fn, FlakyResponder, Responder};
pub use roads_mock_codegen::mock_test;
pub use session::{activate, base_url, call_count, calls, register, MockSession};
pub use url_eq::{assert_url_eq, compare_urls, urls_equivalent, Component, UrlMismatch};
