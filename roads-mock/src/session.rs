use crate::{
    error::Error, fixture::Fixture, logging, registry, runner, MockConfiguration, RecordedCall,
};
use lazy_static::lazy_static;
use std::{
    net::SocketAddr,
    sync::{Mutex, MutexGuard, PoisonError},
};

lazy_static! {
    static ref SESSION_LOCK: Mutex<()> = Mutex::new(());
}

/// Install `configuration` on the mock server and hold it until the returned
/// session is dropped.
///
/// Only one session is active per process; a second caller blocks until the
/// first one is dropped.
pub fn activate(configuration: MockConfiguration) -> Result<MockSession, Error> {
    logging::init();

    let address = runner::start_once()?;
    let lock = SESSION_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    registry::registry().install(configuration);

    Ok(MockSession {
        address,
        _lock: lock,
    })
}

/// Address of the mock server, starting it if necessary.
pub fn base_url() -> Result<String, Error> {
    Ok(format!("http://{}", runner::start_once()?))
}

/// Calls recorded by the active session so far.
pub fn calls() -> Vec<RecordedCall> {
    registry::registry().calls().to_vec()
}

pub fn call_count() -> usize {
    registry::registry().calls().len()
}

/// Add a fixture to the active session.
pub fn register(fixture: Fixture) {
    registry::registry().register(fixture);
}

#[derive(Debug)]
pub struct MockSession {
    address: SocketAddr,
    _lock: MutexGuard<'static, ()>,
}

impl MockSession {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Absolute URL on the mock server for `path_and_query`.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url(), path_and_query)
    }

    pub fn register(&self, fixture: Fixture) {
        register(fixture);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        calls()
    }

    pub fn call_count(&self) -> usize {
        call_count()
    }

    /// End the session, reporting a request no fixture matched or a response
    /// the server failed to build.
    pub fn finish(self) -> Result<(), Error> {
        match registry::registry().take_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        registry::registry().reset();
    }
}
