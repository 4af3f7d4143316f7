//! Test utilities for the gateway crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

pub use backend::{StubBackend, ok_envelope};
pub use clock::MutableClock;

pub mod clock {
    //! Manually advanced clock for cache staleness tests.

    use std::sync::{Mutex, MutexGuard};
    use std::time::Duration;

    use chrono::{DateTime, Local, TimeDelta, Utc};
    use mockable::Clock;

    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance(&self, delta: Duration) {
            let delta = match TimeDelta::from_std(delta) {
                Ok(delta) => delta,
                Err(error) => panic!("duration out of range: {error}; delta={delta:?}"),
            };
            *self.lock_clock() += delta;
        }

        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod backend {
    //! Scripted [`BackendApi`] that records every request it receives.

    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::domain::Envelope;
    use crate::domain::ports::{BackendApi, BackendApiError, BackendRequest};

    type Responder =
        dyn Fn(&BackendRequest) -> Result<Envelope<Value>, BackendApiError> + Send + Sync;

    /// Successful backend envelope carrying `data`.
    pub fn ok_envelope(data: Value) -> Envelope<Value> {
        Envelope {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Backend double answering through a closure.
    ///
    /// # Examples
    /// ```
    /// use oncare_gateway::test_support::{StubBackend, ok_envelope};
    /// use serde_json::json;
    ///
    /// let backend = StubBackend::new(|_| Ok(ok_envelope(json!([]))));
    /// assert!(backend.requests().is_empty());
    /// ```
    #[derive(Clone)]
    pub struct StubBackend {
        responder: Arc<Responder>,
        requests: Arc<Mutex<Vec<BackendRequest>>>,
    }

    impl StubBackend {
        pub fn new<F>(responder: F) -> Self
        where
            F: Fn(&BackendRequest) -> Result<Envelope<Value>, BackendApiError>
                + Send
                + Sync
                + 'static,
        {
            Self {
                responder: Arc::new(responder),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Answer every request with the same envelope.
        pub fn always(envelope: Envelope<Value>) -> Self {
            Self::new(move |_| Ok(envelope.clone()))
        }

        /// Requests received so far, in order.
        pub fn requests(&self) -> Vec<BackendRequest> {
            self.lock_requests().clone()
        }

        /// Request URLs received so far, in order.
        pub fn urls(&self) -> Vec<String> {
            self.lock_requests()
                .iter()
                .map(|request| request.url.to_string())
                .collect()
        }

        fn lock_requests(&self) -> MutexGuard<'_, Vec<BackendRequest>> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl BackendApi for StubBackend {
        async fn send(&self, request: BackendRequest) -> Result<Envelope<Value>, BackendApiError> {
            let response = (self.responder)(&request);
            self.lock_requests().push(request);
            response
        }
    }
}
