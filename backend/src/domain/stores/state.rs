//! Shared state plumbing for resource stores.
//!
//! A store keeps its state behind a [`StoreCell`]. The lock is only ever held
//! for synchronous updates, never across an `.await`. Each action takes a
//! [`Ticket`] before suspending; if the store was detached in the meantime,
//! the result is handed back to the caller but not written into the state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::Error;

/// Loading flag and last error message of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStatus {
    /// A call is in flight.
    pub loading: bool,
    /// Message of the last failed call, cleared when the next call starts.
    pub error: Option<String>,
}

/// State types that carry a [`LoadStatus`].
pub trait HasStatus {
    fn status(&self) -> &LoadStatus;
    fn status_mut(&mut self) -> &mut LoadStatus;
}

/// Generic `(items, loading, error)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::default(),
        }
    }
}

impl<T> HasStatus for ListState<T> {
    fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

/// Generation stamp taken when an action starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Mutex-guarded store state with a generation counter.
#[derive(Debug, Default)]
pub struct StoreCell<S> {
    state: Mutex<S>,
    generation: AtomicU64,
}

impl<S> StoreCell<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: Mutex::new(state),
            generation: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stamp for the current generation.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.generation.load(Ordering::Acquire))
    }

    /// Whether `ticket` still belongs to the current generation.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.ticket() == ticket
    }

    /// Discard the results of every action started before this call.
    pub fn detach(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Run `f` against the state.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock())
    }

    /// Run `f` only if `ticket` is still current.
    pub fn update_if_current<R>(&self, ticket: Ticket, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut state = self.lock();
        self.is_current(ticket).then(|| f(&mut state))
    }

    /// Read from the state.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock())
    }
}

impl<S: Clone> StoreCell<S> {
    /// Clone of the whole state.
    pub fn snapshot(&self) -> S {
        self.lock().clone()
    }
}

impl<S: HasStatus> StoreCell<S> {
    /// Mark a call as started: set `loading`, clear `error`.
    pub fn begin(&self) -> Ticket {
        let mut state = self.lock();
        let status = state.status_mut();
        status.loading = true;
        status.error = None;
        self.ticket()
    }

    /// Record the result of a call started with `ticket`.
    ///
    /// On success `apply` writes the value into the state; on failure the
    /// message is mirrored into `error` and prior contents stay untouched.
    /// `loading` is cleared either way. Nothing is written for stale tickets.
    ///
    /// # Errors
    /// Returns `result` unchanged.
    pub fn settle<T>(
        &self,
        ticket: Ticket,
        result: Result<T, Error>,
        apply: impl FnOnce(&mut S, &T),
    ) -> Result<T, Error> {
        self.update_if_current(ticket, |state| {
            match &result {
                Ok(value) => apply(state, value),
                Err(error) => state.status_mut().error = Some(error.message().to_owned()),
            }
            state.status_mut().loading = false;
        });
        result
    }
}
