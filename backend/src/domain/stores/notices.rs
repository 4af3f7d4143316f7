//! Notice store.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use super::{HasStatus, LoadStatus, StoreCell, StoreGateway};
use crate::domain::debounce::Debouncer;
use crate::domain::models::notices::status_toggle_payload;
use crate::domain::models::{Notice, NoticeFilter, NoticeForm, NoticeRecord};
use crate::domain::{Error, ProxyRequest, ProxyRoute, SearchParams};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeState {
    /// Notices after client-side filtering.
    pub notices: Vec<Notice>,
    /// Filter used by the last fetch.
    pub filter: NoticeFilter,
    pub status: LoadStatus,
}

impl HasStatus for NoticeState {
    fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

/// Notice list with client-side search.
pub struct NoticeStore {
    gateway: StoreGateway,
    cell: StoreCell<NoticeState>,
    debouncer: Debouncer,
}

impl NoticeStore {
    pub fn new(gateway: StoreGateway) -> Self {
        Self::with_debouncer(gateway, Debouncer::default())
    }

    pub fn with_debouncer(gateway: StoreGateway, debouncer: Debouncer) -> Self {
        Self {
            gateway,
            cell: StoreCell::new(NoticeState::default()),
            debouncer,
        }
    }

    /// Current state.
    pub fn state(&self) -> NoticeState {
        self.cell.snapshot()
    }

    /// Drop results of calls still in flight.
    pub fn detach(&self) {
        self.debouncer.cancel();
        self.cell.detach();
    }

    /// Load every notice and keep those matching `filter`.
    ///
    /// # Errors
    /// Returns the proxy failure; the held list is left as it was.
    pub async fn fetch(&self, filter: NoticeFilter) -> Result<Vec<Notice>, Error> {
        let ticket = self.cell.begin();
        self.cell
            .update_if_current(ticket, |state| state.filter = filter.clone());
        let result = self
            .gateway
            .fetch::<Vec<NoticeRecord>>(ProxyRequest::new(ProxyRoute::NoticeList))
            .await
            .map(|records| filter.apply(records.into_iter().map(Notice::from).collect()));
        self.cell.settle(ticket, result, |state, notices| {
            state.notices.clone_from(notices);
        })
    }

    /// Fetch again with the last filter.
    ///
    /// # Errors
    /// As [`NoticeStore::fetch`].
    pub async fn refetch(&self) -> Result<Vec<Notice>, Error> {
        let filter = self.cell.read(|state| state.filter.clone());
        self.fetch(filter).await
    }

    /// Fetch with `filter` once input has been quiet for the debounce delay.
    pub fn search(self: &Arc<Self>, filter: NoticeFilter) {
        let store = Arc::clone(self);
        self.debouncer.schedule(async move {
            // The error is mirrored into the state for the screen to render.
            let _ = store.fetch(filter).await;
        });
    }

    /// Create a notice.
    ///
    /// # Errors
    /// Returns the proxy failure; no refetch happens in that case.
    pub async fn create(&self, form: &NoticeForm) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::NoticeCreate).with_json(form.create_payload());
        self.mutate(request).await
    }

    /// Update the fields of the notice identified by `view_hash`.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn update(&self, view_hash: &str, form: &NoticeForm) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::NoticeUpdate)
            .with_query(SearchParams::new().with("view_hash", view_hash))
            .with_json(form.update_payload());
        self.mutate(request).await
    }

    /// Flip a notice between active and inactive.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn toggle_status(&self, view_hash: &str) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::NoticeUpdate)
            .with_query(SearchParams::new().with("view_hash", view_hash))
            .with_json(status_toggle_payload());
        self.mutate(request).await
    }

    /// Delete a notice.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn delete(&self, view_hash: &str) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::NoticeDelete)
            .with_query(SearchParams::new().with("view_hash", view_hash));
        self.mutate(request).await
    }

    async fn mutate(&self, request: ProxyRequest) -> Result<Option<Value>, Error> {
        let ticket = self.cell.begin();
        let result = self.gateway.send(request).await;
        let data = self.cell.settle(ticket, result, |_, _| {})?;
        if let Err(error) = self.refetch().await {
            warn!(%error, "notice refetch after write failed");
        }
        Ok(data)
    }
}
