//! Member store with page-indexed pagination.

use pagination::PagedList;
use serde_json::Value;
use tracing::warn;

use super::{HasStatus, LoadStatus, StoreCell, StoreGateway};
use crate::domain::models::users::{password_reset_payload, status_payload};
use crate::domain::models::{User, UserPage, UserSearch};
use crate::domain::{Error, ProxyRequest, ProxyRoute, SearchParams};

/// Page size shown before the first fetch reports one.
const INITIAL_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct UserState {
    /// Current page exactly as the backend reported it.
    pub users: PagedList<User>,
    /// Search used by the last fetch.
    pub search: UserSearch,
    pub status: LoadStatus,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            users: PagedList::empty(INITIAL_LIMIT),
            search: UserSearch::default(),
            status: LoadStatus::default(),
        }
    }
}

impl HasStatus for UserState {
    fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct UserStore {
    gateway: StoreGateway,
    cell: StoreCell<UserState>,
}

impl UserStore {
    pub fn new(gateway: StoreGateway) -> Self {
        Self {
            gateway,
            cell: StoreCell::new(UserState::default()),
        }
    }

    pub fn state(&self) -> UserState {
        self.cell.snapshot()
    }

    pub fn detach(&self) {
        self.cell.detach();
    }

    /// Load the page described by `search`.
    ///
    /// # Errors
    /// Returns the proxy failure; the held page is left as it was.
    pub async fn fetch(&self, search: UserSearch) -> Result<PagedList<User>, Error> {
        let ticket = self.cell.begin();
        let query = SearchParams::from(&search);
        self.cell
            .update_if_current(ticket, |state| state.search = search);
        let result = self
            .gateway
            .fetch::<UserPage>(ProxyRequest::new(ProxyRoute::UserList).with_query(query))
            .await
            .map(PagedList::from);
        self.cell.settle(ticket, result, |state, page| {
            state.users.clone_from(page);
        })
    }

    /// Jump to page `page`, keeping the rest of the last search.
    ///
    /// # Errors
    /// As [`UserStore::fetch`].
    pub async fn change_page(&self, page: u32) -> Result<PagedList<User>, Error> {
        let search = self.cell.read(|state| UserSearch {
            page: Some(page),
            ..state.search.clone()
        });
        self.fetch(search).await
    }

    /// Enable or disable an account, then reload the current page.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn update_status(&self, view_hash: &str, active: bool) -> Result<Option<Value>, Error> {
        let ticket = self.cell.begin();
        let request =
            ProxyRequest::new(ProxyRoute::UserUpdate).with_json(status_payload(view_hash, active));
        let result = self.gateway.send(request).await;
        let data = self.cell.settle(ticket, result, |_, _| {})?;
        let search = self.cell.read(|state| state.search.clone());
        if let Err(error) = self.fetch(search).await {
            warn!(%error, "user refetch after status change failed");
        }
        Ok(data)
    }

    /// Reset an account's password.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn reset_password(&self, view_hash: &str) -> Result<Option<Value>, Error> {
        let ticket = self.cell.begin();
        let request = ProxyRequest::new(ProxyRoute::UserResetPassword)
            .with_json(password_reset_payload(view_hash));
        let result = self.gateway.send(request).await;
        self.cell.settle(ticket, result, |_, _| {})
    }
}
