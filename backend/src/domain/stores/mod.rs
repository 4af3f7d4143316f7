//! Resource stores.
//!
//! Each store owns the state for one admin screen and reaches the backend
//! only through the route proxy, via the [`GatewayApi`] port. Reads replace or
//! append the held list; writes are followed by a full refetch with the last
//! filter used.

mod categories;
mod dashboard;
mod feeds;
mod notices;
pub mod state;
mod summaries;
mod users;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use categories::{CATEGORY_CACHE_PREFIX, CategoryCatalog, CategoryState, CategoryStore};
pub use dashboard::{DashboardState, DashboardStore};
pub use feeds::{FEED_PAGE_SIZE, FeedState, FeedStore};
pub use notices::{NoticeState, NoticeStore};
pub use state::{HasStatus, ListState, LoadStatus, StoreCell, Ticket};
pub use summaries::SummaryStore;
pub use users::{UserState, UserStore};

use crate::domain::ports::GatewayApi;
use crate::domain::{BearerToken, Error, ProxyRequest};

/// Gateway handle shared by the stores, carrying the caller's token.
#[derive(Clone)]
pub struct StoreGateway {
    api: Arc<dyn GatewayApi>,
    token: Option<BearerToken>,
}

impl StoreGateway {
    pub fn new(api: Arc<dyn GatewayApi>) -> Self {
        Self { api, token: None }
    }

    /// Forward `token` on every call.
    #[must_use]
    pub fn with_token(mut self, token: Option<BearerToken>) -> Self {
        self.token = token;
        self
    }

    /// Issue `request` and return the envelope's `data`.
    ///
    /// # Errors
    /// Returns the proxy's failure, or an application error when the envelope
    /// says `success: false`.
    pub async fn send(&self, request: ProxyRequest) -> Result<Option<Value>, Error> {
        let route = request.route;
        let request = match (&request.token, &self.token) {
            (None, Some(token)) => request.with_token(Some(token.clone())),
            _ => request,
        };
        self.api
            .call(request)
            .await?
            .into_result(route.messages().failure)
    }

    /// Issue `request` and decode `data`; a missing `data` decodes as
    /// `T::default()`.
    ///
    /// # Errors
    /// As [`StoreGateway::send`], plus an unexpected error when `data` does
    /// not have the expected shape.
    pub async fn fetch<T>(&self, request: ProxyRequest) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        let route = request.route;
        match self.send(request).await? {
            None | Some(Value::Null) => Ok(T::default()),
            Some(data) => serde_json::from_value(data).map_err(|err| {
                Error::unexpected(route.messages().unexpected)
                    .with_details(Value::String(err.to_string()))
            }),
        }
    }
}
