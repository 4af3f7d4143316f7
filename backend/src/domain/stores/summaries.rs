//! Summary search store.

use super::{ListState, StoreCell, StoreGateway};
use crate::domain::models::{Summary, SummarySearch};
use crate::domain::{Error, ProxyRequest, ProxyRoute, SearchParams};

pub struct SummaryStore {
    gateway: StoreGateway,
    cell: StoreCell<ListState<Summary>>,
}

impl SummaryStore {
    pub fn new(gateway: StoreGateway) -> Self {
        Self {
            gateway,
            cell: StoreCell::new(ListState::default()),
        }
    }

    pub fn state(&self) -> ListState<Summary> {
        self.cell.snapshot()
    }

    pub fn detach(&self) {
        self.cell.detach();
    }

    /// Replace the held summaries with the results of `search`.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn fetch(&self, search: &SummarySearch) -> Result<Vec<Summary>, Error> {
        let ticket = self.cell.begin();
        let request =
            ProxyRequest::new(ProxyRoute::SummarySearch).with_query(SearchParams::from(search));
        let result = self.gateway.fetch::<Vec<Summary>>(request).await;
        self.cell.settle(ticket, result, |state, summaries| {
            state.items.clone_from(summaries);
        })
    }
}
