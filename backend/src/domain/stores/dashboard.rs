//! Dashboard counters store.

use super::{HasStatus, LoadStatus, StoreCell, StoreGateway};
use crate::domain::models::DashboardStats;
use crate::domain::{Error, ProxyRequest, ProxyRoute};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub stats: Option<DashboardStats>,
    pub status: LoadStatus,
}

impl HasStatus for DashboardState {
    fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct DashboardStore {
    gateway: StoreGateway,
    cell: StoreCell<DashboardState>,
}

impl DashboardStore {
    pub fn new(gateway: StoreGateway) -> Self {
        Self {
            gateway,
            cell: StoreCell::new(DashboardState::default()),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.cell.snapshot()
    }

    pub fn detach(&self) {
        self.cell.detach();
    }

    /// Load the dashboard counters.
    ///
    /// # Errors
    /// Returns the proxy failure; previously loaded counters are kept.
    pub async fn fetch_stats(&self) -> Result<DashboardStats, Error> {
        let ticket = self.cell.begin();
        let result = self
            .gateway
            .fetch::<DashboardStats>(ProxyRequest::new(ProxyRoute::DashboardStats))
            .await;
        self.cell.settle(ticket, result, |state, stats| {
            state.stats = Some(stats.clone());
        })
    }
}
