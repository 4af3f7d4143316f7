//! Category store and the cached category catalogue.

use tracing::warn;

use super::{HasStatus, LoadStatus, StoreCell, StoreGateway};
use crate::domain::models::categories::delete_payload;
use crate::domain::models::{Category, CategoryFilter, CategoryForm, CategoryGroups, CategoryType};
use crate::domain::ports::QueryCacheKey;
use crate::domain::query_cache::{CachePolicy, ReadThroughCache};
use crate::domain::{Error, ProxyRequest, ProxyRoute};

/// Key prefix shared by every cached category read.
pub const CATEGORY_CACHE_PREFIX: &str = "categories:";

/// Cached, read-only view of every category, used by editors that need the
/// category dropdown.
#[derive(Clone)]
pub struct CategoryCatalog {
    gateway: StoreGateway,
    cache: ReadThroughCache,
}

impl CategoryCatalog {
    pub fn new(gateway: StoreGateway, cache: ReadThroughCache) -> Self {
        Self { gateway, cache }
    }

    /// Every category, flattened in group order.
    ///
    /// # Errors
    /// Returns the proxy failure on a cache miss, or an unexpected error when
    /// the cached payload no longer decodes.
    pub async fn all(&self) -> Result<Vec<Category>, Error> {
        let key = QueryCacheKey::new(format!("{CATEGORY_CACHE_PREFIX}all"))
            .map_err(|err| Error::unexpected(err.to_string()))?;
        let gateway = self.gateway.clone();
        let value = self
            .cache
            .get_or_fetch(&key, CachePolicy::CATEGORIES, || async move {
                gateway
                    .send(ProxyRequest::new(ProxyRoute::CategoryList))
                    .await
                    .map(Option::unwrap_or_default)
            })
            .await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value::<CategoryGroups>(value)
            .map(CategoryGroups::flatten)
            .map_err(|_| Error::unexpected(ProxyRoute::CategoryList.messages().unexpected))
    }

    /// Categories of one type.
    ///
    /// # Errors
    /// As [`CategoryCatalog::all`].
    pub async fn by_type(&self, kind: CategoryType) -> Result<Vec<Category>, Error> {
        let all = self.all().await?;
        Ok(all
            .into_iter()
            .filter(|category| category.kind == kind.as_str())
            .collect())
    }

    /// Forget every cached category read.
    pub async fn invalidate(&self) {
        self.cache.invalidate(CATEGORY_CACHE_PREFIX).await;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    /// Filter used by the last fetch.
    pub filter: CategoryFilter,
    pub status: LoadStatus,
}

impl HasStatus for CategoryState {
    fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

/// Category management screen.
pub struct CategoryStore {
    gateway: StoreGateway,
    catalog: CategoryCatalog,
    cell: StoreCell<CategoryState>,
}

impl CategoryStore {
    pub fn new(gateway: StoreGateway, catalog: CategoryCatalog) -> Self {
        Self {
            gateway,
            catalog,
            cell: StoreCell::new(CategoryState::default()),
        }
    }

    pub fn state(&self) -> CategoryState {
        self.cell.snapshot()
    }

    pub fn detach(&self) {
        self.cell.detach();
    }

    /// Load every category and keep those matching `filter`.
    ///
    /// # Errors
    /// Returns the proxy failure; the held list is left as it was.
    pub async fn fetch(&self, filter: CategoryFilter) -> Result<Vec<Category>, Error> {
        let ticket = self.cell.begin();
        self.cell
            .update_if_current(ticket, |state| state.filter = filter.clone());
        let result = self.catalog.all().await.map(|all| filter.apply(all));
        self.cell.settle(ticket, result, |state, categories| {
            state.categories.clone_from(categories);
        })
    }

    /// Fetch again with the last filter.
    ///
    /// # Errors
    /// As [`CategoryStore::fetch`].
    pub async fn refetch(&self) -> Result<Vec<Category>, Error> {
        let filter = self.cell.read(|state| state.filter.clone());
        self.fetch(filter).await
    }

    /// Create a category and return it as the backend stored it.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn create(&self, form: &CategoryForm) -> Result<Category, Error> {
        let request =
            ProxyRequest::new(ProxyRoute::CategoryCreate).with_json(form.create_payload());
        self.mutate::<Category>(request).await
    }

    /// Update the category `id`.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn update(&self, id: i64, form: &CategoryForm) -> Result<Category, Error> {
        let request =
            ProxyRequest::new(ProxyRoute::CategoryUpdate).with_json(form.update_payload(id));
        self.mutate::<Category>(request).await
    }

    /// Delete the category `id`.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let request = ProxyRequest::new(ProxyRoute::CategoryDelete).with_json(delete_payload(id));
        self.mutate::<serde_json::Value>(request).await.map(drop)
    }

    async fn mutate<T>(&self, request: ProxyRequest) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let ticket = self.cell.begin();
        let result = self.gateway.fetch::<T>(request).await;
        let data = self.cell.settle(ticket, result, |_, _| {})?;
        self.catalog.invalidate().await;
        if let Err(error) = self.refetch().await {
            warn!(%error, "category refetch after write failed");
        }
        Ok(data)
    }
}
