//! Feed store: infinite scroll, detail view and optimistic toggles.

use std::sync::Arc;

use pagination::OffsetWindow;
use serde_json::Value;
use tracing::warn;

use super::{HasStatus, LoadStatus, StoreCell, StoreGateway};
use crate::domain::debounce::Debouncer;
use crate::domain::models::feeds::{comment_payload, feed_id_payload};
use crate::domain::models::{Feed, FeedComment, FeedDetail, FeedForm, FeedList, FeedSearch};
use crate::domain::{Error, ProxyRequest, ProxyRoute, SearchParams};

/// Feeds requested per page.
pub const FEED_PAGE_SIZE: u32 = 15;

const FEED_WINDOW: OffsetWindow = match OffsetWindow::new(FEED_PAGE_SIZE) {
    Ok(window) => window,
    Err(_) => panic!("feed page size must be non-zero"),
};

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    /// Every page loaded since the last reset.
    pub feeds: Vec<Feed>,
    pub detail: Option<FeedDetail>,
    pub window: OffsetWindow,
    /// Search used by the last fetch.
    pub search: FeedSearch,
    /// Bumped by every reset or new search; pages requested under an older
    /// epoch are dropped.
    pub epoch: u64,
    pub status: LoadStatus,
}

impl FeedState {
    fn new(window: OffsetWindow) -> Self {
        Self {
            feeds: Vec::new(),
            detail: None,
            window,
            search: FeedSearch::default(),
            epoch: 0,
            status: LoadStatus::default(),
        }
    }
}

impl HasStatus for FeedState {
    fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

#[derive(Debug, Clone, Copy)]
enum Toggle {
    Like,
    Bookmark,
}

/// The fields one toggle touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marks {
    flag: bool,
    count: i64,
}

impl Toggle {
    const fn route(self) -> ProxyRoute {
        match self {
            Self::Like => ProxyRoute::FeedLike,
            Self::Bookmark => ProxyRoute::FeedBookmark,
        }
    }

    fn apply(self, feed: &mut Feed) {
        match self {
            Self::Like => feed.flip_like(),
            Self::Bookmark => feed.flip_bookmark(),
        }
    }

    const fn marks(self, feed: &Feed) -> Marks {
        match self {
            Self::Like => Marks {
                flag: feed.is_liked,
                count: feed.like_count,
            },
            Self::Bookmark => Marks {
                flag: feed.is_bookmarked,
                count: 0,
            },
        }
    }

    fn restore(self, feed: &mut Feed, marks: Marks) {
        match self {
            Self::Like => {
                feed.is_liked = marks.flag;
                feed.like_count = marks.count;
            }
            Self::Bookmark => feed.is_bookmarked = marks.flag,
        }
    }
}

/// Feed list with offset pagination.
pub struct FeedStore {
    gateway: StoreGateway,
    cell: StoreCell<FeedState>,
    debouncer: Debouncer,
}

impl FeedStore {
    pub fn new(gateway: StoreGateway) -> Self {
        Self::with_debouncer(gateway, Debouncer::default())
    }

    pub fn with_debouncer(gateway: StoreGateway, debouncer: Debouncer) -> Self {
        Self {
            gateway,
            cell: StoreCell::new(FeedState::new(FEED_WINDOW)),
            debouncer,
        }
    }

    pub fn state(&self) -> FeedState {
        self.cell.snapshot()
    }

    pub fn detach(&self) {
        self.debouncer.cancel();
        self.cell.detach();
    }

    /// Load one page.
    ///
    /// `reset` restarts at offset zero and replaces the list; otherwise the
    /// page is appended and the offset advances by the page size. `None`
    /// reuses the last search.
    ///
    /// # Errors
    /// Returns the proxy failure; the held list and offset stay as they were.
    pub async fn fetch(&self, reset: bool, search: Option<FeedSearch>) -> Result<Vec<Feed>, Error> {
        let ticket = self.cell.begin();
        let (query, requested_at, epoch) = self.cell.update(|state| {
            if reset || search.is_some() {
                state.epoch += 1;
            }
            if let Some(search) = search {
                state.search = search;
            }
            let offset = state.window.request_offset(reset);
            let query = SearchParams::from(&state.search)
                .with("limit", state.window.limit())
                .with("offset", offset);
            (query, offset, state.epoch)
        });
        let result = self
            .gateway
            .fetch::<FeedList>(ProxyRequest::new(ProxyRoute::FeedList).with_query(query))
            .await
            .map(FeedList::into_parts);
        let (feeds, _) = self.cell.settle(ticket, result, |state, (feeds, total)| {
            // A later reset or search superseded this page.
            if state.epoch != epoch || state.window.request_offset(reset) != requested_at {
                return;
            }
            state.window.record_page(reset, feeds.len(), *total);
            if reset {
                state.feeds.clone_from(feeds);
            } else {
                state.feeds.extend(feeds.iter().cloned());
            }
        })?;
        Ok(feeds)
    }

    /// Restart from the first page with `search` once input has been quiet
    /// for the debounce delay.
    pub fn search(self: &Arc<Self>, search: FeedSearch) {
        let store = Arc::clone(self);
        self.debouncer.schedule(async move {
            let _ = store.fetch(true, Some(search)).await;
        });
    }

    /// Load one feed with its comments.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn fetch_detail(&self, feed_id: i64) -> Result<FeedDetail, Error> {
        let ticket = self.cell.begin();
        let request = ProxyRequest::new(ProxyRoute::FeedDetail).with_target(feed_id.to_string());
        let result = self.gateway.fetch::<FeedDetail>(request).await;
        self.cell.settle(ticket, result, |state, detail| {
            state.detail = Some(detail.clone());
        })
    }

    /// Load the comment thread of `feed_id`. An open detail view of the same
    /// feed takes the fresh thread.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn fetch_comments(&self, feed_id: i64) -> Result<Vec<FeedComment>, Error> {
        let ticket = self.cell.begin();
        let request = ProxyRequest::new(ProxyRoute::FeedCommentList)
            .with_query(SearchParams::new().with("feed_id", feed_id));
        let result = self.gateway.fetch::<Vec<FeedComment>>(request).await;
        self.cell.settle(ticket, result, |state, comments| {
            if let Some(detail) = state.detail.as_mut().filter(|detail| detail.feed.id == feed_id) {
                detail.comments.clone_from(comments);
            }
        })
    }

    /// Post a comment on `feed_id`, or a reply under `parent_hash`, then
    /// reload the thread.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn add_comment(
        &self,
        feed_id: i64,
        comment: &str,
        parent_hash: Option<&str>,
    ) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::FeedCommentCreate)
            .with_json(comment_payload(feed_id, comment, parent_hash));
        self.write_comment(feed_id, request).await
    }

    /// Delete a comment of `feed_id`, then reload the thread.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn delete_comment(
        &self,
        feed_id: i64,
        comment_hash: &str,
    ) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::FeedCommentDelete).with_target(comment_hash);
        self.write_comment(feed_id, request).await
    }

    /// Create a feed, then reload from the first page.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn create(&self, form: &FeedForm) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::FeedCreate).with_form(form.create_payload());
        self.mutate(request).await
    }

    /// Update a feed, then reload from the first page.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn update(&self, feed_id: i64, form: &FeedForm) -> Result<Option<Value>, Error> {
        let request =
            ProxyRequest::new(ProxyRoute::FeedUpdate).with_form(form.update_payload(feed_id));
        self.mutate(request).await
    }

    /// Delete a feed, then reload from the first page.
    ///
    /// # Errors
    /// Returns the proxy failure.
    pub async fn delete(&self, feed_id: i64) -> Result<Option<Value>, Error> {
        let request = ProxyRequest::new(ProxyRoute::FeedDelete).with_json(feed_id_payload(feed_id));
        self.mutate(request).await
    }

    /// Like or unlike a feed.
    ///
    /// The flag and counter flip immediately. If the call fails they return
    /// to their prior values, unless a refetch has replaced them meanwhile.
    ///
    /// # Errors
    /// Returns the proxy failure after rolling back.
    pub async fn toggle_like(&self, feed_id: i64) -> Result<(), Error> {
        self.toggle(feed_id, Toggle::Like).await
    }

    /// Bookmark or un-bookmark a feed, with the same rollback as
    /// [`FeedStore::toggle_like`].
    ///
    /// # Errors
    /// Returns the proxy failure after rolling back.
    pub async fn toggle_bookmark(&self, feed_id: i64) -> Result<(), Error> {
        self.toggle(feed_id, Toggle::Bookmark).await
    }

    async fn toggle(&self, feed_id: i64, toggle: Toggle) -> Result<(), Error> {
        let ticket = self.cell.ticket();
        let marks = self.cell.update(|state| {
            let feed = state.feeds.iter_mut().find(|feed| feed.id == feed_id)?;
            let prior = toggle.marks(feed);
            toggle.apply(feed);
            Some((prior, toggle.marks(feed)))
        });
        let request = ProxyRequest::new(toggle.route()).with_json(feed_id_payload(feed_id));
        match self.gateway.send(request).await {
            Ok(_) => {
                self.cell
                    .update_if_current(ticket, |state| state.status.error = None);
                Ok(())
            }
            Err(error) => {
                self.cell.update_if_current(ticket, |state| {
                    // Only the toggled fields go back, and only while they
                    // still hold the tentative values; a refetch is newer.
                    let slot = state.feeds.iter_mut().find(|feed| feed.id == feed_id);
                    let unchanged = marks
                        .zip(slot)
                        .filter(|((_, tentative), feed)| toggle.marks(feed) == *tentative);
                    if let Some(((prior, _), feed)) = unchanged {
                        toggle.restore(feed, prior);
                    }
                    state.status.error = Some(error.message().to_owned());
                });
                Err(error)
            }
        }
    }

    async fn write_comment(
        &self,
        feed_id: i64,
        request: ProxyRequest,
    ) -> Result<Option<Value>, Error> {
        let ticket = self.cell.begin();
        let result = self.gateway.send(request).await;
        let data = self.cell.settle(ticket, result, |_, _| {})?;
        if let Err(error) = self.fetch_comments(feed_id).await {
            warn!(%error, feed_id, "comment refetch after write failed");
        }
        Ok(data)
    }

    async fn mutate(&self, request: ProxyRequest) -> Result<Option<Value>, Error> {
        let ticket = self.cell.begin();
        let result = self.gateway.send(request).await;
        let data = self.cell.settle(ticket, result, |_, _| {})?;
        if let Err(error) = self.fetch(true, None).await {
            warn!(%error, "feed refetch after write failed");
        }
        Ok(data)
    }
}
