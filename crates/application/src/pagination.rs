//! Cursor-based pagination over the fetch controller
//!
//! [`Paginator`] layers paging state on top of a [`Fetcher`] of
//! [`Page`]s, accumulating page items into one ordered list and tracking
//! whether more pages exist.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use pitchside_domain::{FetchOverrides, FetchRequest, Page};

use crate::error::ClientError;
use crate::fetch::{FetchState, Fetcher};
use crate::ports::HttpTransport;

/// Pagination state: the next cursor, the accumulated items and whether
/// another page exists.
#[derive(Debug, Clone, PartialEq)]
struct PageList<T> {
    cursor: u64,
    items: Vec<T>,
    has_more: bool,
}

impl<T> Default for PageList<T> {
    fn default() -> Self {
        Self {
            cursor: 0,
            items: Vec::new(),
            has_more: true,
        }
    }
}

/// Accumulates cursor-paginated list responses.
///
/// Items are stable and append-only between [`reset`](Self::reset)s;
/// duplicates across pages are not deduplicated; uniqueness is the
/// backend's cursor contract.
pub struct Paginator<T> {
    fetcher: Fetcher<Page<T>>,
    limit: u64,
    list: Mutex<PageList<T>>,
}

impl<T> Paginator<T>
where
    T: DeserializeOwned + Clone + Send,
{
    /// Creates a paginator issuing `request` with `cursor`/`limit` query
    /// parameters appended per page.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, request: FetchRequest, limit: u64) -> Self {
        Self {
            fetcher: Fetcher::new(transport, request),
            limit,
            list: Mutex::new(PageList::default()),
        }
    }

    /// Fetches the next page and appends it to the accumulated items.
    ///
    /// No-op when no more pages exist or a load is already in flight. A
    /// cursor-0 page replaces the items (first load and post-reset
    /// reload); any other page appends in order. A failed page load
    /// leaves pagination state untouched; the failure is visible through
    /// [`fetch_state`](Self::fetch_state).
    pub async fn load_more(&self) {
        // Holding the list lock for the whole load doubles as the
        // "no-op while loading" guard.
        let Ok(mut list) = self.list.try_lock() else {
            return;
        };
        if !list.has_more {
            return;
        }

        let cursor = list.cursor;
        let mut query = self.fetcher.request().await.query;
        query.push(("cursor".to_string(), cursor.to_string()));
        query.push(("limit".to_string(), self.limit.to_string()));
        self.fetcher.refetch(FetchOverrides::query(query)).await;

        if let Some(page) = self.fetcher.state().await.data {
            if cursor == 0 {
                list.items = page.list;
            } else {
                list.items.extend(page.list);
            }
            list.has_more = page.has_more_list;
            list.cursor = cursor + self.limit;
        }
    }

    /// Returns pagination to its initial state. The next
    /// [`load_more`](Self::load_more) re-requests cursor 0.
    pub async fn reset(&self) {
        *self.list.lock().await = PageList::default();
    }

    /// Returns the accumulated items in page order.
    pub async fn items(&self) -> Vec<T> {
        self.list.lock().await.items.clone()
    }

    /// Returns whether another page exists.
    pub async fn has_more(&self) -> bool {
        self.list.lock().await.has_more
    }

    /// Returns the cursor the next page will be requested at.
    pub async fn cursor(&self) -> u64 {
        self.list.lock().await.cursor
    }

    /// Returns the underlying fetch state (loading/error of the last
    /// page request).
    pub async fn fetch_state(&self) -> FetchState<Page<T>> {
        self.fetcher.state().await
    }

    /// Returns the failure of the last page request, if any.
    pub async fn error(&self) -> Option<ClientError> {
        self.fetcher.state().await.error
    }
}
