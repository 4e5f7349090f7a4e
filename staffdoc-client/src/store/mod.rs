//! Entity stores
//!
//! An [`EntityStore`] keeps the last loaded page of one record type, the
//! record currently being viewed, pagination metadata, the list filters and a
//! shared status (`loading` / `error`). Every operation calls the backend
//! through an [`HttpClient`] and folds the response into the state.
//!
//! # Concurrency
//!
//! Operations take `&self` and may overlap. State sits behind one lock that is
//! never held across an `.await`, so each response is applied atomically.
//!
//! - `is_loading()` stays true while any operation is in flight.
//! - List fetches are numbered when issued. A list response is applied only if
//!   no newer list fetch is still pending and none has settled before it;
//!   otherwise it is dropped and reported as [`FetchOutcome::Superseded`].
//!   A list fetch whose future is dropped before it settles gives up its
//!   number, so the newest fetch still alive wins.
//! - Single-record operations apply in completion order.

mod document;
mod employee;

pub use document::DocumentStore;
pub use employee::EmployeeStore;

use std::collections::BTreeSet;
use std::fmt;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{IntoRecordId, InvalidRecordId, ListFilter, ListQuery, Pagination, Record, RecordId};
use thiserror::Error;

use crate::ClientConfig;
use crate::client::{HttpClient, ListPage, NetworkHttpClient};
use crate::error::{ClientError, ClientResult};

/// Fixed, human-readable failure messages of one record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreMessages {
    pub fetch_list: &'static str,
    pub fetch_one: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// A record type served by a REST collection
pub trait Entity: Record + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Create / full-replace payload
    type Input: Serialize + Send + Sync;

    /// List filter criteria
    type Filter: ListFilter<Self> + fmt::Debug;

    /// Collection path segment, e.g. `employees`
    const RESOURCE: &'static str;

    const MESSAGES: StoreMessages;
}

/// Store operation error
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id could not be normalised; no request was made
    #[error(transparent)]
    InvalidId(#[from] InvalidRecordId),

    /// The backend call failed. `message` is also written to the store's
    /// `error` field (unless the response was superseded).
    #[error("{message}: {source}")]
    Request {
        message: &'static str,
        #[source]
        source: ClientError,
    },
}

impl StoreError {
    /// Fixed message of a failed request
    pub fn message(&self) -> Option<&'static str> {
        match self {
            StoreError::Request { message, .. } => Some(*message),
            StoreError::InvalidId(_) => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// What happened to a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was written to the store
    Applied,
    /// A newer list fetch was issued before this one settled
    Superseded,
}

#[derive(Debug)]
struct StoreState<E: Entity> {
    items: Vec<E>,
    current: Option<E>,
    pagination: Pagination,
    filters: E::Filter,
    error: Option<&'static str>,
    in_flight: usize,
    /// Last issued list token
    list_seq: u64,
    /// Tokens of list fetches that have not settled or been dropped
    pending_lists: BTreeSet<u64>,
    /// Token of the last list response written to the store
    settled_list: u64,
}

impl<E: Entity> Default for StoreState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            pagination: Pagination::default(),
            filters: E::Filter::default(),
            error: None,
            in_flight: 0,
            list_seq: 0,
            pending_lists: BTreeSet::new(),
            settled_list: 0,
        }
    }
}

/// Releases one in-flight claim when dropped, whatever the outcome
struct LoadingGuard<'a, E: Entity> {
    state: &'a RwLock<StoreState<E>>,
}

impl<E: Entity> Drop for LoadingGuard<'_, E> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// One issued list fetch. Dropping it, settled or abandoned, withdraws the
/// token and releases the in-flight claim.
struct ListTicket<'a, E: Entity> {
    state: &'a RwLock<StoreState<E>>,
    token: u64,
}

impl<E: Entity> ListTicket<'_, E> {
    /// A newer fetch is pending, or an equal-or-newer one already settled
    fn is_superseded(&self, state: &StoreState<E>) -> bool {
        state.settled_list > self.token || state.pending_lists.range(self.token + 1..).next().is_some()
    }
}

impl<E: Entity> Drop for ListTicket<'_, E> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        state.pending_lists.remove(&self.token);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// In-memory store for one record type
#[derive(Debug)]
pub struct EntityStore<E: Entity, C: HttpClient> {
    client: C,
    state: RwLock<StoreState<E>>,
}

impl<E: Entity, C: HttpClient> EntityStore<E, C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn collection_path() -> String {
        format!("/{}", E::RESOURCE)
    }

    fn record_path(id: RecordId) -> String {
        format!("/{}/{}", E::RESOURCE, id)
    }

    /// Mark an operation as started: loading on, error cleared
    fn begin(&self) -> LoadingGuard<'_, E> {
        let mut state = self.state.write();
        state.in_flight += 1;
        state.error = None;
        LoadingGuard { state: &self.state }
    }

    /// Like [`begin`](Self::begin), also issuing a new list token
    fn begin_list(&self) -> ListTicket<'_, E> {
        let mut state = self.state.write();
        state.in_flight += 1;
        state.error = None;
        state.list_seq += 1;
        let token = state.list_seq;
        state.pending_lists.insert(token);
        ListTicket {
            state: &self.state,
            token,
        }
    }

    /// Record a failed request on the store and wrap it
    fn fail(&self, message: &'static str, source: ClientError) -> StoreError {
        tracing::error!("{} ({}): {}", message, E::RESOURCE, source);
        self.state.write().error = Some(message);
        StoreError::Request { message, source }
    }

    fn normalize(id: impl IntoRecordId) -> StoreResult<RecordId> {
        id.into_record_id().map_err(|e| {
            tracing::warn!("Rejected {} id: {}", E::RESOURCE, e);
            StoreError::InvalidId(e)
        })
    }

    // ========== Operations ==========

    /// Load one page of the collection.
    ///
    /// On success `items`, `pagination` and `filters` are replaced. On failure
    /// the fixed list message is stored in `error` and logged; the returned
    /// error may be ignored since the state already reflects it.
    pub async fn fetch_list(&self, page: u32, limit: u32, filters: E::Filter) -> StoreResult<FetchOutcome> {
        let ticket = self.begin_list();
        let query = ListQuery::new(page, limit).filtered::<E, _>(&filters);
        let result: ClientResult<ListPage<E>> =
            self.client.get_list(&Self::collection_path(), &query).await;

        // `state` is declared after `ticket`, so it is released before the ticket drops
        let mut state = self.state.write();
        if ticket.is_superseded(&state) {
            tracing::debug!(
                "Dropping superseded {} page {} (token {}, latest {})",
                E::RESOURCE,
                page,
                ticket.token,
                state.list_seq
            );
            return match result {
                Ok(_) => Ok(FetchOutcome::Superseded),
                Err(source) => Err(StoreError::Request {
                    message: E::MESSAGES.fetch_list,
                    source,
                }),
            };
        }

        state.settled_list = ticket.token;
        match result {
            Ok(list) => {
                state.pagination =
                    Pagination::from_total_header(page, limit, list.total_count.as_deref(), list.items.len());
                state.items = list.items;
                state.filters = filters;
                tracing::debug!(
                    "Loaded {} {} (page {}, total {})",
                    state.items.len(),
                    E::RESOURCE,
                    page,
                    state.pagination.total
                );
                Ok(FetchOutcome::Applied)
            }
            Err(source) => {
                let message = E::MESSAGES.fetch_list;
                tracing::error!("{} ({}): {}", message, E::RESOURCE, source);
                state.error = Some(message);
                Err(StoreError::Request { message, source })
            }
        }
    }

    /// Re-run the last list fetch with the stored page, limit and filters
    pub async fn refresh(&self) -> StoreResult<FetchOutcome> {
        let (pagination, filters) = {
            let state = self.state.read();
            (state.pagination, state.filters.clone())
        };
        self.fetch_list(pagination.page, pagination.limit, filters).await
    }

    /// Load one record and make it `current`
    pub async fn fetch_one(&self, id: impl IntoRecordId) -> StoreResult<E> {
        let id = Self::normalize(id)?;
        let _loading = self.begin();
        let result: ClientResult<E> = self.client.get(&Self::record_path(id)).await;
        match result {
            Ok(record) => {
                self.state.write().current = Some(record.clone());
                Ok(record)
            }
            Err(e) => Err(self.fail(E::MESSAGES.fetch_one, e)),
        }
    }

    /// Create a record and append the server's copy to `items`.
    ///
    /// `pagination.total` is left as is; call [`refresh`](Self::refresh) for
    /// an exact count.
    pub async fn create(&self, data: &E::Input) -> StoreResult<E> {
        let _loading = self.begin();
        let result: ClientResult<E> = self.client.post(&Self::collection_path(), data).await;
        match result {
            Ok(record) => {
                self.state.write().items.push(record.clone());
                Ok(record)
            }
            Err(e) => Err(self.fail(E::MESSAGES.create, e)),
        }
    }

    /// Replace a record; the matching item and `current` take the server's copy
    pub async fn update(&self, id: impl IntoRecordId, data: &E::Input) -> StoreResult<E> {
        let id = Self::normalize(id)?;
        let _loading = self.begin();
        let result: ClientResult<E> = self.client.put(&Self::record_path(id), data).await;
        match result {
            Ok(record) => {
                let mut state = self.state.write();
                if let Some(slot) = state.items.iter_mut().find(|item| item.record_id() == id) {
                    *slot = record.clone();
                }
                if state.current.as_ref().is_some_and(|c| c.record_id() == id) {
                    state.current = Some(record.clone());
                }
                Ok(record)
            }
            Err(e) => Err(self.fail(E::MESSAGES.update, e)),
        }
    }

    /// Delete a record and drop it from `items` and `current`.
    ///
    /// `pagination.total` is left as is.
    pub async fn delete(&self, id: impl IntoRecordId) -> StoreResult<()> {
        let id = Self::normalize(id)?;
        let _loading = self.begin();
        match self.client.delete(&Self::record_path(id)).await {
            Ok(()) => {
                let mut state = self.state.write();
                state.items.retain(|item| item.record_id() != id);
                if state.current.as_ref().is_some_and(|c| c.record_id() == id) {
                    state.current = None;
                }
                Ok(())
            }
            Err(e) => Err(self.fail(E::MESSAGES.delete, e)),
        }
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    // ========== Views ==========

    pub fn items(&self) -> Vec<E> {
        self.state.read().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    pub fn current(&self) -> Option<E> {
        self.state.read().current.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.state.read().pagination
    }

    pub fn total_pages(&self) -> u64 {
        self.state.read().pagination.total_pages()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().in_flight > 0
    }

    pub fn error(&self) -> Option<&'static str> {
        self.state.read().error
    }

    pub fn filters(&self) -> E::Filter {
        self.state.read().filters.clone()
    }

    /// Look up a loaded record; string ids must parse as integers
    pub fn get_by_id(&self, id: impl IntoRecordId) -> StoreResult<Option<E>> {
        let id = Self::normalize(id)?;
        Ok(self
            .state
            .read()
            .items
            .iter()
            .find(|item| item.record_id() == id)
            .cloned())
    }

    /// Loaded items that satisfy the stored filters.
    ///
    /// Only the current page is filtered, not the whole collection.
    pub fn filtered_items(&self) -> Vec<E> {
        let state = self.state.read();
        state
            .items
            .iter()
            .filter(|&item| state.filters.matches(item))
            .cloned()
            .collect()
    }

    fn update_filters(&self, f: impl FnOnce(&mut E::Filter)) {
        f(&mut self.state.write().filters);
    }
}

impl<E: Entity> EntityStore<E, NetworkHttpClient> {
    /// Store talking to the backend described by `config`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?))
    }
}
