//! Transaction Store - local, observable copy of the backend's transactions
//!
//! The store owns the collection. Consumers read snapshots or subscribe to
//! changes; they never mutate it. Each operation suspends once on the HTTP
//! call and applies its result to whatever the state is when it resumes, so
//! concurrent calls settle in completion order.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::transactions::{ApiError, NewTransactionRequest, TransactionsApi};
use crate::config::CreatePlacement;
use crate::models::{CreateTransactionInput, Transaction};

/// Immutable view of the collection at one point in time
pub type Snapshot = Arc<[Transaction]>;

/// Error returned by store operations.
///
/// There is a single kind: whatever went wrong with the backend call, the
/// collection was not touched. The wrapped [`ApiError`] is kept for display.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure, non-success status or unreadable body
    #[error("Request failed: {0}")]
    RequestFailure(#[from] ApiError),
}

/// Local copy of the backend's transaction collection
///
/// Generic over the backend so it can run against [`TransactionsClient`]
/// in production and against any other [`TransactionsApi`] in tests.
///
/// [`TransactionsClient`]: crate::api::TransactionsClient
pub struct TransactionStore<A> {
    api: A,
    placement: CreatePlacement,
    state: watch::Sender<Snapshot>,
}

impl<A: TransactionsApi> TransactionStore<A> {
    /// Create an empty store. Nothing is fetched until [`initialize`](Self::initialize).
    pub fn new(api: A, placement: CreatePlacement) -> Self {
        let (state, _) = watch::channel(Snapshot::from(Vec::new()));
        Self {
            api,
            placement,
            state,
        }
    }

    /// Create a store and run the initial load
    ///
    /// # Arguments
    /// * `api` - Backend the store talks to
    /// * `placement` - Where created records go in the collection
    ///
    /// # Returns
    /// * `Ok(TransactionStore)` - Store holding the backend's full list
    /// * `Err(StoreError)` - The initial fetch failed
    pub async fn connect(api: A, placement: CreatePlacement) -> Result<Self, StoreError> {
        let store = Self::new(api, placement);
        store.initialize().await?;
        Ok(store)
    }

    /// Initial load: list everything, no query
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.fetch_transactions(None).await
    }

    /// Current collection
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every change to the collection
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    /// Replace the collection with the backend's list, newest first,
    /// filtered by `query` when given
    ///
    /// # Arguments
    /// * `query` - Optional full-text filter, sent as `q`
    ///
    /// # Returns
    /// * `Ok(())` - Collection replaced and subscribers notified
    /// * `Err(StoreError)` - Request failed, collection unchanged
    pub async fn fetch_transactions(&self, query: Option<&str>) -> Result<(), StoreError> {
        let transactions = self
            .api
            .list_transactions(query.map(str::to_string))
            .await
            .map_err(|e| {
                warn!("Failed to fetch transactions (q: {:?}): {}", query, e);
                e
            })?;

        debug!("Fetched {} transactions (q: {:?})", transactions.len(), query);
        self.state.send_replace(Snapshot::from(transactions));
        Ok(())
    }

    /// Create a record on the backend and add the stored copy to the collection
    ///
    /// `createdAt` is stamped with the current time. The input is not validated.
    ///
    /// # Returns
    /// * `Ok(())` - Record added and subscribers notified
    /// * `Err(StoreError)` - Request failed, collection unchanged
    pub async fn create_transaction(&self, input: CreateTransactionInput) -> Result<(), StoreError> {
        let body = NewTransactionRequest::from_input(input, Utc::now());
        let created = self.api.create_transaction(body).await.map_err(|e| {
            warn!("Failed to create transaction: {}", e);
            e
        })?;

        debug!("Created transaction {}", created.id);
        let placement = self.placement;
        self.state.send_modify(|state| {
            let mut next = state.to_vec();
            let index = insert_position(&next, &created, placement);
            next.insert(index, created);
            *state = Snapshot::from(next);
        });
        Ok(())
    }
}

/// Index at which `created` goes in `current`.
/// `NewestFirst` falls back to the end when timestamps can't be compared.
fn insert_position(current: &[Transaction], created: &Transaction, placement: CreatePlacement) -> usize {
    match (placement, created.created_at_utc()) {
        (CreatePlacement::NewestFirst, Some(created_at)) => current
            .iter()
            .position(|tx| tx.created_at_utc().map_or(false, |t| t < created_at))
            .unwrap_or(current.len()),
        _ => current.len(),
    }
}
