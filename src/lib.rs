//! Observable client-side store for a json-server transactions backend

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use api::{ApiError, TransactionsApi, TransactionsClient};
pub use config::{ConfigError, CreatePlacement, StoreConfig};
pub use models::{CreateTransactionInput, Summary, Transaction, TransactionType};
pub use services::{Snapshot, StoreError, TransactionStore};
