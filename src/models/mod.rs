//! Data models shared by the API client, the store and its consumers

pub mod summary;
pub mod transaction;

pub use summary::Summary;
pub use transaction::{CreateTransactionInput, Transaction, TransactionType};
