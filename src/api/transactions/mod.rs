pub mod client;
pub mod models;

pub use client::{TransactionsApi, TransactionsClient};
pub use models::{ApiError, ListQuery, NewTransactionRequest};

#[cfg(test)]
pub use client::MockTransactionsApi;
