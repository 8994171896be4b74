pub mod transactions;

pub use transactions::{ApiError, TransactionsApi, TransactionsClient};
