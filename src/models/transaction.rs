//! Transaction models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a transaction entry
///
/// Anything other than `income`/`outcome` is kept as-is in `Other` and
/// forwarded unchanged; the backend is the one that decides what to accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Income,
    Outcome,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
            TransactionType::Other(value) => value,
        }
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "income" => TransactionType::Income,
            "outcome" => TransactionType::Outcome,
            _ => TransactionType::Other(value),
        }
    }
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        TransactionType::from(value.to_string())
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub price: f64,
    pub created_at: String,
}

impl Transaction {
    /// Parse `created_at` as an RFC 3339 timestamp, if it is one
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Fields supplied by the caller when creating a transaction.
/// `id` and `createdAt` are assigned downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTransactionInput {
    pub description: String,
    pub price: f64,
    pub kind: TransactionType,
    pub category: String,
}
