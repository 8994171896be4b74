use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::{CreateTransactionInput, TransactionType};

/// Query string for GET /transactions
#[derive(Debug, Clone, Serialize)]
pub struct ListQuery {
    #[serde(rename = "_sort")]
    pub sort: &'static str,
    #[serde(rename = "_order")]
    pub order: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListQuery {
    /// Newest first, optionally filtered by a full-text query
    pub fn newest_first(query: Option<String>) -> Self {
        Self {
            sort: "createdAt",
            order: "desc",
            q: query,
        }
    }
}

/// Request body for POST /transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionRequest {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub price: f64,
    pub created_at: String,
}

impl NewTransactionRequest {
    /// Build the request body, stamping `createdAt` with `now`
    pub fn from_input(input: CreateTransactionInput, now: DateTime<Utc>) -> Self {
        Self {
            description: input.description,
            kind: input.kind,
            category: input.category,
            price: input.price,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Error type for backend calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/request error
    #[error("Request Error: {0}")]
    Request(String),
    /// Any non-success HTTP status
    #[error("HTTP Error ({0}): {1}")]
    Status(u16, String),
    /// Response body did not match the expected shape
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}
