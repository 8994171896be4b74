use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ApiError, ListQuery, NewTransactionRequest};
use crate::models::Transaction;

/// Operations the store needs from the backend's transaction collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    /// GET /transactions, newest first, optionally filtered by `query`
    async fn list_transactions(&self, query: Option<String>) -> Result<Vec<Transaction>, ApiError>;

    /// POST /transactions, returning the stored record
    async fn create_transaction(&self, body: NewTransactionRequest) -> Result<Transaction, ApiError>;
}

/// HTTP client for a json-server style transactions backend
pub struct TransactionsClient {
    http_client: HttpClient,
    base_url: String,
}

impl TransactionsClient {
    /// json-server's port in the web client's setup
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3333";

    /// Create a new client talking to `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Base URL with any trailing `/` removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/transactions", self.base_url)
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Turn a response into `T`, mapping non-success statuses to `ApiError::Status`
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!("Backend returned {}: {}", status.as_u16(), body_text);
            return Err(ApiError::Status(status.as_u16(), body_text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Deserialization(format!("Failed to parse response: {}", e)))
    }

    fn list_request(&self, query: Option<String>) -> reqwest::RequestBuilder {
        self.http_client
            .get(self.collection_url())
            .headers(Self::create_headers())
            .query(&ListQuery::newest_first(query))
    }

    fn create_request(&self, body: &NewTransactionRequest) -> reqwest::RequestBuilder {
        self.http_client
            .post(self.collection_url())
            .headers(Self::create_headers())
            .json(body)
    }
}

#[async_trait]
impl TransactionsApi for TransactionsClient {
    async fn list_transactions(&self, query: Option<String>) -> Result<Vec<Transaction>, ApiError> {
        debug!("GET {} (q: {:?})", self.collection_url(), query);

        let response = self
            .list_request(query)
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        Self::read_json(response).await
    }

    async fn create_transaction(&self, body: NewTransactionRequest) -> Result<Transaction, ApiError> {
        debug!("POST {} ({})", self.collection_url(), body.description);

        let response = self
            .create_request(&body)
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = TransactionsClient::new("http://localhost:3333/");
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(client.collection_url(), "http://localhost:3333/transactions");
    }

    #[test]
    fn test_list_request_without_query() {
        let client = TransactionsClient::new(TransactionsClient::DEFAULT_BASE_URL);
        let request = client.list_request(None).build().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/transactions");
        assert_eq!(request.url().query(), Some("_sort=createdAt&_order=desc"));
    }

    #[test]
    fn test_list_request_with_query() {
        let client = TransactionsClient::new(TransactionsClient::DEFAULT_BASE_URL);
        let request = client
            .list_request(Some("fast food".to_string()))
            .build()
            .unwrap();

        assert_eq!(
            request.url().query(),
            Some("_sort=createdAt&_order=desc&q=fast+food")
        );
    }

    #[test]
    fn test_create_request() {
        let client = TransactionsClient::new(TransactionsClient::DEFAULT_BASE_URL);
        let body = NewTransactionRequest {
            description: "Salary".to_string(),
            kind: TransactionType::Income,
            category: "work".to_string(),
            price: 3000.0,
            created_at: "2026-10-18T09:30:00.000Z".to_string(),
        };
        let request = client.create_request(&body).build().unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let sent: serde_json::Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(sent["type"], "income");
        assert_eq!(sent["createdAt"], "2026-10-18T09:30:00.000Z");
    }

    /// Accept one connection, answer it with `status_line` and `body`, and
    /// hand back the raw request body the client sent
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            let body_start = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers were read");
                request.extend_from_slice(&chunk[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&request[..body_start]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            while request.len() < body_start + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body was read");
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8(request[body_start..body_start + content_length].to_vec()).unwrap()
        });

        (base_url, handle)
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (base_url, server) = serve_once("HTTP/1.1 500 Internal Server Error", "boom").await;
        let client = TransactionsClient::new(base_url);

        let err = client.list_transactions(None).await.unwrap_err();

        assert!(matches!(err, ApiError::Status(500, ref body) if body == "boom"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unexpected_body_maps_to_deserialization() {
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", r#"{"not":"array"}"#).await;
        let client = TransactionsClient::new(base_url);

        let err = client
            .list_transactions(Some("food".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Deserialization(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_list_decodes_records_in_order() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"id":2,"description":"Rent","type":"outcome","category":"house","price":900,"createdAt":"2026-10-02T10:00:00.000Z"},
                {"id":1,"description":"Salary","type":"income","category":"work","price":3000,"createdAt":"2026-10-01T10:00:00.000Z"}]"#,
        )
        .await;
        let client = TransactionsClient::new(base_url);

        let transactions = client.list_transactions(None).await.unwrap();

        let ids: Vec<u64> = transactions.iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(transactions[1].kind, TransactionType::Income);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_create_sends_body_and_decodes_record() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 201 Created",
            r#"{"id":3,"description":"Lunch","type":"outcome","category":"food","price":50.0,"createdAt":"2026-10-18T09:30:00.000Z"}"#,
        )
        .await;
        let client = TransactionsClient::new(base_url);
        let body = NewTransactionRequest {
            description: "Lunch".to_string(),
            kind: TransactionType::Outcome,
            category: "food".to_string(),
            price: 50.0,
            created_at: "2026-10-18T09:30:00.000Z".to_string(),
        };

        let created = client.create_transaction(body).await.unwrap();

        assert_eq!(created.id, 3);
        assert_eq!(created.description, "Lunch");
        assert_eq!(created.kind, TransactionType::Outcome);

        let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({
                "description": "Lunch",
                "type": "outcome",
                "category": "food",
                "price": 50.0,
                "createdAt": "2026-10-18T09:30:00.000Z",
            })
        );
    }
}
