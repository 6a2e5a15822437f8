//! Remote document store client.
//!
//! Each collection is served as `GET {base_url}/{collection}`. The client owns
//! the timeout policy; callers above it impose none.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{decode_documents, DataSource, PRODUCTS, PUNCH_RECORDS, QUOTATIONS, REQUESTS};
use crate::config::redacted;
use crate::errors::AppError;
use crate::models::product::Product;
use crate::models::punch_record::PunchRecord;
use crate::models::quotation::Quotation;
use crate::models::request::RequestRecord;

#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl fmt::Debug for HttpStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStore")
            .field("base_url", &self.base_url)
            .field("api_key", &redacted(&self.api_key))
            .finish_non_exhaustive()
    }
}

/// Strip trailing slashes so collection paths join cleanly.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl HttpStore {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        collection: &'static str,
    ) -> Result<Vec<T>, AppError> {
        let url = format!("{}/{collection}", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::fetch(collection, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(collection, format!("HTTP {status} from {url}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::fetch(collection, e))?;

        let documents = decode_documents(collection, payload)?;
        tracing::debug!(collection, count = documents.len(), "Fetched collection");
        Ok(documents)
    }
}

impl DataSource for HttpStore {
    async fn fetch_punch_records(&self) -> Result<Vec<PunchRecord>, AppError> {
        self.fetch_collection(PUNCH_RECORDS).await
    }

    async fn fetch_quotations(&self) -> Result<Vec<Quotation>, AppError> {
        self.fetch_collection(QUOTATIONS).await
    }

    async fn get_pending_requests(&self) -> Result<Vec<RequestRecord>, AppError> {
        self.fetch_collection(REQUESTS).await
    }

    async fn list_all_products(&self) -> Result<Vec<Product>, AppError> {
        self.fetch_collection(PRODUCTS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(normalize_base_url("http://store.local/v1/"), "http://store.local/v1");
        assert_eq!(normalize_base_url("  http://store.local//  "), "http://store.local");
        assert_eq!(normalize_base_url("http://store.local"), "http://store.local");
    }

    #[tokio::test]
    async fn debug_output_hides_api_key() {
        let store = HttpStore::new(
            "http://store.local",
            Some("sk-live-123".into()),
            Duration::from_secs(2),
        )
        .unwrap();
        let printed = format!("{store:?}");
        assert!(!printed.contains("sk-live-123"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("http://store.local"));
    }

    #[tokio::test]
    async fn unreachable_store_is_fetch_failure() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let store = HttpStore::new("http://127.0.0.1:9", None, Duration::from_secs(2)).unwrap();
        let err = store.list_all_products().await.unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("products"));
    }
}
