//! Local JSON fixture backing the dashboard collections.
//!
//! The file holds one object with a key per collection. It is re-read on every
//! fetch so edits show up on the next activation.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{decode_documents, DataSource, PRODUCTS, PUNCH_RECORDS, QUOTATIONS, REQUESTS};
use crate::errors::AppError;
use crate::models::product::Product;
use crate::models::punch_record::PunchRecord;
use crate::models::quotation::Quotation;
use crate::models::request::RequestRecord;

#[derive(Debug, Clone)]
pub struct FixtureStore {
    path: PathBuf,
}

impl FixtureStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        collection: &'static str,
    ) -> Result<Vec<T>, AppError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::fetch(collection, format!("{}: {e}", self.path.display()))
        })?;

        let mut root: Value =
            serde_json::from_slice(&bytes).map_err(|e| AppError::fetch(collection, e))?;

        // A missing key is an empty collection, not an error.
        let payload = root
            .get_mut(collection)
            .map(Value::take)
            .unwrap_or_else(|| Value::Array(Vec::new()));

        decode_documents(collection, payload)
    }
}

impl DataSource for FixtureStore {
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
    use std::io::Write;

    fn fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_each_collection() {
        let file = fixture(
            r#"{
                "punchRecords": [{"userId": "u1", "punchInTime": "2024-03-15T08:00:00Z"}],
                "quotations": [{"status": "accepted"}],
                "requests": [{"id": "r1", "status": "pending", "clientName": "Acme"}],
                "products": [{"name": "A", "sold": 5}]
            }"#,
        );
        let store = FixtureStore::new(file.path());

        assert_eq!(store.fetch_punch_records().await.unwrap().len(), 1);
        assert_eq!(store.fetch_quotations().await.unwrap().len(), 1);
        assert_eq!(store.get_pending_requests().await.unwrap()[0].client_name, "Acme");
        assert_eq!(store.list_all_products().await.unwrap()[0].sold, Some(5));
    }

    #[tokio::test]
    async fn missing_key_is_empty_collection() {
        let file = fixture(r#"{"products": []}"#);
        let store = FixtureStore::new(file.path());
        assert!(store.fetch_quotations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_fetch_failure() {
        let store = FixtureStore::new("/nonexistent/dashboard.json");
        let err = store.fetch_punch_records().await.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn malformed_file_is_fetch_failure() {
        let file = fixture("{not json");
        let store = FixtureStore::new(file.path());
        assert!(store.list_all_products().await.unwrap_err().is_fetch_failure());
    }
}
