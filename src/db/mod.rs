//! Data-access collaborator: the four collection fetches the dashboard needs,
//! backed either by a remote document store or a local fixture file.

pub mod fixture;
pub mod http;

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::product::Product;
use crate::models::punch_record::PunchRecord;
use crate::models::quotation::Quotation;
use crate::models::request::RequestRecord;

pub use fixture::FixtureStore;
pub use http::HttpStore;

pub const PUNCH_RECORDS: &str = "punchRecords";
pub const QUOTATIONS: &str = "quotations";
pub const REQUESTS: &str = "requests";
pub const PRODUCTS: &str = "products";

/// Source of the four record collections. Each operation yields an ordered
/// sequence of records or fails with a fetch error.
pub trait DataSource: Send + Sync {
    fn fetch_punch_records(&self) -> impl Future<Output = Result<Vec<PunchRecord>, AppError>> + Send;

    fn fetch_quotations(&self) -> impl Future<Output = Result<Vec<Quotation>, AppError>> + Send;

    fn get_pending_requests(&self)
        -> impl Future<Output = Result<Vec<RequestRecord>, AppError>> + Send;

    fn list_all_products(&self) -> impl Future<Output = Result<Vec<Product>, AppError>> + Send;
}

/// Configured store backend.
#[derive(Debug, Clone)]
pub enum Store {
    Http(HttpStore),
    Fixture(FixtureStore),
}

impl Store {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Fixture(_) => "fixture",
        }
    }
}

/// Build the store selected by configuration. A fixture path wins over a
/// remote URL so local runs never reach out by accident.
pub fn create_store(config: &AppConfig) -> Result<Store, AppError> {
    if let Some(path) = &config.store_fixture_path {
        return Ok(Store::Fixture(FixtureStore::new(path)));
    }

    let url = config
        .store_url
        .as_deref()
        .ok_or_else(|| AppError::Internal("no document store configured".to_string()))?;

    HttpStore::new(
        url,
        config.store_api_key.clone(),
        Duration::from_secs(config.store_timeout_secs),
    )
    .map(Store::Http)
}

impl DataSource for Store {
    async fn fetch_punch_records(&self) -> Result<Vec<PunchRecord>, AppError> {
        match self {
            Self::Http(s) => s.fetch_punch_records().await,
            Self::Fixture(s) => s.fetch_punch_records().await,
        }
    }

    async fn fetch_quotations(&self) -> Result<Vec<Quotation>, AppError> {
        match self {
            Self::Http(s) => s.fetch_quotations().await,
            Self::Fixture(s) => s.fetch_quotations().await,
        }
    }

    async fn get_pending_requests(&self) -> Result<Vec<RequestRecord>, AppError> {
        match self {
            Self::Http(s) => s.get_pending_requests().await,
            Self::Fixture(s) => s.get_pending_requests().await,
        }
    }

    async fn list_all_products(&self) -> Result<Vec<Product>, AppError> {
        match self {
            Self::Http(s) => s.list_all_products().await,
            Self::Fixture(s) => s.list_all_products().await,
        }
    }
}

/// Decode a collection payload: either a bare array of documents or an
/// envelope `{"documents": [...]}`. A document that does not decode is
/// skipped with a warning; only an unusable payload fails the fetch.
pub fn decode_documents<T: DeserializeOwned>(
    collection: &'static str,
    payload: Value,
) -> Result<Vec<T>, AppError> {
    let documents = match payload {
        Value::Array(documents) => documents,
        Value::Object(mut map) => match map.remove("documents") {
            Some(Value::Array(documents)) => documents,
            Some(other) => {
                return Err(AppError::fetch(
                    collection,
                    format!("'documents' is not an array, got {other}"),
                ))
            }
            None => return Err(AppError::fetch(collection, "payload has no 'documents' field")),
        },
        other => {
            return Err(AppError::fetch(
                collection,
                format!("expected a document array, got {other}"),
            ))
        }
    };

    let total = documents.len();
    let records: Vec<T> = documents
        .into_iter()
        .enumerate()
        .filter_map(|(index, document)| match serde_json::from_value(document) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(collection, index, error = %e, "Skipping malformed document");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            collection,
            skipped = total - records.len(),
            total,
            "Collection had malformed documents"
        );
    }

    Ok(records)
}
