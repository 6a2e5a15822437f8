//! Sales quotations and their review status.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Client the quotation was prepared for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub visits: Option<i64>,
}

/// A quotation as stored. `status` is kept verbatim so unrecognized values
/// survive for tabular display; non-string values are kept as their JSON text
/// and never match a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(default)]
    pub client_details: Option<ClientDetails>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<String>,
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(status)) => Some(status),
        Some(other) => Some(other.to_string()),
    })
}

/// The three statuses the dashboard buckets quotations into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Accepted,
    Pending,
    Rejected,
}

impl QuotationStatus {
    /// Chart order: Accepted, Pending, Rejected.
    pub const ALL: [QuotationStatus; 3] = [Self::Accepted, Self::Pending, Self::Rejected];

    /// Exact, case-sensitive match against the stored status value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "accepted" => Some(Self::Accepted),
            "pending" => Some(Self::Pending),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Pending => "Pending",
            Self::Rejected => "Rejected",
        }
    }
}

impl Quotation {
    pub fn classify(&self) -> Option<QuotationStatus> {
        self.status.as_deref().and_then(QuotationStatus::parse)
    }
}
