//! Client requests awaiting handling.

use serde::{Deserialize, Deserializer, Serialize};

/// Status value that marks a request as still open.
pub const PENDING_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub client_name: String,
}

impl RequestRecord {
    pub fn is_pending(&self) -> bool {
        self.status == PENDING_STATUS
    }
}

/// Document ids arrive as strings from the store but as numbers from some
/// legacy exports.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_becomes_string() {
        let r: RequestRecord =
            serde_json::from_str(r#"{"id": 42, "status": "pending", "clientName": "Acme"}"#)
                .unwrap();
        assert_eq!(r.id, "42");
        assert!(r.is_pending());
    }

    #[test]
    fn pending_match_is_exact() {
        let r: RequestRecord =
            serde_json::from_str(r#"{"id": "r1", "status": "Pending"}"#).unwrap();
        assert!(!r.is_pending());
        assert_eq!(r.client_name, "");
    }
}
