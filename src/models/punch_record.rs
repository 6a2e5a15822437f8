//! Employee time-punch records.

use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// Geographic position captured at punch-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "_latitude")]
    pub latitude: f64,
    #[serde(alias = "_longitude")]
    pub longitude: f64,
}

/// One punch-in (and optional punch-out) by an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchRecord {
    pub user_id: String,
    #[serde(default)]
    pub user_email: String,
    pub punch_in_time: Timestamp,
    #[serde(default)]
    pub punch_out_time: Option<Timestamp>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}
