//! Product catalog entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub sold: Option<i64>,
}

impl Product {
    /// Units sold, with an absent count treated as zero.
    pub fn sold_or_zero(&self) -> i64 {
        self.sold.unwrap_or(0)
    }
}
