//! Derived dashboard statistics, chart series, and the published view state.

use serde::Serialize;

use super::product::Product;
use super::punch_record::PunchRecord;
use super::quotation::{Quotation, QuotationStatus};
use super::request::RequestRecord;
use super::timestamp::Timestamp;

/// Summary counters computed fresh on every successful fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: usize,
    pub total_products: usize,
    pub accepted_quotations: usize,
    pub pending_quotations: usize,
    pub rejected_quotations: usize,
    pub total_requests: usize,
    pub pending_requests: usize,
}

impl DashboardStats {
    pub fn quotations_with(&self, status: QuotationStatus) -> usize {
        match status {
            QuotationStatus::Accepted => self.accepted_quotations,
            QuotationStatus::Pending => self.pending_quotations,
            QuotationStatus::Rejected => self.rejected_quotations,
        }
    }
}

/// Units sold for one product (bar chart point).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub name: String,
    pub sold: i64,
}

/// Quotation count for one status (pie chart slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub status: QuotationStatus,
    pub count: usize,
}

/// One punch-in event on the trend line. The raw timestamp is kept so the
/// series orders correctly; date labels are derived at display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchTrendPoint {
    pub user_id: String,
    pub punch_in_time: Timestamp,
}

/// Chart-ready projections, recomputed every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub product_popularity: Vec<ProductSales>,
    pub quotation_status: Vec<StatusSlice>,
    pub punch_in_trend: Vec<PunchTrendPoint>,
}

/// Everything a ready dashboard renders: raw collections for the tables plus
/// the derived stats and series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub charts: ChartSeries,
    pub punch_records: Vec<PunchRecord>,
    pub quotations: Vec<Quotation>,
    pub requests: Vec<RequestRecord>,
    pub products: Vec<Product>,
}

/// Immutable snapshot published to the presentation layer. Replaced
/// wholesale on every transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Ready(Box<DashboardSnapshot>),
    Failed { message: String },
}

impl ViewState {
    /// `true` once the activation reached `Ready` or `Failed`.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn as_ready(&self) -> Option<&DashboardSnapshot> {
        match self {
            Self::Ready(snapshot) => Some(&**snapshot),
            _ => None,
        }
    }
}
