//! Display shaping for a ready dashboard: summary counters, chart datasets,
//! and table rows with their per-cell display rules.

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;

use crate::models::dashboard::{DashboardSnapshot, DashboardStats};
use crate::models::punch_record::{GeoPoint, PunchRecord};
use crate::models::quotation::Quotation;
use crate::models::request::RequestRecord;
use crate::models::timestamp::Timestamp;

pub const NOT_PUNCHED_OUT: &str = "Not punched out";
pub const NO_LOCATION: &str = "N/A";

const PRODUCT_BAR_COLOR: &str = "#4caf50";
const STATUS_COLORS: [&str; 3] = ["#4caf50", "#ff9800", "#f44336"];
const TREND_FILL_COLOR: &str = "rgba(75,192,192,0.4)";
const TREND_LINE_COLOR: &str = "rgba(75,192,192,1)";

/// Date formatting in a fixed display offset, US-style.
#[derive(Debug, Clone, Copy)]
pub struct DisplayLocale {
    offset: FixedOffset,
}

impl Default for DisplayLocale {
    fn default() -> Self {
        Self::utc()
    }
}

impl DisplayLocale {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Out-of-range offsets fall back to UTC.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .unwrap_or_else(|| {
                tracing::warn!(minutes, "Invalid display UTC offset; using UTC");
                Self::utc()
            })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// e.g. `3/15/2024`
    pub fn format_date(&self, ts: &Timestamp) -> String {
        ts.date_in(self.offset).format("%-m/%-d/%Y").to_string()
    }

    /// e.g. `3/15/2024, 8:30:00 AM`
    pub fn format_date_time(&self, ts: &Timestamp) -> String {
        ts.0.with_timezone(&self.offset)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Counter {
    pub label: &'static str,
    pub value: usize,
    pub total: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: Option<&'static str>,
    pub data: Vec<i64>,
    pub background_color: Vec<&'static str>,
    pub border_color: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchRow {
    pub email: String,
    pub punch_in: String,
    pub punch_out: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRow {
    pub client_name: String,
    pub email: String,
    pub status: String,
    pub visits: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestRow {
    pub id: String,
    pub status: String,
    pub client: String,
}

/// Render-ready dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub stats: DashboardStats,
    pub counters: Vec<Counter>,
    pub charts: Vec<Chart>,
    pub punch_rows: Vec<PunchRow>,
    pub quotation_rows: Vec<QuotationRow>,
    pub request_rows: Vec<RequestRow>,
}

pub fn render(snapshot: &DashboardSnapshot, locale: &DisplayLocale) -> DashboardPage {
    DashboardPage {
        stats: snapshot.stats.clone(),
        counters: counters(&snapshot.stats),
        charts: charts(snapshot, locale),
        punch_rows: snapshot
            .punch_records
            .iter()
            .map(|r| punch_row(r, locale))
            .collect(),
        quotation_rows: snapshot.quotations.iter().map(quotation_row).collect(),
        request_rows: snapshot.requests.iter().map(request_row).collect(),
    }
}

pub fn counters(stats: &DashboardStats) -> Vec<Counter> {
    vec![
        Counter {
            label: "Employees",
            value: stats.total_employees,
            total: None,
        },
        Counter {
            label: "Products",
            value: stats.total_products,
            total: None,
        },
        Counter {
            label: "Accepted Quotations",
            value: stats.accepted_quotations,
            total: None,
        },
        Counter {
            label: "Pending Requests",
            value: stats.pending_requests,
            total: Some(stats.total_requests),
        },
    ]
}

fn charts(snapshot: &DashboardSnapshot, locale: &DisplayLocale) -> Vec<Chart> {
    let series = &snapshot.charts;

    let popularity = Chart {
        kind: ChartKind::Bar,
        title: "Product Popularity",
        labels: series.product_popularity.iter().map(|p| p.name.clone()).collect(),
        datasets: vec![Dataset {
            label: Some("Quantity Sold"),
            data: series.product_popularity.iter().map(|p| p.sold).collect(),
            background_color: vec![PRODUCT_BAR_COLOR],
            border_color: None,
        }],
    };

    let distribution = Chart {
        kind: ChartKind::Pie,
        title: "Quotation Status Distribution",
        labels: series
            .quotation_status
            .iter()
            .map(|s| s.status.label().to_string())
            .collect(),
        datasets: vec![Dataset {
            label: None,
            data: series
                .quotation_status
                .iter()
                .map(|s| s.count as i64)
                .collect(),
            background_color: STATUS_COLORS.to_vec(),
            border_color: None,
        }],
    };

    let trend = Chart {
        kind: ChartKind::Line,
        title: "Punch-In Trends",
        labels: series
            .punch_in_trend
            .iter()
            .map(|p| locale.format_date(&p.punch_in_time))
            .collect(),
        datasets: vec![Dataset {
            label: Some("Punch-Ins"),
            data: series
                .punch_in_trend
                .iter()
                .map(|p| p.punch_in_time.0.timestamp_millis())
                .collect(),
            background_color: vec![TREND_FILL_COLOR],
            border_color: Some(TREND_LINE_COLOR),
        }],
    };

    vec![popularity, distribution, trend]
}

pub fn format_location(location: Option<&GeoPoint>) -> String {
    match location {
        Some(p) => format!("{:.4}°N, {:.4}°E", p.latitude, p.longitude),
        None => NO_LOCATION.to_string(),
    }
}

pub fn punch_row(record: &PunchRecord, locale: &DisplayLocale) -> PunchRow {
    PunchRow {
        email: record.user_email.clone(),
        punch_in: locale.format_date_time(&record.punch_in_time),
        punch_out: record
            .punch_out_time
            .as_ref()
            .map(|ts| locale.format_date_time(ts))
            .unwrap_or_else(|| NOT_PUNCHED_OUT.to_string()),
        location: format_location(record.location.as_ref()),
    }
}

pub fn quotation_row(quotation: &Quotation) -> QuotationRow {
    let client = quotation.client_details.as_ref();
    QuotationRow {
        client_name: client.map(|c| c.name.clone()).unwrap_or_default(),
        email: client.map(|c| c.email.clone()).unwrap_or_default(),
        status: quotation.status.clone().unwrap_or_default(),
        visits: client
            .and_then(|c| c.visits)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

pub fn request_row(request: &RequestRecord) -> RequestRow {
    RequestRow {
        id: request.id.clone(),
        status: request.status.clone(),
        client: request.client_name.clone(),
    }
}
