//! Dashboard view-model builder: fetches the four collections concurrently
//! and reduces them into stats and chart series.

use std::collections::HashSet;

use crate::db::DataSource;
use crate::errors::{AppError, LOAD_FAILED_MESSAGE};
use crate::models::dashboard::{
    ChartSeries, DashboardSnapshot, DashboardStats, ProductSales, PunchTrendPoint, StatusSlice,
    ViewState,
};
use crate::models::product::Product;
use crate::models::punch_record::PunchRecord;
use crate::models::quotation::{Quotation, QuotationStatus};
use crate::models::request::RequestRecord;

/// The four raw collections from one fetch cycle.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub punch_records: Vec<PunchRecord>,
    pub quotations: Vec<Quotation>,
    pub requests: Vec<RequestRecord>,
    pub products: Vec<Product>,
}

/// Run one fetch cycle and settle into `Ready` or `Failed`.
///
/// Any single fetch failure fails the whole cycle; results from the other
/// fetches are dropped. The cause is logged, the view only gets the generic
/// message.
pub async fn build_view_state<S: DataSource>(source: &S) -> ViewState {
    match fetch_all(source).await {
        Ok(collections) => ViewState::Ready(Box::new(assemble(collections))),
        Err(e) => {
            tracing::error!(error = %e, "Dashboard fetch failed");
            ViewState::Failed {
                message: LOAD_FAILED_MESSAGE.to_string(),
            }
        }
    }
}

/// Fetch all four collections in parallel, failing fast on the first error.
pub async fn fetch_all<S: DataSource>(source: &S) -> Result<Collections, AppError> {
    let (punch_records, quotations, requests, products) = tokio::try_join!(
        source.fetch_punch_records(),
        source.fetch_quotations(),
        source.get_pending_requests(),
        source.list_all_products(),
    )?;

    tracing::debug!(
        punch_records = punch_records.len(),
        quotations = quotations.len(),
        requests = requests.len(),
        products = products.len(),
        "Dashboard collections fetched"
    );

    Ok(Collections {
        punch_records,
        quotations,
        requests,
        products,
    })
}

/// Derive stats and series, moving the raw collections into the snapshot.
pub fn assemble(collections: Collections) -> DashboardSnapshot {
    let stats = compute_stats(&collections);
    let charts = ChartSeries {
        product_popularity: product_popularity(&collections.products),
        quotation_status: quotation_distribution(&stats),
        punch_in_trend: punch_in_trend(&collections.punch_records),
    };

    DashboardSnapshot {
        stats,
        charts,
        punch_records: collections.punch_records,
        quotations: collections.quotations,
        requests: collections.requests,
        products: collections.products,
    }
}

pub fn compute_stats(collections: &Collections) -> DashboardStats {
    let total_employees = collections
        .punch_records
        .iter()
        .map(|r| r.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut stats = DashboardStats {
        total_employees,
        total_products: collections.products.len(),
        total_requests: collections.requests.len(),
        pending_requests: collections.requests.iter().filter(|r| r.is_pending()).count(),
        ..Default::default()
    };

    for quotation in &collections.quotations {
        match quotation.classify() {
            Some(QuotationStatus::Accepted) => stats.accepted_quotations += 1,
            Some(QuotationStatus::Pending) => stats.pending_quotations += 1,
            Some(QuotationStatus::Rejected) => stats.rejected_quotations += 1,
            None => {}
        }
    }

    stats
}

/// One `(name, sold)` point per product, in catalog order.
pub fn product_popularity(products: &[Product]) -> Vec<ProductSales> {
    products
        .iter()
        .map(|p| ProductSales {
            name: p.name.clone(),
            sold: p.sold_or_zero(),
        })
        .collect()
}

/// Fixed three-slice distribution: Accepted, Pending, Rejected. The slices are
/// present even with no quotations, each with a count of 0; only the product
/// and trend series are empty for empty input.
pub fn quotation_distribution(stats: &DashboardStats) -> Vec<StatusSlice> {
    QuotationStatus::ALL
        .iter()
        .map(|&status| StatusSlice {
            status,
            count: stats.quotations_with(status),
        })
        .collect()
}

/// One point per punch record, ordered by punch-in time. Records sharing a
/// timestamp keep their fetch order.
pub fn punch_in_trend(records: &[PunchRecord]) -> Vec<PunchTrendPoint> {
    let mut points: Vec<PunchTrendPoint> = records
        .iter()
        .map(|r| PunchTrendPoint {
            user_id: r.user_id.clone(),
            punch_in_time: r.punch_in_time,
        })
        .collect();
    points.sort_by_key(|p| p.punch_in_time);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timestamp::Timestamp;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Barrier;

    fn punch(user_id: &str, millis: i64) -> PunchRecord {
        PunchRecord {
            user_id: user_id.to_string(),
            user_email: format!("{user_id}@example.com"),
            punch_in_time: Timestamp::from_millis(millis).unwrap(),
            punch_out_time: None,
            location: None,
        }
    }

    fn quotation(status: &str) -> Quotation {
        Quotation {
            client_details: None,
            status: Some(status.to_string()),
        }
    }

    fn request(id: &str, status: &str) -> RequestRecord {
        RequestRecord {
            id: id.to_string(),
            status: status.to_string(),
            client_name: "Acme".to_string(),
        }
    }

    fn product(name: &str, sold: Option<i64>) -> Product {
        Product {
            name: name.to_string(),
            sold,
        }
    }

    /// Which of the four fetches should reject.
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Failing {
        None,
        PunchRecords,
        Quotations,
        Requests,
        Products,
    }

    struct StubSource {
        collections: Collections,
        failing: Failing,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(collections: Collections) -> Self {
            Self {
                collections,
                failing: Failing::None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(mut self, failing: Failing) -> Self {
            self.failing = failing;
            self
        }

        fn respond<T: Clone>(
            &self,
            which: Failing,
            collection: &'static str,
            items: &[T],
        ) -> Result<Vec<T>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing == which {
                Err(AppError::fetch(collection, "stubbed failure"))
            } else {
                Ok(items.to_vec())
            }
        }
    }

    impl DataSource for StubSource {
        async fn fetch_punch_records(&self) -> Result<Vec<PunchRecord>, AppError> {
            self.respond(Failing::PunchRecords, "punchRecords", &self.collections.punch_records)
        }

        async fn fetch_quotations(&self) -> Result<Vec<Quotation>, AppError> {
            self.respond(Failing::Quotations, "quotations", &self.collections.quotations)
        }

        async fn get_pending_requests(&self) -> Result<Vec<RequestRecord>, AppError> {
            self.respond(Failing::Requests, "requests", &self.collections.requests)
        }

        async fn list_all_products(&self) -> Result<Vec<Product>, AppError> {
            self.respond(Failing::Products, "products", &self.collections.products)
        }
    }

    fn sample() -> Collections {
        Collections {
            punch_records: vec![punch("u1", 2_000), punch("u1", 3_000), punch("u2", 1_000)],
            quotations: vec![
                quotation("accepted"),
                quotation("accepted"),
                quotation("pending"),
                quotation("rejected"),
                quotation("unknown"),
            ],
            requests: vec![request("r1", "pending"), request("r2", "done")],
            products: vec![product("A", Some(5)), product("B", None)],
        }
    }

    #[test]
    fn employees_are_deduplicated_by_user_id() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.total_employees, 2);
    }

    #[test]
    fn quotation_buckets_exclude_unknown_status() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.accepted_quotations, 2);
        assert_eq!(stats.pending_quotations, 1);
        assert_eq!(stats.rejected_quotations, 1);
    }

    #[test]
    fn quotation_buckets_sum_to_total_when_all_recognized() {
        let mut collections = sample();
        collections.quotations.retain(|q| q.classify().is_some());
        let stats = compute_stats(&collections);
        let bucketed =
            stats.accepted_quotations + stats.pending_quotations + stats.rejected_quotations;
        assert_eq!(bucketed, collections.quotations.len());
    }

    #[test]
    fn absent_status_counts_in_no_bucket() {
        let collections = Collections {
            quotations: vec![Quotation {
                client_details: None,
                status: None,
            }],
            ..Default::default()
        };
        let stats = compute_stats(&collections);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn request_counts() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.pending_requests, 1);
        assert_eq!(stats.total_products, 2);
    }

    #[test]
    fn product_popularity_defaults_missing_sold_to_zero() {
        let series = product_popularity(&sample().products);
        assert_eq!(
            series,
            vec![
                ProductSales { name: "A".into(), sold: 5 },
                ProductSales { name: "B".into(), sold: 0 },
            ]
        );
    }

    #[test]
    fn quotation_distribution_has_fixed_order() {
        let stats = compute_stats(&sample());
        let slices = quotation_distribution(&stats);
        let pairs: Vec<_> = slices.iter().map(|s| (s.status.label(), s.count)).collect();
        assert_eq!(pairs, vec![("Accepted", 2), ("Pending", 1), ("Rejected", 1)]);
    }

    #[test]
    fn punch_trend_has_one_point_per_record_in_time_order() {
        let trend = punch_in_trend(&sample().punch_records);
        assert_eq!(trend.len(), 3);
        let users: Vec<_> = trend.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(users, vec!["u2", "u1", "u1"]);
        assert!(trend.windows(2).all(|w| w[0].punch_in_time <= w[1].punch_in_time));
    }

    #[tokio::test]
    async fn ready_when_all_fetches_succeed() {
        let source = StubSource::new(sample());
        let state = build_view_state(&source).await;
        let snapshot = state.as_ready().expect("ready state");
        assert_eq!(snapshot.stats.total_employees, 2);
        assert_eq!(snapshot.punch_records.len(), 3);
        assert_eq!(snapshot.quotations.len(), 5);
        assert_eq!(snapshot.requests.len(), 2);
        assert_eq!(snapshot.products.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn empty_collections_are_ready_with_zero_stats() {
        let source = StubSource::new(Collections::default());
        let state = build_view_state(&source).await;
        let snapshot = state.as_ready().expect("empty input is not a failure");
        assert_eq!(snapshot.stats, DashboardStats::default());
        assert!(snapshot.charts.product_popularity.is_empty());
        assert!(snapshot.charts.punch_in_trend.is_empty());
    }

    #[tokio::test]
    async fn empty_quotations_keep_three_zero_count_status_slices() {
        let source = StubSource::new(Collections::default());
        let state = build_view_state(&source).await;
        let slices = &state.as_ready().unwrap().charts.quotation_status;
        let statuses: Vec<_> = slices.iter().map(|s| s.status).collect();
        assert_eq!(statuses, QuotationStatus::ALL);
        assert!(slices.iter().all(|s| s.count == 0));
    }

    #[tokio::test]
    async fn any_single_failure_fails_the_whole_view() {
        for failing in [
            Failing::PunchRecords,
            Failing::Quotations,
            Failing::Requests,
            Failing::Products,
        ] {
            let source = StubSource::new(sample()).failing(failing);
            let state = build_view_state(&source).await;
            assert_eq!(
                state,
                ViewState::Failed {
                    message: "Failed to load data.".to_string()
                },
                "failing {failing:?} should fail the view"
            );
        }
    }

    #[tokio::test]
    async fn repeated_builds_yield_identical_stats() {
        let source = StubSource::new(sample());
        let first = build_view_state(&source).await;
        let second = build_view_state(&source).await;
        assert_eq!(
            first.as_ready().unwrap().stats,
            second.as_ready().unwrap().stats
        );
    }

    /// Every fetch waits until all four are in flight, so a sequential
    /// implementation would never finish.
    struct RendezvousSource {
        barrier: Arc<Barrier>,
    }

    impl DataSource for RendezvousSource {
        async fn fetch_punch_records(&self) -> Result<Vec<PunchRecord>, AppError> {
            self.barrier.wait().await;
            Ok(vec![punch("u1", 0)])
        }

        async fn fetch_quotations(&self) -> Result<Vec<Quotation>, AppError> {
            self.barrier.wait().await;
            Ok(vec![])
        }

        async fn get_pending_requests(&self) -> Result<Vec<RequestRecord>, AppError> {
            self.barrier.wait().await;
            Ok(vec![])
        }

        async fn list_all_products(&self) -> Result<Vec<Product>, AppError> {
            self.barrier.wait().await;
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn fetches_run_concurrently() {
        let source = RendezvousSource {
            barrier: Arc::new(Barrier::new(4)),
        };
        let state = tokio::time::timeout(Duration::from_secs(5), build_view_state(&source))
            .await
            .expect("fetches should not run one at a time");
        assert_eq!(state.as_ready().unwrap().stats.total_employees, 1);
    }
}
