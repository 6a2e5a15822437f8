//! Seed script for development — writes a sample fixture file for the
//! fixture-backed document store.
//!
//! Usage: `cargo run --bin seed [PATH]`
//!
//! Defaults to `STORE_FIXTURE_PATH` (reads .env), then `fixtures/dashboard.json`.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use opsdash::models::product::Product;
use opsdash::models::punch_record::{GeoPoint, PunchRecord};
use opsdash::models::quotation::{ClientDetails, Quotation};
use opsdash::models::request::RequestRecord;
use opsdash::models::timestamp::Timestamp;
use serde_json::json;
use uuid::Uuid;

const EMPLOYEES: [(&str, &str); 4] = [
    ("emp-001", "ana.silva@fieldops.local"),
    ("emp-002", "joao.costa@fieldops.local"),
    ("emp-003", "maria.lopes@fieldops.local"),
    ("emp-004", "pedro.alves@fieldops.local"),
];

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("STORE_FIXTURE_PATH").ok())
        .unwrap_or_else(|| "fixtures/dashboard.json".to_string())
        .into();

    println!("=== Dashboard Fixture Seed ===");

    let fixture = json!({
        "punchRecords": seed_punch_records(),
        "quotations": seed_quotations(),
        "requests": seed_requests(),
        "products": seed_products(),
    });

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_vec_pretty(&fixture)?)?;

    println!("\n=== Seed complete! ===");
    println!("Fixture written to {}", path.display());
    println!("Run the server with STORE_FIXTURE_PATH={}", path.display());

    Ok(())
}

fn seed_punch_records() -> Vec<PunchRecord> {
    let now = Utc::now();
    let mut records = Vec::new();

    for day in 0..5i64 {
        for (i, (user_id, email)) in EMPLOYEES.iter().enumerate() {
            // One employee skips the last two days.
            if i == 3 && day < 2 {
                continue;
            }
            let punch_in = now - Duration::days(day) - Duration::hours(9)
                + Duration::minutes(i as i64 * 7);
            // Today's shift is still open.
            let punch_out = (day > 0).then(|| Timestamp(punch_in + Duration::hours(8)));
            // Punches from the mobile app carry a location; kiosk punches do not.
            let location = (i % 2 == 0).then(|| GeoPoint {
                latitude: -23.5505 + i as f64 * 0.0123,
                longitude: -46.6333 - day as f64 * 0.0071,
            });

            records.push(PunchRecord {
                user_id: user_id.to_string(),
                user_email: email.to_string(),
                punch_in_time: Timestamp(punch_in),
                punch_out_time: punch_out,
                location,
            });
        }
    }

    println!("[done] {} punch records", records.len());
    records
}

fn seed_quotations() -> Vec<Quotation> {
    let rows = [
        ("Acme Corp", "buy@acme.test", Some(3), Some("accepted")),
        ("Globex", "procurement@globex.test", Some(1), Some("pending")),
        ("Initech", "office@initech.test", None, Some("rejected")),
        ("Umbrella", "sales@umbrella.test", Some(5), Some("accepted")),
        ("Hooli", "vendors@hooli.test", Some(2), Some("draft")),
    ];

    let mut quotations: Vec<Quotation> = rows
        .into_iter()
        .map(|(name, email, visits, status)| Quotation {
            client_details: Some(ClientDetails {
                name: name.to_string(),
                email: email.to_string(),
                visits,
            }),
            status: status.map(str::to_string),
        })
        .collect();

    // Legacy import with no client attached.
    quotations.push(Quotation {
        client_details: None,
        status: Some("pending".to_string()),
    });

    println!("[done] {} quotations", quotations.len());
    quotations
}

fn seed_requests() -> Vec<RequestRecord> {
    let rows = [
        ("pending", "Acme Corp"),
        ("pending", "Globex"),
        ("approved", "Initech"),
        ("pending", "Umbrella"),
    ];

    let requests: Vec<RequestRecord> = rows
        .into_iter()
        .map(|(status, client)| RequestRecord {
            id: Uuid::new_v4().to_string(),
            status: status.to_string(),
            client_name: client.to_string(),
        })
        .collect();

    println!("[done] {} requests", requests.len());
    requests
}

fn seed_products() -> Vec<Product> {
    let rows = [
        ("Solar Panel 400W", Some(42)),
        ("Inverter 5kW", Some(17)),
        ("Battery Pack 10kWh", Some(9)),
        ("Mounting Kit", None),
    ];

    let products: Vec<Product> = rows
        .into_iter()
        .map(|(name, sold)| Product {
            name: name.to_string(),
            sold,
        })
        .collect();

    println!("[done] {} products", products.len());
    products
}
