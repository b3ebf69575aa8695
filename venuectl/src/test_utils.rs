//! Helpers for HTTP tests against an in-memory instance.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};

use crate::{
    AppState, Config, booking::BookingService, build_router, db::store::InMemoryStore, seed_database,
    types::FacilityId,
};

/// A date safely in the future for booking requests.
pub const FUTURE_DATE: &str = "2099-01-01";

/// Router over a freshly seeded in-memory store. The store is returned so tests can inspect
/// what was persisted.
pub async fn create_test_app() -> (TestServer, Arc<InMemoryStore>) {
    create_test_app_with_config(Config::default()).await
}

pub async fn create_test_app_with_config(config: Config) -> (TestServer, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    seed_database(store.as_ref()).await.expect("Failed to seed facilities");

    let state = AppState::builder()
        .store(store.clone())
        .bookings(BookingService::new(store.clone()))
        .config(config)
        .build();
    let router = build_router(state).expect("Failed to build router");

    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");
    (server, store)
}

/// ID of the first facility in the catalog (the bowling lanes, $45.00/h).
pub async fn first_facility_id(server: &TestServer) -> FacilityId {
    let facilities: Vec<Value> = server.get("/api/facilities").await.json();
    facilities[0]["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("facility id should be a uuid")
}

/// A reservation body that passes validation.
pub fn reservation_body(facility_id: FacilityId, time: &str) -> Value {
    json!({
        "facilityId": facility_id,
        "customerName": "John Doe",
        "customerEmail": "john@example.com",
        "customerPhone": "1234567890",
        "date": FUTURE_DATE,
        "time": time,
        "duration": 1,
        "partySize": 4,
        "pricingTier": "explorer"
    })
}
