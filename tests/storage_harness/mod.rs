//! Shared test harness for storage backend testing
//!
//! Provides seed helpers that insert rows in foreign-key order, so the same
//! helpers work against backends that enforce constraints.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod store_contract_tests;

use kennywood::prelude::*;
use kennywood::entities::account::NewAccount;

pub fn area_fields(name: &str, theme: &str) -> ParkAreaFields {
    ParkAreaFields {
        name: name.to_string(),
        theme: theme.to_string(),
    }
}

pub async fn seed_area(store: &EntityStore, name: &str) -> ParkArea {
    store
        .park_areas
        .create(area_fields(name, "Classic"))
        .await
        .expect("area insert should succeed")
}

pub async fn seed_attraction(store: &EntityStore, name: &str, area_id: i64) -> Attraction {
    store
        .attractions
        .create(AttractionFields {
            name: name.to_string(),
            area_id,
        })
        .await
        .expect("attraction insert should succeed")
}

/// Insert an account and its customer profile
pub async fn seed_customer(store: &EntityStore, username: &str) -> Customer {
    let account = store
        .accounts
        .create(NewAccount::new(
            username,
            "$argon2id$not-checked-here",
            "Test",
            "Rider",
            format!("{}@park.test", username),
        ))
        .await
        .expect("account insert should succeed");

    store
        .customers
        .create(CustomerFields {
            account_id: account.id,
            family_members: 2,
        })
        .await
        .expect("customer insert should succeed")
}

pub async fn seed_itinerary(
    store: &EntityStore,
    customer_id: i64,
    attraction_id: i64,
    starttime: i64,
) -> Itinerary {
    store
        .itineraries
        .create(ItineraryFields {
            starttime,
            attraction_id: Some(attraction_id),
            customer_id,
            image: None,
        })
        .await
        .expect("itinerary insert should succeed")
}
