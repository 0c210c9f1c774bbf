//! Macro-generated test suite for `EntityStore` contract validation.
//!
//! The `store_contract_tests!` macro generates a test module that validates
//! any backend behind `EntityStore` against the same contract: id
//! assignment, CRUD, foreign-key filters, list ordering, detaching, and
//! account/token behaviour.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! store_contract_tests!(async { EntityStore::in_memory() });
//! ```

/// Generate a full `EntityStore` conformance test suite.
///
/// `$factory` must be a future resolving to a fresh, empty `EntityStore`.
/// It is re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! store_contract_tests {
    ($factory:expr) => {
        mod store_contract_tests {
            use super::*;
            use kennywood::core::error::StorageError;
            use kennywood::entities::account::NewAccount;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_assigns_sequential_ids() {
                let store = $factory.await;

                let first = seed_area(&store, "Kiddieland").await;
                let second = seed_area(&store, "Lost Kennywood").await;

                assert_eq!(first.id, 1);
                assert_eq!(second.id, 2);
                assert_eq!(second.name, "Lost Kennywood");
            }

            #[tokio::test]
            async fn test_get_roundtrip_and_missing() {
                let store = $factory.await;
                let area = seed_area(&store, "Thunderbolt Alley").await;

                let fetched = store.park_areas.get(area.id).await.unwrap();
                assert_eq!(fetched, Some(area));
                assert!(store.park_areas.get(999).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory.await;
                assert!(store.park_areas.list().await.unwrap().is_empty());
                assert!(store.attractions.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_update_replaces_fields() {
                let store = $factory.await;
                let area = seed_area(&store, "Old Name").await;

                let updated = store
                    .park_areas
                    .update(area.id, area_fields("New Name", "Retro"))
                    .await
                    .unwrap()
                    .expect("row exists");
                assert_eq!(updated.name, "New Name");

                let fetched = store.park_areas.get(area.id).await.unwrap().unwrap();
                assert_eq!(fetched.name, "New Name");
                assert_eq!(fetched.theme, "Retro");
            }

            #[tokio::test]
            async fn test_update_missing_returns_none() {
                let store = $factory.await;
                let result = store
                    .park_areas
                    .update(42, area_fields("Ghost", "None"))
                    .await
                    .unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_delete() {
                let store = $factory.await;
                let area = seed_area(&store, "Kiddieland").await;

                assert!(store.park_areas.delete(area.id).await.unwrap());
                assert!(!store.park_areas.delete(area.id).await.unwrap());
                assert!(store.park_areas.list().await.unwrap().is_empty());
            }

            // ==================================================================
            // Foreign keys and ordering
            // ==================================================================

            #[tokio::test]
            async fn test_find_by_area() {
                let store = $factory.await;
                let kiddie = seed_area(&store, "Kiddieland").await;
                let lost = seed_area(&store, "Lost Kennywood").await;

                seed_attraction(&store, "Kangaroo", kiddie.id).await;
                seed_attraction(&store, "Phantom's Revenge", lost.id).await;
                seed_attraction(&store, "Little Phantom", kiddie.id).await;

                let names: Vec<String> = store
                    .attractions
                    .find_by("area_id", kiddie.id)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|a| a.name)
                    .collect();
                assert_eq!(names, vec!["Kangaroo", "Little Phantom"]);

                assert!(store.attractions.find_by("area_id", 99).await.unwrap().is_empty());
                assert_eq!(store.attractions.list().await.unwrap().len(), 3);
            }

            #[tokio::test]
            async fn test_find_by_unknown_field_is_rejected() {
                let store = $factory.await;
                let err = store.attractions.find_by("name", 1).await.unwrap_err();
                assert!(matches!(err, StorageError::UnknownField { .. }));
            }

            #[tokio::test]
            async fn test_itineraries_ordered_by_starttime() {
                let store = $factory.await;
                let customer = seed_customer(&store, "rider").await;
                let area = seed_area(&store, "Kiddieland").await;
                let ride = seed_attraction(&store, "Kangaroo", area.id).await;

                seed_itinerary(&store, customer.id, ride.id, 1500).await;
                seed_itinerary(&store, customer.id, ride.id, 900).await;
                seed_itinerary(&store, customer.id, ride.id, 1200).await;

                let times: Vec<i64> = store
                    .itineraries
                    .find_by("customer_id", customer.id)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|i| i.starttime)
                    .collect();
                assert_eq!(times, vec![900, 1200, 1500]);
            }

            #[tokio::test]
            async fn test_itineraries_scoped_by_customer() {
                let store = $factory.await;
                let alice = seed_customer(&store, "alice").await;
                let bob = seed_customer(&store, "bob").await;
                let area = seed_area(&store, "Kiddieland").await;
                let ride = seed_attraction(&store, "Kangaroo", area.id).await;

                seed_itinerary(&store, alice.id, ride.id, 1000).await;
                seed_itinerary(&store, bob.id, ride.id, 1100).await;

                let mine = store.itineraries.find_by("customer_id", alice.id).await.unwrap();
                assert_eq!(mine.len(), 1);
                assert_eq!(mine[0].customer_id, alice.id);
            }

            #[tokio::test]
            async fn test_customer_delete_keeps_itineraries() {
                let store = $factory.await;
                let customer = seed_customer(&store, "rider").await;
                let area = seed_area(&store, "Kiddieland").await;
                let ride = seed_attraction(&store, "Kangaroo", area.id).await;
                let itinerary = seed_itinerary(&store, customer.id, ride.id, 1000).await;

                assert!(store.customers.delete(customer.id).await.unwrap());

                let left = store
                    .itineraries
                    .find_by("customer_id", customer.id)
                    .await
                    .unwrap();
                assert_eq!(left, vec![itinerary]);
            }

            #[tokio::test]
            async fn test_detach_clears_attraction() {
                let store = $factory.await;
                let customer = seed_customer(&store, "rider").await;
                let area = seed_area(&store, "Kiddieland").await;
                let ride = seed_attraction(&store, "Kangaroo", area.id).await;
                let other = seed_attraction(&store, "Whip", area.id).await;

                let stale = seed_itinerary(&store, customer.id, ride.id, 1000).await;
                let kept = seed_itinerary(&store, customer.id, other.id, 1100).await;

                let touched = store.itineraries.detach("attraction_id", ride.id).await.unwrap();
                assert_eq!(touched, 1);
                assert!(store.attractions.delete(ride.id).await.unwrap());

                let stale = store.itineraries.get(stale.id).await.unwrap().unwrap();
                assert_eq!(stale.attraction_id, None);
                let kept = store.itineraries.get(kept.id).await.unwrap().unwrap();
                assert_eq!(kept.attraction_id, Some(other.id));
            }

            #[tokio::test]
            async fn test_detach_requires_nullable_field() {
                let store = $factory.await;
                let err = store.itineraries.detach("customer_id", 1).await.unwrap_err();
                assert!(matches!(err, StorageError::UnknownField { .. }));
            }

            // ==================================================================
            // Accounts and tokens
            // ==================================================================

            #[tokio::test]
            async fn test_duplicate_username_is_rejected() {
                let store = $factory.await;
                let account = || NewAccount::new("rider", "hash", "R", "Ider", "r@park.test");

                store.accounts.create(account()).await.unwrap();
                let err = store.accounts.create(account()).await.unwrap_err();
                assert!(matches!(err, StorageError::Duplicate { .. }));
            }

            #[tokio::test]
            async fn test_find_by_username() {
                let store = $factory.await;
                let created = store
                    .accounts
                    .create(NewAccount::new("rider", "hash", "R", "Ider", "r@park.test"))
                    .await
                    .unwrap();

                let found = store.accounts.find_by_username("rider").await.unwrap().unwrap();
                assert_eq!(found.id, created.id);
                assert_eq!(found.email, "r@park.test");
                assert!(store.accounts.find_by_username("nobody").await.unwrap().is_none());
                assert!(store.accounts.get(created.id).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_token_is_stable_and_resolves() {
                let store = $factory.await;
                let account = store
                    .accounts
                    .create(NewAccount::new("rider", "hash", "R", "Ider", "r@park.test"))
                    .await
                    .unwrap();

                let first = store.accounts.token_for(account.id).await.unwrap();
                let second = store.accounts.token_for(account.id).await.unwrap();
                assert_eq!(first.key, second.key);
                assert_eq!(first.key.len(), 40);

                let owner = store.accounts.resolve_token(&first.key).await.unwrap().unwrap();
                assert_eq!(owner.username, "rider");
                assert!(store.accounts.resolve_token("0000").await.unwrap().is_none());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let store = $factory.await;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .park_areas
                            .create(area_fields(&format!("Area {}", i), "Parallel"))
                            .await
                            .unwrap()
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap().id);
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 10);
                assert_eq!(store.park_areas.list().await.unwrap().len(), 10);
            }
        }
    };
}
