//! Integration tests for the in-memory store using the storage test harness.
//!
//! This file invokes `store_contract_tests!` to validate that the in-memory
//! services fully conform to the storage contract.

#[macro_use]
mod storage_harness;

use kennywood::storage::EntityStore;
use storage_harness::*;

store_contract_tests!(async { EntityStore::in_memory() });
