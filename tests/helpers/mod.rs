// Test Helper Modules
//
// Shared infrastructure for unit, contract and integration tests.
//
// - Unit and contract tests run against `InMemoryParkingSpotRepository`
//   and need no external services.
// - Integration tests talk to a real MySQL database (TEST_DATABASE_URL)
//   and are `#[ignore]`d by default.
//
// Usage (from a test crate):
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code, unused_imports)]

pub mod in_memory_repository;
pub mod test_app;
pub mod test_data;

// Re-export commonly used types and functions
pub use assertions::*;
pub use in_memory_repository::*;
pub use test_app::*;
pub use test_client::*;
pub use test_data::*;
pub use test_database::*;
