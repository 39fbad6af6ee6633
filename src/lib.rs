//! Parking Control Library
//!
//! REST service that manages the parking spots of a residential condominium.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::health;
pub use modules::parking_spots;
