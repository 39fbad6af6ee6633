// Parking spots module

pub mod controllers;
pub mod mappers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use mappers::ParkingSpotMapper;
pub use models::{ParkingSpot, ParkingSpotRequest, ParkingSpotResponse};
pub use repositories::{MySqlParkingSpotRepository, ParkingSpotRepository};
pub use services::ParkingSpotService;
