pub mod parking_spot_service;

pub use parking_spot_service::ParkingSpotService;
