pub mod parking_spot_mapper;

pub use parking_spot_mapper::{registration_timestamp, ParkingSpotMapper};
