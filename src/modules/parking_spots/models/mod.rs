pub mod parking_spot;

pub use parking_spot::{
    apartment_block_conflict, license_plate_conflict, spot_not_found, spot_number_conflict,
    ParkingSpot, ParkingSpotRequest, ParkingSpotResponse, UniqueKey,
};
