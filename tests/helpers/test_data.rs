// Test Data Factory
//
// Builds valid parking spot payloads. Numbered variants are unique on all
// three keys (spot number, license plate, apartment/block).

use chrono::{DateTime, TimeZone, Utc};
use parking_control::parking_spots::models::{ParkingSpot, ParkingSpotRequest};
use serde_json::{json, Value};
use uuid::Uuid;

pub struct TestDataFactory;

impl TestDataFactory {
    /// The canonical request: spot 16A, plate 0000000, apartment 16 block A
    pub fn parking_spot_request() -> ParkingSpotRequest {
        ParkingSpotRequest {
            spot_number: "16A".to_string(),
            license_plate: "0000000".to_string(),
            brand: "Hyundai".to_string(),
            model: "Veloster".to_string(),
            color: "Blue".to_string(),
            responsible_name: "Anyone".to_string(),
            apartment: "16".to_string(),
            block: "A".to_string(),
        }
    }

    /// Request number `n`, unique on every key for distinct `n`
    pub fn numbered_request(n: u32) -> ParkingSpotRequest {
        ParkingSpotRequest {
            spot_number: format!("S{}", n),
            license_plate: format!("{:07}", n),
            brand: format!("Brand{}", n),
            model: "Model".to_string(),
            color: "Black".to_string(),
            responsible_name: format!("Resident {}", n),
            apartment: n.to_string(),
            block: "B".to_string(),
        }
    }

    /// JSON body for POST/PUT
    pub fn parking_spot_payload() -> Value {
        json!({
            "spotNumber": "16A",
            "licensePlate": "0000000",
            "brand": "Hyundai",
            "model": "Veloster",
            "color": "Blue",
            "responsibleName": "Anyone",
            "apartment": "16",
            "block": "A"
        })
    }

    /// JSON body unique across test runs sharing one database
    pub fn random_payload() -> Value {
        let suffix = Uuid::new_v4().simple().to_string();
        json!({
            "spotNumber": &suffix[..10],
            "licensePlate": &suffix[10..17],
            "brand": "Fiat",
            "model": "Uno",
            "color": "Red",
            "responsibleName": "Integration Resident",
            "apartment": &suffix[17..27],
            "block": &suffix[27..32]
        })
    }

    pub fn fixed_registration_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    /// Persisted-looking entity built from `numbered_request(n)`
    pub fn numbered_spot(n: u32) -> ParkingSpot {
        let request = Self::numbered_request(n);
        ParkingSpot {
            id: Some(Uuid::new_v4()),
            spot_number: request.spot_number,
            license_plate: request.license_plate,
            brand: request.brand,
            model: request.model,
            color: request.color,
            registration_date: Self::fixed_registration_date(),
            responsible_name: request.responsible_name,
            apartment: request.apartment,
            block: request.block,
        }
    }
}
