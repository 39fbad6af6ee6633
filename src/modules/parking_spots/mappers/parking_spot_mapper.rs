use chrono::{DateTime, SubsecRound, Utc};

use crate::core::Page;
use crate::modules::parking_spots::models::{ParkingSpot, ParkingSpotRequest, ParkingSpotResponse};

/// Current UTC time at the precision the store keeps (microseconds)
pub fn registration_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Converts between wire DTOs and the persisted entity.
///
/// All conversions are field-for-field copies; the only computed value is
/// the registration date stamped by [`ParkingSpotMapper::to_entity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParkingSpotMapper;

impl ParkingSpotMapper {
    pub fn new() -> Self {
        Self
    }

    /// Request → unsaved entity, registered now
    pub fn to_entity(&self, request: ParkingSpotRequest) -> ParkingSpot {
        self.to_entity_at(request, registration_timestamp())
    }

    /// Request → unsaved entity with an explicit registration date
    pub fn to_entity_at(
        &self,
        request: ParkingSpotRequest,
        registration_date: DateTime<Utc>,
    ) -> ParkingSpot {
        ParkingSpot {
            id: None,
            spot_number: request.spot_number,
            license_plate: request.license_plate,
            brand: request.brand,
            model: request.model,
            color: request.color,
            registration_date,
            responsible_name: request.responsible_name,
            apartment: request.apartment,
            block: request.block,
        }
    }

    pub fn to_response(&self, spot: &ParkingSpot) -> ParkingSpotResponse {
        ParkingSpotResponse {
            spot_number: spot.spot_number.clone(),
            license_plate: spot.license_plate.clone(),
            brand: spot.brand.clone(),
            model: spot.model.clone(),
            color: spot.color.clone(),
            registration_date: spot.registration_date,
            responsible_name: spot.responsible_name.clone(),
            apartment: spot.apartment.clone(),
            block: spot.block.clone(),
        }
    }

    pub fn to_request(&self, spot: &ParkingSpot) -> ParkingSpotRequest {
        ParkingSpotRequest {
            spot_number: spot.spot_number.clone(),
            license_plate: spot.license_plate.clone(),
            brand: spot.brand.clone(),
            model: spot.model.clone(),
            color: spot.color.clone(),
            responsible_name: spot.responsible_name.clone(),
            apartment: spot.apartment.clone(),
            block: spot.block.clone(),
        }
    }

    pub fn to_responses(&self, spots: &[ParkingSpot]) -> Vec<ParkingSpotResponse> {
        spots.iter().map(|spot| self.to_response(spot)).collect()
    }

    /// Page of entities → page of responses; page metadata is kept as is
    pub fn to_page_response(&self, page: Page<ParkingSpot>) -> Page<ParkingSpotResponse> {
        page.map(|spot| self.to_response(&spot))
    }
}
