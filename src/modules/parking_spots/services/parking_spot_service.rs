use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{Page, PageRequest, Result};
use crate::modules::parking_spots::mappers::ParkingSpotMapper;
use crate::modules::parking_spots::models::{
    apartment_block_conflict, license_plate_conflict, spot_not_found, spot_number_conflict,
    ParkingSpotRequest, ParkingSpotResponse,
};
use crate::modules::parking_spots::repositories::ParkingSpotRepository;

/// Service for parking spot use cases
///
/// Expects requests already validated by the controller. The existence
/// checks in [`ParkingSpotService::create`] are a pre-check; the store's
/// unique keys decide races between concurrent creates.
pub struct ParkingSpotService {
    repository: Arc<dyn ParkingSpotRepository>,
    mapper: ParkingSpotMapper,
}

impl ParkingSpotService {
    pub fn new(repository: Arc<dyn ParkingSpotRepository>) -> Self {
        Self {
            repository,
            mapper: ParkingSpotMapper::new(),
        }
    }

    /// Register a new spot.
    ///
    /// Checks spot number, then license plate, then apartment/block; the
    /// first taken value fails the request with Conflict.
    pub async fn create(&self, request: ParkingSpotRequest) -> Result<ParkingSpotResponse> {
        if self.exists_by_spot_number(&request.spot_number).await? {
            warn!(spot_number = %request.spot_number, "Spot number already registered");
            return Err(spot_number_conflict(&request.spot_number));
        }

        if self.exists_by_license_plate(&request.license_plate).await? {
            warn!(license_plate = %request.license_plate, "License plate already registered");
            return Err(license_plate_conflict(&request.license_plate));
        }

        if self
            .exists_by_apartment_and_block(&request.apartment, &request.block)
            .await?
        {
            warn!(
                apartment = %request.apartment,
                block = %request.block,
                "Apartment and block already registered"
            );
            return Err(apartment_block_conflict(&request.apartment, &request.block));
        }

        let spot = self.mapper.to_entity(request);
        let saved = self.repository.save(spot).await?;

        info!(
            spot_id = ?saved.id,
            spot_number = %saved.spot_number,
            "Parking spot registered"
        );

        Ok(self.mapper.to_response(&saved))
    }

    pub async fn exists_by_spot_number(&self, spot_number: &str) -> Result<bool> {
        self.repository.exists_by_spot_number(spot_number).await
    }

    pub async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool> {
        self.repository.exists_by_license_plate(license_plate).await
    }

    pub async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str) -> Result<bool> {
        self.repository
            .exists_by_apartment_and_block(apartment, block)
            .await
    }

    pub async fn find_all(&self, request: PageRequest) -> Result<Page<ParkingSpotResponse>> {
        let page = self.repository.find_all(&request).await?;
        Ok(self.mapper.to_page_response(page))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<ParkingSpotResponse> {
        let spot = self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!(spot_id = %id, "Parking spot not found");
            spot_not_found(id)
        })?;

        Ok(self.mapper.to_response(&spot))
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            warn!(spot_id = %id, "Parking spot not found for deletion");
            return Err(spot_not_found(id));
        }

        // Removed by a concurrent request between the lookup and the delete
        if !self.repository.delete_by_id(id).await? {
            return Err(spot_not_found(id));
        }

        info!(spot_id = %id, "Parking spot deleted");
        Ok(())
    }

    /// Replace every field of an existing spot.
    ///
    /// The registration date is re-stamped and uniqueness is not
    /// pre-checked; a collision with another spot surfaces as Conflict
    /// from the store.
    pub async fn update(&self, id: Uuid, request: ParkingSpotRequest) -> Result<ParkingSpotResponse> {
        if self.repository.find_by_id(id).await?.is_none() {
            warn!(spot_id = %id, "Parking spot not found for update");
            return Err(spot_not_found(id));
        }

        let spot = self.mapper.to_entity(request);

        // Removed by a concurrent request after the lookup; never re-insert
        let saved = self.repository.update(id, spot).await?.ok_or_else(|| {
            warn!(spot_id = %id, "Parking spot vanished before update");
            spot_not_found(id)
        })?;

        info!(
            spot_id = %id,
            spot_number = %saved.spot_number,
            "Parking spot updated"
        );

        Ok(self.mapper.to_response(&saved))
    }
}
