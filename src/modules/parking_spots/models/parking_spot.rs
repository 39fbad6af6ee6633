// Parking spot entity, wire DTOs and request validation
//
// A parking spot ties one vehicle (plate, brand, model, color) to one
// resident's apartment/block. Spot number, license plate and the
// apartment/block pair are each unique across all records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

pub const SPOT_NUMBER_MAX_LEN: usize = 10;
pub const LICENSE_PLATE_LEN: usize = 7;
pub const VEHICLE_ATTRIBUTE_MAX_LEN: usize = 70;
pub const RESPONSIBLE_NAME_MAX_LEN: usize = 130;
pub const APARTMENT_MAX_LEN: usize = 30;
pub const BLOCK_MAX_LEN: usize = 30;

pub const BLANK_MESSAGE: &str = "must not be blank";
pub const LICENSE_PLATE_MESSAGE: &str = "License Plate car must have 7 chars";

/// Persisted parking spot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpot {
    /// Assigned by the repository on first save, immutable afterwards
    pub id: Option<Uuid>,
    pub spot_number: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    /// Server-side registration instant (UTC)
    pub registration_date: DateTime<Utc>,
    pub responsible_name: String,
    pub apartment: String,
    pub block: String,
}

/// Body of POST and PUT requests.
///
/// Missing or `null` fields deserialize as empty strings so they surface
/// as "must not be blank" validation errors instead of parse failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParkingSpotRequest {
    #[serde(deserialize_with = "null_as_blank")]
    pub spot_number: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub license_plate: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub model: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub color: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub responsible_name: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub apartment: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub block: String,
}

/// Response body; the id is never exposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpotResponse {
    pub spot_number: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub registration_date: DateTime<Utc>,
    pub responsible_name: String,
    pub apartment: String,
    pub block: String,
}

fn null_as_blank<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ParkingSpotRequest {
    /// Check every field and report one message per offending field.
    ///
    /// Rules, first failure wins per field:
    /// 1. not blank
    /// 2. license plate exactly [`LICENSE_PLATE_LEN`] characters
    /// 3. no longer than the backing column
    pub fn validate(&self) -> Result<()> {
        let fields: [(&str, &str, usize); 8] = [
            ("spotNumber", self.spot_number.as_str(), SPOT_NUMBER_MAX_LEN),
            ("licensePlate", self.license_plate.as_str(), LICENSE_PLATE_LEN),
            ("brand", self.brand.as_str(), VEHICLE_ATTRIBUTE_MAX_LEN),
            ("model", self.model.as_str(), VEHICLE_ATTRIBUTE_MAX_LEN),
            ("color", self.color.as_str(), VEHICLE_ATTRIBUTE_MAX_LEN),
            ("responsibleName", self.responsible_name.as_str(), RESPONSIBLE_NAME_MAX_LEN),
            ("apartment", self.apartment.as_str(), APARTMENT_MAX_LEN),
            ("block", self.block.as_str(), BLOCK_MAX_LEN),
        ];

        let errors: BTreeMap<String, String> = fields
            .into_iter()
            .filter_map(|(field, value, max_len)| {
                field_error(field, value, max_len).map(|msg| (field.to_string(), msg))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::FieldValidation(errors))
        }
    }
}

fn field_error(field: &str, value: &str, max_len: usize) -> Option<String> {
    if value.trim().is_empty() {
        return Some(BLANK_MESSAGE.to_string());
    }

    let len = value.chars().count();
    if field == "licensePlate" && len != LICENSE_PLATE_LEN {
        return Some(LICENSE_PLATE_MESSAGE.to_string());
    }

    if len > max_len {
        return Some(format!("size must be at most {}", max_len));
    }

    None
}

/// Unique keys of `tb_parking_spot`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    SpotNumber,
    LicensePlate,
    ApartmentBlock,
}

impl UniqueKey {
    pub const ALL: [UniqueKey; 3] = [
        UniqueKey::SpotNumber,
        UniqueKey::LicensePlate,
        UniqueKey::ApartmentBlock,
    ];

    pub fn constraint_name(&self) -> &'static str {
        match self {
            UniqueKey::SpotNumber => "uk_parking_spot_spot_number",
            UniqueKey::LicensePlate => "uk_parking_spot_license_plate",
            UniqueKey::ApartmentBlock => "uk_parking_spot_apartment_block",
        }
    }

    /// Identify the violated key from a storage error message
    pub fn from_violation_message(message: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| message.contains(key.constraint_name()))
    }

    /// Conflict error naming the values of `spot` that collide on this key
    pub fn conflict_for(&self, spot: &ParkingSpot) -> AppError {
        match self {
            UniqueKey::SpotNumber => spot_number_conflict(&spot.spot_number),
            UniqueKey::LicensePlate => license_plate_conflict(&spot.license_plate),
            UniqueKey::ApartmentBlock => apartment_block_conflict(&spot.apartment, &spot.block),
        }
    }
}

pub fn spot_number_conflict(spot_number: &str) -> AppError {
    AppError::conflict(format!("Parking Spot Number {} already exists.", spot_number))
}

pub fn license_plate_conflict(license_plate: &str) -> AppError {
    AppError::conflict(format!("License Plate Car {} already exists.", license_plate))
}

pub fn apartment_block_conflict(apartment: &str, block: &str) -> AppError {
    AppError::conflict(format!(
        "Apartment {} and {} block already exists.",
        apartment, block
    ))
}

pub fn spot_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Could not find Parking Service Spot by id: {}", id))
}
