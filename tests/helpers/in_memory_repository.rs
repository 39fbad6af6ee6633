// In-memory Parking Spot Repository
//
// Mutex-guarded store with the same unique keys as `tb_parking_spot`, so
// service and HTTP tests observe the same Conflict behavior as MySQL.

use std::cmp::Ordering;
use std::sync::{
    atomic::{AtomicBool, Ordering as AtomicOrdering},
    Mutex,
};

use async_trait::async_trait;
use parking_control::core::{AppError, Direction, Page, PageRequest, Result, SortProperty};
use parking_control::parking_spots::models::{ParkingSpot, UniqueKey};
use parking_control::parking_spots::ParkingSpotRepository;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryParkingSpotRepository {
    spots: Mutex<Vec<ParkingSpot>>,
    /// When set, `delete_by_id` reports that nothing was removed
    lose_deletes: AtomicBool,
    /// When set, existence checks always answer `false`
    skip_existence_checks: AtomicBool,
    /// When set, `update` first removes the target row
    vanish_before_update: AtomicBool,
}

impl InMemoryParkingSpotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with already-persisted spots (ids assigned where missing)
    pub fn with_spots(spots: Vec<ParkingSpot>) -> Self {
        let repo = Self::new();
        {
            let mut guard = repo.spots.lock().unwrap();
            for mut spot in spots {
                spot.id.get_or_insert_with(Uuid::new_v4);
                guard.push(spot);
            }
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.spots.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<ParkingSpot> {
        self.spots.lock().unwrap().clone()
    }

    /// Simulate a concurrent delete landing between lookup and delete
    pub fn lose_deletes(&self) {
        self.lose_deletes.store(true, AtomicOrdering::SeqCst);
    }

    /// Simulate a concurrent create that passed the existence checks
    pub fn skip_existence_checks(&self) {
        self.skip_existence_checks.store(true, AtomicOrdering::SeqCst);
    }

    /// Simulate a concurrent delete landing between lookup and update
    pub fn vanish_before_update(&self) {
        self.vanish_before_update.store(true, AtomicOrdering::SeqCst);
    }

    fn checks_skipped(&self) -> bool {
        self.skip_existence_checks.load(AtomicOrdering::SeqCst)
    }
}

fn collides(key: UniqueKey, a: &ParkingSpot, b: &ParkingSpot) -> bool {
    match key {
        UniqueKey::SpotNumber => a.spot_number == b.spot_number,
        UniqueKey::LicensePlate => a.license_plate == b.license_plate,
        UniqueKey::ApartmentBlock => a.apartment == b.apartment && a.block == b.block,
    }
}

fn check_unique(spots: &[ParkingSpot], id: Uuid, spot: &ParkingSpot) -> Result<()> {
    for key in UniqueKey::ALL {
        if spots
            .iter()
            .any(|other| other.id != Some(id) && collides(key, other, spot))
        {
            return Err(key.conflict_for(spot));
        }
    }
    Ok(())
}

fn compare(property: SortProperty, a: &ParkingSpot, b: &ParkingSpot) -> Ordering {
    match property {
        SortProperty::Id => a.id.map(|id| id.to_string()).cmp(&b.id.map(|id| id.to_string())),
        SortProperty::SpotNumber => a.spot_number.cmp(&b.spot_number),
        SortProperty::LicensePlate => a.license_plate.cmp(&b.license_plate),
        SortProperty::Brand => a.brand.cmp(&b.brand),
        SortProperty::Model => a.model.cmp(&b.model),
        SortProperty::Color => a.color.cmp(&b.color),
        SortProperty::RegistrationDate => a.registration_date.cmp(&b.registration_date),
        SortProperty::ResponsibleName => a.responsible_name.cmp(&b.responsible_name),
        SortProperty::Apartment => a.apartment.cmp(&b.apartment),
        SortProperty::Block => a.block.cmp(&b.block),
    }
}

#[async_trait]
impl ParkingSpotRepository for InMemoryParkingSpotRepository {
    async fn exists_by_spot_number(&self, spot_number: &str) -> Result<bool> {
        if self.checks_skipped() {
            return Ok(false);
        }
        let spots = self.spots.lock().unwrap();
        Ok(spots.iter().any(|s| s.spot_number == spot_number))
    }

    async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool> {
        if self.checks_skipped() {
            return Ok(false);
        }
        let spots = self.spots.lock().unwrap();
        Ok(spots.iter().any(|s| s.license_plate == license_plate))
    }

    async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str) -> Result<bool> {
        if self.checks_skipped() {
            return Ok(false);
        }
        let spots = self.spots.lock().unwrap();
        Ok(spots
            .iter()
            .any(|s| s.apartment == apartment && s.block == block))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<ParkingSpot>> {
        let mut spots = self.spots.lock().unwrap().clone();
        let sort = request.sort;

        spots.sort_by(|a, b| {
            let primary = match sort.direction {
                Direction::Asc => compare(sort.property, a, b),
                Direction::Desc => compare(sort.property, b, a),
            };
            primary.then_with(|| compare(SortProperty::Id, a, b))
        });

        let total = spots.len() as u64;
        let content = spots
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();

        Ok(Page::new(content, *request, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>> {
        let spots = self.spots.lock().unwrap();
        Ok(spots.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn save(&self, mut spot: ParkingSpot) -> Result<ParkingSpot> {
        let mut spots = self.spots.lock().unwrap();
        let id = *spot.id.get_or_insert_with(Uuid::new_v4);
        check_unique(&spots, id, &spot)?;

        match spots.iter_mut().find(|s| s.id == Some(id)) {
            Some(existing) => *existing = spot.clone(),
            None => spots.push(spot.clone()),
        }

        Ok(spot)
    }

    async fn update(&self, id: Uuid, mut spot: ParkingSpot) -> Result<Option<ParkingSpot>> {
        let mut spots = self.spots.lock().unwrap();
        if self.vanish_before_update.load(AtomicOrdering::SeqCst) {
            spots.retain(|s| s.id != Some(id));
        }

        spot.id = Some(id);
        check_unique(&spots, id, &spot)?;

        match spots.iter_mut().find(|s| s.id == Some(id)) {
            Some(existing) => {
                *existing = spot.clone();
                Ok(Some(spot))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        if self.lose_deletes.load(AtomicOrdering::SeqCst) {
            return Ok(false);
        }
        let mut spots = self.spots.lock().unwrap();
        let before = spots.len();
        spots.retain(|s| s.id != Some(id));
        Ok(spots.len() < before)
    }
}

/// Repository whose every call fails as if the database were down
pub struct FailingParkingSpotRepository;

fn unavailable() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ParkingSpotRepository for FailingParkingSpotRepository {
    async fn exists_by_spot_number(&self, _spot_number: &str) -> Result<bool> {
        Err(unavailable())
    }

    async fn exists_by_license_plate(&self, _license_plate: &str) -> Result<bool> {
        Err(unavailable())
    }

    async fn exists_by_apartment_and_block(&self, _apartment: &str, _block: &str) -> Result<bool> {
        Err(unavailable())
    }

    async fn find_all(&self, _request: &PageRequest) -> Result<Page<ParkingSpot>> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<ParkingSpot>> {
        Err(unavailable())
    }

    async fn save(&self, _spot: ParkingSpot) -> Result<ParkingSpot> {
        Err(unavailable())
    }

    async fn update(&self, _id: Uuid, _spot: ParkingSpot) -> Result<Option<ParkingSpot>> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<bool> {
        Err(unavailable())
    }
}
