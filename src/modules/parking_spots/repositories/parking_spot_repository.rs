// Parking spot persistence
//
// Implements:
// - Existence checks backing the three uniqueness rules
// - Paged, sorted listing with total count
// - Lookup by id
// - Save (insert when id is absent, full replace when present)
// - Update of an existing row only (never inserts)
// - Delete by id
//
// The table's UNIQUE keys are the final guard against concurrent creates
// that both pass the existence checks; violations come back as Conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, Transaction};
use uuid::Uuid;

use crate::core::{AppError, Page, PageRequest, Result};
use crate::modules::parking_spots::models::{ParkingSpot, UniqueKey};

/// Storage access for parking spots
#[async_trait]
pub trait ParkingSpotRepository: Send + Sync {
    async fn exists_by_spot_number(&self, spot_number: &str) -> Result<bool>;

    async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool>;

    async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str) -> Result<bool>;

    /// One page of spots ordered by the request's sort key
    async fn find_all(&self, request: &PageRequest) -> Result<Page<ParkingSpot>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>>;

    /// Insert if `spot.id` is `None` (assigning a fresh id), otherwise
    /// replace every column of that row, inserting it if it does not exist
    async fn save(&self, spot: ParkingSpot) -> Result<ParkingSpot>;

    /// Replace every column of row `id`. Returns `None`, without
    /// inserting, when that row does not exist
    async fn update(&self, id: Uuid, spot: ParkingSpot) -> Result<Option<ParkingSpot>>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, spot_number, license_plate, brand, model, color,
           registration_date, responsible_name, apartment, block
    FROM tb_parking_spot
"#;

/// MySQL-backed repository
#[derive(Clone)]
pub struct MySqlParkingSpotRepository {
    pool: MySqlPool,
}

impl MySqlParkingSpotRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn count_where(&self, predicate: &str, values: &[&str]) -> Result<bool> {
        let sql = format!("SELECT COUNT(*) FROM tb_parking_spot WHERE {}", predicate);
        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in values {
            query = query.bind(*value);
        }

        let count = query.fetch_one(&self.pool).await?;
        Ok(count > 0)
    }

    async fn insert_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        spot: &ParkingSpot,
        id: Uuid,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tb_parking_spot (
                id, spot_number, license_plate, brand, model, color,
                registration_date, responsible_name, apartment, block
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&spot.spot_number)
        .bind(&spot.license_plate)
        .bind(&spot.brand)
        .bind(&spot.model)
        .bind(&spot.color)
        .bind(spot.registration_date)
        .bind(&spot.responsible_name)
        .bind(&spot.apartment)
        .bind(&spot.block)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_write_error(e, spot))?;

        Ok(())
    }

    async fn update_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        spot: &ParkingSpot,
        id: Uuid,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tb_parking_spot
            SET spot_number = ?, license_plate = ?, brand = ?, model = ?, color = ?,
                registration_date = ?, responsible_name = ?, apartment = ?, block = ?
            WHERE id = ?
            "#,
        )
        .bind(&spot.spot_number)
        .bind(&spot.license_plate)
        .bind(&spot.brand)
        .bind(&spot.model)
        .bind(&spot.color)
        .bind(spot.registration_date)
        .bind(&spot.responsible_name)
        .bind(&spot.apartment)
        .bind(&spot.block)
        .bind(id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| map_write_error(e, spot))?;

        // sqlx negotiates CLIENT_FOUND_ROWS, so this counts matched rows
        Ok(result.rows_affected())
    }
}

/// Translate a unique-key violation into the matching Conflict
fn map_write_error(err: sqlx::Error, spot: &ParkingSpot) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let key = db_err
                .constraint()
                .and_then(UniqueKey::from_violation_message)
                .or_else(|| UniqueKey::from_violation_message(db_err.message()));

            if let Some(key) = key {
                return key.conflict_for(spot);
            }
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl ParkingSpotRepository for MySqlParkingSpotRepository {
    async fn exists_by_spot_number(&self, spot_number: &str) -> Result<bool> {
        self.count_where("spot_number = ?", &[spot_number]).await
    }

    async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool> {
        self.count_where("license_plate = ?", &[license_plate]).await
    }

    async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str) -> Result<bool> {
        self.count_where("apartment = ? AND block = ?", &[apartment, block])
            .await
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<ParkingSpot>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_parking_spot")
            .fetch_one(&self.pool)
            .await?;

        // ORDER BY comes from a fixed column whitelist, never from raw input
        let sql = format!(
            "{} ORDER BY {} LIMIT ? OFFSET ?",
            SELECT_COLUMNS,
            request.sort.order_by_clause()
        );

        let rows = sqlx::query_as::<_, ParkingSpotRow>(&sql)
            .bind(request.size as i64)
            .bind(request.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let content = rows
            .into_iter()
            .map(ParkingSpotRow::into_parking_spot)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(content, *request, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);

        let row = sqlx::query_as::<_, ParkingSpotRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ParkingSpotRow::into_parking_spot).transpose()
    }

    async fn save(&self, mut spot: ParkingSpot) -> Result<ParkingSpot> {
        let mut tx = self.pool.begin().await?;

        match spot.id {
            Some(id) => {
                let existing: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM tb_parking_spot WHERE id = ? FOR UPDATE",
                )
                .bind(id.to_string())
                .fetch_one(&mut *tx)
                .await?;

                if existing > 0 {
                    self.update_with_tx(&mut tx, &spot, id).await?;
                } else {
                    self.insert_with_tx(&mut tx, &spot, id).await?;
                }
            }
            None => {
                let id = Uuid::new_v4();
                self.insert_with_tx(&mut tx, &spot, id).await?;
                spot.id = Some(id);
            }
        }

        tx.commit().await?;

        Ok(spot)
    }

    async fn update(&self, id: Uuid, mut spot: ParkingSpot) -> Result<Option<ParkingSpot>> {
        let mut tx = self.pool.begin().await?;
        let matched = self.update_with_tx(&mut tx, &spot, id).await?;

        if matched == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        spot.id = Some(id);
        Ok(Some(spot))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tb_parking_spot WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// Helper struct for database mapping

#[derive(Debug, FromRow)]
struct ParkingSpotRow {
    id: String,
    spot_number: String,
    license_plate: String,
    brand: String,
    model: String,
    color: String,
    registration_date: DateTime<Utc>,
    responsible_name: String,
    apartment: String,
    block: String,
}

impl ParkingSpotRow {
    fn into_parking_spot(self) -> Result<ParkingSpot> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| AppError::Internal(format!("Invalid parking spot id in database: {}", e)))?;

        Ok(ParkingSpot {
            id: Some(id),
            spot_number: self.spot_number,
            license_plate: self.license_plate,
            brand: self.brand,
            model: self.model,
            color: self.color,
            registration_date: self.registration_date,
            responsible_name: self.responsible_name,
            apartment: self.apartment,
            block: self.block,
        })
    }
}
