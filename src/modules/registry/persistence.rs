use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{MasterPlace, NewMasterPlace, PlaceStatus};
use super::repository::{BatchOutcome, MasterPlaceRepository};
use crate::schema::place_master;
use crate::shared::database::Database;
use crate::shared::errors::{AppError, AppResult};

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = place_master)]
struct NewMasterPlaceRow {
    id: Uuid,
    natural_key: String,
    name: String,
    road_address: Option<String>,
    lot_address: Option<String>,
    latitude: f64,
    longitude: f64,
    industry_code: Option<String>,
    industry_name: Option<String>,
    opened_at: Option<NaiveDate>,
    status: PlaceStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Overwrite payload for an existing natural key. Excludes `id`,
/// `natural_key`, and `created_at`; forces status back to ACTIVE.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = place_master)]
struct MasterPlaceChangeset {
    name: String,
    road_address: Option<String>,
    lot_address: Option<String>,
    latitude: f64,
    longitude: f64,
    industry_code: Option<String>,
    industry_name: Option<String>,
    opened_at: Option<NaiveDate>,
    status: PlaceStatus,
    updated_at: DateTime<Utc>,
}

impl From<&NewMasterPlace> for MasterPlaceChangeset {
    fn from(place: &NewMasterPlace) -> Self {
        Self {
            name: place.name.clone(),
            road_address: place.road_address.clone(),
            lot_address: place.lot_address.clone(),
            latitude: place.latitude,
            longitude: place.longitude,
            industry_code: place.industry_code.clone(),
            industry_name: place.industry_name.clone(),
            opened_at: place.opened_at,
            status: PlaceStatus::Active,
            updated_at: Utc::now(),
        }
    }
}

pub struct MasterPlaceRepositoryImpl {
    database: Arc<Database>,
}

impl MasterPlaceRepositoryImpl {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl MasterPlaceRepository for MasterPlaceRepositoryImpl {
    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.database.get_connection()?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Connectivity probe failed: {}", e)))?;
        Ok(())
    }

    async fn upsert_batch(&self, rows: &[NewMasterPlace]) -> AppResult<BatchOutcome> {
        if rows.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let mut conn = self.database.get_connection()?;

        let keys: Vec<String> = rows.iter().map(|r| r.natural_key.clone()).collect();

        conn.transaction::<BatchOutcome, diesel::result::Error, _>(|conn| {
            // Which keys already exist decides insert-vs-update counting;
            // the upsert itself is key-conflict driven either way.
            let existing: HashSet<String> = place_master::table
                .filter(place_master::natural_key.eq_any(&keys))
                .select(place_master::natural_key)
                .load::<String>(conn)?
                .into_iter()
                .collect();

            let now = Utc::now();
            let mut outcome = BatchOutcome::default();

            for place in rows {
                let row = NewMasterPlaceRow {
                    id: Uuid::new_v4(),
                    natural_key: place.natural_key.clone(),
                    name: place.name.clone(),
                    road_address: place.road_address.clone(),
                    lot_address: place.lot_address.clone(),
                    latitude: place.latitude,
                    longitude: place.longitude,
                    industry_code: place.industry_code.clone(),
                    industry_name: place.industry_name.clone(),
                    opened_at: place.opened_at,
                    status: PlaceStatus::Active,
                    created_at: now,
                    updated_at: now,
                };

                diesel::insert_into(place_master::table)
                    .values(&row)
                    .on_conflict(place_master::natural_key)
                    .do_update()
                    .set(MasterPlaceChangeset::from(place))
                    .execute(conn)?;

                if existing.contains(&place.natural_key) {
                    outcome.updated += 1;
                } else {
                    outcome.inserted += 1;
                }
            }

            Ok(outcome)
        })
        .map_err(|e| AppError::DatabaseError(format!("Failed to upsert batch: {}", e)))
    }

    async fn mark_closed_except(&self, active_keys: &[String]) -> AppResult<usize> {
        let mut conn = self.database.get_connection()?;

        let closed = diesel::update(
            place_master::table
                .filter(place_master::status.eq(PlaceStatus::Active))
                .filter(place_master::natural_key.ne_all(active_keys)),
        )
        .set((
            place_master::status.eq(PlaceStatus::Closed),
            place_master::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to close absent records: {}", e)))?;

        Ok(closed)
    }

    async fn count_by_status(&self) -> AppResult<HashMap<PlaceStatus, i64>> {
        let mut conn = self.database.get_connection()?;

        let counts: Vec<(PlaceStatus, i64)> = place_master::table
            .group_by(place_master::status)
            .select((place_master::status, diesel::dsl::count_star()))
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to count by status: {}", e)))?;

        Ok(counts.into_iter().collect())
    }

    async fn load_active(&self, limit: Option<i64>) -> AppResult<Vec<MasterPlace>> {
        let mut conn = self.database.get_connection()?;

        let mut query = place_master::table
            .filter(place_master::status.eq(PlaceStatus::Active))
            .order(place_master::natural_key.asc())
            .select(MasterPlace::as_select())
            .into_boxed();

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to load active records: {}", e)))
    }
}
