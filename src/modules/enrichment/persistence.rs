use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{NewPlaceDetail, PlaceDetail};
use super::repository::PlaceDetailRepository;
use crate::modules::provider::Platform;
use crate::modules::registry::PlaceStatus;
use crate::modules::scoring::PlatformSignals;
use crate::schema::{place_detail, place_master};
use crate::shared::database::Database;
use crate::shared::errors::{AppError, AppResult};

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = place_detail)]
struct PlaceDetailModel {
    id: Uuid,
    master_id: Uuid,
    platform: Platform,
    platform_id: String,
    url: Option<String>,
    rating: Option<f64>,
    review_count: Option<i32>,
    phone: Option<String>,
    last_synced_at: DateTime<Utc>,
}

impl PlaceDetailModel {
    fn into_domain(self) -> PlaceDetail {
        PlaceDetail {
            id: self.id,
            master_id: self.master_id,
            platform: self.platform,
            platform_id: self.platform_id,
            url: self.url,
            rating: self.rating,
            review_count: self.review_count,
            phone: self.phone,
            last_synced_at: self.last_synced_at,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = place_detail)]
struct NewPlaceDetailRow {
    id: Uuid,
    master_id: Uuid,
    platform: Platform,
    platform_id: String,
    url: Option<String>,
    rating: Option<f64>,
    review_count: Option<i32>,
    phone: Option<String>,
    last_synced_at: DateTime<Utc>,
}

/// Refresh payload for a re-match; identity columns stay put
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = place_detail)]
struct PlaceDetailChangeset {
    platform_id: String,
    url: Option<String>,
    rating: Option<f64>,
    review_count: Option<i32>,
    phone: Option<String>,
    last_synced_at: DateTime<Utc>,
}

pub struct PlaceDetailRepositoryImpl {
    database: Arc<Database>,
}

impl PlaceDetailRepositoryImpl {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl PlaceDetailRepository for PlaceDetailRepositoryImpl {
    async fn upsert(&self, detail: &NewPlaceDetail) -> AppResult<()> {
        let mut conn = self.database.get_connection()?;

        let now = Utc::now();
        let row = NewPlaceDetailRow {
            id: Uuid::new_v4(),
            master_id: detail.master_id,
            platform: detail.platform,
            platform_id: detail.platform_id.clone(),
            url: detail.url.clone(),
            rating: detail.rating,
            review_count: detail.review_count,
            phone: detail.phone.clone(),
            last_synced_at: now,
        };

        diesel::insert_into(place_detail::table)
            .values(&row)
            .on_conflict((place_detail::master_id, place_detail::platform))
            .do_update()
            .set(PlaceDetailChangeset {
                platform_id: detail.platform_id.clone(),
                url: detail.url.clone(),
                rating: detail.rating,
                review_count: detail.review_count,
                phone: detail.phone.clone(),
                last_synced_at: now,
            })
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to upsert detail: {}", e)))?;

        Ok(())
    }

    async fn load_by_master(&self, master_id: Uuid) -> AppResult<Vec<PlaceDetail>> {
        let mut conn = self.database.get_connection()?;

        let models: Vec<PlaceDetailModel> = place_detail::table
            .filter(place_detail::master_id.eq(master_id))
            .select(PlaceDetailModel::as_select())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to load details: {}", e)))?;

        Ok(models.into_iter().map(PlaceDetailModel::into_domain).collect())
    }

    async fn signals_for_active_masters(&self) -> AppResult<Vec<(Uuid, PlatformSignals)>> {
        let mut conn = self.database.get_connection()?;

        let rows: Vec<(String, PlaceDetailModel)> = place_detail::table
            .inner_join(place_master::table)
            .filter(place_master::status.eq(PlaceStatus::Active))
            .order(place_master::natural_key.asc())
            .select((place_master::natural_key, PlaceDetailModel::as_select()))
            .load(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to aggregate signals: {}", e))
            })?;

        // One detail row per (master, platform); fold the at-most-two rows
        // per master into a single signal set, preserving key order.
        let mut ordered: Vec<(Uuid, PlatformSignals)> = Vec::new();
        let mut index: HashMap<Uuid, usize> = HashMap::new();

        for (_, detail) in rows {
            let slot = *index.entry(detail.master_id).or_insert_with(|| {
                ordered.push((detail.master_id, PlatformSignals::default()));
                ordered.len() - 1
            });

            let signals = &mut ordered[slot].1;
            match detail.platform {
                Platform::Kakao => {
                    signals.kakao_rating = detail.rating;
                    signals.kakao_reviews = detail.review_count.unwrap_or(0);
                }
                Platform::Naver => {
                    signals.naver_rating = detail.rating;
                    signals.naver_reviews = detail.review_count.unwrap_or(0);
                }
            }
        }

        Ok(ordered)
    }
}
