use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::domain::{PlaceScore, ScoreBreakdown};
use super::repository::PlaceScoreRepository;
use crate::schema::place_score;
use crate::shared::database::Database;
use crate::shared::errors::{AppError, AppResult};

#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = place_score)]
#[diesel(primary_key(master_id))]
struct PlaceScoreModel {
    master_id: Uuid,
    kakao_score: f64,
    naver_score: f64,
    volume_score: i32,
    composite_score: i32,
    calculated_at: DateTime<Utc>,
}

impl PlaceScoreModel {
    fn into_domain(self) -> PlaceScore {
        PlaceScore {
            master_id: self.master_id,
            kakao_score: self.kakao_score,
            naver_score: self.naver_score,
            volume_score: self.volume_score,
            composite_score: self.composite_score,
            calculated_at: self.calculated_at,
        }
    }
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = place_score)]
struct PlaceScoreRow {
    master_id: Uuid,
    kakao_score: f64,
    naver_score: f64,
    volume_score: i32,
    composite_score: i32,
    calculated_at: DateTime<Utc>,
}

pub struct PlaceScoreRepositoryImpl {
    database: Arc<Database>,
}

impl PlaceScoreRepositoryImpl {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl PlaceScoreRepository for PlaceScoreRepositoryImpl {
    async fn upsert_score(&self, master_id: Uuid, breakdown: &ScoreBreakdown) -> AppResult<()> {
        let mut conn = self.database.get_connection()?;

        let row = PlaceScoreRow {
            master_id,
            kakao_score: breakdown.kakao_score,
            naver_score: breakdown.naver_score,
            volume_score: breakdown.volume_score,
            composite_score: breakdown.composite_score,
            calculated_at: Utc::now(),
        };

        diesel::insert_into(place_score::table)
            .values(&row)
            .on_conflict(place_score::master_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to upsert score: {}", e)))?;

        Ok(())
    }

    async fn get_by_master(&self, master_id: Uuid) -> AppResult<Option<PlaceScore>> {
        let mut conn = self.database.get_connection()?;

        let model: Option<PlaceScoreModel> = place_score::table
            .find(master_id)
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to load score: {}", e)))?;

        Ok(model.map(PlaceScoreModel::into_domain))
    }
}
