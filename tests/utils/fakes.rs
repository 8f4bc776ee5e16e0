//! In-memory doubles for the persistence ports, mirroring the real
//! repositories' observable semantics closely enough for pipeline tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use placelink::modules::enrichment::{NewPlaceDetail, PlaceDetail, PlaceDetailRepository};
use placelink::modules::provider::Platform;
use placelink::modules::registry::{
    BatchOutcome, MasterPlace, MasterPlaceRepository, NewMasterPlace, PlaceStatus,
};
use placelink::modules::scoring::{
    PlaceScore, PlaceScoreRepository, PlatformSignals, ScoreBreakdown,
};
use placelink::shared::errors::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryMasterRepo {
    // BTreeMap keeps natural-key order, matching the real load_active
    places: Mutex<BTreeMap<String, MasterPlace>>,
    pub fail_ping: Mutex<bool>,
}

impl InMemoryMasterRepo {
    pub fn place_count(&self) -> usize {
        self.places.lock().unwrap().len()
    }

    pub fn get(&self, natural_key: &str) -> Option<MasterPlace> {
        self.places.lock().unwrap().get(natural_key).cloned()
    }
}

#[async_trait]
impl MasterPlaceRepository for InMemoryMasterRepo {
    async fn ping(&self) -> AppResult<()> {
        if *self.fail_ping.lock().unwrap() {
            Err(AppError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    async fn upsert_batch(&self, rows: &[NewMasterPlace]) -> AppResult<BatchOutcome> {
        let mut places = self.places.lock().unwrap();
        let mut outcome = BatchOutcome::default();

        for row in rows {
            match places.get_mut(&row.natural_key) {
                Some(existing) => {
                    existing.name = row.name.clone();
                    existing.road_address = row.road_address.clone();
                    existing.lot_address = row.lot_address.clone();
                    existing.latitude = row.latitude;
                    existing.longitude = row.longitude;
                    existing.industry_code = row.industry_code.clone();
                    existing.industry_name = row.industry_name.clone();
                    existing.opened_at = row.opened_at;
                    existing.status = PlaceStatus::Active;
                    existing.updated_at = Utc::now();
                    outcome.updated += 1;
                }
                None => {
                    places.insert(
                        row.natural_key.clone(),
                        MasterPlace {
                            id: Uuid::new_v4(),
                            natural_key: row.natural_key.clone(),
                            name: row.name.clone(),
                            road_address: row.road_address.clone(),
                            lot_address: row.lot_address.clone(),
                            latitude: row.latitude,
                            longitude: row.longitude,
                            industry_code: row.industry_code.clone(),
                            industry_name: row.industry_name.clone(),
                            opened_at: row.opened_at,
                            status: PlaceStatus::Active,
                            created_at: Utc::now(),
                            updated_at: Utc::now(),
                        },
                    );
                    outcome.inserted += 1;
                }
            }
        }

        Ok(outcome)
    }

    async fn mark_closed_except(&self, active_keys: &[String]) -> AppResult<usize> {
        let mut places = self.places.lock().unwrap();
        let mut closed = 0;

        for place in places.values_mut() {
            if place.status == PlaceStatus::Active
                && !active_keys.contains(&place.natural_key)
            {
                place.status = PlaceStatus::Closed;
                place.updated_at = Utc::now();
                closed += 1;
            }
        }

        Ok(closed)
    }

    async fn count_by_status(&self) -> AppResult<HashMap<PlaceStatus, i64>> {
        let places = self.places.lock().unwrap();
        let mut counts = HashMap::new();
        for place in places.values() {
            *counts.entry(place.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn load_active(&self, limit: Option<i64>) -> AppResult<Vec<MasterPlace>> {
        let places = self.places.lock().unwrap();
        let active = places
            .values()
            .filter(|p| p.status == PlaceStatus::Active)
            .cloned();

        Ok(match limit {
            Some(limit) => active.take(limit as usize).collect(),
            None => active.collect(),
        })
    }
}

pub struct InMemoryDetailRepo {
    masters: Arc<InMemoryMasterRepo>,
    details: Mutex<HashMap<(Uuid, Platform), PlaceDetail>>,
}

impl InMemoryDetailRepo {
    pub fn new(masters: Arc<InMemoryMasterRepo>) -> Self {
        Self {
            masters,
            details: Mutex::new(HashMap::new()),
        }
    }

    pub fn detail_count(&self) -> usize {
        self.details.lock().unwrap().len()
    }
}

#[async_trait]
impl PlaceDetailRepository for InMemoryDetailRepo {
    async fn upsert(&self, detail: &NewPlaceDetail) -> AppResult<()> {
        let mut details = self.details.lock().unwrap();
        let entry = details
            .entry((detail.master_id, detail.platform))
            .or_insert_with(|| PlaceDetail {
                id: Uuid::new_v4(),
                master_id: detail.master_id,
                platform: detail.platform,
                platform_id: String::new(),
                url: None,
                rating: None,
                review_count: None,
                phone: None,
                last_synced_at: Utc::now(),
            });

        entry.platform_id = detail.platform_id.clone();
        entry.url = detail.url.clone();
        entry.rating = detail.rating;
        entry.review_count = detail.review_count;
        entry.phone = detail.phone.clone();
        entry.last_synced_at = Utc::now();

        Ok(())
    }

    async fn load_by_master(&self, master_id: Uuid) -> AppResult<Vec<PlaceDetail>> {
        let details = self.details.lock().unwrap();
        Ok(details
            .values()
            .filter(|d| d.master_id == master_id)
            .cloned()
            .collect())
    }

    async fn signals_for_active_masters(&self) -> AppResult<Vec<(Uuid, PlatformSignals)>> {
        let masters = self.masters.load_active(None).await?;
        let details = self.details.lock().unwrap();

        let mut result = Vec::new();
        for master in masters {
            let mut signals = PlatformSignals::default();
            let mut any = false;

            for platform in [Platform::Kakao, Platform::Naver] {
                if let Some(detail) = details.get(&(master.id, platform)) {
                    any = true;
                    match platform {
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
            }

            if any {
                result.push((master.id, signals));
            }
        }

        Ok(result)
    }
}

#[derive(Default)]
pub struct InMemoryScoreRepo {
    scores: Mutex<HashMap<Uuid, PlaceScore>>,
}

impl InMemoryScoreRepo {
    pub fn score_count(&self) -> usize {
        self.scores.lock().unwrap().len()
    }

    pub fn get(&self, master_id: Uuid) -> Option<PlaceScore> {
        self.scores.lock().unwrap().get(&master_id).cloned()
    }
}

#[async_trait]
impl PlaceScoreRepository for InMemoryScoreRepo {
    async fn upsert_score(&self, master_id: Uuid, breakdown: &ScoreBreakdown) -> AppResult<()> {
        self.scores.lock().unwrap().insert(
            master_id,
            PlaceScore {
                master_id,
                kakao_score: breakdown.kakao_score,
                naver_score: breakdown.naver_score,
                volume_score: breakdown.volume_score,
                composite_score: breakdown.composite_score,
                calculated_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get_by_master(&self, master_id: Uuid) -> AppResult<Option<PlaceScore>> {
        Ok(self.scores.lock().unwrap().get(&master_id).cloned())
    }
}
