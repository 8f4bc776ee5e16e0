use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::provider::{PlaceCandidate, Platform};

/// Persisted per-platform enrichment attached to a matched master record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub id: Uuid,
    pub master_id: Uuid,
    pub platform: Platform,
    pub platform_id: String,
    pub url: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub phone: Option<String>,
    pub last_synced_at: DateTime<Utc>,
}

/// Write payload produced by a successful match decision
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlaceDetail {
    pub master_id: Uuid,
    pub platform: Platform,
    pub platform_id: String,
    pub url: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub phone: Option<String>,
}

impl NewPlaceDetail {
    pub fn from_candidate(master_id: Uuid, candidate: &PlaceCandidate) -> Self {
        Self {
            master_id,
            platform: candidate.platform,
            platform_id: candidate.platform_id.clone(),
            url: candidate.url.clone(),
            rating: candidate.rating,
            review_count: candidate.review_count,
            phone: candidate.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_carries_the_candidate_fields() {
        let master_id = Uuid::new_v4();
        let candidate = PlaceCandidate {
            platform_id: "26338954".to_string(),
            platform: Platform::Kakao,
            name: "블루보틀 성수점".to_string(),
            latitude: 37.544,
            longitude: 127.055,
            address: None,
            phone: Some("02-1234-5678".to_string()),
            rating: Some(4.4),
            review_count: Some(812),
            url: Some("http://place.map.kakao.com/26338954".to_string()),
        };

        let detail = NewPlaceDetail::from_candidate(master_id, &candidate);
        assert_eq!(detail.master_id, master_id);
        assert_eq!(detail.platform, Platform::Kakao);
        assert_eq!(detail.platform_id, "26338954");
        assert_eq!(detail.rating, Some(4.4));
        assert_eq!(detail.review_count, Some(812));
    }
}
