//! Test data factories with sensible defaults

use chrono::Utc;
use uuid::Uuid;

use placelink::modules::provider::{PlaceCandidate, Platform};
use placelink::modules::registry::{MasterPlace, PlaceStatus, RegistryRow};

pub fn registry_row(key: &str, name: &str, latitude: f64, longitude: f64) -> RegistryRow {
    RegistryRow {
        natural_key: Some(key.to_string()),
        name: Some(name.to_string()),
        road_address: Some("서울 성동구 아차산로 7".to_string()),
        lot_address: None,
        latitude: Some(latitude),
        longitude: Some(longitude),
        industry_code: Some("I212".to_string()),
        industry_name: Some("커피전문점".to_string()),
        opened_at: Some("20240115".to_string()),
    }
}

pub fn master_place(key: &str, name: &str, latitude: f64, longitude: f64) -> MasterPlace {
    MasterPlace {
        id: Uuid::new_v4(),
        natural_key: key.to_string(),
        name: name.to_string(),
        road_address: None,
        lot_address: None,
        latitude,
        longitude,
        industry_code: None,
        industry_name: None,
        opened_at: None,
        status: PlaceStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn candidate(
    platform: Platform,
    name: &str,
    latitude: f64,
    longitude: f64,
) -> PlaceCandidate {
    PlaceCandidate {
        platform_id: format!("{}-{}", platform, name),
        platform,
        name: name.to_string(),
        latitude,
        longitude,
        address: None,
        phone: None,
        rating: None,
        review_count: None,
        url: None,
    }
}

pub fn rated_candidate(
    platform: Platform,
    name: &str,
    latitude: f64,
    longitude: f64,
    rating: f64,
    review_count: i32,
) -> PlaceCandidate {
    PlaceCandidate {
        rating: Some(rating),
        review_count: Some(review_count),
        ..candidate(platform, name, latitude, longitude)
    }
}
