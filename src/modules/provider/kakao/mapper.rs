use super::dto::KakaoDocument;
use crate::log_warn;
use crate::modules::provider::domain::{PlaceCandidate, Platform};

pub struct KakaoMapper;

impl KakaoMapper {
    /// Convert one search document into a candidate. Documents with
    /// unparseable coordinates are dropped rather than failing the batch.
    pub fn to_candidate(doc: KakaoDocument) -> Option<PlaceCandidate> {
        let latitude = match doc.y.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                log_warn!("Kakao document {} has invalid latitude '{}'", doc.id, doc.y);
                return None;
            }
        };
        let longitude = match doc.x.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                log_warn!("Kakao document {} has invalid longitude '{}'", doc.id, doc.x);
                return None;
            }
        };

        let address = if !doc.road_address_name.is_empty() {
            Some(doc.road_address_name)
        } else if !doc.address_name.is_empty() {
            Some(doc.address_name)
        } else {
            None
        };

        Some(PlaceCandidate {
            platform_id: doc.id,
            platform: Platform::Kakao,
            name: doc.place_name,
            latitude,
            longitude,
            address,
            phone: (!doc.phone.is_empty()).then_some(doc.phone),
            // The keyword API exposes no rating or review data
            rating: None,
            review_count: None,
            url: (!doc.place_url.is_empty()).then_some(doc.place_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> KakaoDocument {
        KakaoDocument {
            id: "26338954".to_string(),
            place_name: "블루보틀 성수점".to_string(),
            x: "127.055975".to_string(),
            y: "37.544579".to_string(),
            phone: "02-1234-5678".to_string(),
            address_name: "서울 성동구 성수동1가 668-1".to_string(),
            road_address_name: "서울 성동구 아차산로 7".to_string(),
            place_url: "http://place.map.kakao.com/26338954".to_string(),
            category_name: "음식점 > 카페".to_string(),
        }
    }

    #[test]
    fn maps_document_to_candidate() {
        let candidate = KakaoMapper::to_candidate(doc()).unwrap();
        assert_eq!(candidate.platform, Platform::Kakao);
        assert_eq!(candidate.platform_id, "26338954");
        assert!((candidate.latitude - 37.544579).abs() < 1e-9);
        assert!((candidate.longitude - 127.055975).abs() < 1e-9);
        assert_eq!(candidate.address.as_deref(), Some("서울 성동구 아차산로 7"));
        assert_eq!(candidate.rating, None);
        assert_eq!(candidate.review_count, None);
    }

    #[test]
    fn invalid_coordinates_are_dropped() {
        let mut bad = doc();
        bad.y = "not-a-number".to_string();
        assert!(KakaoMapper::to_candidate(bad).is_none());
    }

    #[test]
    fn falls_back_to_lot_address() {
        let mut d = doc();
        d.road_address_name = String::new();
        let candidate = KakaoMapper::to_candidate(d).unwrap();
        assert_eq!(
            candidate.address.as_deref(),
            Some("서울 성동구 성수동1가 668-1")
        );
    }

    #[test]
    fn empty_optionals_become_none() {
        let mut d = doc();
        d.phone = String::new();
        d.place_url = String::new();
        let candidate = KakaoMapper::to_candidate(d).unwrap();
        assert_eq!(candidate.phone, None);
        assert_eq!(candidate.url, None);
    }
}
