use super::dto::NaverItem;
use crate::log_warn;
use crate::modules::provider::domain::{PlaceCandidate, Platform};
use regex::Regex;

/// Scale factor of the `mapx`/`mapy` fixed-point coordinates
const COORD_SCALE: f64 = 10_000_000.0;

pub struct NaverMapper {
    tag_pattern: Regex,
}

impl NaverMapper {
    pub fn new() -> Self {
        Self {
            tag_pattern: Regex::new(r"</?b>").expect("static pattern"),
        }
    }

    pub fn to_candidate(&self, item: NaverItem) -> Option<PlaceCandidate> {
        let longitude = match item.mapx.parse::<f64>() {
            Ok(v) => v / COORD_SCALE,
            Err(_) => {
                log_warn!("Naver item '{}' has invalid mapx '{}'", item.title, item.mapx);
                return None;
            }
        };
        let latitude = match item.mapy.parse::<f64>() {
            Ok(v) => v / COORD_SCALE,
            Err(_) => {
                log_warn!("Naver item '{}' has invalid mapy '{}'", item.title, item.mapy);
                return None;
            }
        };

        let name = self.tag_pattern.replace_all(&item.title, "").into_owned();

        let address = if !item.road_address.is_empty() {
            Some(item.road_address)
        } else if !item.address.is_empty() {
            Some(item.address)
        } else {
            None
        };

        // The local API has no stable place id; the place link is the
        // closest unique handle it offers.
        let platform_id = if !item.link.is_empty() {
            item.link.clone()
        } else {
            name.clone()
        };

        Some(PlaceCandidate {
            platform_id,
            platform: Platform::Naver,
            name,
            latitude,
            longitude,
            address,
            phone: (!item.telephone.is_empty()).then_some(item.telephone),
            rating: None,
            review_count: None,
            url: (!item.link.is_empty()).then_some(item.link),
        })
    }
}

impl Default for NaverMapper {
    fn default() -> Self {
        Self::new()
    }
}
