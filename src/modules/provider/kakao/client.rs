use async_trait::async_trait;

use super::dto::KakaoSearchResponse;
use super::mapper::KakaoMapper;
use crate::modules::provider::client::SearchClient;
use crate::modules::provider::domain::{PlaceCandidate, Platform};
use crate::modules::provider::http_client::RateLimitClient;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;

/// Kakao caps the keyword-search radius at 20 km
const MAX_RADIUS_M: u32 = 20_000;
/// Nearest results only; the matcher filters by distance anyway
const PAGE_SIZE: u32 = 5;

pub struct KakaoSearchClient {
    http: RateLimitClient,
    base_url: String,
}

impl KakaoSearchClient {
    pub fn new(rest_api_key: &str) -> AppResult<Self> {
        Ok(Self {
            http: RateLimitClient::for_kakao(rest_api_key)?,
            base_url: "https://dapi.kakao.com".to_string(),
        })
    }

    /// Point the client at a different host (test servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SearchClient for KakaoSearchClient {
    fn platform(&self) -> Platform {
        Platform::Kakao
    }

    async fn search(
        &self,
        latitude: f64,
        longitude: f64,
        name_hint: &str,
        radius_m: u32,
    ) -> AppResult<Vec<PlaceCandidate>> {
        let url = format!(
            "{}/v2/local/search/keyword.json?query={}&x={}&y={}&radius={}&size={}&sort=distance",
            self.base_url,
            urlencoding::encode(name_hint.trim()),
            longitude,
            latitude,
            radius_m.min(MAX_RADIUS_M),
            PAGE_SIZE,
        );

        let response: KakaoSearchResponse = self.http.get(&url).await?;

        let candidates: Vec<PlaceCandidate> = response
            .documents
            .into_iter()
            .filter_map(KakaoMapper::to_candidate)
            .collect();

        LogContext::search_operation(name_hint, "Kakao", candidates.len());

        Ok(candidates)
    }
}
