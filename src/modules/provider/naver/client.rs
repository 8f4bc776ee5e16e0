use async_trait::async_trait;

use super::dto::NaverSearchResponse;
use super::mapper::NaverMapper;
use crate::modules::provider::client::SearchClient;
use crate::modules::provider::domain::{PlaceCandidate, Platform};
use crate::modules::provider::http_client::RateLimitClient;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;

const PAGE_SIZE: u32 = 5;

/// Naver's local search is keyword-only; it accepts no coordinate or
/// radius filter, so the matcher's distance gate does the geo filtering.
pub struct NaverSearchClient {
    http: RateLimitClient,
    mapper: NaverMapper,
    base_url: String,
}

impl NaverSearchClient {
    pub fn new(client_id: &str, client_secret: &str) -> AppResult<Self> {
        Ok(Self {
            http: RateLimitClient::for_naver(client_id, client_secret)?,
            mapper: NaverMapper::new(),
            base_url: "https://openapi.naver.com".to_string(),
        })
    }

    /// Point the client at a different host (test servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SearchClient for NaverSearchClient {
    fn platform(&self) -> Platform {
        Platform::Naver
    }

    async fn search(
        &self,
        _latitude: f64,
        _longitude: f64,
        name_hint: &str,
        _radius_m: u32,
    ) -> AppResult<Vec<PlaceCandidate>> {
        let url = format!(
            "{}/v1/search/local.json?query={}&display={}",
            self.base_url,
            urlencoding::encode(name_hint.trim()),
            PAGE_SIZE,
        );

        let response: NaverSearchResponse = self.http.get(&url).await?;

        let candidates: Vec<PlaceCandidate> = response
            .items
            .into_iter()
            .filter_map(|item| self.mapper.to_candidate(item))
            .collect();

        LogContext::search_operation(name_hint, "Naver", candidates.len());

        Ok(candidates)
    }
}
