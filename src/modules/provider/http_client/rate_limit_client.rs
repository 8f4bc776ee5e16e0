//! HTTP client with automatic rate limiting and retry logic shared by
//! every platform search client.

use super::retry_policy::{is_retryable_error, RateLimitInfo, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Response};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    retry_policy: RetryPolicy,
    default_headers: Vec<(&'static str, String)>,
    platform_name: String,
}

impl RateLimitClient {
    /// Client for the Kakao Local keyword-search API
    pub fn for_kakao(rest_api_key: &str) -> AppResult<Self> {
        Self::new(
            "Kakao",
            RetryPolicy::kakao(),
            // Kakao Local: comfortably under the per-second quota
            Self::create_rate_limiter(5.0, 5),
            vec![("Authorization", format!("KakaoAK {}", rest_api_key))],
        )
    }

    /// Client for the Naver Open API local search
    pub fn for_naver(client_id: &str, client_secret: &str) -> AppResult<Self> {
        Self::new(
            "Naver",
            RetryPolicy::naver(),
            // Naver Open API: 10 req/sec burst cap
            Self::create_rate_limiter(2.0, 3),
            vec![
                ("X-Naver-Client-Id", client_id.to_string()),
                ("X-Naver-Client-Secret", client_secret.to_string()),
            ],
        )
    }

    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DirectRateLimiter {
        let duration = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::MAX
        };

        let burst = NonZeroU32::new(burst_size.max(1)).unwrap();
        let quota = Quota::with_period(duration).unwrap().allow_burst(burst);

        GovernorRateLimiter::direct(quota)
    }

    pub fn new(
        platform_name: &str,
        retry_policy: RetryPolicy,
        rate_limiter: DirectRateLimiter,
        default_headers: Vec<(&'static str, String)>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            rate_limiter,
            retry_policy,
            default_headers,
            platform_name: platform_name.to_string(),
        })
    }

    /// GET the URL and deserialize the JSON body, waiting out the local
    /// rate limiter and retrying transient failures.
    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.retry_policy.max_retries {
            self.rate_limiter.until_ready().await;

            match self.send_get(url).await {
                Ok(response) => {
                    if response.status() == 429 {
                        let rate_limit_info = RateLimitInfo::from_headers(response.headers());

                        if attempt < self.retry_policy.max_retries {
                            let delay = self.calculate_retry_delay(attempt, &rate_limit_info);
                            log::warn!(
                                "{} API rate limited (attempt {}/{}). Waiting {:?} before retry.",
                                self.platform_name,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::RateLimitError(format!(
                                "{} API rate limit exceeded after {} attempts",
                                self.platform_name,
                                self.retry_policy.max_retries + 1
                            )));
                        }
                    }

                    if !response.status().is_success() {
                        let error_msg = format!(
                            "{} API returned error: {}",
                            self.platform_name,
                            response.status()
                        );

                        // Only retry server errors
                        if response.status().is_server_error()
                            && attempt < self.retry_policy.max_retries
                        {
                            let delay = self.retry_policy.calculate_delay(attempt, None);
                            log::warn!(
                                "{} (attempt {}/{}). Retrying in {:?}",
                                error_msg,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::ApiError(error_msg));
                        }
                    }

                    return self.parse_response(response).await;
                }
                Err(e) => {
                    let retryable = is_retryable_error(&e);
                    last_error = Some(AppError::from(e));

                    if retryable && attempt < self.retry_policy.max_retries {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        log::warn!(
                            "{} API request failed (attempt {}/{}). Retrying in {:?}",
                            self.platform_name,
                            attempt + 1,
                            self.retry_policy.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    } else {
                        return Err(last_error.unwrap());
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::ApiError(format!(
                "{} API request failed after {} attempts",
                self.platform_name,
                self.retry_policy.max_retries + 1
            ))
        }))
    }

    async fn send_get(&self, url: &str) -> Result<Response, reqwest::Error> {
        let mut request_builder = self
            .client
            .get(url)
            .header("Accept", "application/json");

        for (name, value) in &self.default_headers {
            request_builder = request_builder.header(*name, value);
        }

        request_builder.send().await
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.platform_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.platform_name,
                e,
                if response_text.len() > 200 {
                    format!("{}...", &response_text[..200])
                } else {
                    response_text
                }
            ))
        })
    }

    fn calculate_retry_delay(&self, attempt: u32, rate_limit_info: &RateLimitInfo) -> Duration {
        if let Some(server_delay) = rate_limit_info.recommended_delay() {
            return server_delay.min(self.retry_policy.max_delay);
        }

        self.retry_policy.calculate_delay(attempt, None)
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let kakao = RateLimitClient::for_kakao("test-key").unwrap();
        assert_eq!(kakao.platform_name(), "Kakao");

        let naver = RateLimitClient::for_naver("id", "secret").unwrap();
        assert_eq!(naver.platform_name(), "Naver");
    }

    #[test]
    fn fresh_client_can_request_immediately() {
        let client = RateLimitClient::for_kakao("test-key").unwrap();
        assert!(client.can_make_request_now());
    }
}
