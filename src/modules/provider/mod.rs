pub mod client;
pub mod domain;
pub mod http_client;
pub mod kakao;
pub mod naver;

pub use client::SearchClient;
pub use domain::{PlaceCandidate, Platform};
pub use kakao::KakaoSearchClient;
pub use naver::NaverSearchClient;
