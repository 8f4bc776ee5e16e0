use serde::Deserialize;

/// Response shape of `GET /v2/local/search/keyword.json`.
/// Coordinates arrive as strings; `x` is longitude, `y` is latitude.
#[derive(Debug, Deserialize)]
pub struct KakaoSearchResponse {
    pub documents: Vec<KakaoDocument>,
}

#[derive(Debug, Deserialize)]
pub struct KakaoDocument {
    pub id: String,
    pub place_name: String,
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    #[serde(default)]
    pub place_url: String,
    #[serde(default)]
    pub category_name: String,
}
