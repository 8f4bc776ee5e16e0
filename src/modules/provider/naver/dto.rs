use serde::Deserialize;

/// Response shape of `GET /v1/search/local.json`.
/// `mapx`/`mapy` are WGS84 longitude/latitude scaled by 10^7, as strings;
/// `title` may contain `<b>` highlight tags.
#[derive(Debug, Deserialize)]
pub struct NaverSearchResponse {
    #[serde(default)]
    pub items: Vec<NaverItem>,
}

#[derive(Debug, Deserialize)]
pub struct NaverItem {
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "roadAddress", default)]
    pub road_address: String,
    pub mapx: String,
    pub mapy: String,
}
