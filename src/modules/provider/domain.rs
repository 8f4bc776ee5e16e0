use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Map-search platforms the pipeline reconciles against.
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::Platform"]
pub enum Platform {
    Kakao,
    Naver,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Kakao => "Kakao",
            Platform::Naver => "Naver",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kakao" => Ok(Platform::Kakao),
            "naver" => Ok(Platform::Naver),
            other => Err(format!("Unknown platform: {}", other)),
        }
    }
}

/// One search hit from a platform. Ephemeral: candidates are matched
/// against a master record and then discarded; only the winning
/// candidate's fields are persisted as a detail row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub platform_id: String,
    pub platform: Platform,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips_through_str() {
        assert_eq!("kakao".parse::<Platform>().unwrap(), Platform::Kakao);
        assert_eq!("NAVER".parse::<Platform>().unwrap(), Platform::Naver);
        assert!("google".parse::<Platform>().is_err());
    }
}
