use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::schema::place_master;
use crate::shared::errors::{AppError, AppResult};

/// Coordinate bounds of the supported region (Korean peninsula incl.
/// Jeju and the eastern islets). Registry rows outside are rejected.
const LAT_RANGE: std::ops::RangeInclusive<f64> = 33.0..=43.0;
const LON_RANGE: std::ops::RangeInclusive<f64> = 124.0..=132.0;

#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::PlaceStatus"]
pub enum PlaceStatus {
    Active,
    Closed,
}

impl fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlaceStatus::Active => write!(f, "ACTIVE"),
            PlaceStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Canonical registry-sourced establishment, keyed by the stable
/// registry-issued business identifier.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = place_master)]
pub struct MasterPlace {
    pub id: Uuid,
    pub natural_key: String,
    pub name: String,
    pub road_address: Option<String>,
    pub lot_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub industry_code: Option<String>,
    pub industry_name: Option<String>,
    pub opened_at: Option<NaiveDate>,
    pub status: PlaceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One raw row as delivered by a registry source (CSV export, open-data
/// API). Everything optional until validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryRow {
    #[serde(default)]
    pub natural_key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub road_address: Option<String>,
    #[serde(default)]
    pub lot_address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub industry_code: Option<String>,
    #[serde(default)]
    pub industry_name: Option<String>,
    /// Compact `YYYYMMDD` date as exported by the registry
    #[serde(default)]
    pub opened_at: Option<String>,
}

/// A registry row that passed validation and is ready to upsert
#[derive(Debug, Clone, PartialEq)]
pub struct NewMasterPlace {
    pub natural_key: String,
    pub name: String,
    pub road_address: Option<String>,
    pub lot_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub industry_code: Option<String>,
    pub industry_name: Option<String>,
    pub opened_at: Option<NaiveDate>,
}

impl RegistryRow {
    /// Enforce required fields and coordinate bounds. Violations skip the
    /// row; the import keeps going.
    pub fn validate(self) -> AppResult<NewMasterPlace> {
        let natural_key = non_empty(self.natural_key).ok_or_else(|| {
            AppError::ValidationError("row is missing its natural key".to_string())
        })?;

        let name = non_empty(self.name).ok_or_else(|| {
            AppError::ValidationError(format!("row {} is missing a name", natural_key))
        })?;

        let latitude = self.latitude.ok_or_else(|| {
            AppError::ValidationError(format!("row {} is missing latitude", natural_key))
        })?;
        let longitude = self.longitude.ok_or_else(|| {
            AppError::ValidationError(format!("row {} is missing longitude", natural_key))
        })?;

        if !LAT_RANGE.contains(&latitude) || !LON_RANGE.contains(&longitude) {
            return Err(AppError::ValidationError(format!(
                "row {} has out-of-range coordinates ({}, {})",
                natural_key, latitude, longitude
            )));
        }

        Ok(NewMasterPlace {
            natural_key,
            name,
            road_address: non_empty(self.road_address),
            lot_address: non_empty(self.lot_address),
            latitude,
            longitude,
            industry_code: non_empty(self.industry_code),
            industry_name: non_empty(self.industry_name),
            opened_at: self.opened_at.as_deref().and_then(parse_compact_date),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse the registry's compact `YYYYMMDD` date format; anything else
/// becomes None rather than an error, matching upstream exports that mix
/// blanks and malformed values into this column.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok()
}
