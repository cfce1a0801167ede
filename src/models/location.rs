//! Location models: the `lat_lon` location key and resolved display locations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NalssiError;

/// Coordinates encoded as `"<latitude>_<longitude>"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationKey {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationKey {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl FromStr for LocationKey {
    type Err = NalssiError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let mut parts = key.split('_');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(NalssiError::InvalidLocationKeyFormat);
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or(NalssiError::InvalidLocationKeyFormat)
        };

        Ok(Self::new(parse(lat)?, parse(lon)?))
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.latitude, self.longitude)
    }
}

/// Localized and English name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    pub localized_name: String,
    pub english_name: String,
}

/// Province-level area, localized and English
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdministrativeArea {
    pub localized_name: String,
    pub english_name: String,
}

/// A geocoding result as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayLocation {
    pub key: String,
    pub localized_name: String,
    pub detailed_address: String,
    pub english_name: String,
    pub country: Country,
    pub administrative_area: AdministrativeArea,
    pub is_alias: bool,
    #[serde(rename = "latitude")]
    pub latitude: f64,
    #[serde(rename = "longitude")]
    pub longitude: f64,
    #[serde(rename = "timezone")]
    pub timezone: String,
    #[serde(rename = "population")]
    pub population: u64,
}
