//! Air quality records in the frontend's canonical shape

use serde::{Deserialize, Serialize};

/// One pollutant entry; PM readings carry a category, gases a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pollutant {
    pub name: String,
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AirQualityReading {
    pub date_time: String,
    pub pollutants: Vec<Pollutant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyAirQuality {
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "PM10")]
    pub pm10: Option<f64>,
    #[serde(rename = "PM25")]
    pub pm25: Option<f64>,
    #[serde(rename = "CO")]
    pub co: Option<f64>,
    #[serde(rename = "NO2")]
    pub no2: Option<f64>,
    #[serde(rename = "O3")]
    pub o3: Option<f64>,
    #[serde(rename = "PM10Category")]
    pub pm10_category: String,
    #[serde(rename = "PM25Category")]
    pub pm25_category: String,
}
