//! Daily and hourly forecast records in the frontend's canonical shape

use serde::{Deserialize, Serialize};

use super::weather::{Measurement, Wind};

/// `{ "DailyForecasts": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyForecastResponse {
    pub daily_forecasts: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyForecast {
    pub date: String,
    pub temperature: TemperatureRange,
    pub day: DayPart,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureRange {
    pub maximum: Measurement,
    pub minimum: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayPart {
    pub icon: Option<u8>,
    pub icon_phrase: String,
    pub precipitation_probability: f64,
    pub relative_humidity: HumidityAverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HumidityAverage {
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HourlyForecast {
    pub date_time: String,
    pub temperature: Measurement,
    pub apparent_temperature: Measurement,
    pub precipitation_probability: f64,
    pub weather_icon: Option<u8>,
    pub weather_text: String,
    pub weather_emoji: String,
    pub is_daylight: bool,
    pub relative_humidity: Option<f64>,
    pub wind: Wind,
}
