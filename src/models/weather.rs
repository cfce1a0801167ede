//! Current conditions in the frontend's canonical shape

use serde::{Deserialize, Serialize};

/// `{ "Value": x }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    pub value: Option<f64>,
}

/// `{ "Metric": { "Value": x } }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricMeasurement {
    pub metric: Measurement,
}

impl MetricMeasurement {
    #[must_use]
    pub fn new(value: Option<f64>) -> Self {
        Self {
            metric: Measurement { value },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindDirection {
    pub degrees: Option<f64>,
    pub localized: String,
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wind {
    pub speed: MetricMeasurement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<WindDirection>,
}

/// One current-conditions record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentConditions {
    pub temperature: MetricMeasurement,
    pub apparent_temperature: MetricMeasurement,
    pub relative_humidity: Option<f64>,
    pub weather_text: String,
    pub weather_icon: Option<u8>,
    pub weather_emoji: String,
    pub wind: Wind,
    pub date_time: String,
    pub is_daylight: bool,
}
