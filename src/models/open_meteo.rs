//! `OpenMeteo` API response structures
//!
//! Every measurement is optional: Open-Meteo emits `null` inside series and
//! omits variables it was not asked for.

use serde::Deserialize;

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Default, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodeResult>>,
}

/// One geocoding candidate
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub admin3: Option<String>,
    pub population: Option<u64>,
    pub timezone: Option<String>,
}

/// Forecast endpoint response; which block is present depends on the request
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
    pub hourly: Option<HourlyData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub weather_code: Option<u8>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<u8>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m_mean: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<u8>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
}

/// Air quality endpoint response
#[derive(Debug, Deserialize)]
pub struct AirQualityResponse {
    pub current: Option<AirQualityCurrent>,
    pub hourly: Option<AirQualityHourly>,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityCurrent {
    pub pm10: Option<f64>,
    pub pm2_5: Option<f64>,
    pub carbon_monoxide: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub ozone: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityHourly {
    pub time: Vec<String>,
    #[serde(default)]
    pub pm10: Vec<Option<f64>>,
    #[serde(default)]
    pub pm2_5: Vec<Option<f64>>,
    #[serde(default)]
    pub carbon_monoxide: Vec<Option<f64>>,
    #[serde(default)]
    pub nitrogen_dioxide: Vec<Option<f64>>,
    #[serde(default)]
    pub ozone: Vec<Option<f64>>,
}

/// Value at `index` of an optional series, `None` when missing or null
#[must_use]
pub fn at<T: Copy>(series: &[Option<T>], index: usize) -> Option<T> {
    series.get(index).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geocoding_response_tolerates_missing_fields() {
        let response: GeocodingResponse = serde_json::from_value(json!({
            "results": [{"name": "Suwon", "latitude": 37.29, "longitude": 127.01}]
        }))
        .unwrap();
        let results = response.results.unwrap();
        assert_eq!(results[0].name, "Suwon");
        assert!(results[0].admin2.is_none());
        assert!(results[0].population.is_none());
    }

    #[test]
    fn test_series_with_nulls() {
        let hourly: HourlyData = serde_json::from_value(json!({
            "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
            "temperature_2m": [1.5, null]
        }))
        .unwrap();
        assert_eq!(at(&hourly.temperature_2m, 0), Some(1.5));
        assert_eq!(at(&hourly.temperature_2m, 1), None);
        assert_eq!(at(&hourly.temperature_2m, 7), None);
        assert_eq!(at(&hourly.weather_code, 0), None);
    }
}
