//! Open-Meteo payloads to canonical records
//!
//! Each conversion is a single pass over one upstream payload. Hourly series
//! are cut to the requested length, never resampled.

use chrono::{DateTime, SecondsFormat, Utc};

use super::air_quality::{ParticulateMatter, pm_category};
use super::{compass, describe, emoji, is_daylight};
use crate::models::air_quality::{AirQualityReading, HourlyAirQuality, Pollutant};
use crate::models::forecast::{
    DailyForecast, DailyForecastResponse, DayPart, HourlyForecast, HumidityAverage,
    TemperatureRange,
};
use crate::models::open_meteo::{AirQualityResponse, ForecastResponse, at};
use crate::models::weather::{
    CurrentConditions, Measurement, MetricMeasurement, Wind, WindDirection,
};
use crate::{NalssiError, Result};

const GAS_UNIT: &str = "μg/m³";

/// `toISOString`-style timestamp used for records without an upstream time
#[must_use]
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn missing(block: &str) -> NalssiError {
    NalssiError::upstream(format!("Upstream response has no {block} data"))
}

/// Current conditions, wrapped in a one-element list
pub fn current_conditions(
    response: &ForecastResponse,
    now: DateTime<Utc>,
) -> Result<Vec<CurrentConditions>> {
    let current = response.current.as_ref().ok_or_else(|| missing("current"))?;
    let direction = current.wind_direction_10m;

    Ok(vec![CurrentConditions {
        temperature: MetricMeasurement::new(current.temperature_2m),
        apparent_temperature: MetricMeasurement::new(current.apparent_temperature),
        relative_humidity: current.relative_humidity_2m,
        weather_text: describe(current.weather_code).to_string(),
        weather_icon: current.weather_code,
        weather_emoji: emoji(current.weather_code).to_string(),
        wind: Wind {
            speed: MetricMeasurement::new(current.wind_speed_10m),
            direction: Some(WindDirection {
                degrees: direction,
                localized: compass(direction).to_string(),
                english: compass(direction).to_string(),
            }),
        },
        date_time: timestamp(now),
        is_daylight: current.time.as_deref().is_none_or(is_daylight),
    }])
}

/// Daily forecast, one record per upstream day
pub fn daily_forecast(response: &ForecastResponse) -> Result<DailyForecastResponse> {
    let daily = response.daily.as_ref().ok_or_else(|| missing("daily"))?;

    let daily_forecasts = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let code = at(&daily.weather_code, i);
            DailyForecast {
                date: date.clone(),
                temperature: TemperatureRange {
                    maximum: Measurement {
                        value: at(&daily.temperature_2m_max, i),
                    },
                    minimum: Measurement {
                        value: at(&daily.temperature_2m_min, i),
                    },
                },
                day: DayPart {
                    icon: code,
                    icon_phrase: describe(code).to_string(),
                    precipitation_probability: at(&daily.precipitation_probability_max, i)
                        .unwrap_or(0.0),
                    relative_humidity: HumidityAverage {
                        average: at(&daily.relative_humidity_2m_mean, i),
                    },
                },
            }
        })
        .collect();

    Ok(DailyForecastResponse { daily_forecasts })
}

/// Hourly forecast, truncated to `hours` records
pub fn hourly_forecast(response: &ForecastResponse, hours: usize) -> Result<Vec<HourlyForecast>> {
    let hourly = response.hourly.as_ref().ok_or_else(|| missing("hourly"))?;

    Ok(hourly
        .time
        .iter()
        .take(hours)
        .enumerate()
        .map(|(i, time)| {
            let code = at(&hourly.weather_code, i);
            HourlyForecast {
                date_time: time.clone(),
                temperature: Measurement {
                    value: at(&hourly.temperature_2m, i),
                },
                apparent_temperature: Measurement {
                    value: at(&hourly.apparent_temperature, i),
                },
                precipitation_probability: at(&hourly.precipitation_probability, i)
                    .unwrap_or(0.0),
                weather_icon: code,
                weather_text: describe(code).to_string(),
                weather_emoji: emoji(code).to_string(),
                is_daylight: is_daylight(time),
                relative_humidity: at(&hourly.relative_humidity_2m, i),
                wind: Wind {
                    speed: MetricMeasurement::new(at(&hourly.wind_speed_10m, i)),
                    direction: None,
                },
            }
        })
        .collect())
}

/// Current pollutant readings, wrapped in a one-element list
pub fn current_air_quality(
    response: &AirQualityResponse,
    now: DateTime<Utc>,
) -> Result<Vec<AirQualityReading>> {
    let current = response.current.as_ref().ok_or_else(|| missing("current"))?;

    let particulate = |kind: ParticulateMatter, value: Option<f64>| Pollutant {
        name: kind.label().to_string(),
        value,
        category: Some(pm_category(value, kind).to_string()),
        unit: None,
    };
    let gas = |name: &str, value: Option<f64>| Pollutant {
        name: name.to_string(),
        value,
        category: None,
        unit: Some(GAS_UNIT.to_string()),
    };

    Ok(vec![AirQualityReading {
        date_time: timestamp(now),
        pollutants: vec![
            particulate(ParticulateMatter::Pm10, current.pm10),
            particulate(ParticulateMatter::Pm25, current.pm2_5),
            gas("CO", current.carbon_monoxide),
            gas("NO2", current.nitrogen_dioxide),
            gas("O3", current.ozone),
        ],
    }])
}

/// Hourly pollutant readings, truncated to `hours` records
pub fn hourly_air_quality(
    response: &AirQualityResponse,
    hours: usize,
) -> Result<Vec<HourlyAirQuality>> {
    let hourly = response.hourly.as_ref().ok_or_else(|| missing("hourly"))?;

    Ok(hourly
        .time
        .iter()
        .take(hours)
        .enumerate()
        .map(|(i, time)| {
            let pm10 = at(&hourly.pm10, i);
            let pm25 = at(&hourly.pm2_5, i);
            HourlyAirQuality {
                date_time: time.clone(),
                pm10,
                pm25,
                co: at(&hourly.carbon_monoxide, i),
                no2: at(&hourly.nitrogen_dioxide, i),
                o3: at(&hourly.ozone, i),
                pm10_category: pm_category(pm10, ParticulateMatter::Pm10).to_string(),
                pm25_category: pm_category(pm25, ParticulateMatter::Pm25).to_string(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 3, 4, 5).unwrap()
    }

    fn forecast(value: serde_json::Value) -> ForecastResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_current_conditions_shape() {
        let response = forecast(json!({
            "current": {
                "time": "2024-05-01T21:00",
                "temperature_2m": 18.2,
                "apparent_temperature": 17.0,
                "relative_humidity_2m": 64,
                "weather_code": 3,
                "wind_speed_10m": 7.9,
                "wind_direction_10m": 180
            }
        }));

        let records = current_conditions(&response, now()).unwrap();
        assert_eq!(records.len(), 1);

        let value = serde_json::to_value(&records).unwrap();
        let record = &value[0];
        assert_eq!(record["Temperature"]["Metric"]["Value"], 18.2);
        assert_eq!(record["ApparentTemperature"]["Metric"]["Value"], 17.0);
        assert_eq!(record["RelativeHumidity"], 64.0);
        assert_eq!(record["WeatherText"], "흐림");
        assert_eq!(record["WeatherIcon"], 3);
        assert_eq!(record["Wind"]["Speed"]["Metric"]["Value"], 7.9);
        assert_eq!(record["Wind"]["Direction"]["Degrees"], 180.0);
        assert_eq!(record["Wind"]["Direction"]["Localized"], "남");
        assert_eq!(record["Wind"]["Direction"]["English"], "남");
        assert_eq!(record["DateTime"], "2024-05-01T03:04:05.000Z");
        assert_eq!(record["IsDaylight"], false);
    }

    #[test]
    fn test_current_conditions_without_block_fails() {
        let err = current_conditions(&forecast(json!({})), now()).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_daily_forecast_defaults() {
        let response = forecast(json!({
            "daily": {
                "time": ["2024-05-01", "2024-05-02"],
                "weather_code": [61, null],
                "temperature_2m_max": [21.0, 23.5],
                "temperature_2m_min": [11.0, 12.5],
                "precipitation_probability_max": [80, null]
            }
        }));

        let value = serde_json::to_value(daily_forecast(&response).unwrap()).unwrap();
        let days = value["DailyForecasts"].as_array().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["Date"], "2024-05-01");
        assert_eq!(days[0]["Temperature"]["Maximum"]["Value"], 21.0);
        assert_eq!(days[0]["Day"]["IconPhrase"], "가벼운 비");
        assert_eq!(days[0]["Day"]["PrecipitationProbability"], 80.0);
        assert_eq!(days[1]["Day"]["IconPhrase"], "알 수 없음");
        assert_eq!(days[1]["Day"]["PrecipitationProbability"], 0.0);
        assert!(days[1]["Day"]["RelativeHumidity"]["Average"].is_null());
    }

    #[test]
    fn test_hourly_forecast_is_truncated() {
        let time: Vec<String> = (0..48).map(|h| format!("2024-05-0{}T{:02}:00", 1 + h / 24, h % 24)).collect();
        let response = forecast(json!({
            "hourly": {
                "time": time,
                "temperature_2m": vec![10.0; 48],
                "weather_code": vec![0; 48],
                "wind_speed_10m": vec![3.0; 48]
            }
        }));

        let records = hourly_forecast(&response, 12).unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(records[0].date_time, "2024-05-01T00:00");
        assert!(!records[0].is_daylight);
        assert!(records[8].is_daylight);
        assert_eq!(records[3].weather_text, "맑음");
        assert_eq!(records[3].precipitation_probability, 0.0);

        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value["Wind"]["Speed"]["Metric"]["Value"], 3.0);
        assert!(value["Wind"].get("Direction").is_none());
    }

    #[test]
    fn test_current_air_quality_pollutants() {
        let response: AirQualityResponse = serde_json::from_value(json!({
            "current": {
                "pm10": 31.0,
                "pm2_5": 15.0,
                "carbon_monoxide": 220.0,
                "nitrogen_dioxide": 12.3,
                "ozone": 70.1
            }
        }))
        .unwrap();

        let value = serde_json::to_value(current_air_quality(&response, now()).unwrap()).unwrap();
        let pollutants = value[0]["Pollutants"].as_array().unwrap();
        assert_eq!(pollutants.len(), 5);
        assert_eq!(pollutants[0]["Name"], "PM10");
        assert_eq!(pollutants[0]["Category"], "보통");
        assert_eq!(pollutants[1]["Name"], "PM2.5");
        assert_eq!(pollutants[1]["Category"], "좋음");
        assert_eq!(pollutants[2]["Unit"], "μg/m³");
        assert!(pollutants[2].get("Category").is_none());
        assert!(pollutants[0].get("Unit").is_none());
    }

    #[test]
    fn test_hourly_air_quality() {
        let response: AirQualityResponse = serde_json::from_value(json!({
            "hourly": {
                "time": ["2024-05-01T00:00", "2024-05-01T01:00", "2024-05-01T02:00"],
                "pm10": [101.0, null, 20.0],
                "pm2_5": [16.0, 3.0, null]
            }
        }))
        .unwrap();

        let records = hourly_air_quality(&response, 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pm10_category, "매우나쁨");
        assert_eq!(records[0].pm25_category, "보통");
        assert_eq!(records[1].pm10_category, "N/A");
        assert!(records[1].co.is_none());
    }
}
