//! Routes backed by the free Open-Meteo services
//!
//! Payloads are decoded into the typed models and converted into the
//! canonical shapes by [`crate::weather::normalize`].

use std::cmp::Reverse;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::params::{self, AirQualityType, ForecastType, forecast_days_for_hours};
use super::{AppState, WeatherQuery};
use crate::location::search_term;
use crate::models::open_meteo::{AirQualityResponse, ForecastResponse, GeocodeResult, GeocodingResponse};
use crate::models::{CurrentConditions, DisplayLocation, LocationKey};
use crate::upstream::{UpstreamRequest, with_query};
use crate::weather::normalize;
use crate::{NalssiError, Result};

const SEARCH_RESULT_COUNT: &str = "10";
const KOREA: &str = "South Korea";
const MAX_FORECAST_DAYS: u32 = 16;

const CURRENT_VARIABLES: &str = "temperature_2m,apparent_temperature,weather_code,wind_speed_10m,wind_direction_10m,relative_humidity_2m";
const DAILY_VARIABLES: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,relative_humidity_2m_mean";
const HOURLY_VARIABLES: &str = "temperature_2m,apparent_temperature,precipitation_probability,weather_code,relative_humidity_2m,wind_speed_10m";
const AIR_QUALITY_VARIABLES: &str = "pm10,pm2_5,carbon_monoxide,nitrogen_dioxide,ozone";

const DEFAULT_DAYS: u32 = 5;
const DEFAULT_FORECAST_HOURS: u32 = 12;
const DEFAULT_AIR_QUALITY_HOURS: u32 = 24;

async fn fetch<T: DeserializeOwned>(state: &AppState, url: String, label: &str) -> Result<T> {
    debug!("Open-Meteo URL: {}", url);
    let value = state
        .upstream
        .get_json(UpstreamRequest::new(url))
        .await
        .map_err(|e| e.context(label))?;

    serde_json::from_value(value)
        .map_err(|e| NalssiError::upstream(format!("{label}: unexpected response shape: {e}")))
}

/// Forecast or air quality URL for one location, with `extra` appended
fn point_url(base: &str, key: LocationKey, timezone: &str, extra: &[(&str, &str)]) -> String {
    let latitude = key.latitude.to_string();
    let longitude = key.longitude.to_string();
    let mut params = vec![
        ("latitude", latitude.as_str()),
        ("longitude", longitude.as_str()),
    ];
    params.extend_from_slice(extra);
    params.push(("timezone", timezone));
    with_query(base, &params)
}

/// Korean results only, most populous first; equal populations keep upstream order
fn korean_results(results: Vec<GeocodeResult>) -> Vec<GeocodeResult> {
    let mut results: Vec<_> = results
        .into_iter()
        .filter(|r| r.country.as_deref() == Some(KOREA))
        .collect();
    results.sort_by_key(|r| Reverse(r.population.unwrap_or(0)));
    results
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<DisplayLocation>>> {
    let q = params::required(query.q.as_deref(), "Search query is required")?;
    let term = search_term(q);
    if term != q {
        info!("Search term: {} -> {}", q, term);
    }

    let url = with_query(
        &format!("{}/search", state.config.open_meteo.geocoding_base_url),
        &[
            ("name", term.as_str()),
            ("count", SEARCH_RESULT_COUNT),
            ("language", "en"),
            ("format", "json"),
        ],
    );
    let response: GeocodingResponse = fetch(&state, url, "Search failed").await?;

    let locations = korean_results(response.results.unwrap_or_default())
        .iter()
        .map(|result| state.resolver.resolve(q, result))
        .collect();
    Ok(Json(locations))
}

pub async fn current(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<CurrentConditions>>> {
    let key = params::location_key(query.location_key.as_deref())?;
    let open_meteo = &state.config.open_meteo;

    let url = point_url(
        &format!("{}/forecast", open_meteo.forecast_base_url),
        key,
        &open_meteo.timezone,
        &[("current", CURRENT_VARIABLES)],
    );
    let response: ForecastResponse = fetch(&state, url, "Current weather fetch failed").await?;

    Ok(Json(normalize::current_conditions(&response, Utc::now())?))
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response> {
    let key = params::location_key(query.location_key.as_deref())?;
    let kind = ForecastType::from_param(query.kind.as_deref())?;
    let open_meteo = &state.config.open_meteo;
    let base = format!("{}/forecast", open_meteo.forecast_base_url);

    match kind {
        ForecastType::Daily => {
            let days = params::count(query.days.as_deref(), DEFAULT_DAYS)
                .min(MAX_FORECAST_DAYS)
                .to_string();
            let url = point_url(
                &base,
                key,
                &open_meteo.timezone,
                &[("daily", DAILY_VARIABLES), ("forecast_days", days.as_str())],
            );
            let response: ForecastResponse =
                fetch(&state, url, "Daily forecast fetch failed").await?;
            Ok(Json(normalize::daily_forecast(&response)?).into_response())
        }
        ForecastType::Hourly => {
            let hours = params::count(query.hours.as_deref(), DEFAULT_FORECAST_HOURS);
            let days = forecast_days_for_hours(hours).to_string();
            let url = point_url(
                &base,
                key,
                &open_meteo.timezone,
                &[("hourly", HOURLY_VARIABLES), ("forecast_days", days.as_str())],
            );
            let response: ForecastResponse =
                fetch(&state, url, "Hourly forecast fetch failed").await?;
            Ok(Json(normalize::hourly_forecast(&response, hours as usize)?).into_response())
        }
    }
}

pub async fn air_quality(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response> {
    let key = params::location_key(query.location_key.as_deref())?;
    let kind = AirQualityType::from_param(query.kind.as_deref())?;
    let open_meteo = &state.config.open_meteo;
    let base = format!("{}/air-quality", open_meteo.air_quality_base_url);

    match kind {
        AirQualityType::Current => {
            let url = point_url(
                &base,
                key,
                &open_meteo.timezone,
                &[("current", AIR_QUALITY_VARIABLES)],
            );
            let response: AirQualityResponse =
                fetch(&state, url, "Air quality fetch failed").await?;
            Ok(Json(normalize::current_air_quality(&response, Utc::now())?).into_response())
        }
        AirQualityType::Hourly => {
            let hours = params::count(query.hours.as_deref(), DEFAULT_AIR_QUALITY_HOURS);
            let days = forecast_days_for_hours(hours).to_string();
            let url = point_url(
                &base,
                key,
                &open_meteo.timezone,
                &[("hourly", AIR_QUALITY_VARIABLES), ("forecast_days", days.as_str())],
            );
            let response: AirQualityResponse =
                fetch(&state, url, "Hourly air quality fetch failed").await?;
            Ok(Json(normalize::hourly_air_quality(&response, hours as usize)?).into_response())
        }
    }
}
