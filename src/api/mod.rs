//! HTTP API under `/api`
//!
//! Edge-function passthrough routes live in [`edge`], Open-Meteo backed
//! routes in [`open_meteo`].

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use crate::{NalssiConfig, NalssiError, Result, VERSION, location::NameResolver, upstream::Upstream};

pub mod edge;
pub mod open_meteo;
pub mod params;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NalssiConfig>,
    pub upstream: Arc<dyn Upstream>,
    pub resolver: NameResolver,
}

impl AppState {
    pub fn new(config: NalssiConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
            resolver: NameResolver,
        }
    }

    /// Weather edge-function URL, or a configuration error when unset
    pub fn edge_weather_url(&self) -> Result<&str> {
        self.config
            .edge
            .weather_url
            .as_deref()
            .ok_or_else(|| NalssiError::config("edge.weather_url is not configured"))
    }

    /// Air quality edge-function URL, or a configuration error when unset
    pub fn edge_air_quality_url(&self) -> Result<&str> {
        self.config
            .edge
            .air_quality_url
            .as_deref()
            .ok_or_else(|| NalssiError::config("edge.air_quality_url is not configured"))
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.config.edge.bearer_token.as_deref()
    }
}

/// Query string fields used across the weather routes; every one is optional
/// at the extractor level so handlers can answer with their own messages
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    pub q: Option<String>,
    pub location_key: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub days: Option<String>,
    pub hours: Option<String>,
    pub pollutants: Option<String>,
    pub group_id: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub healthy: bool,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    let weather = Router::new()
        .route("/search", get(edge::search))
        .route("/search-text", get(edge::search_text))
        .route("/current", get(edge::current))
        .route("/forecast", get(edge::forecast))
        .route("/airquality", get(edge::air_quality))
        .route("/indices", get(edge::indices))
        .route("/alerts", get(edge::alerts))
        .route("/minutecast", get(edge::minutecast))
        .route("/location", get(edge::location))
        .route("/openmeteo-search", get(open_meteo::search))
        .route("/openmeteo-current", get(open_meteo::current))
        .route("/openmeteo-forecast", get(open_meteo::forecast))
        .route("/openmeteo-airquality", get(open_meteo::air_quality));

    Router::new()
        .nest("/weather", weather)
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health {
        healthy: true,
        version: VERSION,
    })
}
