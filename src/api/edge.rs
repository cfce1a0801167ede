//! Routes forwarded to the commercial provider's edge functions
//!
//! Bodies are passed through as received, apart from `/current` (first
//! element of an array), `/airquality` (wrapped with extracted PM readings)
//! and `/indices` (a report over several probes).

use axum::{
    Json,
    extract::{Query, State},
};
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use super::params::{
    self, EdgeAirQualityType, ForecastType, LOCATION_KEY_REQUIRED, snap_forecast_hours,
};
use super::{AppState, WeatherQuery};
use crate::upstream::{UpstreamRequest, with_query};
use crate::{NalssiError, Result};

const DEFAULT_DAYS: u32 = 5;
const DEFAULT_FORECAST_HOURS: u32 = 12;
const DEFAULT_AIR_QUALITY_HOURS: u32 = 24;

/// GET `base?params` with the edge headers, labelling failures with `label`
async fn fetch(state: &AppState, base: &str, params: &[(&str, &str)], label: &str) -> Result<Value> {
    let url = with_query(base, params);
    debug!("Edge function URL: {}", url);
    state
        .upstream
        .get_json(UpstreamRequest::edge(url, state.bearer_token()))
        .await
        .map_err(|e| e.context(label))
}

async fn fetch_weather(state: &AppState, params: &[(&str, &str)], label: &str) -> Result<Value> {
    fetch(state, state.edge_weather_url()?, params, label).await
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn location_key(query: &WeatherQuery) -> Result<&str> {
    params::required(query.location_key.as_deref(), LOCATION_KEY_REQUIRED)
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let q = params::required(query.q.as_deref(), "City name is required")?;
    info!("Searching for city: {}", q);

    let data = fetch_weather(
        &state,
        &[("endpoint", "location-search"), ("q", q)],
        "Location search failed",
    )
    .await?;
    Ok(Json(data))
}

pub async fn search_text(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let q = params::required(query.q.as_deref(), "Search query is required")?;
    info!("Text search for: {}", q);

    let data = fetch_weather(
        &state,
        &[("endpoint", "location-search"), ("q", q)],
        "Text search failed",
    )
    .await?;
    Ok(Json(data))
}

pub async fn current(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let key = location_key(&query)?;

    let data = fetch_weather(
        &state,
        &[("endpoint", "current"), ("locationKey", key)],
        "Current conditions fetch failed",
    )
    .await?;

    Ok(Json(first_if_array(data)))
}

/// The provider answers current conditions as a one-element array
fn first_if_array(data: Value) -> Value {
    match data {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    }
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let key = location_key(&query)?;
    let kind = ForecastType::from_param(query.kind.as_deref())?;

    let endpoint = match kind {
        ForecastType::Hourly => {
            let hours = params::count(query.hours.as_deref(), DEFAULT_FORECAST_HOURS);
            format!("hourly{}", snap_forecast_hours(hours))
        }
        ForecastType::Daily => {
            let days = params::count(query.days.as_deref(), DEFAULT_DAYS);
            format!("forecast{days}day")
        }
    };

    let data = fetch_weather(
        &state,
        &[("endpoint", endpoint.as_str()), ("locationKey", key)],
        &format!("{} forecast fetch failed", kind.as_str()),
    )
    .await?;
    Ok(Json(data))
}

/// `/airquality` response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityEnvelope {
    pub location_key: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Value,
    pub pm_data: Option<Value>,
    pub success: bool,
}

pub async fn air_quality(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<AirQualityEnvelope>> {
    let key = location_key(&query)?;
    let kind = EdgeAirQualityType::from_param(query.kind.as_deref())?;
    let hours = params::count(query.hours.as_deref(), DEFAULT_AIR_QUALITY_HOURS).to_string();
    let days = params::count(query.days.as_deref(), DEFAULT_DAYS).to_string();
    let pollutants = non_empty(query.pollutants.as_deref()).unwrap_or("true");

    let data = fetch(
        &state,
        state.edge_air_quality_url()?,
        &[
            ("locationKey", key),
            ("type", kind.as_str()),
            ("hours", hours.as_str()),
            ("days", days.as_str()),
            ("pollutants", pollutants),
        ],
        "Air quality fetch failed",
    )
    .await?;

    let pm_data = pm_data(&data);
    if pm_data.is_none() {
        debug!("No PM readings in air quality response");
    }

    Ok(Json(AirQualityEnvelope {
        location_key: key.to_string(),
        kind: kind.as_str(),
        data,
        pm_data,
        success: true,
    }))
}

/// `{PM25, PM10}` pollutant entries from the first record, when either exists
fn pm_data(data: &Value) -> Option<Value> {
    let record = match data {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let pollutants = record.get("Pollutants")?.as_array()?;
    let find = |name: &str| {
        pollutants
            .iter()
            .find(|p| p.get("Name").and_then(Value::as_str) == Some(name))
            .cloned()
    };

    let mut pm = Map::new();
    if let Some(pm25) = find("PM2.5") {
        pm.insert("PM25".to_string(), pm25);
    }
    if let Some(pm10) = find("PM10") {
        pm.insert("PM10".to_string(), pm10);
    }
    (!pm.is_empty()).then_some(Value::Object(pm))
}

/// One edge-function variant tried by `/indices`
struct Probe {
    endpoint: String,
    params: Vec<(&'static str, String)>,
}

impl Probe {
    fn new(endpoint: impl Into<String>, params: Vec<(&'static str, String)>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params,
        }
    }

    /// Extra parameters as they are appended to the URL, e.g. `&groupId=10`
    fn params_label(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("&{key}={value}"))
            .collect()
    }
}

fn probes(group_id: &str, days: u32) -> Vec<Probe> {
    vec![
        Probe::new("indices", vec![("groupId", "10".to_string())]),
        Probe::new("indices", vec![("groupId", group_id.to_string())]),
        Probe::new(format!("indices{days}day"), vec![]),
        Probe::new("alarms", vec![("days", days.to_string())]),
        Probe::new(format!("alarms{days}day"), vec![]),
    ]
}

#[derive(Debug, Serialize)]
pub struct ProbeOutcome {
    pub endpoint: String,
    pub params: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicesReport {
    pub location_key: String,
    pub tested_endpoints: Vec<ProbeOutcome>,
    pub summary: String,
}

#[instrument(name = "indices_probe", skip_all)]
pub async fn indices(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<IndicesReport>> {
    let key = location_key(&query)?;
    let group_id = non_empty(query.group_id.as_deref()).unwrap_or("all");
    let days = params::count(query.days.as_deref(), DEFAULT_DAYS);
    let base = state.edge_weather_url()?;

    let probes = probes(group_id, days);
    let state = &state;
    let attempts = probes.iter().map(|probe| {
        async move {
            let mut params = vec![("endpoint", probe.endpoint.as_str()), ("locationKey", key)];
            params.extend(probe.params.iter().map(|(k, v)| (*k, v.as_str())));

            let result = fetch(state, base, &params, &probe.endpoint).await;
            let mut outcome = ProbeOutcome {
                endpoint: probe.endpoint.clone(),
                params: probe.params_label(),
                success: false,
                data: None,
                status: None,
                error: None,
            };
            match result {
                Ok(data) => {
                    outcome.success = true;
                    outcome.data = Some(data);
                }
                Err(NalssiError::Upstream {
                    status: Some(status),
                    ..
                }) => outcome.status = Some(status),
                Err(e) => outcome.error = Some(e.to_string()),
            }
            outcome
        }
    });
    let tested_endpoints = join_all(attempts).await;

    let successful = tested_endpoints.iter().filter(|o| o.success).count();
    let summary = format!(
        "Tested {} endpoints, {} successful",
        tested_endpoints.len(),
        successful
    );
    info!("{}", summary);

    Ok(Json(IndicesReport {
        location_key: key.to_string(),
        tested_endpoints,
        summary,
    }))
}

pub async fn alerts(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let key = location_key(&query)?;

    let data = fetch_weather(
        &state,
        &[("endpoint", "alerts"), ("locationKey", key)],
        "Weather alerts fetch failed",
    )
    .await?;
    Ok(Json(data))
}

pub async fn minutecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let coordinates = non_empty(query.lat.as_deref()).zip(non_empty(query.lon.as_deref()));

    let mut params = vec![("endpoint", "minutecast")];
    match (coordinates, non_empty(query.location_key.as_deref())) {
        (Some((lat, lon)), _) => params.extend([("lat", lat), ("lon", lon)]),
        (None, Some(key)) => params.push(("locationKey", key)),
        (None, None) => {
            return Err(NalssiError::missing_parameter(
                "Location key or coordinates (lat, lon) are required",
            ));
        }
    }

    let data = fetch_weather(&state, &params, "MinuteCast fetch failed").await?;
    Ok(Json(data))
}

pub async fn location(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>> {
    let mut params = vec![("endpoint", "location")];
    if let Some(key) = non_empty(query.location_key.as_deref()) {
        params.push(("locationKey", key));
    }

    let data = fetch_weather(&state, &params, "Location fetch failed").await?;
    Ok(Json(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_if_array() {
        assert_eq!(first_if_array(json!([{"a": 1}, {"a": 2}])), json!({"a": 1}));
        assert_eq!(first_if_array(json!({"a": 1})), json!({"a": 1}));
        assert_eq!(first_if_array(json!([])), Value::Null);
    }

    #[test]
    fn test_pm_data_from_array() {
        let data = json!([{
            "Pollutants": [
                {"Name": "PM10", "Value": 40},
                {"Name": "O3", "Value": 10},
                {"Name": "PM2.5", "Value": 12}
            ]
        }]);
        assert_eq!(
            pm_data(&data),
            Some(json!({
                "PM25": {"Name": "PM2.5", "Value": 12},
                "PM10": {"Name": "PM10", "Value": 40}
            }))
        );
    }

    #[test]
    fn test_pm_data_from_object_with_one_reading() {
        let data = json!({"Pollutants": [{"Name": "PM10", "Value": 40}]});
        let pm = pm_data(&data).unwrap();
        assert_eq!(pm["PM10"]["Value"], 40);
        assert!(pm.get("PM25").is_none());
    }

    #[test]
    fn test_pm_data_absent() {
        assert!(pm_data(&json!([])).is_none());
        assert!(pm_data(&json!({"Pollutants": [{"Name": "CO"}]})).is_none());
        assert!(pm_data(&json!({"Other": true})).is_none());
    }

    #[test]
    fn test_probe_variants() {
        let probes = probes("all", 5);
        let endpoints: Vec<_> = probes.iter().map(|p| p.endpoint.as_str()).collect();
        assert_eq!(
            endpoints,
            ["indices", "indices", "indices5day", "alarms", "alarms5day"]
        );
        assert_eq!(probes[0].params_label(), "&groupId=10");
        assert_eq!(probes[1].params_label(), "&groupId=all");
        assert_eq!(probes[2].params_label(), "");
        assert_eq!(probes[3].params_label(), "&days=5");
    }
}
