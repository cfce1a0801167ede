//! Data models for the gateway
//!
//! - Location: the `lat_lon` key and resolved display locations
//! - Weather: current conditions
//! - Forecast: daily and hourly forecast records
//! - Air quality: pollutant readings
//! - `open_meteo`: raw upstream payloads

pub mod air_quality;
pub mod forecast;
pub mod location;
pub mod open_meteo;
pub mod weather;

// Re-export all public types for convenient access
pub use air_quality::{AirQualityReading, HourlyAirQuality, Pollutant};
pub use forecast::{DailyForecast, DailyForecastResponse, HourlyForecast};
pub use location::{AdministrativeArea, Country, DisplayLocation, LocationKey};
pub use weather::{CurrentConditions, Measurement, MetricMeasurement, Wind, WindDirection};
