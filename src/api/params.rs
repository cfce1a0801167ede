//! Query parameter parsing shared by the handlers

use std::str::FromStr;

use crate::models::LocationKey;
use crate::{NalssiError, Result};

pub const LOCATION_KEY_REQUIRED: &str = "Location key is required";

/// Longest Open-Meteo horizon, in hours and days
const MAX_FORECAST_HOURS: u32 = 384;
const MAX_FORECAST_DAYS: u32 = 16;

/// Value of a required parameter; empty counts as missing
pub fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| NalssiError::missing_parameter(message))
}

/// Required `locationKey`, parsed into coordinates
pub fn location_key(value: Option<&str>) -> Result<LocationKey> {
    required(value, LOCATION_KEY_REQUIRED)?.parse()
}

/// Positive count, or `default` when absent, zero or not a number
#[must_use]
pub fn count(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Snap an hour count to a horizon the edge provider offers (1, 12, 24, 72, 120)
#[must_use]
pub fn snap_forecast_hours(hours: u32) -> u32 {
    match hours {
        h if h > 72 => 120,
        h if h > 24 => 72,
        h if h > 12 => 24,
        h if h > 1 => 12,
        _ => 1,
    }
}

/// Days of data to request from Open-Meteo to cover `hours`
#[must_use]
pub fn forecast_days_for_hours(hours: u32) -> u32 {
    hours
        .min(MAX_FORECAST_HOURS)
        .div_ceil(24)
        .min(MAX_FORECAST_DAYS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastType {
    Daily,
    Hourly,
}

impl ForecastType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Hourly => "hourly",
        }
    }

    /// `type` parameter, defaulting to daily
    pub fn from_param(value: Option<&str>) -> Result<Self> {
        value.filter(|v| !v.is_empty()).map_or(Ok(Self::Daily), |v| v.parse())
    }
}

impl FromStr for ForecastType {
    type Err = NalssiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "hourly" => Ok(Self::Hourly),
            _ => Err(NalssiError::unsupported_type(
                "Invalid forecast type. Use daily or hourly",
            )),
        }
    }
}

/// Open-Meteo air quality request kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQualityType {
    Current,
    Hourly,
}

impl AirQualityType {
    pub fn from_param(value: Option<&str>) -> Result<Self> {
        value.filter(|v| !v.is_empty()).map_or(Ok(Self::Current), |v| v.parse())
    }
}

impl FromStr for AirQualityType {
    type Err = NalssiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "hourly" => Ok(Self::Hourly),
            _ => Err(NalssiError::unsupported_type(
                "Invalid air quality type. Use current or hourly",
            )),
        }
    }
}

/// Air quality kinds the edge function understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAirQualityType {
    Current,
    Hourly,
    Daily,
    Observation,
}

impl EdgeAirQualityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Observation => "observation",
        }
    }

    pub fn from_param(value: Option<&str>) -> Result<Self> {
        value.filter(|v| !v.is_empty()).map_or(Ok(Self::Current), |v| v.parse())
    }
}

impl FromStr for EdgeAirQualityType {
    type Err = NalssiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "observation" => Ok(Self::Observation),
            _ => Err(NalssiError::unsupported_type(
                "Invalid air quality type. Use current, hourly, daily or observation",
            )),
        }
    }
}
