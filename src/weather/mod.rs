//! Weather lookups and response normalization
//!
//! - WMO weather code descriptions and icons
//! - Wind direction to compass point
//! - Particulate matter categories
//! - Open-Meteo payload to canonical record conversion

pub mod air_quality;
pub mod normalize;

pub use air_quality::{ParticulateMatter, pm_category};

const UNKNOWN_DESCRIPTION: &str = "알 수 없음";
const UNKNOWN_EMOJI: &str = "☁️";

/// Korean description for a WMO weather code
#[must_use]
pub fn weather_code_description(code: u8) -> &'static str {
    match code {
        0 => "맑음",
        1 => "대체로 맑음",
        2 => "부분적으로 흐림",
        3 => "흐림",
        45 => "안개",
        48 => "착빙 안개",
        51 => "가벼운 이슬비",
        53 => "보통 이슬비",
        55 => "심한 이슬비",
        56 => "가벼운 어는 이슬비",
        57 => "심한 어는 이슬비",
        61 => "가벼운 비",
        63 => "보통 비",
        65 => "심한 비",
        66 => "가벼운 어는비",
        67 => "심한 어는비",
        71 => "가벼운 눈",
        73 => "보통 눈",
        75 => "심한 눈",
        77 => "진눈깨비",
        80 => "가벼운 소나기",
        81 => "보통 소나기",
        82 => "폭우",
        85 => "가벼운 눈 소나기",
        86 => "심한 눈 소나기",
        95 => "뇌우",
        96 => "가벼운 우박을 동반한 뇌우",
        99 => "심한 우박을 동반한 뇌우",
        _ => UNKNOWN_DESCRIPTION,
    }
}

/// Emoji icon for a WMO weather code
#[must_use]
pub fn weather_code_emoji(code: u8) -> &'static str {
    match code {
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 | 53 | 80 => "🌦️",
        55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 | 81 | 82 => "🌧️",
        71 | 73 | 75 | 77 | 85 | 86 => "❄️",
        95 | 96 | 99 => "⛈️",
        _ => UNKNOWN_EMOJI,
    }
}

/// Description for an optional code; a missing code reads as unknown
#[must_use]
pub fn describe(code: Option<u8>) -> &'static str {
    code.map_or(UNKNOWN_DESCRIPTION, weather_code_description)
}

/// Emoji for an optional code
#[must_use]
pub fn emoji(code: Option<u8>) -> &'static str {
    code.map_or(UNKNOWN_EMOJI, weather_code_emoji)
}

const COMPASS_POINTS: [&str; 8] = ["북", "북동", "동", "남동", "남", "남서", "서", "북서"];

/// 8-point compass direction (Korean) for a bearing in degrees.
/// Rounds half up and wraps any bearing, including negative ones.
#[must_use]
pub fn wind_direction_to_compass(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "N/A";
    }
    let sector = (degrees / 45.0 + 0.5).floor() as i64;
    COMPASS_POINTS[sector.rem_euclid(8) as usize]
}

/// Compass direction for an optional bearing
#[must_use]
pub fn compass(degrees: Option<f64>) -> &'static str {
    degrees.map_or("N/A", wind_direction_to_compass)
}

/// Daylight heuristic on an Open-Meteo local timestamp (`YYYY-MM-DDTHH:MM`)
#[must_use]
pub fn is_daylight(timestamp: &str) -> bool {
    chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M")
        .map(|dt| (6..18).contains(&chrono::Timelike::hour(&dt)))
        .unwrap_or(true)
}
