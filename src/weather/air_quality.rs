//! Particulate matter categories (Korean national index breakpoints)

use std::fmt;

/// Particulate matter size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticulateMatter {
    Pm10,
    Pm25,
}

impl ParticulateMatter {
    /// Upper bounds (µg/m³, inclusive) of 좋음, 보통 and 나쁨
    const fn breakpoints(self) -> [f64; 3] {
        match self {
            Self::Pm10 => [30.0, 50.0, 100.0],
            Self::Pm25 => [15.0, 25.0, 50.0],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pm10 => "PM10",
            Self::Pm25 => "PM2.5",
        }
    }
}

impl fmt::Display for ParticulateMatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const CATEGORIES: [&str; 4] = ["좋음", "보통", "나쁨", "매우나쁨"];

/// Category label for a reading, `N/A` when there is none
#[must_use]
pub fn pm_category(value: Option<f64>, kind: ParticulateMatter) -> &'static str {
    let Some(value) = value else {
        return "N/A";
    };
    let index = kind
        .breakpoints()
        .iter()
        .position(|limit| value <= *limit)
        .unwrap_or(CATEGORIES.len() - 1);
    CATEGORIES[index]
}
