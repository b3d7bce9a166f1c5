use serde::{Deserialize, Serialize};

// Raw provider payloads. Only the fields we render are modelled.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Body of the current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPayload {
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

/// One 3-hour sample of the forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub dt_txt: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

/// Body of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastEntry>,
}

// Display model.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub temp_c: i32,
    pub feels_like_c: i32,
    pub description: String,
    pub icon_id: String,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub pressure_hpa: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Short label such as `Mon, Jan 15`.
    pub date: String,
    pub temp_c: i32,
    pub icon_id: String,
    pub description: String,
}

/// Current conditions and the daily forecast; only ever built together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
}

/// Display mode derived from the current conditions and local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Night,
    Rainy,
    Cloudy,
    Sunny,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Night => "night",
            Theme::Rainy => "rainy",
            Theme::Cloudy => "cloudy",
            Theme::Sunny => "sunny",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
