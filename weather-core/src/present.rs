//! Pure mapping from provider payloads to the display model.

use std::fmt::Display;

use chrono::{DateTime, Local, Locale, NaiveDateTime, TimeZone};

use crate::model::{
    Condition, CurrentPayload, CurrentWeather, ForecastDay, ForecastEntry, ForecastPayload,
    Theme, WeatherReport,
};

/// Timestamp text that marks the one sample per day we show.
pub const MIDDAY_MARKER: &str = "12:00:00";

pub const FORECAST_DAYS: usize = 5;

const DAY_FORMAT: &str = "%a, %b %-d";

const RAIN_WORDS: [&str; 3] = ["rain", "drizzle", "thunderstorm"];
const CLOUD_WORDS: [&str; 3] = ["cloud", "mist", "fog"];

/// Round to the nearest whole degree, halves away from zero.
pub fn round_temp(celsius: f64) -> i32 {
    celsius.round() as i32
}

fn first_condition(conditions: &[Condition]) -> (String, String) {
    conditions
        .first()
        .map(|c| (c.description.clone(), c.icon.clone()))
        .unwrap_or_else(|| ("unknown".to_string(), String::new()))
}

pub fn current_weather(payload: &CurrentPayload) -> CurrentWeather {
    let (description, icon_id) = first_condition(&payload.weather);

    CurrentWeather {
        name: payload.name.clone(),
        temp_c: round_temp(payload.main.temp),
        feels_like_c: round_temp(payload.main.feels_like),
        description,
        icon_id,
        humidity_pct: payload.main.humidity,
        wind_speed_ms: payload.wind.speed,
        pressure_hpa: payload.main.pressure,
    }
}

/// Parse a POSIX-style locale tag such as `de_DE.UTF-8` or `fr-FR`.
pub fn locale_from_tag(tag: &str) -> Option<Locale> {
    let name = tag.split(['.', '@']).next()?.trim().replace('-', "_");
    Locale::try_from(name.as_str()).ok()
}

/// Time locale of the viewer, from `LC_ALL`, `LC_TIME` or `LANG`.
/// Unknown or unset locales fall back to `en_US`.
pub fn viewer_locale() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .and_then(|tag| locale_from_tag(&tag))
        .unwrap_or(Locale::en_US)
}

/// Short day label, e.g. `Mon, Jan 15` for `en_US`.
pub fn format_day<Tz>(ts: &DateTime<Tz>, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.format_localized(DAY_FORMAT, locale).to_string()
}

fn entry_label<Tz>(entry: &ForecastEntry, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Some(ts) = DateTime::from_timestamp(entry.dt, 0) {
        return format_day(&ts.with_timezone(tz), locale);
    }

    match NaiveDateTime::parse_from_str(&entry.dt_txt, "%Y-%m-%d %H:%M:%S") {
        Ok(ts) => format_day(&ts.and_utc(), locale),
        Err(_) => entry.dt_txt.clone(),
    }
}

/// Pick the midday sample of each day, in series order, at most five.
/// Labels use the calendar date in `tz`.
pub fn forecast_days_in<Tz>(payload: &ForecastPayload, tz: &Tz, locale: Locale) -> Vec<ForecastDay>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    payload
        .list
        .iter()
        .filter(|entry| entry.dt_txt.contains(MIDDAY_MARKER))
        .take(FORECAST_DAYS)
        .map(|entry| {
            let (description, icon_id) = first_condition(&entry.weather);
            ForecastDay {
                date: entry_label(entry, tz, locale),
                temp_c: round_temp(entry.main.temp),
                icon_id,
                description,
            }
        })
        .collect()
}

/// [`forecast_days_in`] for the viewer's local timezone.
pub fn forecast_days(payload: &ForecastPayload, locale: Locale) -> Vec<ForecastDay> {
    forecast_days_in(payload, &Local, locale)
}

pub fn weather_report(
    current: &CurrentPayload,
    forecast: &ForecastPayload,
    locale: Locale,
) -> WeatherReport {
    WeatherReport {
        current: current_weather(current),
        forecast: forecast_days(forecast, locale),
    }
}

/// Theme for the given conditions at the given local hour (0..=23).
///
/// Night wins over any description.
pub fn derive_theme(current: Option<&CurrentWeather>, hour: u32) -> Option<Theme> {
    let current = current?;

    if hour < 6 || hour > 20 {
        return Some(Theme::Night);
    }

    let description = current.description.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| description.contains(w));

    let theme = if mentions(&RAIN_WORDS) {
        Theme::Rainy
    } else if mentions(&CLOUD_WORDS) {
        Theme::Cloudy
    } else {
        Theme::Sunny
    };

    Some(theme)
}

pub fn icon_url(base_url: &str, icon_id: &str) -> String {
    format!("{}/{}@2x.png", base_url.trim_end_matches('/'), icon_id)
}
