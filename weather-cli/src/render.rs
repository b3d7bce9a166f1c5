//! Plain-text rendering of the query state, coloured by theme.

use crossterm::style::{Color, Stylize, style};
use weather_core::{
    CurrentWeather, ForecastDay, QueryPhase, QueryState, Theme, present::icon_url,
};

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
}

impl Palette {
    pub fn for_theme(theme: Option<Theme>) -> Self {
        match theme {
            Some(Theme::Night) => Palette { accent: Color::Magenta, text: Color::Grey },
            Some(Theme::Rainy) => Palette { accent: Color::Blue, text: Color::White },
            Some(Theme::Cloudy) => Palette { accent: Color::DarkGrey, text: Color::White },
            Some(Theme::Sunny) => Palette { accent: Color::Yellow, text: Color::White },
            None => Palette { accent: Color::Reset, text: Color::Reset },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    pub icon_base_url: String,
    pub color: bool,
}

impl Renderer {
    fn accent(&self, palette: Palette, s: &str) -> String {
        if self.color {
            style(s).with(palette.accent).bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn text(&self, palette: Palette, s: &str) -> String {
        if self.color {
            style(s).with(palette.text).to_string()
        } else {
            s.to_string()
        }
    }

    pub fn render(&self, state: &QueryState, theme: Option<Theme>) -> String {
        let palette = Palette::for_theme(theme);

        match &state.phase {
            QueryPhase::Idle => String::new(),
            QueryPhase::Loading => "Loading...".to_string(),
            QueryPhase::Failed(msg) => {
                if self.color {
                    format!("{} {}", style("Error:").red().bold(), msg)
                } else {
                    format!("Error: {msg}")
                }
            }
            QueryPhase::Success(report) => {
                let mut out = self.current_panel(&report.current, palette);
                if !report.forecast.is_empty() {
                    out.push('\n');
                    out.push_str(&self.forecast_panel(&report.forecast, palette));
                }
                out
            }
        }
    }

    fn current_panel(&self, current: &CurrentWeather, palette: Palette) -> String {
        [
            self.accent(palette, &current.name),
            format!("  icon: {}", icon_url(&self.icon_base_url, &current.icon_id)),
            format!(
                "  {}  {}",
                self.accent(palette, &format!("{}°C", current.temp_c)),
                self.text(palette, &current.description)
            ),
            format!(
                "  Feels like {}°C | Humidity {}% | Wind {:.1} m/s | Pressure {} hPa",
                current.feels_like_c, current.humidity_pct, current.wind_speed_ms, current.pressure_hpa
            ),
        ]
        .into_iter()
        .map(|line| line + "\n")
        .collect()
    }

    fn forecast_panel(&self, days: &[ForecastDay], palette: Palette) -> String {
        let mut out = self.accent(palette, "5-day forecast");
        out.push('\n');
        for day in days {
            out.push_str(&format!(
                "  {:<12} {:>4}  {}  ({})\n",
                day.date,
                format!("{}°C", day.temp_c),
                self.text(palette, &day.description),
                icon_url(&self.icon_base_url, &day.icon_id)
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::WeatherReport;

    fn plain() -> Renderer {
        Renderer { icon_base_url: "https://icons.test/wn".into(), color: false }
    }

    fn report() -> WeatherReport {
        WeatherReport {
            current: CurrentWeather {
                name: "London".into(),
                temp_c: 22,
                feels_like_c: 20,
                description: "light rain".into(),
                icon_id: "10d".into(),
                humidity_pct: 64,
                wind_speed_ms: 4.12,
                pressure_hpa: 1013,
            },
            forecast: vec![ForecastDay {
                date: "Mon, Jan 15".into(),
                temp_c: 9,
                icon_id: "04d".into(),
                description: "overcast clouds".into(),
            }],
        }
    }

    #[test]
    fn idle_renders_nothing() {
        assert_eq!(plain().render(&QueryState::default(), None), "");
    }

    #[test]
    fn loading_shows_indicator() {
        let state = QueryState { city_input: "London".into(), phase: QueryPhase::Loading };
        assert_eq!(plain().render(&state, None), "Loading...");
    }

    #[test]
    fn failure_shows_message_only() {
        let state = QueryState {
            city_input: "Nowhereville".into(),
            phase: QueryPhase::Failed("City not found".into()),
        };
        assert_eq!(plain().render(&state, None), "Error: City not found");
    }

    #[test]
    fn success_shows_both_panels() {
        let state = QueryState { city_input: "London".into(), phase: QueryPhase::Success(report()) };

        let out = plain().render(&state, Some(Theme::Rainy));

        assert!(out.starts_with("London\n"));
        assert!(out.contains("icon: https://icons.test/wn/10d@2x.png"));
        assert!(out.contains("22°C  light rain"));
        assert!(out.contains("Feels like 20°C | Humidity 64% | Wind 4.1 m/s | Pressure 1013 hPa"));
        assert!(out.contains("5-day forecast"));
        assert!(out.contains("Mon, Jan 15"));
        assert!(out.contains("overcast clouds"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn panels_render_one_line_per_row() {
        let state = QueryState { city_input: "London".into(), phase: QueryPhase::Success(report()) };

        let out = plain().render(&state, None);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 7, "unexpected layout:\n{out}");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "5-day forecast");
        assert_eq!(
            lines[6],
            "  Mon, Jan 15   9°C  overcast clouds  (https://icons.test/wn/04d@2x.png)"
        );
    }

    #[test]
    fn color_output_uses_ansi_escapes() {
        let renderer = Renderer { color: true, ..plain() };
        let state = QueryState { city_input: "London".into(), phase: QueryPhase::Success(report()) };

        assert!(renderer.render(&state, Some(Theme::Sunny)).contains('\u{1b}'));
    }

    #[test]
    fn each_theme_has_its_own_accent() {
        let accents = [Theme::Night, Theme::Rainy, Theme::Cloudy, Theme::Sunny]
            .map(|t| Palette::for_theme(Some(t)).accent);
        for (i, a) in accents.iter().enumerate() {
            assert!(!accents[i + 1..].contains(a));
        }
        assert_eq!(Palette::for_theme(None).accent, Color::Reset);
    }
}
