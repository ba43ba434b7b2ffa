//! Text presentation of search results.

use chrono::NaiveDateTime;

use crate::model::{HourlyEntry, Location, MAX_HOURS, SearchState, WeatherReport, WeatherSnapshot};

pub const UNKNOWN_LABEL: &str = "Unknown";
pub const IDLE_HINT: &str = "No weather loaded yet. Try searching for a city above.";
pub const LOADING_HINT: &str = "Loading data…";

/// Human label for a WMO weather code. First matching band wins.
pub fn weather_label(code: i32) -> &'static str {
    match code {
        0 => "Clear",
        1 | 2 => "Partly cloudy",
        3 => "Overcast",
        45..=48 => "Fog",
        51..=67 => "Drizzle/Rain",
        71..=77 => "Snow",
        80..=82 => "Rain showers",
        85..=86 => "Snow showers",
        95..=99 => "Thunderstorm",
        _ => UNKNOWN_LABEL,
    }
}

/// Emoji for the same bands as [`weather_label`].
pub fn weather_icon(code: i32) -> &'static str {
    match code {
        0 => "☀️",
        1 | 2 => "🌤️",
        3 => "☁️",
        45..=48 => "🌫️",
        51..=67 => "🌦️",
        71..=77 => "❄️",
        80..=82 => "🌧️",
        85..=86 => "🌨️",
        95..=99 => "⛈️",
        _ => "🌈",
    }
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", round(celsius))
}

pub fn format_wind(kmh: f64) -> String {
    format!("{} km/h", round(kmh))
}

pub fn format_coordinates(location: &Location) -> String {
    format!(
        "Latitude: {:.3} • Longitude: {:.3}",
        location.latitude, location.longitude
    )
}

/// `Paris, Île-de-France — France`; the region part is dropped when empty.
pub fn location_line(location: &Location) -> String {
    if location.region.is_empty() {
        format!("{} — {}", location.name, location.country)
    } else {
        format!("{}, {} — {}", location.name, location.region, location.country)
    }
}

/// `HH:MM` of a local ISO 8601 timestamp; the input itself if it doesn't parse.
pub fn time_of_day(timestamp: &str) -> String {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn hourly_line(entry: &HourlyEntry) -> String {
    let temp = entry
        .temperature_c
        .map(|t| format!("{}°", round(t)))
        .unwrap_or_else(|| "—".to_string());

    format!(
        "{}  {:>4}  Precip: {} mm",
        time_of_day(&entry.time),
        temp,
        entry.precipitation_mm
    )
}

fn current_lines(current: &WeatherSnapshot) -> Vec<String> {
    vec![
        format_temperature(current.temperature_c),
        format!(
            "Feels like ≈ {} • Wind {}",
            format_temperature(current.temperature_c),
            format_wind(current.wind_speed_kmh)
        ),
        format!(
            "{} {}",
            weather_icon(current.weather_code),
            weather_label(current.weather_code)
        ),
        format!("Updated: {}", current.time),
    ]
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_report(report: &WeatherReport) -> String {
    let mut lines = vec![location_line(&report.location)];
    lines.extend(current_lines(&report.current));
    lines.push(format_coordinates(&report.location));
    lines.push("Data: Open-Meteo".to_string());

    if !report.hourly.is_empty() {
        lines.push(String::new());
        lines.push("Hourly snapshot (next 24 hrs)".to_string());
        lines.extend(
            report
                .hourly
                .entries()
                .iter()
                .take(MAX_HOURS)
                .map(|entry| format!("  {}", hourly_line(entry))),
        );
    }

    let timezone = if report.current.timezone.is_empty() {
        "—"
    } else {
        report.current.timezone.as_str()
    };
    lines.push(String::new());
    lines.push("Quick details".to_string());
    lines.push(format!("  • Current weather code: {}", report.current.weather_code));
    lines.push(format!("  • Timezone: {timezone}"));

    join_lines(lines)
}

pub fn render_state(state: &SearchState) -> String {
    match state {
        SearchState::Idle => format!("{IDLE_HINT}\n"),
        SearchState::Loading => format!("{LOADING_HINT}\n"),
        SearchState::Success(report) => render_report(report),
        SearchState::Error { error, location } => {
            let mut lines = Vec::new();
            if let Some(location) = location {
                lines.push(location_line(location));
                lines.push(format_coordinates(location));
            }
            lines.push(format!("Error: {error}"));
            join_lines(lines)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::LookupError,
        model::{HourlySeries, WeatherSnapshot},
    };

    fn paris() -> Location {
        Location {
            name: "Paris".into(),
            country: "France".into(),
            region: "Île-de-France".into(),
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }

    fn hour(time: &str, temp: f64, precip: f64) -> HourlyEntry {
        HourlyEntry {
            time: time.into(),
            temperature_c: Some(temp),
            precipitation_mm: precip,
            relative_humidity_pct: None,
            wind_speed_kmh: None,
        }
    }

    #[test]
    fn labels_follow_the_bands() {
        let cases = [
            (0, "Clear"),
            (1, "Partly cloudy"),
            (2, "Partly cloudy"),
            (3, "Overcast"),
            (45, "Fog"),
            (48, "Fog"),
            (51, "Drizzle/Rain"),
            (63, "Drizzle/Rain"),
            (67, "Drizzle/Rain"),
            (71, "Snow"),
            (77, "Snow"),
            (80, "Rain showers"),
            (82, "Rain showers"),
            (85, "Snow showers"),
            (86, "Snow showers"),
            (95, "Thunderstorm"),
            (99, "Thunderstorm"),
        ];
        for (code, label) in cases {
            assert_eq!(weather_label(code), label, "code {code}");
        }
    }

    #[test]
    fn labels_fall_back_outside_bands() {
        for code in [-1, 4, 44, 49, 68, 78, 83, 87, 94, 100, 200] {
            assert_eq!(weather_label(code), UNKNOWN_LABEL, "code {code}");
            assert_eq!(weather_icon(code), "🌈");
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(format_temperature(18.4), "18°C");
        assert_eq!(format_temperature(18.5), "19°C");
        assert_eq!(format_temperature(-0.4), "0°C");
        assert_eq!(format_wind(10.2), "10 km/h");
    }

    #[test]
    fn coordinates_have_three_decimals() {
        assert_eq!(
            format_coordinates(&paris()),
            "Latitude: 48.857 • Longitude: 2.352"
        );
    }

    #[test]
    fn location_line_with_and_without_region() {
        assert_eq!(location_line(&paris()), "Paris, Île-de-France — France");

        let mut monaco = paris();
        monaco.name = "Monaco".into();
        monaco.region = String::new();
        monaco.country = "Monaco".into();
        assert_eq!(location_line(&monaco), "Monaco — Monaco");
    }

    #[test]
    fn time_of_day_parses_local_timestamps() {
        assert_eq!(time_of_day("2024-01-01T07:00"), "07:00");
        assert_eq!(time_of_day("2024-01-01T23:30:00"), "23:30");
        assert_eq!(time_of_day("soon"), "soon");
    }

    #[test]
    fn hourly_line_shows_zero_precipitation() {
        let line = hourly_line(&hour("2024-01-01T03:00", 6.6, 0.0));
        assert_eq!(line, "03:00    7°  Precip: 0 mm");
    }

    #[test]
    fn report_lists_at_most_24_hours() {
        let report = WeatherReport {
            location: paris(),
            current: WeatherSnapshot {
                temperature_c: 18.4,
                wind_speed_kmh: 10.2,
                weather_code: 1,
                time: "2024-01-01T12:00".into(),
                timezone: "Europe/Paris".into(),
            },
            hourly: HourlySeries::new(
                (0..30).map(|i| hour(&format!("2024-01-01T{:02}:00", i % 24), 5.0, 0.1)),
            ),
        };

        let text = render_report(&report);

        assert_eq!(text.matches("Precip:").count(), 24);
        assert!(text.contains("Paris, Île-de-France — France"));
        assert!(text.contains("18°C"));
        assert!(text.contains("Partly cloudy"));
        assert!(text.contains("Feels like ≈ 18°C • Wind 10 km/h"));
        assert!(text.contains("Timezone: Europe/Paris"));
    }

    #[test]
    fn report_without_hours_is_one_line_per_field() {
        let report = WeatherReport {
            location: paris(),
            current: WeatherSnapshot {
                temperature_c: 18.4,
                wind_speed_kmh: 10.2,
                weather_code: 1,
                time: "2024-01-01T12:00".into(),
                timezone: String::new(),
            },
            hourly: HourlySeries::default(),
        };

        let text = render_report(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Paris, Île-de-France — France",
                "18°C",
                "Feels like ≈ 18°C • Wind 10 km/h",
                "🌤️ Partly cloudy",
                "Updated: 2024-01-01T12:00",
                "Latitude: 48.857 • Longitude: 2.352",
                "Data: Open-Meteo",
                "",
                "Quick details",
                "  • Current weather code: 1",
                "  • Timezone: —",
            ]
        );
        assert!(text.ends_with("—\n"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn every_state_renders() {
        assert!(render_state(&SearchState::Idle).contains("No weather loaded yet"));
        assert!(render_state(&SearchState::Loading).contains("Loading"));

        let text = render_state(&SearchState::Error {
            error: LookupError::NotFound,
            location: None,
        });
        assert_eq!(text, "Error: No location found. Try a different city name.\n");

        let text = render_state(&SearchState::Error {
            error: LookupError::unknown("Forecast request failed: timed out"),
            location: Some(paris()),
        });
        assert!(text.starts_with("Paris, Île-de-France — France\n"));
        assert!(text.contains("timed out"));
    }
}
