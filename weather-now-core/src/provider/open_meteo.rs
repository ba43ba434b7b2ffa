use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    error::{LookupError, Stage},
    model::{Forecast, HourlyEntry, HourlySeries, Location, WeatherSnapshot},
};

use super::WeatherProvider;

const CANDIDATE_COUNT: &str = "5";
const LANGUAGE: &str = "en";
const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,precipitation,windspeed_10m";

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_base_url: String,
    forecast_base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            geocoding_base_url: config.geocoding_base_url.trim().trim_end_matches('/').to_string(),
            forecast_base_url: config.forecast_base_url.trim().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get(
        &self,
        stage: Stage,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, LookupError> {
        tracing::debug!(%stage, url, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(stage, &e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::unknown(format!("{stage} response could not be read: {e}")))?;

        if !status.is_success() {
            tracing::debug!(%stage, %status, body = %truncate_body(&body), "upstream returned an error");
            return Err(LookupError::Upstream { stage, status: status.as_u16() });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, query: &str) -> Result<Location, LookupError> {
        let url = format!("{}/search", self.geocoding_base_url);
        let body = self
            .get(
                Stage::Geocoding,
                &url,
                &[
                    ("name", query.to_string()),
                    ("count", CANDIDATE_COUNT.to_string()),
                    ("language", LANGUAGE.to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        parse_geocoding(&body)
    }

    async fn forecast(&self, location: &Location) -> Result<Forecast, LookupError> {
        let url = format!("{}/forecast", self.forecast_base_url);
        let body = self
            .get(
                Stage::Forecast,
                &url,
                &[
                    ("latitude", location.latitude.to_string()),
                    ("longitude", location.longitude.to_string()),
                    ("current_weather", "true".to_string()),
                    ("hourly", HOURLY_FIELDS.to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    #[serde(default)]
    country: String,
    admin1: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<OmPlace> for Location {
    fn from(place: OmPlace) -> Self {
        Location {
            name: place.name,
            country: place.country,
            region: place.admin1.unwrap_or_default(),
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrentWeather,
    hourly: Option<OmHourly>,
    #[serde(default)]
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
    time: String,
}

// Values may be null for hours the model doesn't cover.
#[derive(Debug, Deserialize)]
struct OmHourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    precipitation: Option<Vec<Option<f64>>>,
    #[serde(default)]
    relativehumidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    windspeed_10m: Vec<Option<f64>>,
}

impl OmHourly {
    fn into_series(self) -> HourlySeries {
        let OmHourly {
            time,
            temperature_2m,
            precipitation,
            relativehumidity_2m,
            windspeed_10m,
        } = self;
        let precipitation = precipitation.unwrap_or_default();

        HourlySeries::new(time.into_iter().enumerate().map(|(i, time)| HourlyEntry {
            time,
            temperature_c: value_at(&temperature_2m, i),
            precipitation_mm: value_at(&precipitation, i).unwrap_or(0.0),
            relative_humidity_pct: value_at(&relativehumidity_2m, i),
            wind_speed_kmh: value_at(&windspeed_10m, i),
        }))
    }
}

fn transport_error(stage: Stage, err: &reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::unknown(format!("{stage} request failed: timed out"))
    } else if err.is_connect() {
        LookupError::unknown(format!("{stage} request failed: could not connect ({err})"))
    } else {
        LookupError::unknown(format!("{stage} request failed: {err}"))
    }
}

fn value_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

pub(crate) fn parse_geocoding(body: &str) -> Result<Location, LookupError> {
    let parsed: OmGeocodingResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::unknown(format!("Failed to parse geocoding response: {e}")))?;

    parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(Location::from)
        .ok_or(LookupError::NotFound)
}

pub(crate) fn parse_forecast(body: &str) -> Result<Forecast, LookupError> {
    let parsed: OmForecastResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::unknown(format!("Failed to parse forecast response: {e}")))?;

    let current = WeatherSnapshot {
        temperature_c: parsed.current_weather.temperature,
        wind_speed_kmh: parsed.current_weather.windspeed,
        weather_code: parsed.current_weather.weathercode,
        time: parsed.current_weather.time,
        timezone: parsed.timezone,
    };

    Ok(Forecast {
        current,
        hourly: parsed.hourly.map(OmHourly::into_series).unwrap_or_default(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
