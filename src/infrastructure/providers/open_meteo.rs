//! Open-Meteo forecast payload mapping and request URL construction.

use crate::domain::entities::Weather;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Coordinates and/or city name of a weather lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
}

impl WeatherQuery {
    /// Cache key suffix; absent parts are left empty.
    pub fn key_suffix(&self) -> String {
        fn part<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }
        format!("{}:{}:{}", part(&self.lat), part(&self.lon), part(&self.city))
    }
}

/// Builds the forecast URL. Coordinates are only sent as a pair.
pub fn request_url(base: &Url, query: &WeatherQuery) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("current_weather", "true")
            .append_pair("hourly", "temperature_2m,wind_speed_10m");
        if let (Some(lat), Some(lon)) = (query.lat, query.lon) {
            pairs
                .append_pair("latitude", &lat.to_string())
                .append_pair("longitude", &lon.to_string());
        }
        if let Some(city) = &query.city {
            pairs.append_pair("city", city);
        }
    }
    url
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Forecast {
    timezone: Option<String>,
    current_weather: CurrentWeather,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrentWeather {
    temperature: Option<f64>,
    weathercode: Option<i64>,
    windspeed: Option<f64>,
    time: Option<String>,
}

/// Maps a forecast response. `now` stands in for a missing observation time.
pub fn normalize(data: &Value, now: &str) -> Weather {
    let forecast = Forecast::deserialize(data).unwrap_or_default();
    let current = forecast.current_weather;

    Weather {
        location: forecast.timezone.unwrap_or_else(|| "Unknown".to_string()),
        temperature: current.temperature,
        condition: current.weathercode,
        wind_speed: current.windspeed,
        updated_at: current.time.unwrap_or_else(|| now.to_string()),
    }
}
