//! DTOs for the weather endpoint.

use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::{Validate, ValidationError};

use crate::infrastructure::providers::open_meteo::WeatherQuery;

/// `GET /api/weather?lat=48.85&lon=2.35` or `?city=Paris`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_location"))]
pub struct WeatherParams {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,

    #[serde(default, deserialize_with = "super::trim::option")]
    #[validate(length(min = 2, max = 100))]
    pub city: Option<String>,
}

/// Needs a full coordinate pair or a city.
fn validate_location(params: &WeatherParams) -> Result<(), ValidationError> {
    let finite = [params.lat, params.lon]
        .into_iter()
        .flatten()
        .all(f64::is_finite);
    if !finite {
        return Err(ValidationError::new("coordinates")
            .with_message("Coordinates must be finite numbers".into()));
    }

    let has_pair = params.lat.is_some() && params.lon.is_some();
    if has_pair || params.city.is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("location")
            .with_message("Provide lat and lon, or city".into()))
    }
}

impl From<WeatherParams> for WeatherQuery {
    fn from(params: WeatherParams) -> Self {
        Self {
            lat: params.lat,
            lon: params.lon,
            city: params.city,
        }
    }
}
