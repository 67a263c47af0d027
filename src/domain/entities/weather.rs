//! Current weather entity.

use serde::{Deserialize, Serialize};

/// Current conditions as exposed by `/api/weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub location: String,
    /// Temperature in °C.
    pub temperature: Option<f64>,
    /// WMO weather interpretation code.
    pub condition: Option<i64>,
    /// Wind speed in km/h.
    pub wind_speed: Option<f64>,
    pub updated_at: String,
}
