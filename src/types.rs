use serde::{Deserialize, Serialize};

/// One raw sensor sample. Lives for a single request.
///
/// `co_conv_linear_ppm`, `no2_raw` and `no2_mv` may be omitted from the
/// request body and default to 0.0; everything else is required.
#[derive(Debug, Deserialize)]
pub struct SensorReading {
    pub co_raw: f64,
    #[serde(default)]
    pub co_conv_linear_ppm: f64,
    #[serde(default)]
    pub no2_raw: f64,
    #[serde(default)]
    pub no2_mv: f64,
    pub pm25_raw: f64,
    pub pm10_raw: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: String,
}

/// Corrected readings, one scalar per model.
#[derive(Debug, Serialize)]
pub struct PredictionResult {
    pub co_ppm: f64,
    pub pm25: f64,
    pub pm10: f64,
}
