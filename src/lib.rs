//! Air quality correction service.
//!
//! Thin HTTP layer over three pre-trained regressors: parse a sensor
//! reading, build the fixed-order feature row, run each model once, return
//! the three corrected values.

pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod types;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use error::ApiError;
use model::ModelSet;
use types::{PredictionResult, SensorReading};

#[derive(Clone)]
pub struct AppState {
    pub models: Arc<ModelSet>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Air Quality Prediction API is running!" }))
}

async fn predict(
    State(state): State<AppState>,
    Json(reading): Json<SensorReading>,
) -> Result<Json<PredictionResult>, ApiError> {
    let features = features::feature_vector(&reading)?;

    let co_ppm = state.models.co.predict(&features)?;
    let pm25 = state.models.pm25.predict(&features)?;
    let pm10 = state.models.pm10.predict(&features)?;

    tracing::debug!(co_ppm, pm25, pm10, "prediction served");

    Ok(Json(PredictionResult { co_ppm, pm25, pm10 }))
}
