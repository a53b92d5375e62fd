use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::Level;

use crate::error::EngineError;
use crate::service::PredictionService;
use crate::types::{PredictionResult, RawInput};
use crate::weather::{self, WeatherQuery, WeatherReport};

// ---------- Error mapping ----------

pub fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Degraded mode is an operator problem, bad input is the caller's.
pub fn log_level_for(err: &EngineError) -> Level {
    match err {
        EngineError::ModelUnavailable => Level::WARN,
        e if e.is_client_error() => Level::DEBUG,
        _ => Level::ERROR,
    }
}

fn error_response(err: EngineError) -> Response {
    let status = status_for(&err);
    let level = log_level_for(&err);
    if level == Level::ERROR {
        tracing::error!("prediction failed: {}", err);
    } else if level == Level::WARN {
        tracing::warn!("prediction refused: {}", err);
    } else {
        tracing::debug!("prediction rejected: {}", err);
    }
    let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
        format!("Prediction error: {err}")
    } else {
        err.to_string()
    };
    (status, Json(json!({ "detail": detail }))).into_response()
}

// ---------- Handlers ----------

async fn root(State(svc): State<PredictionService>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Crop Yield Prediction API",
        "status": "running",
        "model_loaded": svc.is_loaded(),
    }))
}

async fn health(State(svc): State<PredictionService>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "model_loaded": svc.is_loaded(),
    }))
}

async fn predict(
    State(svc): State<PredictionService>,
    Json(payload): Json<RawInput>,
) -> Result<Json<PredictionResult>, Response> {
    svc.predict(&payload).map(Json).map_err(error_response)
}

fn weather_response(q: &WeatherQuery) -> Result<Json<WeatherReport>, Response> {
    weather::resolve(q).map(Json).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Either city name or coordinates must be provided" })),
        )
            .into_response()
    })
}

async fn weather_get(Query(q): Query<WeatherQuery>) -> Result<Json<WeatherReport>, Response> {
    weather_response(&q)
}

async fn weather_post(Json(q): Json<WeatherQuery>) -> Result<Json<WeatherReport>, Response> {
    weather_response(&q)
}

pub fn router(svc: PredictionService) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/weather", get(weather_get).post(weather_post))
        .with_state(svc)
}
