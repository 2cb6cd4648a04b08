use aerodesk_core::{Flight, NewFlight};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/flights", get(list_flights).post(create_flight))
}

/// GET /api/flights
async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.flights.list().await?))
}

/// POST /api/flights
async fn create_flight(
    State(state): State<AppState>,
    payload: Result<Json<NewFlight>, JsonRejection>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let Json(req) = payload?;
    let flight = state.flights.append(req.into_flight()?).await?;

    info!("Flight {} created with id {}", flight.flight_number, flight.id);
    Ok((StatusCode::CREATED, Json(flight)))
}
