use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use roomly_core::{Booking, BookingStatus, BookingUpdateRequest};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings))
        .route(
            "/api/bookings/{booking_id}",
            get(get_booking).patch(update_booking),
        )
}

// The admin worker polls this endpoint for pending bookings and PATCHes
// them back; field names here are its wire contract.
async fn list_bookings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<BookingsResponse>, ApiError> {
    let filter = params
        .status
        .as_deref()
        .map(|s| {
            s.parse::<BookingStatus>()
                .map_err(|err| ApiError::Validation(err.to_string()))
        })
        .transpose()?;

    let bookings = state.bookings.list(filter);
    Ok(Json(BookingsResponse {
        total: bookings.len(),
        bookings,
    }))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state.bookings.get(&booking_id)?;
    Ok(Json(booking))
}

async fn update_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    Json(req): Json<BookingUpdateRequest>,
) -> Result<Json<Booking>, ApiError> {
    let booking =
        state
            .bookings
            .update(&booking_id, req.status.as_deref(), req.confirmation_number)?;
    Ok(Json(booking))
}
