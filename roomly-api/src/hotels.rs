use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use rand::Rng;
use roomly_catalog::{quote_with, round2, stay_nights, PriceBreakdown, PriceStrategy};
use roomly_core::{Booking, BookingRequest, Hotel};
use roomly_flags::FlagContext;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

fn default_guests() -> u32 {
    1
}

fn default_entity_id() -> String {
    "anonymous".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub location: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default = "default_entity_id")]
    pub entity_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub checkin: String,
    pub checkout: String,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default = "default_entity_id")]
    pub entity_id: String,
}

#[derive(Debug, Deserialize)]
pub struct EntityParams {
    #[serde(default = "default_entity_id")]
    pub entity_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub region: Option<String>,
    #[serde(default = "default_entity_id")]
    pub entity_id: String,
}

/// A catalog hotel annotated with the price resolved for this request.
#[derive(Debug, Serialize)]
pub struct PricedHotel {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub price: f64,
    pub price_label: String,
    pub price_breakdown: Option<PriceBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_discount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_member_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HotelSearchResponse {
    pub hotels: Vec<PricedHotel>,
    pub total_count: usize,
    pub price_display_strategy: String,
    pub real_time_availability: bool,
    pub loyalty_program_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub hotel_id: String,
    pub available: bool,
    pub available_rooms: u32,
    pub price_per_night: f64,
    pub total_price: f64,
    pub price_breakdown: Option<PriceBreakdown>,
    pub instant_booking_available: bool,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/hotels", get(search_hotels))
        .route("/api/hotels/popular", get(popular_hotels))
        .route("/api/hotels/{hotel_id}/availability", get(check_availability))
        .route("/api/hotels/{hotel_id}/similar", get(similar_hotels))
        .route("/api/hotels/{hotel_id}/book", post(book_hotel))
}

/// Search hotels and price the listing under the flag-selected strategy.
async fn search_hotels(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<HotelSearchResponse>, ApiError> {
    let mut context = FlagContext::new();
    context.insert("guests".to_string(), params.guests.to_string());
    context.insert(
        "has_checkin".to_string(),
        params.checkin.is_some().to_string(),
    );

    let strategy_flag = state
        .flags
        .price_display_strategy(&params.entity_id, &context)
        .await;
    let real_time = state
        .flags
        .real_time_availability(&params.entity_id, &context)
        .await;
    let loyalty = state.flags.loyalty_program(&params.entity_id, &context).await;

    let has_dates = params.checkin.is_some() && params.checkout.is_some();
    state
        .metrics
        .searches
        .with_label_values(&[
            params.location.as_deref().unwrap_or("all"),
            &has_dates.to_string(),
        ])
        .inc();
    state
        .metrics
        .record_flag(roomly_flags::PRICE_DISPLAY_STRATEGY, &strategy_flag.value);

    let strategy = PriceStrategy::from_variant(&strategy_flag.value);
    let nights = match (params.checkin.as_deref(), params.checkout.as_deref()) {
        (Some(checkin), Some(checkout)) => stay_nights(checkin, checkout).nights,
        _ => 1,
    };

    let mut rng = rand::thread_rng();
    let hotels: Vec<PricedHotel> = state
        .catalog
        .search(params.location.as_deref())
        .into_iter()
        .map(|hotel| {
            let quote = quote_with(hotel.base_price_per_night, nights, strategy, &mut rng);

            let (loyalty_discount, loyalty_member_price) =
                if loyalty.value && hotel.rating >= 4.5 {
                    (Some(10), Some(round2(quote.display_price * 0.9)))
                } else {
                    (None, None)
                };

            let mut listed = hotel.clone();
            let mut last_updated = None;
            if real_time.value {
                // Simulate a live inventory check with slight variation.
                listed.available_rooms = listed.available_rooms.saturating_sub(rng.gen_range(0..=2));
                last_updated = Some(Utc::now().to_rfc3339());
            }

            PricedHotel {
                hotel: listed,
                price: quote.display_price,
                price_label: quote.label,
                price_breakdown: quote.breakdown,
                loyalty_discount,
                loyalty_member_price,
                last_updated,
            }
        })
        .collect();

    tracing::info!(
        count = hotels.len(),
        strategy = %strategy_flag.value,
        loyalty = loyalty.value,
        "search completed"
    );

    Ok(Json(HotelSearchResponse {
        total_count: hotels.len(),
        hotels,
        price_display_strategy: strategy_flag.value,
        real_time_availability: real_time.value,
        loyalty_program_enabled: loyalty.value,
    }))
}

/// Quote a single hotel and report whether it can be booked right now.
async fn check_availability(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let hotel = state
        .catalog
        .get(&hotel_id)
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    let mut context = FlagContext::new();
    context.insert("hotel_category".to_string(), hotel.category.to_string());
    context.insert("guests".to_string(), params.guests.to_string());

    let strategy_flag = state
        .flags
        .price_display_strategy(&params.entity_id, &context)
        .await;
    let instant = state
        .flags
        .instant_booking(&params.entity_id, &context)
        .await;

    state
        .metrics
        .availability_checks
        .with_label_values(&[&hotel_id, &instant.value.to_string()])
        .inc();

    let strategy = PriceStrategy::from_variant(&strategy_flag.value);
    let nights = stay_nights(&params.checkin, &params.checkout).nights;
    let quote = quote_with(
        hotel.base_price_per_night,
        nights,
        strategy,
        &mut rand::thread_rng(),
    );

    let available = hotel.available_rooms > 0;

    Ok(Json(AvailabilityResponse {
        hotel_id,
        available,
        available_rooms: hotel.available_rooms,
        price_per_night: hotel.base_price_per_night,
        total_price: quote.display_price,
        price_breakdown: quote.breakdown,
        instant_booking_available: instant.value && available,
    }))
}

/// Create a booking. The instant-booking flag decides whether it is
/// confirmed immediately or waits for manual approval.
async fn book_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(params): Query<EntityParams>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let hotel = state
        .catalog
        .get(&hotel_id)
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    if req.hotel_id != hotel_id {
        return Err(ApiError::Validation("Hotel ID mismatch".to_string()));
    }

    let mut context = FlagContext::new();
    context.insert("hotel_category".to_string(), hotel.category.to_string());

    let instant = state
        .flags
        .instant_booking(&params.entity_id, &context)
        .await;
    let strategy_flag = state
        .flags
        .price_display_strategy(&params.entity_id, &context)
        .await;
    let strategy = PriceStrategy::from_variant(&strategy_flag.value);

    let booking = state.bookings.create(
        &req,
        hotel,
        strategy,
        instant.value,
        &mut rand::thread_rng(),
    );

    state
        .metrics
        .bookings
        .with_label_values(&[
            &hotel_id,
            booking.status.as_str(),
            &instant.value.to_string(),
        ])
        .inc();
    state
        .metrics
        .record_flag(roomly_flags::INSTANT_BOOKING, &instant.value.to_string());

    Ok(Json(booking))
}

/// Flag-gated convenience read path: other hotels in the same category.
async fn similar_hotels(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(params): Query<EntityParams>,
) -> Result<Json<Value>, ApiError> {
    let context = FlagContext::new();
    let enabled = state.flags.similar_hotels(&params.entity_id, &context).await;

    if !enabled.value {
        return Ok(Json(json!({
            "enabled": false,
            "hotels": [],
            "message": "Similar hotels feature is not enabled",
        })));
    }

    let hotel = state
        .catalog
        .get(&hotel_id)
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    let similar = state.catalog.similar(&hotel_id, hotel.category);

    Ok(Json(json!({
        "enabled": true,
        "hotels": similar,
        "count": similar.len(),
    })))
}

/// Convenience read path: top-rated hotels, optionally per region.
async fn popular_hotels(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> Result<Json<Value>, ApiError> {
    let ranked = state.catalog.popular(params.region.as_deref());
    let total_count = ranked.len();
    let top: Vec<&Hotel> = ranked.into_iter().take(5).collect();

    Ok(Json(json!({
        "hotels": top,
        "total_count": total_count,
    })))
}
