//! Front-desk handlers: slots, entry, exit and payment.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::PHONE_NUMBER;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ExitReceipt, NewEntry, ParkingSlot};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Vehicle entering the lot
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarEntryRequest {
    #[validate(length(min = 1, max = 100, message = "Plate number is required"))]
    #[schema(example = "RAB123A")]
    pub plate_number: String,
    #[validate(length(min = 1, max = 100, message = "Driver name is required"))]
    #[schema(example = "Jean Mugisha")]
    pub driver_name: String,
    #[validate(regex(path = *PHONE_NUMBER, message = "Phone number must be 7 to 20 digits"))]
    #[schema(example = "+250788123456")]
    pub phone_number: String,
    #[validate(length(min = 1, max = 100, message = "Slot number is required"))]
    #[schema(example = "A1")]
    pub slot_number: String,
    /// Defaults to the time of the request
    pub entry_time: Option<DateTime<Utc>>,
}

/// Vehicle leaving the lot
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarExitRequest {
    #[validate(length(min = 1, max = 100, message = "Plate number is required"))]
    #[schema(example = "RAB123A")]
    pub plate_number: String,
    /// Defaults to the time of the request
    pub exit_time: Option<DateTime<Utc>>,
}

/// Money received for a plate
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[validate(length(min = 1, max = 100, message = "Plate number is required"))]
    #[schema(example = "RAB123A")]
    pub plate_number: String,
    #[validate(range(min = 0, message = "Amount must not be negative"))]
    #[schema(example = 1000)]
    pub amount: i64,
    /// Defaults to the time of the request
    pub payment_date: Option<DateTime<Utc>>,
}

pub fn parking_routes() -> Router<AppState> {
    Router::new()
        .route("/parking-slots", get(list_slots))
        .route("/car-entry", post(car_entry))
        .route("/car-exit", post(car_exit))
        .route("/record-payment", post(record_payment))
}

/// List every slot with its status
#[utoipa::path(
    get,
    path = "/api/parking-slots",
    tag = "Parking",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All slots", body = Vec<ParkingSlot>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_slots(State(state): State<AppState>) -> AppResult<Json<Vec<ParkingSlot>>> {
    Ok(Json(state.parking_service.list_slots().await?))
}

/// Record a vehicle entering and occupy its slot
#[utoipa::path(
    post,
    path = "/api/car-entry",
    tag = "Parking",
    request_body = CarEntryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Entry recorded", body = MessageResponse),
        (status = 400, description = "Validation error or slot not available"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn car_entry(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CarEntryRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .parking_service
        .record_entry(NewEntry {
            plate_number: payload.plate_number,
            driver_name: payload.driver_name,
            phone_number: payload.phone_number,
            slot_number: payload.slot_number,
            entry_time: payload.entry_time.unwrap_or_else(Utc::now),
        })
        .await?;

    Ok(Json(MessageResponse::new("Car entry recorded")))
}

/// Bill a departing vehicle and free its slot
#[utoipa::path(
    post,
    path = "/api/car-exit",
    tag = "Parking",
    request_body = CarExitRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Fee calculated", body = ExitReceipt),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No parked vehicle with this plate")
    )
)]
pub async fn car_exit(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CarExitRequest>,
) -> AppResult<Json<ExitReceipt>> {
    let receipt = state
        .parking_service
        .record_exit(
            payload.plate_number,
            payload.exit_time.unwrap_or_else(Utc::now),
        )
        .await?;

    Ok(Json(receipt))
}

/// Record a payment and settle the plate's pending sessions
#[utoipa::path(
    post,
    path = "/api/record-payment",
    tag = "Parking",
    request_body = PaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment recorded", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn record_payment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PaymentRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .parking_service
        .record_payment(
            payload.plate_number,
            payload.amount,
            payload.payment_date.unwrap_or_else(Utc::now),
        )
        .await?;

    Ok(Json(MessageResponse::new("Payment recorded")))
}
