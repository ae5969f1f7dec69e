//! Parking record maintenance handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::PHONE_NUMBER;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ParkingRecordRow, RecordUpdate};
use crate::errors::{AppError, AppResult};
use crate::types::MessageResponse;

/// Corrected session details. Keys are PascalCase like the record rows.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRecordRequest {
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
    #[schema(example = "A2")]
    pub slot_number: String,
}

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/parking-records", get(list_records))
        .route(
            "/parking-records/:id",
            put(update_record).delete(delete_record),
        )
}

fn record_id(path: Result<Path<Uuid>, PathRejection>) -> AppResult<Uuid> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::bad_request("Record id must be a UUID"))
}

/// List all parking records, newest entry first
#[utoipa::path(
    get,
    path = "/api/parking-records",
    tag = "Records",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All records", body = Vec<ParkingRecordRow>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_records(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ParkingRecordRow>>> {
    Ok(Json(state.parking_service.list_records().await?))
}

/// Correct a record, moving it to another slot if needed
#[utoipa::path(
    put,
    path = "/api/parking-records/{id}",
    tag = "Records",
    params(("id" = Uuid, Path, description = "Record ID")),
    request_body = UpdateRecordRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Record updated", body = MessageResponse),
        (status = 400, description = "Validation error or slot not available"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn update_record(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<UpdateRecordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let id = record_id(path)?;

    state
        .parking_service
        .update_record(
            id,
            RecordUpdate {
                plate_number: payload.plate_number,
                driver_name: payload.driver_name,
                phone_number: payload.phone_number,
                slot_number: payload.slot_number,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Record updated successfully")))
}

/// Delete a record and every payment of its plate
#[utoipa::path(
    delete,
    path = "/api/parking-records/{id}",
    tag = "Records",
    params(("id" = Uuid, Path, description = "Record ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_record(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let id = record_id(path)?;
    state.parking_service.delete_record(id).await?;

    Ok(Json(MessageResponse::new("Record deleted successfully")))
}
