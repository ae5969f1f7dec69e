//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, parking_handler, record_handler, report_handler, user_handler,
};
use crate::domain::{
    Dashboard, ExitReceipt, ParkingRecord, ParkingRecordRow, ParkingSlot, PaymentStatus,
    ReportRow, ReportSummary, SlotStatus, StatusFilter, UserResponse, UserRole,
};
use crate::services::LoginResponse;
use crate::types::{MessageResponse, StatusMessage};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Parking Management API",
        version = "0.1.0",
        description = "Slot occupancy, billing, payments and reports for a staffed parking lot"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        user_handler::create_user,
        user_handler::get_current_user,
        parking_handler::list_slots,
        parking_handler::car_entry,
        parking_handler::car_exit,
        parking_handler::record_payment,
        record_handler::list_records,
        record_handler::update_record,
        record_handler::delete_record,
        report_handler::report,
        report_handler::summary,
        report_handler::dashboard,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            SlotStatus,
            ParkingSlot,
            PaymentStatus,
            ParkingRecord,
            ParkingRecordRow,
            ExitReceipt,
            StatusFilter,
            ReportRow,
            ReportSummary,
            Dashboard,
            LoginResponse,
            MessageResponse,
            StatusMessage,
            auth_handler::LoginRequest,
            user_handler::CreateUserRequest,
            parking_handler::CarEntryRequest,
            parking_handler::CarExitRequest,
            parking_handler::PaymentRequest,
            record_handler::UpdateRecordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Staff login"),
        (name = "Users", description = "Staff accounts"),
        (name = "Parking", description = "Slots, entries, exits and payments"),
        (name = "Records", description = "Parking record maintenance"),
        (name = "Reports", description = "Reports, statistics and dashboard")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/login"))
                        .build(),
                ),
            );
        }
    }
}
