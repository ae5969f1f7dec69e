//! End-to-end tests through the router against in-memory SQLite.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, ADMIN_PASSWORD};

// =============================================================================
// Infrastructure & auth
// =============================================================================

#[tokio::test]
async fn test_health_reports_both_services() {
    let app = TestApp::spawn().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "healthy");
}

#[tokio::test]
async fn test_login_response_shape() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/login",
            Some(json!({ "username": "admin", "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["fullName"], "System Administrator");
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["tokenType"], "Bearer");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/login",
            Some(json!({ "username": "admin", "password": "not-it" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_api_requires_token() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .send(Method::GET, "/api/parking-slots", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = app
        .send(Method::GET, "/api/parking-slots", None, Some("garbage"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_creates_staff_account() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/users",
            json!({
                "username": "attendant1",
                "password": "secret1",
                "fullName": "Alice Uwase",
                "role": "staff"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let staff_token = app.login("attendant1", "secret1").await;
    let (status, me) = app
        .send(Method::GET, "/api/me", None, Some(&staff_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "attendant1");
    assert_eq!(me["role"], "staff");

    // Staff may not create accounts
    let (status, body) = app
        .send(
            Method::POST,
            "/api/users",
            Some(json!({
                "username": "attendant2",
                "password": "secret2",
                "fullName": "Bob",
                "role": "staff"
            })),
            Some(&staff_token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_user_rejections() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .post(
            "/api/users",
            json!({ "username": "admin", "password": "secret1", "fullName": "Dup", "role": "staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/users",
            json!({ "username": "shorty", "password": "12345", "fullName": "Short", "role": "staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/users",
            json!({ "username": "owner1", "password": "secret1", "fullName": "Owner", "role": "owner" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Slots, entry & exit
// =============================================================================

#[tokio::test]
async fn test_seeded_slots_are_available() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/parking-slots").await;
    let slots = body.as_array().expect("array");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(slots.len(), 10);
    assert_eq!(slots[0]["SlotNumber"], "A1");
    assert_eq!(slots[9]["SlotNumber"], "B5");
    assert!(slots.iter().all(|s| s["Status"] == "Available"));
}

#[tokio::test]
async fn test_entry_occupies_slot() {
    let app = TestApp::spawn().await;

    app.enter("RAB123A", "A1", "2024-01-01T10:00:00Z").await;

    assert_eq!(app.slot_status("A1").await, "Occupied");
    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["PlateNumber"], "RAB123A");
    assert_eq!(records[0]["PaymentStatus"], "Pending");
    assert_eq!(records[0]["SlotStatus"], "Occupied");
    assert!(records[0]["ExitTime"].is_null());
}

#[tokio::test]
async fn test_entry_into_occupied_slot_fails_without_record() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "A1", "2024-01-01T10:00:00Z").await;

    let (status, body) = app
        .post(
            "/api/car-entry",
            json!({
                "plateNumber": "RAC456B",
                "driverName": "Eric",
                "phoneNumber": "0788000000",
                "slotNumber": "A1"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "SLOT_UNAVAILABLE");
    assert_eq!(app.records().await.len(), 1);
}

#[tokio::test]
async fn test_entry_into_unknown_slot_fails() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/car-entry",
            json!({
                "plateNumber": "RAB123A",
                "driverName": "Jean",
                "phoneNumber": "0788000000",
                "slotNumber": "Z9"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "SLOT_UNAVAILABLE");
    assert!(app.records().await.is_empty());
}

#[tokio::test]
async fn test_entry_validation() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/car-entry",
            json!({
                "plateNumber": "",
                "driverName": "Jean",
                "phoneNumber": "phone",
                "slotNumber": "A1"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(app.slot_status("A1").await, "Available");
}

#[tokio::test]
async fn test_exit_bills_started_hours_and_frees_slot() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "A1", "2024-01-01T10:00:00Z").await;

    let (status, body) = app
        .post(
            "/api/car-exit",
            json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T11:01:00Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 61);
    assert_eq!(body["hours"], 2);
    assert_eq!(body["amount"], 1000);
    assert_eq!(body["hourlyRate"], 500);
    assert_eq!(
        body["message"],
        "Parking fee calculated at 500 RWF per hour for 2 hour(s)"
    );

    assert_eq!(app.slot_status("A1").await, "Available");
    let records = app.records().await;
    assert_eq!(records[0]["Duration"], 61);
    assert_eq!(records[0]["Amount"], 1000);
    assert_eq!(records[0]["PaymentStatus"], "Pending");
}

#[tokio::test]
async fn test_exit_unknown_plate_is_not_found() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post("/api/car-exit", json!({ "plateNumber": "NOPE000" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_exit_again_rebills_latest_session() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "A1", "2024-01-01T10:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T10:30:00Z" }),
    )
    .await;
    app.post(
        "/api/record-payment",
        json!({ "plateNumber": "RAB123A", "amount": 500 }),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/car-exit",
            json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T12:01:00Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 121);
    assert_eq!(body["hours"], 3);
    assert_eq!(body["amount"], 1500);

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["Amount"], 1500);
    assert_eq!(records[0]["PaymentStatus"], "Pending");
}

#[tokio::test]
async fn test_exit_prefers_parked_session() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "A1", "2024-01-01T08:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T09:00:00Z" }),
    )
    .await;
    // Still parked, though entered before the finished stay
    app.enter("RAB123A", "A2", "2024-01-01T07:00:00Z").await;

    let (status, body) = app
        .post(
            "/api/car-exit",
            json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T10:00:00Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 180);
    assert_eq!(app.slot_status("A2").await, "Available");
    assert!(app
        .records()
        .await
        .iter()
        .all(|r| !r["ExitTime"].is_null()));
}

#[tokio::test]
async fn test_exit_frees_slot_of_paid_session() {
    let app = TestApp::spawn().await;
    app.enter("XYZ222", "B2", "2024-01-01T10:00:00Z").await;
    let (status, _) = app
        .post(
            "/api/record-payment",
            json!({ "plateNumber": "XYZ222", "amount": 500 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.records().await[0]["PaymentStatus"], "Paid");

    let (status, _) = app
        .post(
            "/api/car-exit",
            json!({ "plateNumber": "XYZ222", "exitTime": "2024-01-01T10:45:00Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.slot_status("B2").await, "Available");
    assert_eq!(app.records().await[0]["PaymentStatus"], "Pending");
}

#[tokio::test]
async fn test_exit_before_entry_rejected() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "A1", "2024-01-01T10:00:00Z").await;

    let (status, _) = app
        .post(
            "/api/car-exit",
            json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T09:00:00Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // Rolled back: still parked
    assert_eq!(app.slot_status("A1").await, "Occupied");
}

// =============================================================================
// Payments & record maintenance
// =============================================================================

#[tokio::test]
async fn test_payment_marks_sessions_paid() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "A1", "2024-01-01T10:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T11:01:00Z" }),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/record-payment",
            json!({ "plateNumber": "RAB123A", "amount": 1000, "paymentDate": "2024-01-01T11:05:00Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment recorded");
    assert_eq!(app.records().await[0]["PaymentStatus"], "Paid");
}

#[tokio::test]
async fn test_negative_payment_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(
            "/api/record-payment",
            json!({ "plateNumber": "RAB123A", "amount": -1 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_record_moves_slot() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "A1", "2024-01-01T10:00:00Z").await;
    app.enter("RAC456B", "A2", "2024-01-01T10:05:00Z").await;
    let id = app
        .records()
        .await
        .into_iter()
        .find(|r| r["PlateNumber"] == "RAB123A")
        .map(|r| r["Id"].as_str().unwrap_or_default().to_string())
        .expect("record id");
    let uri = format!("/api/parking-records/{}", id);

    // Target slot taken
    let (status, body) = app
        .put(
            &uri,
            json!({ "PlateNumber": "RAB123A", "DriverName": "Jean", "PhoneNumber": "0788000000", "SlotNumber": "A2" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "SLOT_UNAVAILABLE");

    let (status, body) = app
        .put(
            &uri,
            json!({ "PlateNumber": "RAB999Z", "DriverName": "Jean M.", "PhoneNumber": "0788000000", "SlotNumber": "B1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Record updated successfully");

    assert_eq!(app.slot_status("A1").await, "Available");
    assert_eq!(app.slot_status("B1").await, "Occupied");
    let moved = app
        .records()
        .await
        .into_iter()
        .find(|r| r["Id"] == id.as_str())
        .expect("moved record");
    assert_eq!(moved["PlateNumber"], "RAB999Z");
    assert_eq!(moved["SlotNumber"], "B1");
}

#[tokio::test]
async fn test_finished_session_edit_and_delete_move_slots() {
    let app = TestApp::spawn().await;
    app.enter("ABC111", "A1", "2024-01-01T10:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "ABC111", "exitTime": "2024-01-01T11:00:00Z" }),
    )
    .await;
    app.enter("DEF333", "A3", "2024-01-01T10:30:00Z").await;
    let id = app
        .records()
        .await
        .into_iter()
        .find(|r| r["PlateNumber"] == "ABC111")
        .map(|r| r["Id"].as_str().unwrap_or_default().to_string())
        .expect("finished stay");
    let uri = format!("/api/parking-records/{}", id);

    let (status, _) = app
        .put(
            &uri,
            json!({ "PlateNumber": "ABC111", "DriverName": "Jean", "PhoneNumber": "0788000000", "SlotNumber": "A3" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put(
            &uri,
            json!({ "PlateNumber": "ABC111", "DriverName": "Jean", "PhoneNumber": "0788000000", "SlotNumber": "B1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.slot_status("A1").await, "Available");
    assert_eq!(app.slot_status("B1").await, "Occupied");

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.slot_status("B1").await, "Available");
    assert_eq!(app.slot_status("A3").await, "Occupied");
}

#[tokio::test]
async fn test_update_and_delete_missing_record() {
    let app = TestApp::spawn().await;
    let uri = format!("/api/parking-records/{}", uuid::Uuid::new_v4());

    let (status, _) = app
        .put(
            &uri,
            json!({ "PlateNumber": "RAB123A", "DriverName": "Jean", "PhoneNumber": "0788000000", "SlotNumber": "A1" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/parking-records/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_cascades_plate_payments() {
    let app = TestApp::spawn().await;

    // Two stays for the same plate, both paid by one payment
    app.enter("RAB123A", "A1", "2024-01-01T08:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "RAB123A", "exitTime": "2024-01-01T09:00:00Z" }),
    )
    .await;
    app.enter("RAB123A", "A2", "2024-01-01T10:00:00Z").await;
    app.post(
        "/api/record-payment",
        json!({ "plateNumber": "RAB123A", "amount": 500, "paymentDate": "2024-01-01T10:10:00Z" }),
    )
    .await;

    let (_, rows) = app.get("/api/reports").await;
    assert!(rows
        .as_array()
        .expect("rows")
        .iter()
        .all(|r| !r["PaymentDate"].is_null()));

    let first = app
        .records()
        .await
        .into_iter()
        .find(|r| r["SlotNumber"] == "A1")
        .map(|r| r["Id"].as_str().unwrap_or_default().to_string())
        .expect("first stay");

    let (status, body) = app
        .delete(&format!("/api/parking-records/{}", first))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Record deleted successfully");

    let (_, rows) = app.get("/api/reports").await;
    let rows = rows.as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["SlotNumber"], "A2");
    assert!(rows[0]["PaymentDate"].is_null());
    // The remaining stay is still parked
    assert_eq!(app.slot_status("A2").await, "Occupied");
}

#[tokio::test]
async fn test_delete_open_session_frees_slot() {
    let app = TestApp::spawn().await;
    app.enter("RAB123A", "B3", "2024-01-01T10:00:00Z").await;
    let id = app.records().await[0]["Id"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    let (status, _) = app.delete(&format!("/api/parking-records/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.slot_status("B3").await, "Available");
    assert!(app.records().await.is_empty());
}

// =============================================================================
// Reports & dashboard
// =============================================================================

async fn seed_history(app: &TestApp) {
    app.enter("DAY1AAA", "A1", "2024-01-01T10:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "DAY1AAA", "exitTime": "2024-01-01T11:01:00Z" }),
    )
    .await;
    app.post(
        "/api/record-payment",
        json!({ "plateNumber": "DAY1AAA", "amount": 1000, "paymentDate": "2024-01-01T11:05:00Z" }),
    )
    .await;

    app.enter("DAY1BBB", "A2", "2024-01-01T12:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "DAY1BBB", "exitTime": "2024-01-01T12:30:00Z" }),
    )
    .await;

    app.enter("DAY5CCC", "A3", "2024-01-05T09:00:00Z").await;
    app.post(
        "/api/car-exit",
        json!({ "plateNumber": "DAY5CCC", "exitTime": "2024-01-05T09:10:00Z" }),
    )
    .await;
}

#[tokio::test]
async fn test_report_filters_by_status_and_dates() {
    let app = TestApp::spawn().await;
    seed_history(&app).await;

    let (status, all) = app.get("/api/reports").await;
    assert_eq!(status, StatusCode::OK);
    let all = all.as_array().expect("rows").clone();
    assert_eq!(all.len(), 3);
    // Newest entry first
    assert_eq!(all[0]["PlateNumber"], "DAY5CCC");

    let (_, paid) = app.get("/api/reports?filter=paid").await;
    let paid = paid.as_array().expect("rows").clone();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0]["PlateNumber"], "DAY1AAA");
    assert!(!paid[0]["PaymentDate"].is_null());

    let (_, pending) = app.get("/api/reports?filter=pending").await;
    assert_eq!(pending.as_array().expect("rows").len(), 2);

    let (_, first_day) = app
        .get("/api/reports?startDate=2024-01-01&endDate=2024-01-01")
        .await;
    assert_eq!(first_day.as_array().expect("rows").len(), 2);

    let (_, from_second) = app.get("/api/reports?startDate=2024-01-02").await;
    assert_eq!(from_second.as_array().expect("rows").len(), 1);

    let (_, until_fourth) = app.get("/api/reports?endDate=2024-01-04").await;
    assert_eq!(until_fourth.as_array().expect("rows").len(), 2);
}

#[tokio::test]
async fn test_report_rejects_bad_queries() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .get("/api/reports?startDate=2024-01-05&endDate=2024-01-01")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/reports?filter=unpaid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/reports?startDate=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_summary() {
    let app = TestApp::spawn().await;
    seed_history(&app).await;

    let (status, summary) = app
        .get("/api/reports/summary?startDate=2024-01-01&endDate=2024-01-01")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalRecords"], 2);
    assert_eq!(summary["paidRevenue"], 1000);
    assert_eq!(summary["pendingRevenue"], 500);
    assert_eq!(summary["totalRevenue"], 1500);
    assert_eq!(summary["pendingPayments"], 1);
    // (61 + 30) / 2 rounded
    assert_eq!(summary["averageDuration"], 46);
    assert_eq!(summary["occupancyRate"], 0);
}

#[tokio::test]
async fn test_dashboard_counts_today() {
    let app = TestApp::spawn().await;
    seed_history(&app).await;

    // Entered now, so counted as today
    let (status, _) = app
        .post(
            "/api/car-entry",
            json!({
                "plateNumber": "TODAY01",
                "driverName": "Grace",
                "phoneNumber": "0788111222",
                "slotNumber": "B1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, dashboard) = app.get("/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["total"], 10);
    assert_eq!(dashboard["occupied"], 1);
    assert_eq!(dashboard["available"], 9);
    assert_eq!(dashboard["todayEntries"], 1);
    assert_eq!(dashboard["totalRevenue"], 0);

    let recent = dashboard["recentRecords"].as_array().expect("recent");
    assert_eq!(recent.len(), 4);
    assert_eq!(recent[0]["PlateNumber"], "TODAY01");
}
