mod common;

use axum::http::StatusCode;
use common::TestApp;
use hotel_desk::db::DbPayment;
use hotel_desk::db::models::PaymentStatus;
use serde_json::{Value, json};

fn stay(email: &str) -> Value {
    json!({
        "first_name": "Ama",
        "last_name": "Mensah",
        "email": email,
        "phone": "+233200000000",
        "city": "Accra",
        "adult": 2,
        "children": 1,
        "rooms": 1,
        "room_type": "deluxe",
        "in_date": "2026-12-01",
        "out_date": "2026-12-04",
        "special_request": "late check-in",
    })
}

#[tokio::test]
async fn booking_is_created_pending_and_shows_in_history() {
    let app = TestApp::spawn().await;
    let session = app.signup("ama@hotel.test", "secret1").await;

    let created = app.post("/bookings", Some(&session), stay("ama@hotel.test")).await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let booking = &created.body["booking"];
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["user_email"], "ama@hotel.test");
    assert_eq!(booking["adults"], 2);
    assert_eq!(booking["in_date"], "2026-12-01");

    let history = app.get("/user/history", Some(&session)).await;
    assert_eq!(history.status, StatusCode::OK);
    let rows = history.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["booking_id"], booking["booking_id"]);
    assert_eq!(rows[0]["special_request"], "late check-in");
}

#[tokio::test]
async fn booking_requires_a_session_and_valid_fields() {
    let app = TestApp::spawn().await;

    let anonymous = app.post("/bookings", None, stay("a@hotel.test")).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let session = app.signup("v@hotel.test", "secret1").await;

    let mut missing = stay("v@hotel.test");
    missing.as_object_mut().unwrap().remove("room_type");
    missing.as_object_mut().unwrap().remove("phone");
    let resp = app.post("/bookings", Some(&session), missing).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Required fields missing: phone, room_type");

    let mut backwards = stay("v@hotel.test");
    backwards["out_date"] = json!("2026-11-30");
    let resp = app.post("/bookings", Some(&session), backwards).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let mut nobody = stay("v@hotel.test");
    nobody["adult"] = json!(0);
    let resp = app.post("/bookings", Some(&session), nobody).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let history = app.get("/user/history", Some(&session)).await;
    assert_eq!(history.body, json!([]));
}

#[tokio::test]
async fn users_cancel_only_their_own_bookings() {
    let app = TestApp::spawn().await;
    let owner = app.signup("owner@hotel.test", "secret1").await;
    let stranger = app.signup("stranger@hotel.test", "secret1").await;

    let created = app.post("/bookings", Some(&owner), stay("owner@hotel.test")).await;
    let id = created.body["booking"]["booking_id"].as_i64().unwrap();

    let foreign = app
        .post("/cancelbooking", Some(&stranger), json!({ "booking_id": id }))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let missing = app.post("/cancelbooking", Some(&owner), json!({})).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "Booking ID is required");

    let garbage = app
        .post("/cancelbooking", Some(&owner), json!({ "booking_id": "abc" }))
        .await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);

    let cancelled = app
        .post("/cancelbooking", Some(&owner), json!({ "booking_id": id.to_string() }))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["booking"]["status"], "cancelled");

    // cancelling twice is harmless
    let again = app
        .post("/cancelbooking", Some(&owner), json!({ "booking_id": id }))
        .await;
    assert_eq!(again.status, StatusCode::OK);

    let unknown = app
        .post("/cancelbooking", Some(&owner), json!({ "booking_id": 9999 }))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn staff_can_cancel_any_booking() {
    let app = TestApp::spawn().await;
    let owner = app.signup("guest@hotel.test", "secret1").await;
    let created = app.post("/bookings", Some(&owner), stay("guest@hotel.test")).await;
    let id = created.body["booking"]["booking_id"].as_i64().unwrap();

    let root = app.login_superadmin().await;
    let resp = app
        .post("/cancelbooking", Some(&root), json!({ "booking_id": id }))
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let history = app.get("/user/history", Some(&owner)).await;
    assert_eq!(history.body[0]["status"], "cancelled");
}

#[tokio::test]
async fn card_payment_confirms_the_booking() {
    let app = TestApp::spawn().await;
    let session = app.signup("payer@hotel.test", "secret1").await;

    let resp = app
        .post(
            "/payments",
            Some(&session),
            json!({
                "bookingData": {
                    "checkIn": "2026-12-10",
                    "checkOut": "2026-12-12",
                    "roomType": "suite",
                    "email": "guest@elsewhere.test",
                    "firstName": "Yaw",
                    "lastName": "Owusu",
                    "adults": 2,
                    "rooms": 1,
                },
                "paymentData": { "cardNumber": "4242 4242 4242 4242" },
                "paymentMethod": "credit-card",
                "totalAmount": 640.0,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    assert_eq!(resp.body["booking"]["status"], "confirmed");
    assert_eq!(resp.body["booking"]["user_email"], "payer@hotel.test");
    assert_eq!(resp.body["booking"]["guest_email"], "guest@elsewhere.test");
    assert_eq!(resp.body["payment"]["status"], "completed");
    assert_eq!(resp.body["payment"]["payment_method"], "Card **** 4242");
    assert!(!resp.body.to_string().contains("4242 4242 4242 4242"));

    let booking_id = resp.body["booking"]["booking_id"].as_i64().unwrap();
    let stored: Vec<DbPayment> =
        sqlx::query_as("SELECT * FROM payments WHERE booking_id = ?")
            .bind(booking_id)
            .fetch_all(&app.pool().await)
            .await
            .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].amount, 640.0);
    assert_eq!(stored[0].status, PaymentStatus::Completed);

    let history = app.get("/user/history", Some(&session)).await;
    assert_eq!(history.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn payment_page_checkout_is_accepted_as_sent() {
    let app = TestApp::spawn().await;
    let session = app.signup("form@hotel.test", "secret1").await;

    // the booking form keeps every input as a string
    let resp = app
        .post(
            "/payments",
            Some(&session),
            json!({
                "bookingData": {
                    "checkIn": "2026-12-20",
                    "checkOut": "2026-12-23",
                    "adults": "2",
                    "children": "0",
                    "roomQuantity": "1",
                    "roomType": "deluxe",
                    "firstName": "Akosua",
                    "lastName": "Darko",
                    "email": "Akosua@Hotel.Test",
                    "phone": "+233244000000",
                    "address": "12 Ring Road",
                    "city": "Accra",
                    "country": "Ghana",
                    "specialRequests": "sea view",
                    "promoCode": "",
                    "loyaltyPoints": 0,
                    "usePoints": false,
                    "instantBooking": true,
                    "nights": 3,
                    "isWeekend": false,
                },
                "paymentData": {
                    "cardNumber": "4111 1111 1111 1111",
                    "expiryDate": "12/28",
                    "cvv": "123",
                    "cardName": "Akosua Darko",
                    "saveCard": false,
                    "billingAddress": "",
                    "billingCity": "",
                    "billingCountry": "",
                    "billingZip": "",
                    "paypalEmail": "",
                    "phoneNumber": "",
                    "mobileCarrier": "",
                },
                "paymentMethod": "credit-card",
                "totalAmount": 1187.5,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);

    let booking = &resp.body["booking"];
    assert_eq!(booking["status"], "confirmed");
    assert_eq!(booking["adults"], 2);
    assert_eq!(booking["children"], 0);
    assert_eq!(booking["rooms"], 1);
    assert_eq!(booking["guest_email"], "akosua@hotel.test");
    assert_eq!(booking["street"], "12 Ring Road");
    assert_eq!(booking["city"], "Accra");
    assert_eq!(booking["country"], "Ghana");
    assert_eq!(booking["special_request"], "sea view");
    assert_eq!(resp.body["payment"]["payment_method"], "Card **** 1111");

    let history = app.get("/user/history", Some(&session)).await;
    assert_eq!(history.body[0]["street"], "12 Ring Road");
}

#[tokio::test]
async fn payment_rejects_counts_that_are_not_numbers() {
    let app = TestApp::spawn().await;
    let session = app.signup("counts@hotel.test", "secret1").await;

    let resp = app
        .post(
            "/payments",
            Some(&session),
            json!({
                "bookingData": {
                    "checkIn": "2026-12-20",
                    "checkOut": "2026-12-21",
                    "roomType": "single",
                    "adults": "two",
                },
                "paymentMethod": "paypal",
                "totalAmount": 100,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "adults must be a whole number");

    let history = app.get("/user/history", Some(&session)).await;
    assert_eq!(history.body, json!([]));
}

#[tokio::test]
async fn cash_payment_stays_pending() {
    let app = TestApp::spawn().await;
    let session = app.signup("cash@hotel.test", "secret1").await;

    let resp = app
        .post(
            "/payments",
            Some(&session),
            json!({
                "bookingData": {
                    "checkIn": "2026-12-10",
                    "checkOut": "2026-12-11",
                    "roomType": "single",
                },
                "paymentMethod": "cash-front-desk",
                "totalAmount": 90,
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["booking"]["status"], "pending");
    assert_eq!(resp.body["payment"]["status"], "pending");
}

#[tokio::test]
async fn payment_validation() {
    let app = TestApp::spawn().await;

    let anonymous = app.post("/payments", None, json!({})).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let session = app.signup("strict@hotel.test", "secret1").await;
    let missing = app
        .post("/payments", Some(&session), json!({ "paymentMethod": "paypal" }))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.body["message"],
        "Required fields missing: bookingData, totalAmount"
    );

    let negative = app
        .post(
            "/payments",
            Some(&session),
            json!({
                "bookingData": { "roomType": "single" },
                "paymentMethod": "paypal",
                "totalAmount": -5,
            }),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let history = app.get("/user/history", Some(&session)).await;
    assert_eq!(history.body, json!([]));
}
