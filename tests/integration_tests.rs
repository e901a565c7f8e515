// Integration tests for the TravelBunk HTTP API over the in-memory store

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use travelbunk_match::core::Matcher;
use travelbunk_match::routes::{
    self,
    error::{handle_json_payload_error, handle_query_payload_error},
    AppState, Limits,
};
use travelbunk_match::services::auth::GOOGLE_JWKS_URL;
use travelbunk_match::services::{Authenticator, CacheManager, MemoryStore};

const SECRET: &str = "integration-secret";

async fn seeded_state() -> AppState {
    let seed = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed.json");
    let store = MemoryStore::from_seed_file(seed).await.expect("seed data should load");

    AppState::with_store(
        Arc::new(store),
        Arc::new(CacheManager::in_memory(100, 60)),
        Arc::new(Authenticator::new(SECRET, None, GOOGLE_JWKS_URL, 60)),
        Matcher::with_default_weights(),
        Limits::default(),
    )
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state().await))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

fn bearer(user_id: &str) -> (&'static str, String) {
    let claims = json!({
        "userId": user_id,
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    });
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))
        .expect("token should sign");
    ("Authorization", format!("Bearer {}", token))
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("expected an array")
        .iter()
        .map(|v| v["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn trip_body(max_participants: u32) -> Value {
    let start = Utc::now() + Duration::days(45);
    json!({
        "title": "Spiti winter drive",
        "destination": "Spiti Valley",
        "description": "Frozen rivers and monasteries.",
        "startDate": start,
        "endDate": start + Duration::days(8),
        "budget": { "min": 25000, "max": 50000 },
        "maxParticipants": max_participants,
        "travelStyle": ["adventure"]
    })
}

#[actix_web::test]
async fn test_ping_and_health() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/ping").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "success": true, "message": "pong" }));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_find_companions_filters_and_scores() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/companions/find?budgetMin=10000&budgetMax=50000&travelStyle=adventure&userId=u-aarav")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    // u-aarav is the requester and u-ishaan is inactive
    assert_eq!(ids(&body["companions"]), vec!["u-rohan"]);
    assert_eq!(body["companions"][0]["compatibilityScore"], 89);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
}

#[actix_web::test]
async fn test_find_companions_malformed_budget_is_ignored() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/companions/find?budgetMin=cheap&budgetMax=lots")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 7);
    for companion in body["companions"].as_array().unwrap() {
        let score = companion["compatibilityScore"].as_u64().unwrap();
        assert!(score <= 30);
    }
}

#[actix_web::test]
async fn test_find_companions_excludes_authenticated_caller() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/companions/find?userId=u-diya&limit=3")
        .insert_header(bearer("u-sara"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 6);
    let found = ids(&body["companions"]);
    assert_eq!(found.len(), 3);
    assert!(!found.contains(&"u-sara".to_string()));
}

#[actix_web::test]
async fn test_featured_companions() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/companions/featured").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec!["u-sara", "u-diya", "u-aarav", "u-meera", "u-rohan"]);
}

#[actix_web::test]
async fn test_companion_request() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/companions/request")
        .set_json(json!({ "companionId": "u-diya", "message": "Kerala in January?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/companions/request")
        .insert_header(bearer("u-sara"))
        .set_json(json!({ "companionId": "u-diya" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert!(body["requestId"].as_str().is_some());

    let req = test::TestRequest::post()
        .uri("/api/v1/companions/request")
        .insert_header(bearer("u-sara"))
        .set_json(json!({ "companionId": "u-ishaan" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/companions/request")
        .insert_header(bearer("u-sara"))
        .set_json(json!({ "companionId": "u-sara" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_user_directory() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/users").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 7);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/search?country=india&limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body["users"]), vec!["u-sara", "u-diya"]);
    assert_eq!(body["pagination"], json!({ "page": 1, "limit": 2, "total": 6, "pages": 3 }));

    let req = test::TestRequest::get().uri("/api/v1/users/u-diya").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Diya Sharma");

    let req = test::TestRequest::get().uri("/api/v1/users/nobody").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_profile_me_lifecycle() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(bearer("u-new"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/v1/users/me")
        .insert_header(bearer("u-new"))
        .set_json(json!({ "bio": "No name yet" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/v1/users/me")
        .insert_header(bearer("u-new"))
        .set_json(json!({
            "name": "Nia",
            "travelPreferences": { "budgetRange": { "min": 9000, "max": 1000 } }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/v1/users/me")
        .insert_header(bearer("u-new"))
        .set_json(json!({ "name": "Nia", "location": { "city": "Shillong" } }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["id"], "u-new");
    assert_eq!(body["user"]["isActive"], true);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(bearer("u-new"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["location"]["city"], "Shillong");
}

#[actix_web::test]
async fn test_trip_membership_rules() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/trips")
        .set_json(trip_body(2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/trips")
        .insert_header(bearer("u-aarav"))
        .set_json(trip_body(2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let trip_id = body["trip"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["trip"]["currentParticipants"], 1);
    assert_eq!(body["trip"]["creator"]["name"], "Aarav Mehta");

    let join = |user: &str| {
        test::TestRequest::post()
            .uri(&format!("/api/v1/trips/{}/join", trip_id))
            .insert_header(bearer(user))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, join("u-diya")).await;
    assert_eq!(body["trip"]["currentParticipants"], 2);
    assert_eq!(body["trip"]["participants"].as_array().unwrap().len(), 2);

    let resp = test::call_service(&app, join("u-diya")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Already joined this trip");

    let resp = test::call_service(&app, join("u-kabir")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Trip is full");

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/trips/{}/leave", trip_id))
            .insert_header(bearer("u-diya"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["trip"]["currentParticipants"], 1);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/trips/no-such-trip/join")
        .insert_header(bearer("u-diya"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Trip not found");
}

#[actix_web::test]
async fn test_create_trip_validation() {
    let app = init_app!();

    let mut body = trip_body(2);
    body["maxParticipants"] = json!(101);
    let req = test::TestRequest::post()
        .uri("/api/v1/trips")
        .insert_header(bearer("u-aarav"))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_create_trip_rejects_blank_text() {
    let app = init_app!();

    let mut body = trip_body(2);
    body["title"] = json!("   ");
    body["destination"] = json!("  ");
    body["description"] = json!(" ");
    let req = test::TestRequest::post()
        .uri("/api/v1/trips")
        .insert_header(bearer("u-aarav"))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/v1/trips").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["total"], 3);
}

#[actix_web::test]
async fn test_featured_trips_refresh_after_join() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/trips")
        .insert_header(bearer("u-sara"))
        .set_json(trip_body(4))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let trip_id = body["trip"]["id"].as_str().unwrap().to_string();

    let featured = || test::TestRequest::get().uri("/api/v1/trips/featured").to_request();

    // One participant is not enough to be featured
    let body: Value = test::call_and_read_body_json(&app, featured()).await;
    assert!(!ids(&body).contains(&trip_id));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/trips/{}/join", trip_id))
        .insert_header(bearer("u-rohan"))
        .set_json(json!({ "userName": "Rohan" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["trip"]["participants"][1]["name"], "Rohan");

    let body: Value = test::call_and_read_body_json(&app, featured()).await;
    assert!(ids(&body).contains(&trip_id));
}

#[actix_web::test]
async fn test_list_trips_with_filters() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/trips?destination=LADAKH").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body["trips"]), vec!["trip-ladakh"]);
    assert_eq!(body["pagination"]["total"], 1);

    let req = test::TestRequest::get().uri("/api/v1/trips?limit=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    // Newest first
    assert_eq!(ids(&body["trips"]), vec!["trip-goa", "trip-kerala"]);
    assert_eq!(body["pagination"]["pages"], 2);

    let req = test::TestRequest::get().uri("/api/v1/trips/trip-goa").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["currentParticipants"], 1);
}

#[actix_web::test]
async fn test_trip_chat() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/v1/chat/trip-kerala").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body["messages"]), vec!["msg-1", "msg-2"]);
    assert_eq!(body["pagination"], json!({ "page": 1, "limit": 50 }));

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/trip-kerala/send")
        .insert_header(bearer("u-meera"))
        .set_json(json!({ "message": "Count me in for the houseboat." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"]["sender"]["name"], "Meera Iyer");
    assert_eq!(body["message"]["messageType"], "text");

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/trip-kerala/send")
        .insert_header(bearer("u-meera"))
        .set_json(json!({ "message": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/chat/no-such-trip/send")
        .insert_header(bearer("u-meera"))
        .set_json(json!({ "message": "hello?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let mark_read = || {
        test::TestRequest::put()
            .uri("/api/v1/chat/trip-kerala/read")
            .insert_header(bearer("u-meera"))
            .to_request()
    };
    let body: Value = test::call_and_read_body_json(&app, mark_read()).await;
    assert_eq!(body["updated"], 2);
    let body: Value = test::call_and_read_body_json(&app, mark_read()).await;
    assert_eq!(body["updated"], 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/chat/trip-kerala?limit=2&page=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["messages"][0]["id"], "msg-2");
    assert_eq!(body["messages"][1]["message"], "Count me in for the houseboat.");
}

#[actix_web::test]
async fn test_aadhaar_endpoint() {
    let app = init_app!();

    let cases = [
        ("234567890124", json!({ "valid": true, "reason": null })),
        ("234567890125", json!({ "valid": false, "reason": "Invalid Aadhaar checksum" })),
        ("1234", json!({ "valid": false, "reason": "Invalid Aadhaar format" })),
    ];

    for (aadhaar, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/identity/aadhaar")
            .set_json(json!({ "aadhaar": aadhaar }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, expected, "aadhaar {}", aadhaar);
    }
}

#[actix_web::test]
async fn test_firebase_token_without_project() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("X-Firebase-Token", "some.firebase.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Firebase not configured");
}

#[actix_web::test]
async fn test_invalid_json_body() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/identity/aadhaar")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 400);
}
