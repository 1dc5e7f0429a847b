//! Integration tests for the REST provider against a mock backend.

use httpmock::prelude::*;

use ecowise_core::{
    CenterId, CenterKind, CentersPort, DetectionPort, DirectionsPort, ImageUpload, PortError,
    ProfilePort,
};
use ecowise_provider_rest::provider;

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn upload() -> ImageUpload {
    ImageUpload::new("bottle_photo.jpg", vec![0xFF, 0xD8, 0xFF]).expect("valid upload")
}

#[tokio::test]
async fn detect_maps_a_successful_analysis() {
    let server = MockServer::start();
    let detect_mock = server.mock(|when, then| {
        when.method(POST).path("/detect");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "filename": "bottle_photo.jpg",
            "detected_objects": [
                {"name": "bottle", "confidence": 0.92, "type": "plastic", "action": "recycle", "points": 10}
            ],
            "recommendations": ["♻️ Recycle the bottle at nearest center"],
            "eco_points": 10,
            "objects_detected": 1,
            "carbon_saved_kg": 0.5,
            "user_stats": {
                "id": 1,
                "username": "EcoStudent",
                "email": "eco@example.com",
                "eco_points": 160,
                "level": "Eco Friend",
                "items_recycled": 16,
                "carbon_saved_kg": 47.5,
                "created_at": "2024-01-01 09:15:00"
            }
        }));
    });

    let backend = provider(client(), server.base_url());
    let report = backend
        .detection
        .detect(&upload(), "EcoStudent")
        .await
        .expect("detection succeeds");

    detect_mock.assert();
    assert_eq!(report.objects.len(), 1, "one detection mapped");
    assert_eq!(
        report.objects.first().map(|object| object.name.as_str()),
        Some("bottle"),
        "label carried over"
    );
    assert_eq!(report.eco_points, 10, "points carried over");

    let stats = report.user_stats.expect("user stats echoed");
    assert_eq!(stats.eco_points, 160, "updated profile mapped");
    assert!(stats.created_at.is_some(), "timestamp parsed");
}

#[tokio::test]
async fn detect_surfaces_backend_reported_failures() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/detect");
        then.status(200).json_body(serde_json::json!({
            "success": false,
            "error": "No file selected"
        }));
    });

    let backend = provider(client(), server.base_url());
    let result = backend.detection.detect(&upload(), "EcoStudent").await;

    assert!(
        matches!(result, Err(PortError::Backend(ref reason)) if reason == "No file selected"),
        "success=false must map to a backend error, got {result:?}"
    );
}

#[tokio::test]
async fn centers_map_kinds_and_drop_empty_fields() {
    let server = MockServer::start();
    let centers_mock = server.mock(|when, then| {
        when.method(GET).path("/recycling-centers");
        then.status(200).json_body(serde_json::json!([
            {
                "id": 1,
                "name": "Hassan City Municipal Waste Center",
                "type": "recycling",
                "address": "Near Bus Stand, MG Road, Hassan 573201",
                "phone": "+91 8172 260 001",
                "hours": "8:00 AM - 6:00 PM (Mon-Sat)",
                "services": ["Plastic", "Paper", "Glass"],
                "rating": 4.2,
                "lat": 13.0069,
                "lng": 76.0991,
                "website": ""
            },
            {
                "id": 8,
                "name": "Book Donation Center",
                "type": "donation",
                "address": "College Road, Hassan 573201",
                "services": ["Textbooks", "Novels"],
                "rating": 4.7,
                "lat": 13.0051,
                "lng": 76.1012
            },
            {
                "id": 11,
                "name": "Composting Yard",
                "type": "compost",
                "address": "Outskirts, Hassan",
                "services": ["Organic"],
                "lat": 13.0,
                "lng": 76.0
            }
        ]));
    });

    let backend = provider(client(), server.base_url());
    let centers = backend
        .centers
        .centers()
        .await
        .expect("center list succeeds");

    centers_mock.assert();
    assert_eq!(centers.len(), 3, "all rows mapped");

    let first = centers.first().expect("municipal center present");
    assert_eq!(first.kind, CenterKind::Recycling, "known kind mapped");
    assert!(first.website.is_none(), "empty website dropped");
    assert!(first.phone.is_some(), "non-empty phone kept");

    let last = centers.last().expect("compost yard present");
    assert_eq!(
        last.kind,
        CenterKind::Other(String::from("compost")),
        "unknown kinds preserved"
    );
}

#[tokio::test]
async fn directions_map_the_route_and_unknown_ids() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/get-directions/3");
        then.status(200).json_body(serde_json::json!({
            "id": 3,
            "name": "GreenTech E-Waste Recycling",
            "address": "Near Railway Station, Hassan 573201",
            "coordinates": {"lat": 13.0072, "lng": 76.1028},
            "directions": "From Railway Station: Exit main gate → Turn left → 200m walk",
            "transport": ["Auto rickshaw: ₹30-50 from city center", "City bus: Routes 5, 12, 18"],
            "landmarks": ["Near Railway Station", "Next to Food World Mall"]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/get-directions/99");
        then.status(404)
            .json_body(serde_json::json!({"error": "Center not found"}));
    });

    let backend = provider(client(), server.base_url());

    let info = backend
        .directions
        .directions(CenterId(3))
        .await
        .expect("directions succeed");
    assert_eq!(info.center, CenterId(3), "center id mapped");
    assert_eq!(info.transport.len(), 2, "transport options mapped");
    assert!(
        info.route.starts_with("From Railway Station"),
        "route text carried over"
    );

    let missing = backend.directions.directions(CenterId(99)).await;
    assert!(
        matches!(missing, Err(PortError::CenterNotFound)),
        "404 maps to CenterNotFound, got {missing:?}"
    );
}

#[tokio::test]
async fn profile_maps_users_and_unknown_usernames() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/user/EcoStudent");
        then.status(200).json_body(serde_json::json!({
            "id": 1,
            "username": "EcoStudent",
            "email": "eco@example.com",
            "eco_points": 150,
            "level": "Eco Warrior",
            "items_recycled": 15,
            "carbon_saved_kg": 45.5,
            "created_at": "2024-01-01 09:15:00"
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/user/Nobody");
        then.status(404)
            .json_body(serde_json::json!({"error": "User not found"}));
    });

    let backend = provider(client(), server.base_url());

    let profile = backend
        .profile
        .profile("EcoStudent")
        .await
        .expect("profile succeeds");
    assert_eq!(profile.eco_points, 150, "points mapped");
    assert_eq!(
        profile.email.as_deref(),
        Some("eco@example.com"),
        "email kept"
    );

    let missing = backend.profile.profile("Nobody").await;
    assert!(
        matches!(missing, Err(PortError::UserNotFound)),
        "404 maps to UserNotFound, got {missing:?}"
    );
}

#[tokio::test]
async fn history_parses_sqlite_timestamps() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/user/EcoStudent/history");
        then.status(200).json_body(serde_json::json!({
            "history": [
                {
                    "filename": "bottle_photo.jpg",
                    "detected_objects": "[{'name': 'bottle', 'confidence': 0.9}]",
                    "points_earned": 10,
                    "processed_at": "2024-03-05 14:02:11"
                }
            ]
        }));
    });

    let backend = provider(client(), server.base_url());
    let history = backend
        .profile
        .history("EcoStudent")
        .await
        .expect("history succeeds");

    let entry = history.first().expect("one entry");
    assert_eq!(entry.points, 10, "points mapped");
    assert_eq!(
        entry.processed_at.to_string(),
        "2024-03-05 14:02:11",
        "timestamp parsed"
    );
}

#[tokio::test]
async fn leaderboard_rows_map_in_order() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/leaderboard");
        then.status(200).json_body(serde_json::json!([
            {"username": "EcoChampion", "eco_points": 450, "level": "Eco Champion"},
            {"username": "GreenWarrior", "eco_points": 320, "level": "Eco Warrior"}
        ]));
    });

    let backend = provider(client(), server.base_url());
    let rows = backend
        .profile
        .leaderboard()
        .await
        .expect("leaderboard succeeds");

    let names: Vec<&str> = rows.iter().map(|row| row.username.as_str()).collect();
    assert_eq!(
        names,
        vec!["EcoChampion", "GreenWarrior"],
        "backend order preserved"
    );
}
