//! Provider implementation backed by the EcoWise REST backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use ecowise_core::{
    model::{
        CenterId, CenterKind, DetectedObject, DetectionReport, DirectionsInfo, HistoryEntry,
        ImageUpload, LeaderboardEntry, ProviderId, ProviderMeta, RecyclingCenter, UserProfile,
    },
    ports::{CentersPort, DetectionPort, DirectionsPort, PortError, ProfilePort},
    provider::Provider,
};

/// Base URL the backend listens on when run locally.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

// SQLite CURRENT_TIMESTAMP, which the backend stores verbatim.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Response from POST /detect
#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    detected_objects: Vec<DetectedObjectEntry>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    eco_points: u32,
    #[serde(default)]
    objects_detected: u32,
    #[serde(default)]
    carbon_saved_kg: f64,
    user_stats: Option<UserEntry>,
}

/// Single detection inside `DetectResponse.detected_objects`
#[derive(Debug, Deserialize)]
struct DetectedObjectEntry {
    name: String,
    confidence: f64,
    // "type", "action" and "points" also appear; the report only needs
    // name and confidence.
}

/// Single center from /recycling-centers
#[derive(Debug, Deserialize)]
struct CenterEntry {
    id: u32,
    name: String,

    #[serde(rename = "type")]
    kind: String,

    address: String,

    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    hours: Option<String>,
    #[serde(default)]
    services: Vec<String>,
    #[serde(default)]
    rating: Option<f64>,

    lat: f64,
    lng: f64,

    #[serde(default)]
    website: Option<String>,
}

/// Response from /get-directions/{id}
#[derive(Debug, Deserialize)]
struct DirectionsEntry {
    id: u32,
    name: String,
    address: String,
    coordinates: CoordinatesEntry,
    directions: String,

    #[serde(default)]
    transport: Vec<String>,
    #[serde(default)]
    landmarks: Vec<String>,
}

/// Nested coordinate pair inside `DirectionsEntry`.
#[derive(Debug, Deserialize)]
struct CoordinatesEntry {
    lat: f64,
    lng: f64,
}

/// User record from /user/{username} and `DetectResponse.user_stats`
#[derive(Debug, Deserialize)]
struct UserEntry {
    username: String,

    #[serde(default)]
    email: Option<String>,

    eco_points: u32,
    level: String,
    items_recycled: u32,
    carbon_saved_kg: f64,

    #[serde(default)]
    created_at: Option<String>,
}

/// Response wrapper from /user/{username}/history
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Vec<HistoryEntryWire>,
}

/// Single history row.
#[derive(Debug, Deserialize)]
struct HistoryEntryWire {
    filename: String,

    #[serde(default)]
    detected_objects: String,

    points_earned: u32,
    processed_at: String,
}

/// Single leaderboard row.
#[derive(Debug, Deserialize)]
struct LeaderboardEntryWire {
    username: String,
    eco_points: u32,
    level: String,
}

/// Client for every EcoWise backend endpoint.
pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    /// Create a new backend client for the given base URL.
    #[must_use]
    pub fn new<S: Into<String>>(client: Client, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn user_entry(&self, username: &str) -> Result<UserEntry, PortError> {
        let response = self
            .client
            .get(format!("{}/user/{username}", self.base_url))
            .send()
            .await
            .map_err(PortError::from)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortError::UserNotFound);
        }

        response
            .error_for_status()
            .map_err(PortError::from)?
            .json()
            .await
            .map_err(PortError::from)
    }
}

#[async_trait]
impl DetectionPort for RestBackend {
    async fn detect(
        &self,
        upload: &ImageUpload,
        username: &str,
    ) -> Result<DetectionReport, PortError> {
        tracing::debug!(filename = %upload.filename, "uploading image for detection");

        let image = Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone());
        let form = Form::new()
            .part("image", image)
            .text("username", username.to_owned());

        let request = self
            .client
            .post(format!("{}/detect", self.base_url))
            .multipart(form);

        let response = fetch_json::<DetectResponse>(request).await?;

        if !response.success {
            let reason = response
                .error
                .unwrap_or_else(|| String::from("Analysis failed"));
            return Err(PortError::Backend(reason));
        }

        let objects = response
            .detected_objects
            .into_iter()
            .map(|entry| DetectedObject {
                name: entry.name,
                confidence: entry.confidence,
            })
            .collect();

        let user_stats = match response.user_stats {
            Some(entry) => Some(convert_user(entry)?),
            None => None,
        };

        Ok(DetectionReport {
            objects,
            recommendations: response.recommendations,
            eco_points: response.eco_points,
            objects_found: response.objects_detected,
            carbon_saved_kg: response.carbon_saved_kg,
            user_stats,
        })
    }
}

#[async_trait]
impl CentersPort for RestBackend {
    async fn centers(&self) -> Result<Vec<RecyclingCenter>, PortError> {
        let request = self
            .client
            .get(format!("{}/recycling-centers", self.base_url));

        let entries = fetch_json::<Vec<CenterEntry>>(request).await?;

        Ok(entries
            .into_iter()
            .map(|entry| RecyclingCenter {
                id: CenterId(entry.id),
                name: entry.name,
                kind: map_center_kind(&entry.kind),
                address: entry.address,
                phone: non_empty(entry.phone),
                hours: non_empty(entry.hours),
                services: entry.services,
                rating: entry.rating,
                lat: entry.lat,
                lng: entry.lng,
                website: non_empty(entry.website),
            })
            .collect())
    }
}

#[async_trait]
impl DirectionsPort for RestBackend {
    async fn directions(&self, center: CenterId) -> Result<DirectionsInfo, PortError> {
        let response = self
            .client
            .get(format!("{}/get-directions/{center}", self.base_url))
            .send()
            .await
            .map_err(PortError::from)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortError::CenterNotFound);
        }

        let entry: DirectionsEntry = response
            .error_for_status()
            .map_err(PortError::from)?
            .json()
            .await
            .map_err(PortError::from)?;

        Ok(DirectionsInfo {
            center: CenterId(entry.id),
            name: entry.name,
            address: entry.address,
            lat: entry.coordinates.lat,
            lng: entry.coordinates.lng,
            route: entry.directions,
            transport: entry.transport,
            landmarks: entry.landmarks,
        })
    }
}

#[async_trait]
impl ProfilePort for RestBackend {
    async fn profile(&self, username: &str) -> Result<UserProfile, PortError> {
        let entry = self.user_entry(username).await?;
        convert_user(entry)
    }

    async fn history(&self, username: &str) -> Result<Vec<HistoryEntry>, PortError> {
        let request = self
            .client
            .get(format!("{}/user/{username}/history", self.base_url));

        let response = fetch_json::<HistoryResponse>(request).await?;

        response
            .history
            .into_iter()
            .map(|entry| {
                let processed_at =
                    NaiveDateTime::parse_from_str(&entry.processed_at, TIMESTAMP_FORMAT)?;
                Ok(HistoryEntry {
                    filename: entry.filename,
                    detected: entry.detected_objects,
                    points: entry.points_earned,
                    processed_at,
                })
            })
            .collect()
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, PortError> {
        let request = self.client.get(format!("{}/leaderboard", self.base_url));

        let entries = fetch_json::<Vec<LeaderboardEntryWire>>(request).await?;

        Ok(entries
            .into_iter()
            .map(|entry| LeaderboardEntry {
                username: entry.username,
                eco_points: entry.eco_points,
                level: entry.level,
            })
            .collect())
    }
}

/// Build the provider bundle for the REST backend.
#[must_use]
pub fn provider<S: Into<String>>(client: Client, base_url: S) -> Provider {
    let backend = Arc::new(RestBackend::new(client, base_url));

    let detection: Arc<dyn DetectionPort> = backend.clone();
    let centers: Arc<dyn CentersPort> = backend.clone();
    let directions: Arc<dyn DirectionsPort> = backend.clone();
    let profile: Arc<dyn ProfilePort> = backend;

    Provider {
        meta: provider_meta(),
        detection,
        centers,
        directions,
        profile,
    }
}

fn provider_meta() -> ProviderMeta {
    ProviderMeta {
        id: ProviderId(String::from("rest")),
        name: String::from("EcoWise backend"),
    }
}

/// Map backend "type" strings to the `CenterKind` enum.
fn map_center_kind(raw: &str) -> CenterKind {
    match raw.to_lowercase().as_str() {
        "recycling" => CenterKind::Recycling,
        "donation" => CenterKind::Donation,
        "special" => CenterKind::Special,
        _ => CenterKind::Other(raw.to_owned()),
    }
}

fn convert_user(entry: UserEntry) -> Result<UserProfile, PortError> {
    let created_at = match entry.created_at {
        Some(raw) => Some(NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)?),
        None => None,
    };

    Ok(UserProfile {
        username: entry.username,
        email: non_empty(entry.email),
        eco_points: entry.eco_points,
        level: entry.level,
        items_recycled: entry.items_recycled,
        carbon_saved_kg: entry.carbon_saved_kg,
        created_at,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
