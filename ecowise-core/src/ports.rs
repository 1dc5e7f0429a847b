//! Traits describing provider capabilities and the shared error type.

use async_trait::async_trait;
use chrono::ParseError as ChronoParseError;
use reqwest::Error as ReqwestError;

use crate::model::{
    CenterId, DetectionReport, DirectionsInfo, HistoryEntry, ImageUpload, LeaderboardEntry,
    RecyclingCenter, UserProfile,
};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to EcoWise backends.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Failed to parse a timestamp from the backend response.
    #[error("Parse error: {0}")]
    Parse(#[from] ChronoParseError),
    /// The backend answered but reported a failure of its own.
    #[error("Backend error: {0}")]
    Backend(String),
    /// Requested user does not exist.
    #[error("User not found")]
    UserNotFound,
    /// Requested recycling center does not exist.
    #[error("Center not found")]
    CenterNotFound,
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Trait for image-detection backends.
pub trait DetectionPort: Send + Sync {
    /// Submit an image for detection and scoring on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the backend rejects
    /// the upload.
    async fn detect(
        &self,
        upload: &ImageUpload,
        username: &str,
    ) -> Result<DetectionReport, PortError>;
}

#[async_trait]
/// Trait for recycling-center listings.
pub trait CentersPort: Send + Sync {
    /// Fetch all known recycling centers.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails.
    async fn centers(&self) -> Result<Vec<RecyclingCenter>, PortError>;
}

#[async_trait]
/// Trait for per-center route descriptions.
pub trait DirectionsPort: Send + Sync {
    /// Fetch directions to a single center.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::CenterNotFound`] for unknown ids, or another
    /// [`PortError`] when the request fails.
    async fn directions(&self, center: CenterId) -> Result<DirectionsInfo, PortError>;
}

#[async_trait]
/// Trait for the user-facing read models: profile, history, leaderboard.
pub trait ProfilePort: Send + Sync {
    /// Fetch the profile for a username.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UserNotFound`] for unknown users, or another
    /// [`PortError`] when the request fails.
    async fn profile(&self, username: &str) -> Result<UserProfile, PortError>;

    /// Fetch the most recent analyses for a username. The backend caps the
    /// list at five entries.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails.
    async fn history(&self, username: &str) -> Result<Vec<HistoryEntry>, PortError>;

    /// Fetch the points leaderboard.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, PortError>;
}
