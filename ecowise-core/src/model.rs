//! Domain data structures for detections, centers, and user profiles.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on accepted image uploads, mirrored from the backend.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One object reported by the detection backend.
pub struct DetectedObject {
    /// Raw detector label, free text.
    pub name: String,
    /// Detection confidence in `[0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Everything a single analysis request returned.
pub struct DetectionReport {
    /// Objects the detector saw.
    pub objects: Vec<DetectedObject>,
    /// Human-readable recommendation lines.
    pub recommendations: Vec<String>,
    /// Eco-points awarded for this analysis.
    pub eco_points: u32,
    /// Number of objects found.
    pub objects_found: u32,
    /// Estimated carbon saved by following the guidance, in kilograms.
    pub carbon_saved_kg: f64,
    /// Updated profile echoed back by the backend, when available.
    pub user_stats: Option<UserProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a recycling center.
pub struct CenterId(pub u32);

impl fmt::Display for CenterId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Kinds of drop-off locations.
pub enum CenterKind {
    /// Material recycling facility.
    Recycling,
    /// Donation and reuse center.
    Donation,
    /// Special handling, e.g. medical waste.
    Special,
    /// Backend-specific additional kind.
    Other(String),
}

impl CenterKind {
    /// Lowercase tag used by the backend and in filter labels.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            CenterKind::Recycling => "recycling",
            CenterKind::Donation => "donation",
            CenterKind::Special => "special",
            CenterKind::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for CenterKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A drop-off location returned by the centers endpoint.
pub struct RecyclingCenter {
    /// Unique identifier used when requesting directions.
    pub id: CenterId,
    /// Display name.
    pub name: String,
    /// What the location accepts.
    pub kind: CenterKind,
    /// Street address.
    pub address: String,
    /// Contact phone, when listed.
    pub phone: Option<String>,
    /// Opening hours, when listed.
    pub hours: Option<String>,
    /// Accepted materials and services.
    pub services: Vec<String>,
    /// Average user rating, when listed.
    pub rating: Option<f64>,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Website, when listed.
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Route description for reaching one center.
pub struct DirectionsInfo {
    /// Center the directions lead to.
    pub center: CenterId,
    /// Center display name.
    pub name: String,
    /// Street address of the destination.
    pub address: String,
    /// Latitude of the destination.
    pub lat: f64,
    /// Longitude of the destination.
    pub lng: f64,
    /// Turn-by-turn route text.
    pub route: String,
    /// Available transport options.
    pub transport: Vec<String>,
    /// Landmarks near the destination.
    pub landmarks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
/// Gamification levels, ordered by the points needed to reach them.
pub enum EcoLevel {
    /// Below 100 points.
    Beginner,
    /// 100 points and up.
    Friend,
    /// 200 points and up.
    Warrior,
    /// 500 points and up.
    Champion,
}

impl EcoLevel {
    /// Level reached with the given point total.
    #[must_use]
    pub const fn for_points(points: u32) -> Self {
        if points >= 500 {
            EcoLevel::Champion
        } else if points >= 200 {
            EcoLevel::Warrior
        } else if points >= 100 {
            EcoLevel::Friend
        } else {
            EcoLevel::Beginner
        }
    }

    /// Points needed for the next level, `None` at the top.
    #[must_use]
    pub const fn next_threshold(points: u32) -> Option<u32> {
        match Self::for_points(points) {
            EcoLevel::Beginner => Some(100),
            EcoLevel::Friend => Some(200),
            EcoLevel::Warrior => Some(500),
            EcoLevel::Champion => None,
        }
    }
}

impl fmt::Display for EcoLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EcoLevel::Beginner => "Eco Beginner",
            EcoLevel::Friend => "Eco Friend",
            EcoLevel::Warrior => "Eco Warrior",
            EcoLevel::Champion => "Eco Champion",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// User read model from the profile endpoint.
pub struct UserProfile {
    /// Account name, also the key for history lookups.
    pub username: String,
    /// Contact address, when set.
    pub email: Option<String>,
    /// Accumulated eco-points.
    pub eco_points: u32,
    /// Level label as reported by the backend.
    pub level: String,
    /// Total items run through the analyzer.
    pub items_recycled: u32,
    /// Accumulated carbon estimate in kilograms.
    pub carbon_saved_kg: f64,
    /// Account creation time, when reported.
    pub created_at: Option<NaiveDateTime>,
}

impl UserProfile {
    /// Achievement states derived from the profile counters.
    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        vec![
            Achievement {
                title: "First Step",
                description: "Analyze your first item",
                unlocked: self.items_recycled > 0,
            },
            Achievement {
                title: "Eco Warrior",
                description: "Collect 200 eco-points",
                unlocked: self.eco_points >= 200,
            },
            Achievement {
                title: "Consistent Saver",
                description: "Recycle 50 items",
                unlocked: self.items_recycled >= 50,
            },
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
/// One badge on the profile screen.
pub struct Achievement {
    /// Badge title.
    pub title: &'static str,
    /// What unlocks the badge.
    pub description: &'static str,
    /// Whether the profile has earned it.
    pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One past analysis from the history endpoint.
pub struct HistoryEntry {
    /// Filename of the analyzed image.
    pub filename: String,
    /// Backend summary of what was detected.
    pub detected: String,
    /// Points earned by the analysis.
    pub points: u32,
    /// When the analysis ran.
    pub processed_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One row of the points leaderboard.
pub struct LeaderboardEntry {
    /// Account name.
    pub username: String,
    /// Accumulated eco-points.
    pub eco_points: u32,
    /// Level label as reported by the backend.
    pub level: String,
}

#[derive(Debug, Clone, Serialize)]
/// Self-contained data export for one user.
pub struct UserExport {
    /// Profile at export time.
    pub user: UserProfile,
    /// Recent analyses.
    pub history: Vec<HistoryEntry>,
    /// When the export was produced.
    pub exported_at: DateTime<Utc>,
    /// Convenience copy of the carbon total.
    pub total_carbon_saved: f64,
    /// Convenience copy of the recycled-item total.
    pub total_items_recycled: u32,
}

impl UserExport {
    /// Bundle a profile and its history, stamped with the current time.
    #[must_use]
    pub fn new(user: UserProfile, history: Vec<HistoryEntry>) -> Self {
        let total_carbon_saved = user.carbon_saved_kg;
        let total_items_recycled = user.items_recycled;
        Self {
            user,
            history,
            exported_at: Utc::now(),
            total_carbon_saved,
            total_items_recycled,
        }
    }
}

#[derive(thiserror::Error, Debug)]
/// Why an image was rejected before it ever reached a backend.
pub enum UploadError {
    /// Extension is not one of the accepted image formats.
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
    /// Image exceeds the upload limit.
    #[error("Image is {0} bytes, above the 5 MiB upload limit")]
    TooLarge(usize),
}

#[derive(Debug, Clone)]
/// A validated image ready to be sent for detection.
pub struct ImageUpload {
    /// Original filename, also consumed by the offline analyzer.
    pub filename: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate filename extension and size before accepting the upload.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] for non-image extensions or oversized files.
    pub fn new<S: Into<String>>(filename: S, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let filename = filename.into();

        let extension = filename
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_lowercase());
        match extension {
            Some(extension) if ALLOWED_EXTENSIONS.contains(&extension.as_str()) => {}
            _ => return Err(UploadError::UnsupportedType(filename)),
        }

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge(bytes.len()));
        }

        Ok(Self { filename, bytes })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a backend provider.
pub struct ProviderId(pub String);

impl fmt::Display for ProviderId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a backend provider.
pub struct ProviderMeta {
    /// Unique identifier.
    pub id: ProviderId,
    /// Human-friendly name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploads_accept_known_image_extensions() {
        let upload = ImageUpload::new("bottle_photo.JPG", vec![0; 16]);
        assert!(upload.is_ok(), "uppercase extensions should be accepted");
    }

    #[test]
    fn uploads_reject_non_images_and_missing_extensions() {
        assert!(
            ImageUpload::new("notes.txt", vec![0; 16]).is_err(),
            "text files must be rejected"
        );
        assert!(
            ImageUpload::new("no_extension", vec![0; 16]).is_err(),
            "files without an extension must be rejected"
        );
    }

    #[test]
    fn uploads_reject_oversized_images() {
        let result = ImageUpload::new("big.png", vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(
            matches!(result, Err(UploadError::TooLarge(_))),
            "oversized image must be rejected"
        );
    }

    #[test]
    fn levels_follow_the_point_thresholds() {
        assert_eq!(EcoLevel::for_points(0), EcoLevel::Beginner, "0 points");
        assert_eq!(EcoLevel::for_points(100), EcoLevel::Friend, "100 points");
        assert_eq!(EcoLevel::for_points(499), EcoLevel::Warrior, "499 points");
        assert_eq!(EcoLevel::for_points(500), EcoLevel::Champion, "500 points");
        assert_eq!(
            EcoLevel::next_threshold(150),
            Some(200),
            "a friend is working toward warrior"
        );
        assert_eq!(EcoLevel::next_threshold(600), None, "champion is the top");
    }

    #[test]
    fn achievements_unlock_from_counters() {
        let profile = UserProfile {
            username: "EcoStudent".to_owned(),
            email: None,
            eco_points: 250,
            level: "Eco Warrior".to_owned(),
            items_recycled: 3,
            carbon_saved_kg: 6.0,
            created_at: None,
        };

        let achievements = profile.achievements();
        let unlocked: Vec<&str> = achievements
            .iter()
            .filter(|badge| badge.unlocked)
            .map(|badge| badge.title)
            .collect();

        assert_eq!(
            unlocked,
            vec!["First Step", "Eco Warrior"],
            "50-item badge stays locked at 3 items"
        );
    }
}
