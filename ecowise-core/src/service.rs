//! High-level service facade combining the primary provider with fallbacks.

use crate::analysis::AnalysisView;
use crate::model::{
    CenterId, DetectionReport, DirectionsInfo, HistoryEntry, ImageUpload, LeaderboardEntry,
    RecyclingCenter, UserExport, UserProfile,
};
use crate::ports::PortError;
use crate::provider::{Fallback, Provider};

#[derive(Debug, Clone)]
/// Outcome of one analysis request.
pub struct Analysis {
    /// Raw report from whichever detection backend answered.
    pub report: DetectionReport,
    /// Composed result for display; `None` when nothing was detected.
    pub view: Option<AnalysisView>,
    /// True when the offline fallback produced the report.
    pub degraded: bool,
}

/// Public entry point for analyses, center lookups, and profile reads.
pub struct EcoWiseService {
    primary: Provider,
    fallback: Fallback,
}

impl EcoWiseService {
    /// Create a new service bound to a primary provider and its fallback.
    #[must_use]
    pub fn new(primary: Provider, fallback: Fallback) -> Self {
        Self { primary, fallback }
    }

    /// Analyze an image and compose the recycling guidance for display.
    ///
    /// When the detection backend is unreachable the offline analyzer takes
    /// over and the result is flagged as degraded; the center join degrades
    /// the same way.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] only when the fallback analyzer fails as well.
    pub async fn analyze(
        &self,
        upload: &ImageUpload,
        username: &str,
    ) -> Result<Analysis, PortError> {
        let (report, degraded) = match self.primary.detection.detect(upload, username).await {
            Ok(report) => (report, false),
            Err(err) => {
                tracing::warn!(
                    provider = %self.primary.meta.id,
                    error = %err,
                    "detection failed, switching to offline analysis"
                );
                let report = self.fallback.detection.detect(upload, username).await?;
                (report, true)
            }
        };

        let view = if report.objects.is_empty() {
            tracing::info!(filename = %upload.filename, "no items detected");
            None
        } else {
            let centers = self.centers().await;
            AnalysisView::from_report(&report, &centers)
        };

        Ok(Analysis {
            report,
            view,
            degraded,
        })
    }

    /// List all recycling centers, substituting the built-in list when the
    /// backend is down.
    pub async fn centers(&self) -> Vec<RecyclingCenter> {
        match self.primary.centers.centers().await {
            Ok(centers) => centers,
            Err(err) => {
                tracing::warn!(
                    provider = %self.primary.meta.id,
                    error = %err,
                    "center list unavailable, using built-in fallback"
                );
                self.fallback.centers.centers().await.unwrap_or_default()
            }
        }
    }

    /// Directions to a single center.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::CenterNotFound`] for unknown ids, or another
    /// [`PortError`] when the backend is unreachable.
    pub async fn directions(&self, center: CenterId) -> Result<DirectionsInfo, PortError> {
        self.primary.directions.directions(center).await
    }

    /// Profile for a username.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UserNotFound`] for unknown users, or another
    /// [`PortError`] when the backend is unreachable.
    pub async fn profile(&self, username: &str) -> Result<UserProfile, PortError> {
        self.primary.profile.profile(username).await
    }

    /// Recent analyses for a username.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend is unreachable.
    pub async fn history(&self, username: &str) -> Result<Vec<HistoryEntry>, PortError> {
        self.primary.profile.history(username).await
    }

    /// The points leaderboard.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend is unreachable.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, PortError> {
        self.primary.profile.leaderboard().await
    }

    /// Bundle profile and history into a timestamped export document.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when either read fails.
    pub async fn export_user(&self, username: &str) -> Result<UserExport, PortError> {
        let user = self.primary.profile.profile(username).await?;
        let history = self.primary.profile.history(username).await?;
        Ok(UserExport::new(user, history))
    }
}
