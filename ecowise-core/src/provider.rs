//! Bundles wiring port implementations into providers.

use std::sync::Arc;

use crate::model::ProviderMeta;
use crate::ports::{CentersPort, DetectionPort, DirectionsPort, ProfilePort};

/// Full set of ports backing the app, normally the REST backend.
pub struct Provider {
    /// Static metadata describing the provider.
    pub meta: ProviderMeta,
    /// Implementation for image detection.
    pub detection: Arc<dyn DetectionPort>,
    /// Implementation for listing recycling centers.
    pub centers: Arc<dyn CentersPort>,
    /// Implementation for fetching directions to a center.
    pub directions: Arc<dyn DirectionsPort>,
    /// Implementation for profile, history, and leaderboard reads.
    pub profile: Arc<dyn ProfilePort>,
}

/// Degraded-mode ports used when the primary provider is unreachable.
///
/// Only detection and the center list have offline substitutes; directions
/// and profile reads surface their errors to the caller instead.
pub struct Fallback {
    /// Static metadata describing the fallback source.
    pub meta: ProviderMeta,
    /// Offline detection implementation.
    pub detection: Arc<dyn DetectionPort>,
    /// Built-in center list.
    pub centers: Arc<dyn CentersPort>,
}
