//! Core types, recycling knowledge, and service wiring for the EcoWise
//! recycling assistant.

/// Selection and composition of detection results for display.
pub mod analysis;
/// Distance ranking and filtering for the center list.
pub mod centers;
/// Static label dictionary and per-item recycling guidance.
pub mod knowledge;
/// Domain models shared by all providers.
pub mod model;
/// Traits describing the provider interfaces.
pub mod ports;
/// Bundles wiring port implementations into providers.
pub mod provider;
/// High-level service facade used by clients.
pub mod service;

pub use analysis::*;
pub use centers::*;
pub use knowledge::*;
pub use model::*;
pub use ports::*;
pub use provider::*;
pub use service::*;
