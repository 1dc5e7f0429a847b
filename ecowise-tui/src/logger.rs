//! Optional file logging so tracing output does not disturb raw mode.

use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing when `ECOWISE_LOG` names a log file.
///
/// The terminal runs in raw mode, so events go to a file instead of stderr.
/// Without the variable, logging stays off entirely.
pub(crate) fn init_from_env() {
    let Ok(path) = std::env::var("ECOWISE_LOG") else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("ecowise_core=debug,ecowise_provider_rest=debug,ecowise_provider_offline=debug,info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .compact(),
        )
        .init();
}
