use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, LogFormat, Settings};

/// Directives used when `RUST_LOG` is unset.
///
/// Request spans from `tower_http` carry the request id, so they stay
/// visible outside production; sqlx statement logging is kept at warn.
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "drawing_intel_backend=debug,tower_http=debug,sqlx=warn,info",
        Environment::Staging => "drawing_intel_backend=debug,tower_http=info,sqlx=warn,info",
        Environment::Prod => "drawing_intel_backend=info,tower_http=info,sqlx=error,warn",
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&settings.env)));

    let source_location = settings.env.is_dev();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(source_location)
        .with_line_number(source_location);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match settings.log_format {
        LogFormat::Json => registry
            .with(fmt_layer.json().flatten_event(true).with_current_span(true))
            .try_init(),
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init(),
        LogFormat::Pretty => registry.with(fmt_layer.pretty()).try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
