use std::{env, time::Duration};

use url::Url;

use crate::{ORCHESTRATOR_TIMEOUT_ENV, PACKAGED_TIMEOUT_FALLBACK_MS};

pub(crate) fn normalize_orchestrator_url(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) => {
            if parsed.path().is_empty() {
                parsed.set_path("/");
            }
            parsed.to_string()
        }
        Err(_) => fallback.to_string(),
    }
}

pub(crate) fn resolve_startup_timeout(packaged_mode: bool) -> Option<Duration> {
    let default_timeout_ms = if packaged_mode { 0_u64 } else { 20_000_u64 };
    let timeout_ms = env::var(ORCHESTRATOR_TIMEOUT_ENV)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default_timeout_ms);
    startup_timeout_from_ms(timeout_ms, packaged_mode)
}

/// Zero means "no explicit limit": unlimited in dev, capped by a generous
/// fallback in packaged mode where a bundled python env may unpack slowly.
pub(crate) fn startup_timeout_from_ms(timeout_ms: u64, packaged_mode: bool) -> Option<Duration> {
    if timeout_ms > 0 {
        return Some(Duration::from_millis(timeout_ms));
    }
    if packaged_mode {
        return Some(Duration::from_millis(PACKAGED_TIMEOUT_FALLBACK_MS));
    }
    None
}
