use std::{
    env,
    path::PathBuf,
    process::Child,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use serde::Deserialize;

use crate::{orchestrator_config, DEFAULT_ORCHESTRATOR_URL, ORCHESTRATOR_URL_ENV};

/// Packaged orchestrator runtime description, shipped next to the bundled
/// python environment.
#[derive(Debug, Deserialize)]
pub(crate) struct RuntimeManifest {
    pub(crate) python: Option<String>,
    pub(crate) entrypoint: Option<String>,
}

#[derive(Debug)]
pub(crate) struct LaunchPlan {
    pub(crate) cmd: String,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: PathBuf,
    pub(crate) packaged_mode: bool,
}

#[derive(Debug)]
pub(crate) struct OrchestratorState {
    pub(crate) child: Mutex<Option<Child>>,
    pub(crate) orchestrator_url: String,
    pub(crate) is_spawning: AtomicBool,
    pub(crate) is_quitting: AtomicBool,
}

impl Default for OrchestratorState {
    fn default() -> Self {
        Self {
            child: Mutex::new(None),
            orchestrator_url: orchestrator_config::normalize_orchestrator_url(
                &env::var(ORCHESTRATOR_URL_ENV)
                    .unwrap_or_else(|_| DEFAULT_ORCHESTRATOR_URL.to_string()),
                DEFAULT_ORCHESTRATOR_URL,
            ),
            is_spawning: AtomicBool::new(false),
            is_quitting: AtomicBool::new(false),
        }
    }
}

impl OrchestratorState {
    pub(crate) fn mark_quitting(&self) {
        self.is_quitting.store(true, Ordering::Relaxed);
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.is_quitting.load(Ordering::Relaxed)
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrchestratorBridgeState {
    pub(crate) running: bool,
    pub(crate) spawning: bool,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct OrchestratorBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl OrchestratorBridgeResult {
    pub(crate) fn accepted() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn rejected(reason: String) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
        }
    }
}

/// Scopes an "action in progress" flag to a region of code; the flag resets
/// when the guard drops, including on early returns.
pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::AtomicFlagGuard;

    #[test]
    fn atomic_flag_guard_rejects_a_second_holder_until_dropped() {
        let flag = AtomicBool::new(false);

        let guard = AtomicFlagGuard::try_set(&flag).expect("first holder should acquire");
        assert!(flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_some());
    }
}
