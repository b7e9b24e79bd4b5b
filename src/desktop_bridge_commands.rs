use std::process::{Command, Stdio};

use tauri::{AppHandle, Manager};
use url::Url;

use crate::{
    append_desktop_log, AtomicFlagGuard, OrchestratorBridgeResult, OrchestratorBridgeState,
    OrchestratorState,
};

fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'open': {error}"))
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("rundll32")
        .args(["url.dll,FileProtocolHandler", url])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'rundll32': {error}"))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("xdg-open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'xdg-open': {error}"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

#[tauri::command]
pub(crate) fn desktop_bridge_is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_orchestrator_url(app_handle: AppHandle) -> String {
    app_handle
        .state::<OrchestratorState>()
        .orchestrator_url
        .clone()
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_orchestrator_state(
    app_handle: AppHandle,
) -> OrchestratorBridgeState {
    app_handle.state::<OrchestratorState>().bridge_state()
}

#[tauri::command]
pub(crate) async fn desktop_bridge_restart_orchestrator(
    app_handle: AppHandle,
) -> OrchestratorBridgeResult {
    let task = tauri::async_runtime::spawn_blocking(move || {
        let state = app_handle.state::<OrchestratorState>();
        if state.is_quitting() {
            return OrchestratorBridgeResult::rejected(
                "Desktop shell is shutting down.".to_string(),
            );
        }
        let Some(_guard) = AtomicFlagGuard::try_set(&state.is_spawning) else {
            return OrchestratorBridgeResult::rejected(
                "Orchestrator action already in progress.".to_string(),
            );
        };

        state.stop();
        match state.ensure_ready(&app_handle) {
            Ok(()) => {
                append_desktop_log("orchestrator restarted through the desktop bridge");
                OrchestratorBridgeResult::accepted()
            }
            Err(error) => {
                append_desktop_log(&format!("orchestrator restart failed: {error}"));
                OrchestratorBridgeResult::rejected(error)
            }
        }
    });

    match task.await {
        Ok(result) => result,
        Err(error) => OrchestratorBridgeResult::rejected(format!("Restart task failed: {error}")),
    }
}

#[tauri::command]
pub(crate) fn desktop_bridge_open_external_url(url: String) -> OrchestratorBridgeResult {
    let parsed = match parse_openable_url(&url) {
        Ok(parsed) => parsed,
        Err(error) => return OrchestratorBridgeResult::rejected(error),
    };

    match open_url_with_system_browser(parsed.as_ref()) {
        Ok(()) => OrchestratorBridgeResult::accepted(),
        Err(error) => OrchestratorBridgeResult::rejected(error),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_openable_url;

    #[test]
    fn parse_openable_url_accepts_http_and_https() {
        assert!(parse_openable_url("http://127.0.0.1:8000/").is_ok());
        assert!(parse_openable_url(" https://example.com/docs ").is_ok());
    }

    #[test]
    fn parse_openable_url_rejects_other_schemes_and_garbage() {
        assert!(parse_openable_url("ftp://example.com/").is_err());
        assert!(parse_openable_url("file:///etc/passwd").is_err());
        assert!(parse_openable_url("").is_err());
        assert!(parse_openable_url("not a url").is_err());
    }
}
