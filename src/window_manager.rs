use std::{fs, path::PathBuf};

use tauri::{AppHandle, WebviewUrl, WebviewWindowBuilder};

use crate::{window_config::WindowConfig, MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE};

/// A constructed window that can be pointed at a document.
pub(crate) trait WindowHandle {
    fn load_document(&self, document: &str) -> Result<(), String>;
}

/// The window-manager seam. Production code hands the bootstrapper a
/// Tauri-backed implementation; tests substitute a fake and assert on the
/// configuration it receives.
pub(crate) trait WindowManager {
    type Handle: WindowHandle;

    fn create_window(&self, config: &WindowConfig) -> Result<Self::Handle, String>;
}

pub(crate) struct TauriWindowManager {
    app_handle: AppHandle,
}

impl TauriWindowManager {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

pub(crate) struct TauriWindowHandle {
    window: tauri::WebviewWindow,
}

impl WindowManager for TauriWindowManager {
    type Handle = TauriWindowHandle;

    fn create_window(&self, config: &WindowConfig) -> Result<TauriWindowHandle, String> {
        let preload = fs::read_to_string(&config.preload_path).map_err(|error| {
            format!(
                "Failed to read preload script {}: {}",
                config.preload_path.display(),
                error
            )
        })?;

        // The window opens hidden on the app origin root; it is revealed by
        // the handle once the entry document load has been issued.
        let window = WebviewWindowBuilder::new(
            &self.app_handle,
            MAIN_WINDOW_LABEL,
            WebviewUrl::App(PathBuf::new()),
        )
        .title(MAIN_WINDOW_TITLE)
        .inner_size(f64::from(config.width), f64::from(config.height))
        .initialization_script(preload.as_str())
        .visible(false)
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;

        Ok(TauriWindowHandle { window })
    }
}

fn entry_navigation_script(document: &str) -> Result<String, String> {
    let quoted = serde_json::to_string(document)
        .map_err(|error| format!("Failed to encode document path: {error}"))?;
    Ok(format!("window.location.replace({quoted});"))
}

impl WindowHandle for TauriWindowHandle {
    fn load_document(&self, document: &str) -> Result<(), String> {
        let js = entry_navigation_script(document)?;
        self.window
            .eval(js.as_str())
            .map_err(|error| format!("Failed to load entry document {document}: {error}"))?;
        self.window
            .show()
            .map_err(|error| format!("Failed to show main window: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::entry_navigation_script;

    #[test]
    fn entry_navigation_script_quotes_the_document_path() {
        assert_eq!(
            entry_navigation_script("index.html").expect("script"),
            "window.location.replace(\"index.html\");"
        );
    }

    #[test]
    fn entry_navigation_script_escapes_embedded_quotes() {
        let script = entry_navigation_script("a\"b.html").expect("script");
        assert_eq!(script, "window.location.replace(\"a\\\"b.html\");");
    }
}
