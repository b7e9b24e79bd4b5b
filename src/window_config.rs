use std::path::{Path, PathBuf};

use crate::{ENTRY_DOCUMENT, MAIN_WINDOW_HEIGHT, MAIN_WINDOW_WIDTH, PRELOAD_SCRIPT_FILE};

/// Everything needed to construct the main window. Built once at startup and
/// consumed immediately; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) preload_path: PathBuf,
    pub(crate) document: String,
}

impl WindowConfig {
    /// Resolves the fixed window configuration against the directory the UI
    /// assets live in. Deterministic: the same base dir always yields the
    /// same configuration.
    pub(crate) fn resolve(ui_base_dir: &Path) -> Self {
        Self {
            width: MAIN_WINDOW_WIDTH,
            height: MAIN_WINDOW_HEIGHT,
            preload_path: ui_base_dir.join(PRELOAD_SCRIPT_FILE),
            document: ENTRY_DOCUMENT.to_string(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Window dimensions must be positive, got {}x{}.",
                self.width, self.height
            ));
        }
        if self.document.trim().is_empty() {
            return Err("Entry document must not be empty.".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_fixed_dimensions_and_entry_document() {
        let config = WindowConfig::resolve(Path::new("/srv/toolbench/ui"));
        assert_eq!(config.width, 900);
        assert_eq!(config.height, 700);
        assert_eq!(config.document, "index.html");
        assert_eq!(
            config.preload_path,
            Path::new("/srv/toolbench/ui").join("preload.js")
        );
    }

    #[test]
    fn resolve_is_deterministic_for_the_same_base_dir() {
        let base = Path::new("/srv/toolbench/ui");
        assert_eq!(WindowConfig::resolve(base), WindowConfig::resolve(base));
    }

    #[test]
    fn validate_accepts_a_resolved_configuration() {
        let config = WindowConfig::resolve(Path::new("/srv/toolbench/ui"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let mut config = WindowConfig::resolve(Path::new("/srv/toolbench/ui"));
        config.width = 0;
        assert!(config.validate().is_err());

        let mut config = WindowConfig::resolve(Path::new("/srv/toolbench/ui"));
        config.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_an_empty_entry_document() {
        let mut config = WindowConfig::resolve(Path::new("/srv/toolbench/ui"));
        config.document = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
