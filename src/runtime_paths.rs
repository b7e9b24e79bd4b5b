use std::{
    env,
    path::{Path, PathBuf},
};

use tauri::{path::BaseDirectory, AppHandle, Manager};

use crate::{ENTRY_DOCUMENT, UI_DIR_ENV};

pub(crate) fn default_packaged_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".toolbench"))
}

pub(crate) fn workspace_root_dir() -> PathBuf {
    let candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    candidate.canonicalize().unwrap_or(candidate)
}

pub(crate) fn resolve_resource_path(app_handle: &AppHandle, relative_path: &str) -> Option<PathBuf> {
    app_handle
        .path()
        .resolve(relative_path, BaseDirectory::Resource)
        .ok()
}

/// Directory the entry document and preload script live in.
///
/// Lookup order: env override, bundled resources, then the dev `ui/` tree.
pub(crate) fn resolve_ui_base_dir(app_handle: &AppHandle) -> Result<PathBuf, String> {
    let override_dir = env::var(UI_DIR_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let resource_dir = resolve_resource_path(app_handle, "ui");
    let dev_dir = workspace_root_dir().join("ui");

    select_ui_base_dir(override_dir, resource_dir, dev_dir)
}

fn has_entry_document(dir: &Path) -> bool {
    dir.join(ENTRY_DOCUMENT).is_file()
}

pub(crate) fn select_ui_base_dir(
    override_dir: Option<PathBuf>,
    resource_dir: Option<PathBuf>,
    dev_dir: PathBuf,
) -> Result<PathBuf, String> {
    if let Some(dir) = override_dir {
        if has_entry_document(&dir) {
            return Ok(dir);
        }
        return Err(format!(
            "UI directory override {} does not contain {}.",
            dir.display(),
            ENTRY_DOCUMENT
        ));
    }

    if let Some(dir) = resource_dir {
        if has_entry_document(&dir) {
            return Ok(dir);
        }
    }

    if has_entry_document(&dev_dir) {
        return Ok(dev_dir);
    }

    Err(format!(
        "Cannot locate a UI directory containing {}. Set {} to the dashboard assets.",
        ENTRY_DOCUMENT, UI_DIR_ENV
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ui_dir_with_entry_document() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(ENTRY_DOCUMENT), "<html></html>").expect("write entry document");
        dir
    }

    #[test]
    fn select_ui_base_dir_prefers_override() {
        let override_dir = ui_dir_with_entry_document();
        let resource_dir = ui_dir_with_entry_document();

        let selected = select_ui_base_dir(
            Some(override_dir.path().to_path_buf()),
            Some(resource_dir.path().to_path_buf()),
            PathBuf::from("/nonexistent"),
        )
        .expect("override should win");
        assert_eq!(selected, override_dir.path());
    }

    #[test]
    fn select_ui_base_dir_rejects_override_without_entry_document() {
        let empty_dir = tempfile::tempdir().expect("tempdir");
        let error = select_ui_base_dir(
            Some(empty_dir.path().to_path_buf()),
            None,
            PathBuf::from("/nonexistent"),
        )
        .expect_err("override without entry document should fail");
        assert!(error.contains(ENTRY_DOCUMENT));
    }

    #[test]
    fn select_ui_base_dir_falls_back_to_resources_then_dev_tree() {
        let resource_dir = ui_dir_with_entry_document();
        let dev_dir = ui_dir_with_entry_document();

        let selected = select_ui_base_dir(
            None,
            Some(resource_dir.path().to_path_buf()),
            dev_dir.path().to_path_buf(),
        )
        .expect("resource dir should be used");
        assert_eq!(selected, resource_dir.path());

        let selected = select_ui_base_dir(None, None, dev_dir.path().to_path_buf())
            .expect("dev dir should be used");
        assert_eq!(selected, dev_dir.path());
    }

    #[test]
    fn select_ui_base_dir_errors_when_nothing_matches() {
        let error = select_ui_base_dir(None, None, PathBuf::from("/nonexistent"))
            .expect_err("no candidate should fail");
        assert!(error.contains(UI_DIR_ENV));
    }
}
