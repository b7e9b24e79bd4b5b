use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{runtime_paths, DESKTOP_LOG_FILE};

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => root.join("logs").join(file_name),
        None => std::env::temp_dir().join("toolbench").join(file_name),
    }
}

pub(crate) fn append_line(path: &Path, line: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        line
    )
    .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

fn append_desktop_line(line: &str) {
    let path = resolve_desktop_log_path(
        runtime_paths::default_packaged_root_dir(),
        DESKTOP_LOG_FILE,
    );
    if let Err(error) = append_line(&path, line) {
        eprintln!("{error}");
    }
}

pub(crate) fn append_desktop_log(message: &str) {
    append_desktop_line(message);
}

pub(crate) fn append_startup_log(message: &str) {
    eprintln!("[toolbench] {message}");
    append_desktop_line(&format!("[startup] {message}"));
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_desktop_line(&format!("[shutdown] {message}"));
}
