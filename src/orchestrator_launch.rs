use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tauri::AppHandle;

use crate::{
    runtime_paths, LaunchPlan, RuntimeManifest, ORCHESTRATOR_CMD_ENV, ORCHESTRATOR_CWD_ENV,
    SOURCE_DIR_ENV,
};

/// Picks how to start the orchestrator: an explicit command override wins,
/// then a packaged runtime bundled as a resource, then the dev source tree.
pub(crate) fn resolve_launch_plan(app_handle: &AppHandle) -> Result<LaunchPlan, String> {
    if let Some(custom_cmd) = env::var(ORCHESTRATOR_CMD_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        let cwd_override = env::var(ORCHESTRATOR_CWD_ENV).ok().map(PathBuf::from);
        return custom_plan_from_cmd(&custom_cmd, cwd_override);
    }

    if let Some(plan) = resolve_packaged_launch(app_handle)? {
        return Ok(plan);
    }

    resolve_dev_launch()
}

pub(crate) fn custom_plan_from_cmd(
    custom_cmd: &str,
    cwd_override: Option<PathBuf>,
) -> Result<LaunchPlan, String> {
    let mut pieces = shlex::split(custom_cmd)
        .ok_or_else(|| format!("Invalid {ORCHESTRATOR_CMD_ENV}: {custom_cmd}"))?;
    if pieces.is_empty() {
        return Err(format!("{ORCHESTRATOR_CMD_ENV} is empty."));
    }

    let cmd = pieces.remove(0);
    let cwd = cwd_override
        .or_else(|| detect_source_root().map(|root| root.join("orchestrator")))
        .unwrap_or_else(runtime_paths::workspace_root_dir);

    Ok(LaunchPlan {
        cmd,
        args: pieces,
        cwd,
        packaged_mode: false,
    })
}

fn resolve_packaged_launch(app_handle: &AppHandle) -> Result<Option<LaunchPlan>, String> {
    let manifest_path =
        match runtime_paths::resolve_resource_path(app_handle, "orchestrator/runtime-manifest.json")
        {
            Some(path) if path.is_file() => path,
            _ => return Ok(None),
        };
    let orchestrator_dir = manifest_path.parent().ok_or_else(|| {
        format!(
            "Invalid orchestrator manifest path: {}",
            manifest_path.display()
        )
    })?;

    let manifest = read_runtime_manifest(&manifest_path)?;
    plan_from_manifest(orchestrator_dir, &manifest).map(Some)
}

pub(crate) fn read_runtime_manifest(manifest_path: &Path) -> Result<RuntimeManifest, String> {
    let manifest_text = fs::read_to_string(manifest_path).map_err(|error| {
        format!(
            "Failed to read orchestrator manifest {}: {}",
            manifest_path.display(),
            error
        )
    })?;
    serde_json::from_str(&manifest_text).map_err(|error| {
        format!(
            "Failed to parse orchestrator manifest {}: {}",
            manifest_path.display(),
            error
        )
    })
}

pub(crate) fn plan_from_manifest(
    orchestrator_dir: &Path,
    manifest: &RuntimeManifest,
) -> Result<LaunchPlan, String> {
    let default_python_relative = if cfg!(target_os = "windows") {
        PathBuf::from("python").join("Scripts").join("python.exe")
    } else {
        PathBuf::from("python").join("bin").join("python3")
    };
    let python_path = orchestrator_dir.join(
        manifest
            .python
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or(default_python_relative),
    );
    if !python_path.is_file() {
        return Err(format!(
            "Packaged runtime python executable is missing: {}",
            python_path.display()
        ));
    }

    let entrypoint_path = orchestrator_dir.join(
        manifest
            .entrypoint
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("app.py")),
    );
    if !entrypoint_path.is_file() {
        return Err(format!(
            "Packaged orchestrator entrypoint is missing: {}",
            entrypoint_path.display()
        ));
    }

    Ok(LaunchPlan {
        cmd: python_path.to_string_lossy().to_string(),
        args: vec![entrypoint_path.to_string_lossy().to_string()],
        cwd: orchestrator_dir.to_path_buf(),
        packaged_mode: true,
    })
}

fn resolve_dev_launch() -> Result<LaunchPlan, String> {
    let source_root = detect_source_root().ok_or_else(|| {
        format!("Cannot locate the orchestrator source directory. Set {SOURCE_DIR_ENV}.")
    })?;

    Ok(LaunchPlan {
        cmd: dev_python_command().to_string(),
        args: vec!["app.py".to_string()],
        cwd: source_root.join("orchestrator"),
        packaged_mode: false,
    })
}

fn dev_python_command() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}

fn is_source_root(candidate: &Path) -> bool {
    candidate.join("orchestrator").join("app.py").is_file()
}

pub(crate) fn detect_source_root() -> Option<PathBuf> {
    if let Ok(source_dir) = env::var(SOURCE_DIR_ENV) {
        let candidate = PathBuf::from(source_dir.trim());
        if is_source_root(&candidate) {
            return Some(candidate.canonicalize().unwrap_or(candidate));
        }
    }

    let workspace_root = runtime_paths::workspace_root_dir();
    let candidates = [workspace_root.clone(), workspace_root.join("..")];
    for candidate in candidates {
        if is_source_root(&candidate) {
            return Some(candidate.canonicalize().unwrap_or(candidate));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeManifest;
    use std::fs;

    fn packaged_runtime_dir(python_relative: &str, entrypoint: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let python_path = dir.path().join(python_relative);
        fs::create_dir_all(python_path.parent().expect("python parent")).expect("python dirs");
        fs::write(&python_path, "").expect("write python");
        fs::write(dir.path().join(entrypoint), "").expect("write entrypoint");
        dir
    }

    fn default_python_relative() -> &'static str {
        if cfg!(target_os = "windows") {
            "python/Scripts/python.exe"
        } else {
            "python/bin/python3"
        }
    }

    #[test]
    fn custom_plan_splits_quoted_arguments() {
        let plan = custom_plan_from_cmd(
            "uvicorn app:app --port 8000 --app-dir \"/srv/tool bench\"",
            Some(PathBuf::from("/srv/run")),
        )
        .expect("plan");
        assert_eq!(plan.cmd, "uvicorn");
        assert_eq!(
            plan.args,
            vec!["app:app", "--port", "8000", "--app-dir", "/srv/tool bench"]
        );
        assert_eq!(plan.cwd, PathBuf::from("/srv/run"));
        assert!(!plan.packaged_mode);
    }

    #[test]
    fn custom_plan_rejects_empty_and_unbalanced_commands() {
        assert!(custom_plan_from_cmd("", None).is_err());
        assert!(custom_plan_from_cmd("python \"unterminated", None).is_err());
    }

    #[test]
    fn plan_from_manifest_applies_defaults() {
        let dir = packaged_runtime_dir(default_python_relative(), "app.py");
        let manifest = RuntimeManifest {
            python: None,
            entrypoint: None,
        };

        let plan = plan_from_manifest(dir.path(), &manifest).expect("plan");
        assert!(plan.cmd.ends_with(if cfg!(target_os = "windows") {
            "python.exe"
        } else {
            "python3"
        }));
        assert_eq!(plan.args.len(), 1);
        assert!(plan.args[0].ends_with("app.py"));
        assert_eq!(plan.cwd, dir.path());
        assert!(plan.packaged_mode);
    }

    #[test]
    fn plan_from_manifest_honors_explicit_paths() {
        let dir = packaged_runtime_dir("py/bin/python", "serve.py");
        let manifest = RuntimeManifest {
            python: Some("py/bin/python".to_string()),
            entrypoint: Some("serve.py".to_string()),
        };

        let plan = plan_from_manifest(dir.path(), &manifest).expect("plan");
        assert!(plan.cmd.ends_with("python"));
        assert!(plan.args[0].ends_with("serve.py"));
    }

    #[test]
    fn plan_from_manifest_requires_the_python_executable() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("app.py"), "").expect("write entrypoint");
        let manifest = RuntimeManifest {
            python: None,
            entrypoint: None,
        };

        let error = plan_from_manifest(dir.path(), &manifest).expect_err("missing python");
        assert!(error.contains("python"));
    }

    #[test]
    fn read_runtime_manifest_parses_optional_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifest_path = dir.path().join("runtime-manifest.json");
        fs::write(&manifest_path, r#"{"python": "py/bin/python"}"#).expect("write manifest");

        let manifest = read_runtime_manifest(&manifest_path).expect("manifest");
        assert_eq!(manifest.python.as_deref(), Some("py/bin/python"));
        assert!(manifest.entrypoint.is_none());

        fs::write(&manifest_path, "not json").expect("write garbage");
        assert!(read_runtime_manifest(&manifest_path).is_err());
    }
}
