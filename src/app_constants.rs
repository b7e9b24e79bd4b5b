pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "ToolBench";
pub(crate) const MAIN_WINDOW_WIDTH: u32 = 900;
pub(crate) const MAIN_WINDOW_HEIGHT: u32 = 700;

pub(crate) const ENTRY_DOCUMENT: &str = "index.html";
pub(crate) const PRELOAD_SCRIPT_FILE: &str = "preload.js";

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const ORCHESTRATOR_LOG_FILE: &str = "orchestrator.log";

pub(crate) const DEFAULT_ORCHESTRATOR_URL: &str = "http://127.0.0.1:8000/";
pub(crate) const PACKAGED_TIMEOUT_FALLBACK_MS: u64 = 5 * 60 * 1000;

pub(crate) const ORCHESTRATOR_URL_ENV: &str = "TOOLBENCH_ORCHESTRATOR_URL";
pub(crate) const ORCHESTRATOR_CMD_ENV: &str = "TOOLBENCH_ORCHESTRATOR_CMD";
pub(crate) const ORCHESTRATOR_CWD_ENV: &str = "TOOLBENCH_ORCHESTRATOR_CWD";
pub(crate) const ORCHESTRATOR_AUTO_START_ENV: &str = "TOOLBENCH_ORCHESTRATOR_AUTO_START";
pub(crate) const ORCHESTRATOR_TIMEOUT_ENV: &str = "TOOLBENCH_ORCHESTRATOR_TIMEOUT_MS";
pub(crate) const SOURCE_DIR_ENV: &str = "TOOLBENCH_SOURCE_DIR";
pub(crate) const UI_DIR_ENV: &str = "TOOLBENCH_UI_DIR";
