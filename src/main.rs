#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod bootstrap;
mod desktop_bridge_commands;
mod logging;
mod orchestrator_config;
mod orchestrator_launch;
mod orchestrator_process;
mod runtime_paths;
mod window_config;
mod window_manager;

pub(crate) use app_constants::*;
pub(crate) use app_types::{
    AtomicFlagGuard, LaunchPlan, OrchestratorBridgeResult, OrchestratorBridgeState,
    OrchestratorState, RuntimeManifest,
};
pub(crate) use logging::{append_desktop_log, append_shutdown_log, append_startup_log};

fn main() {
    app_runtime::run();
}
