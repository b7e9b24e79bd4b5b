use tauri::{Manager, RunEvent};

use crate::{
    append_shutdown_log, append_startup_log, bootstrap::Bootstrapper, logging, runtime_paths,
    window_config::WindowConfig, window_manager::TauriWindowManager, OrchestratorState,
    DESKTOP_LOG_FILE, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(
            runtime_paths::default_packaged_root_dir(),
            DESKTOP_LOG_FILE,
        )
        .display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(
            |app_handle, _argv, _cwd| {
                if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
                    let _ = window.set_focus();
                }
            },
        ))
        .manage(OrchestratorState::default())
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::desktop_bridge_is_desktop_runtime,
            crate::desktop_bridge_commands::desktop_bridge_get_orchestrator_url,
            crate::desktop_bridge_commands::desktop_bridge_get_orchestrator_state,
            crate::desktop_bridge_commands::desktop_bridge_restart_orchestrator,
            crate::desktop_bridge_commands::desktop_bridge_open_external_url,
        ])
        .setup(|app| {
            let app_handle = app.handle().clone();

            let state = app_handle.state::<OrchestratorState>();
            if let Err(error) = state.ensure_ready(&app_handle) {
                // The shell still opens; the dashboard reports the outage and
                // can retry through the bridge.
                append_startup_log(&format!("orchestrator startup failed: {error}"));
            }

            let ui_base_dir = runtime_paths::resolve_ui_base_dir(&app_handle)?;
            let config = WindowConfig::resolve(&ui_base_dir);
            let bootstrapper = Bootstrapper::new(TauriWindowManager::new(app_handle));
            bootstrapper.on_ready(&config, append_startup_log)?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { .. } => {
                let state = app_handle.state::<OrchestratorState>();
                state.mark_quitting();
            }
            RunEvent::Exit => {
                append_shutdown_log("desktop process exiting, stopping orchestrator");
                let state = app_handle.state::<OrchestratorState>();
                state.stop();
            }
            _ => {}
        });
}
