use std::{
    env,
    fs::{self, OpenOptions},
    net::{TcpStream, ToSocketAddrs},
    process::{Child, Command, Stdio},
    sync::atomic::Ordering,
    thread,
    time::{Duration, Instant},
};

use tauri::AppHandle;
use url::Url;

use crate::{
    append_desktop_log, logging, orchestrator_config, orchestrator_launch, runtime_paths,
    LaunchPlan, OrchestratorBridgeState, OrchestratorState, ORCHESTRATOR_AUTO_START_ENV,
    ORCHESTRATOR_LOG_FILE,
};

impl OrchestratorState {
    /// Makes the orchestrator reachable: a no-op if something already answers
    /// on the configured URL, otherwise resolves a launch plan, spawns the
    /// process and polls until it accepts connections.
    pub(crate) fn ensure_ready(&self, app_handle: &AppHandle) -> Result<(), String> {
        if self.ping_orchestrator(800) {
            return Ok(());
        }

        if env::var(ORCHESTRATOR_AUTO_START_ENV).unwrap_or_else(|_| "1".to_string()) == "0" {
            return Err(format!(
                "Orchestrator is unreachable and auto-start is disabled ({ORCHESTRATOR_AUTO_START_ENV}=0)."
            ));
        }

        let plan = orchestrator_launch::resolve_launch_plan(app_handle)?;
        self.start_process(&plan)?;
        self.wait_until_reachable(&plan)
    }

    fn start_process(&self, plan: &LaunchPlan) -> Result<(), String> {
        let mut guard = self
            .child
            .lock()
            .map_err(|_| "Orchestrator process lock poisoned.".to_string())?;
        if guard.is_some() {
            return Ok(());
        }

        if !plan.cwd.exists() {
            fs::create_dir_all(&plan.cwd).map_err(|error| {
                format!(
                    "Failed to create orchestrator cwd {}: {}",
                    plan.cwd.display(),
                    error
                )
            })?;
        }

        let mut command = Command::new(&plan.cmd);
        command
            .args(&plan.args)
            .current_dir(&plan.cwd)
            .stdin(Stdio::null())
            .env("PYTHONUNBUFFERED", "1");

        match orchestrator_log_file() {
            Ok(stdout_file) => {
                let stderr_file = stdout_file.try_clone().map_err(|error| {
                    format!("Failed to clone orchestrator log handle: {error}")
                })?;
                command.stdout(Stdio::from(stdout_file));
                command.stderr(Stdio::from(stderr_file));
            }
            Err(error) => {
                append_desktop_log(&format!(
                    "orchestrator log unavailable, discarding output: {error}"
                ));
                command.stdout(Stdio::null());
                command.stderr(Stdio::null());
            }
        }

        let child = command.spawn().map_err(|error| {
            format!(
                "Failed to spawn orchestrator with command {:?}: {}",
                debug_command(plan),
                error
            )
        })?;
        append_desktop_log(&format!("orchestrator spawned: {:?}", debug_command(plan)));
        *guard = Some(child);
        Ok(())
    }

    fn wait_until_reachable(&self, plan: &LaunchPlan) -> Result<(), String> {
        self.wait_with_timeout(orchestrator_config::resolve_startup_timeout(
            plan.packaged_mode,
        ))
    }

    fn wait_with_timeout(&self, timeout: Option<Duration>) -> Result<(), String> {
        let start_time = Instant::now();

        loop {
            if self.ping_orchestrator(800) {
                return Ok(());
            }

            {
                let mut guard = self
                    .child
                    .lock()
                    .map_err(|_| "Orchestrator process lock poisoned.".to_string())?;
                match guard.as_mut() {
                    Some(child) => match child.try_wait() {
                        Ok(Some(status)) => {
                            *guard = None;
                            return Err(format!(
                                "Orchestrator exited before becoming reachable: {status}"
                            ));
                        }
                        Ok(None) => {}
                        Err(error) => {
                            return Err(format!(
                                "Failed to poll orchestrator process status: {error}"
                            ));
                        }
                    },
                    None => return Err("Orchestrator process is not running.".to_string()),
                }
            }

            if let Some(limit) = timeout {
                if start_time.elapsed() >= limit {
                    return Err(format!(
                        "Timed out after {}ms waiting for the orchestrator.",
                        limit.as_millis()
                    ));
                }
            }

            thread::sleep(Duration::from_millis(600));
        }
    }

    pub(crate) fn ping_orchestrator(&self, timeout_ms: u64) -> bool {
        ping_url(&self.orchestrator_url, timeout_ms)
    }

    pub(crate) fn is_running(&self) -> bool {
        match self.child.lock() {
            Ok(mut guard) => {
                if let Some(child) = guard.as_mut() {
                    return matches!(child.try_wait(), Ok(None));
                }
            }
            Err(_) => return false,
        }

        // No child held: an externally managed orchestrator counts as
        // running. Ping outside the lock so shutdown never waits behind
        // the probe.
        self.ping_orchestrator(300)
    }

    pub(crate) fn bridge_state(&self) -> OrchestratorBridgeState {
        OrchestratorBridgeState {
            running: self.is_running(),
            spawning: self.is_spawning.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn stop(&self) {
        let mut child = match self.child.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(process) = child.as_mut() {
            stop_child_process(process);
        }
    }
}

pub(crate) fn ping_url(raw_url: &str, timeout_ms: u64) -> bool {
    let parsed = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(_) => return false,
    };
    let host = match parsed.host_str() {
        Some(host) => host.to_string(),
        None => return false,
    };
    let port = parsed.port_or_known_default().unwrap_or(80);
    let timeout = Duration::from_millis(timeout_ms.max(50));

    let addrs = match (host.as_str(), port).to_socket_addrs() {
        Ok(addrs) => addrs.collect::<Vec<_>>(),
        Err(_) => return false,
    };
    addrs
        .iter()
        .any(|address| TcpStream::connect_timeout(address, timeout).is_ok())
}

fn orchestrator_log_file() -> Result<fs::File, String> {
    let path = logging::resolve_desktop_log_path(
        runtime_paths::default_packaged_root_dir(),
        ORCHESTRATOR_LOG_FILE,
    );
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create orchestrator log directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|error| {
            format!(
                "Failed to open orchestrator log {}: {}",
                path.display(),
                error
            )
        })
}

fn stop_child_process(child: &mut Child) {
    #[cfg(target_os = "windows")]
    {
        // Kill the whole tree: the python entrypoint forks workers.
        let _ = Command::new("taskkill")
            .args(["/pid", &child.id().to_string(), "/t", "/f"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        let _ = child.wait();
        return;
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = child.kill();
        let _ = child.wait();
    }
}

pub(crate) fn debug_command(plan: &LaunchPlan) -> Vec<String> {
    let mut parts = vec![plan.cmd.clone()];
    parts.extend(plan.args.iter().cloned());
    parts
}
