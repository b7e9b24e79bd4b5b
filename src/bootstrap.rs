use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    window_config::WindowConfig,
    window_manager::{WindowHandle, WindowManager},
};

/// One-time application startup: on the host platform's ready signal, create
/// the main window and point it at the entry document.
pub(crate) struct Bootstrapper<M: WindowManager> {
    manager: M,
    ready_fired: AtomicBool,
}

impl<M: WindowManager> Bootstrapper<M> {
    pub(crate) fn new(manager: M) -> Self {
        Self {
            manager,
            ready_fired: AtomicBool::new(false),
        }
    }

    /// Handles the platform ready signal. Fires at most once per process;
    /// a replayed signal is a logged no-op. Window creation strictly precedes
    /// the document load, and neither is retried on failure.
    pub(crate) fn on_ready<F>(&self, config: &WindowConfig, log: F) -> Result<(), String>
    where
        F: Fn(&str),
    {
        if self
            .ready_fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log("ready signal replayed; main window bootstrap already ran");
            return Ok(());
        }

        config.validate()?;

        log(&format!(
            "creating main window {}x{} (preload: {})",
            config.width,
            config.height,
            config.preload_path.display()
        ));
        let handle = self.manager.create_window(config)?;
        handle.load_document(&config.document)?;
        log(&format!("entry document load issued: {}", config.document));
        Ok(())
    }
}
