pub mod command;
pub mod config;
pub mod render;
pub mod rest;
pub mod restart;

use std::path::Path;
use std::sync::Arc;

use command::{Invoker, ProcessInvoker};
use config::Config;
use render::PageComposer;

/// Shared application state passed to every handler.
pub struct AppContext {
    pub config: Arc<Config>,
    pub composer: PageComposer,
    pub invoker: Arc<dyn Invoker>,
}

impl AppContext {
    /// Wire the real process invoker and a composer over the configured
    /// views directory.
    pub fn new(config: Config) -> Self {
        Self::with_invoker(config, Arc::new(ProcessInvoker))
    }

    /// Same wiring with a caller-supplied invoker (used by tests).
    pub fn with_invoker(config: Config, invoker: Arc<dyn Invoker>) -> Self {
        let composer = PageComposer::new(Path::new(&config.views_dir));
        Self {
            config: Arc::new(config),
            composer,
            invoker,
        }
    }
}
