//! Binary entry point: resolve settings, start file logging, load the catalog,
//! and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use library_manager::logging::init_logging;
use library_manager::{
    run_app, ActionProcessor, App, AppConfig, CatalogStore, JsonFile, SystemClock,
};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let _log_guard = init_logging(&config.log_dir, &config.log_level)?;

    let store = CatalogStore::load(JsonFile::new(&config.data_file))
        .with_context(|| format!("failed to load {}", config.data_file.display()))?;
    let processor = ActionProcessor::with_policy(store, SystemClock, config.loan);

    let mut app = App::new(processor);
    run_app(&mut app).inspect_err(|err| tracing::error!(error = %err, "terminal session failed"))
}
