pub mod config;
pub mod init;
pub mod nav;
pub mod session;
pub mod template;

use anyhow::Context;
use booky_core::{app::App, config::Config, fixtures::Fixtures, session::FileSessionStore};
use std::path::Path;

/// Mount the dashboard core for `root`: config, fixtures and the saved
/// session.
pub(crate) fn open_app(root: &Path) -> anyhow::Result<App<FileSessionStore>> {
    let config = Config::load(root).context("failed to load config")?;
    let fixtures = match config.fixtures_path(root) {
        Some(path) => Fixtures::load(&path)
            .with_context(|| format!("failed to load fixtures from {}", path.display()))?,
        None => Fixtures::seed(),
    };
    let store = FileSessionStore::new(config.session_path(root));
    Ok(App::mount(store, fixtures, config))
}
