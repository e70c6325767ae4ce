use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const BOOKY_DIR: &str = ".booky";
pub const CONFIG_FILE: &str = ".booky/config.yaml";
pub const DEFAULT_SESSION_FILE: &str = ".booky/session.json";
pub const FIXTURES_FILE: &str = ".booky/fixtures.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn booky_dir(root: &Path) -> PathBuf {
    root.join(BOOKY_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured path against the workspace root. Absolute paths are
/// returned as-is.
pub fn resolve(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}
