use std::path::{Path, PathBuf};

/// Resolve the Booky workspace root.
///
/// Priority:
/// 1. `--root` flag / `BOOKY_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.booky/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_workspace(&cwd).unwrap_or(cwd)
}

fn find_workspace(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| booky_core::paths::booky_dir(dir).is_dir())
        .map(Path::to_path_buf)
}
