use anyhow::Context;
use booky_core::{config::Config, fixtures::Fixtures, io, paths};
use std::path::{Path, PathBuf};

pub fn run(root: &Path, name: Option<String>, sender: Option<String>) -> anyhow::Result<()> {
    let workspace_name = name.unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "booky".to_string())
    });

    println!("Initializing Booky in: {}", root.display());

    // 1. Seed fixtures so the collections can be edited by hand.
    let fixtures_path = root.join(paths::FIXTURES_FILE);
    let fixtures_yaml = Fixtures::seed()
        .to_yaml()
        .context("failed to serialize seed fixtures")?;
    report(
        paths::FIXTURES_FILE,
        io::write_if_missing(&fixtures_path, fixtures_yaml.as_bytes())
            .context("failed to write fixtures.yaml")?,
    );

    // 2. Config last, pointing at the fixtures file.
    let config_path = paths::config_path(root);
    if config_path.exists() {
        report(paths::CONFIG_FILE, false);
    } else {
        let mut cfg = Config::new(workspace_name);
        cfg.sender.name = sender.unwrap_or_default();
        cfg.fixtures = Some(PathBuf::from(paths::FIXTURES_FILE));
        cfg.save(root).context("failed to write config.yaml")?;
        report(paths::CONFIG_FILE, true);
    }

    Ok(())
}

fn report(path: &str, created: bool) {
    if created {
        println!("  created: {path}");
    } else {
        println!("  exists:  {path}");
    }
}
