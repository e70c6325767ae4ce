use crate::error::{BookyError, Result};
use crate::paths;
use crate::session::is_valid_email;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub name: String,
}

/// Who outgoing emails are from; feeds `{{sender_name}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenderConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: PathBuf,
}

fn default_session_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_SESSION_FILE)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub sender: SenderConfig,
    #[serde(default)]
    pub session: SessionConfig,
    /// YAML file with cadences, prospects, meetings and templates. The
    /// built-in seed is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(workspace_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            workspace: WorkspaceConfig {
                name: workspace_name.into(),
            },
            sender: SenderConfig::default(),
            session: SessionConfig::default(),
            fixtures: None,
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(BookyError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn session_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.session.file)
    }

    pub fn fixtures_path(&self, root: &Path) -> Option<PathBuf> {
        self.fixtures.as_deref().map(|p| paths::resolve(root, p))
    }

    pub fn sender_name(&self) -> Option<&str> {
        let name = self.sender.name.trim();
        (!name.is_empty()).then_some(name)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.sender_name().is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "sender.name is empty: {{sender_name}} will expand to nothing"
                    .to_string(),
            });
        }

        if let Some(email) = &self.sender.email {
            if !is_valid_email(email.trim()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("sender.email '{email}' is not a valid address"),
                });
            }
        }

        if self.session.file.is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "session.file '{}' is outside the workspace",
                    self.session.file.display()
                ),
            });
        }

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
