use crate::error::{BookyError, Result};
use crate::navigation::NavigationState;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// The saved login, stored as a single JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Key-value slot holding the raw session blob.
pub trait SessionStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&mut self, data: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, data: &str) -> Result<()> {
        crate::io::atomic_write(&self.path, data.as_bytes())
    }

    fn clear(&mut self) -> Result<()> {
        crate::io::remove_if_exists(&self.path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    data: Option<String>,
}

impl MemorySessionStore {
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &str) -> Result<()> {
        self.data = Some(data.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.data = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

fn discard(store: &mut dyn SessionStore) {
    if let Err(e) = store.clear() {
        warn!(error = %e, "failed to clear session record");
    }
}

/// Read the saved session. Any record that parses starts an authenticated
/// session. A missing or unreadable record yields `None`; a malformed one is
/// also removed from the store.
pub fn restore(store: &mut dyn SessionStore) -> Option<SessionRecord> {
    let raw = match store.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "failed to read session record");
            return None;
        }
    };

    match serde_json::from_str::<SessionRecord>(&raw) {
        Ok(mut record) => {
            debug!(email = %record.email, "session restored");
            record.is_authenticated = true;
            Some(record)
        }
        Err(e) => {
            warn!(error = %e, "discarding malformed session record");
            discard(store);
            None
        }
    }
}

pub fn login(store: &mut dyn SessionStore, email: &str, name: &str) -> Result<SessionRecord> {
    let email = email.trim();
    let name = name.trim();
    if !is_valid_email(email) {
        return Err(BookyError::InvalidEmail(email.to_string()));
    }
    if name.is_empty() {
        return Err(BookyError::EmptyName);
    }

    let record = SessionRecord {
        email: email.to_string(),
        name: name.to_string(),
        is_authenticated: true,
        logged_in_at: Some(Utc::now()),
    };
    store.save(&serde_json::to_string(&record)?)?;
    debug!(email = %record.email, "logged in");
    Ok(record)
}

/// Clear the saved session and return navigation to its initial state.
pub fn logout(store: &mut dyn SessionStore, nav: &mut NavigationState) -> Result<()> {
    store.clear()?;
    nav.reset();
    debug!("logged out");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
