use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Prospect
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: String,
    /// Display name, e.g. "Ana Souza".
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Meeting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub prospect_id: String,
    pub date: String,
    pub time: String,
}

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Email,
    Call,
    Linkedin,
    Task,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKind::Email => "email",
            StepKind::Call => "call",
            StepKind::Linkedin => "linkedin",
            StepKind::Task => "task",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadenceStep {
    pub day: u32,
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceStatus {
    Active,
    Paused,
    Draft,
}

impl fmt::Display for CadenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CadenceStatus::Active => "active",
            CadenceStatus::Paused => "paused",
            CadenceStatus::Draft => "draft",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    pub id: String,
    pub name: String,
    pub status: CadenceStatus,
    #[serde(default)]
    pub steps: Vec<CadenceStep>,
}

impl Cadence {
    /// Draft used by the clone-cadence screen. The copy keeps every step but
    /// starts life as a draft with no id.
    pub fn duplicate(&self) -> Cadence {
        Cadence {
            id: String::new(),
            name: format!("Copy of {}", self.name),
            status: CadenceStatus::Draft,
            steps: self.steps.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// EmailTemplate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(flatten)]
    pub template: Template,
}

// ---------------------------------------------------------------------------
// CampaignInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_opens: Option<bool>,
}

/// Campaign data shown on the campaign-detail screen.
///
/// Every field is optional so that a partial record can be merged over the
/// current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prospect_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<CampaignSettings>,
}

impl CampaignInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Shallow merge: fields present in `incoming` overwrite, absent fields
    /// keep their current value. `settings` is replaced as a whole.
    pub fn merge(&mut self, incoming: CampaignInfo) {
        if incoming.id.is_some() {
            self.id = incoming.id;
        }
        if incoming.name.is_some() {
            self.name = incoming.name;
        }
        if incoming.kind.is_some() {
            self.kind = incoming.kind;
        }
        if incoming.prospect_count.is_some() {
            self.prospect_count = incoming.prospect_count;
        }
        if incoming.settings.is_some() {
            self.settings = incoming.settings;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
