//! Screen navigation with a back stack.
//!
//! `NavigationState` is the one piece of session state every screen reads.
//! Screens never touch it directly; they ask for a move with
//! [`NavigationState::navigate_to`] or [`NavigationState::go_back`].
//!
//! Rules:
//! - Navigating to the view already shown is a no-op. The reports screen is
//!   the same view only when its sub-view matches too.
//! - Leaving a screen pushes a snapshot of it (view, campaign, cadence),
//!   unless the top of the stack is already that screen. Only the top entry
//!   is checked; older duplicates stay.
//! - Going back pops one snapshot and restores it. With an empty stack the
//!   dashboard is shown and nothing else changes.

use crate::error::BookyError;
use crate::models::{Cadence, CampaignInfo};
use crate::types::{ReportsView, View};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// State of a screen at the moment it was left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub view: View,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Cadence>,
}

/// Optional data passed along with a navigation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateRequest {
    pub campaign: Option<CampaignInfo>,
    pub cadence: Option<Cadence>,
}

impl NavigateRequest {
    pub fn campaign(mut self, campaign: CampaignInfo) -> Self {
        self.campaign = Some(campaign);
        self
    }

    pub fn cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = Some(cadence);
        self
    }
}

/// What a navigation call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Transition {
    /// Target was already showing; nothing changed.
    Ignored,
    /// Current view changed. `pushed` is false when the departing screen was
    /// already on top of the stack, or when only the reports sub-view changed.
    Moved { pushed: bool },
    /// A snapshot was popped and restored.
    Popped,
    /// Back with an empty stack: the dashboard is shown.
    Fallback,
}

// ---------------------------------------------------------------------------
// NavigationState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    current: View,
    #[serde(default)]
    history: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    campaign: Option<CampaignInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_cadence: Option<Cadence>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn campaign(&self) -> Option<&CampaignInfo> {
        self.campaign.as_ref()
    }

    pub fn selected_cadence(&self) -> Option<&Cadence> {
        self.selected_cadence.as_ref()
    }

    /// Active reports sub-view; always `None` off the reports screen.
    pub fn reports_view(&self) -> Option<ReportsView> {
        self.current.reports_view()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    fn snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            view: self.current,
            campaign: self.campaign.clone(),
            cadence: self.selected_cadence.clone(),
        }
    }

    fn merge_campaign(&mut self, incoming: CampaignInfo) {
        match self.campaign.as_mut() {
            Some(current) => current.merge(incoming),
            None => self.campaign = Some(incoming),
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    pub fn navigate_to(&mut self, target: View, request: NavigateRequest) -> Transition {
        // Equality includes the reports sub-view, so reports -> reports is
        // only ignored when the sub-view is unchanged.
        if target == self.current {
            debug!(view = %target, "navigate ignored: already showing");
            return Transition::Ignored;
        }

        let from = self.current;
        let mut pushed = false;
        if !target.same_screen(from) {
            let top_is_current = self
                .history
                .last()
                .is_some_and(|entry| entry.view.same_screen(from));
            if !top_is_current {
                let entry = self.snapshot();
                self.history.push(entry);
                pushed = true;
            }
        }

        self.current = target;
        if let Some(campaign) = request.campaign {
            self.merge_campaign(campaign);
        }
        if let Some(cadence) = request.cadence {
            self.selected_cadence = Some(cadence);
        }

        debug!(
            from = %from,
            to = %target,
            pushed,
            depth = self.history.len(),
            "navigate"
        );
        Transition::Moved { pushed }
    }

    /// Restore the most recent snapshot. A snapshot's cadence only replaces
    /// the selection when it has one.
    pub fn go_back(&mut self) -> Transition {
        let Some(entry) = self.history.pop() else {
            debug!(from = %self.current, "back with empty history: dashboard");
            self.current = View::Dashboard;
            return Transition::Fallback;
        };

        let from = self.current;
        self.current = entry.view;
        if let Some(campaign) = entry.campaign {
            self.merge_campaign(campaign);
        }
        if let Some(cadence) = entry.cadence {
            self.selected_cadence = Some(cadence);
        }

        debug!(
            from = %from,
            to = %self.current,
            depth = self.history.len(),
            "back"
        );
        Transition::Popped
    }

    /// Back to the initial state (logout).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// NavStep
// ---------------------------------------------------------------------------

/// A navigation action in text form: `back`, `<view>`,
/// `reports:<sub-view>`, or `<view>@<argument>` where the argument names a
/// campaign (campaign-detail) or a cadence id (cadence screens).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavStep {
    Back,
    Go { view: View, arg: Option<String> },
}

fn takes_argument(view: View) -> bool {
    matches!(view, View::CampaignDetail) || view.requires_cadence()
}

impl std::str::FromStr for NavStep {
    type Err = BookyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "back" {
            return Ok(NavStep::Back);
        }
        let (view_part, arg) = match s.split_once('@') {
            Some((v, a)) => (v, Some(a)),
            None => (s, None),
        };
        let view: View = view_part.parse()?;
        match arg {
            None => Ok(NavStep::Go { view, arg: None }),
            Some("") => Err(BookyError::InvalidStep {
                step: s.to_string(),
                reason: "empty argument after '@'".to_string(),
            }),
            Some(_) if !takes_argument(view) => Err(BookyError::InvalidStep {
                step: s.to_string(),
                reason: format!("{} takes no argument", view.screen_name()),
            }),
            Some(a) => Ok(NavStep::Go {
                view,
                arg: Some(a.to_string()),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
