use crate::error::BookyError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ReportsView
// ---------------------------------------------------------------------------

/// Sub-views of the reports screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportsView {
    Dashboard,
    ManagementReports,
    Activity,
    Meetings,
}

impl ReportsView {
    pub fn all() -> &'static [ReportsView] {
        &[
            ReportsView::Dashboard,
            ReportsView::ManagementReports,
            ReportsView::Activity,
            ReportsView::Meetings,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportsView::Dashboard => "dashboard",
            ReportsView::ManagementReports => "management-reports",
            ReportsView::Activity => "activity",
            ReportsView::Meetings => "meetings",
        }
    }
}

impl fmt::Display for ReportsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportsView {
    type Err = BookyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| BookyError::UnknownReportsView(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// The closed set of screens the dashboard can show.
///
/// The reports screen carries its active sub-view, so a stale sub-view can
/// never be attached to any other screen. `Reports(None)` means the reports
/// screen was entered without asking for a particular sub-view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum View {
    #[default]
    Dashboard,
    CampaignDetail,
    Cadences,
    CadenceDetail,
    NewCadence,
    EditCadence,
    CloneCadence,
    ProspectUpload,
    Prospects,
    AccountSettings,
    Meetings,
    Reports(Option<ReportsView>),
    Templates,
    Support,
}

impl View {
    /// Every screen once, with reports in its bare form.
    pub fn screens() -> &'static [View] {
        &[
            View::Dashboard,
            View::CampaignDetail,
            View::Cadences,
            View::CadenceDetail,
            View::NewCadence,
            View::EditCadence,
            View::CloneCadence,
            View::ProspectUpload,
            View::Prospects,
            View::AccountSettings,
            View::Meetings,
            View::Reports(None),
            View::Templates,
            View::Support,
        ]
    }

    /// Screen identifier without the reports sub-view.
    pub fn screen_name(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::CampaignDetail => "campaign-detail",
            View::Cadences => "cadences",
            View::CadenceDetail => "cadence-detail",
            View::NewCadence => "new-cadence",
            View::EditCadence => "edit-cadence",
            View::CloneCadence => "clone-cadence",
            View::ProspectUpload => "prospect-upload",
            View::Prospects => "prospects",
            View::AccountSettings => "account-settings",
            View::Meetings => "meetings",
            View::Reports(_) => "reports",
            View::Templates => "templates",
            View::Support => "support",
        }
    }

    /// True when both values name the same screen, whatever the reports
    /// sub-view.
    pub fn same_screen(self, other: View) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    pub fn reports_view(self) -> Option<ReportsView> {
        match self {
            View::Reports(sub) => sub,
            _ => None,
        }
    }

    /// Screens that only render with a selected cadence.
    pub fn requires_cadence(self) -> bool {
        matches!(
            self,
            View::CadenceDetail | View::EditCadence | View::CloneCadence
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Reports(Some(sub)) => write!(f, "reports:{sub}"),
            other => f.write_str(other.screen_name()),
        }
    }
}

impl std::str::FromStr for View {
    type Err = BookyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(sub) = s.strip_prefix("reports:") {
            return Ok(View::Reports(Some(sub.parse()?)));
        }
        View::screens()
            .iter()
            .copied()
            .find(|v| v.screen_name() == s)
            .ok_or_else(|| BookyError::UnknownView(s.to_string()))
    }
}

impl From<View> for String {
    fn from(view: View) -> Self {
        view.to_string()
    }
}

impl TryFrom<String> for View {
    type Error = BookyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn view_roundtrip() {
        for view in View::screens() {
            let parsed = View::from_str(&view.to_string()).unwrap();
            assert_eq!(*view, parsed);
        }
        for sub in ReportsView::all() {
            let view = View::Reports(Some(*sub));
            assert_eq!(View::from_str(&view.to_string()).unwrap(), view);
        }
    }

    #[test]
    fn screens_complete() {
        assert_eq!(View::screens().len(), 14);
    }

    #[test]
    fn unknown_view_rejected() {
        assert!(matches!(
            View::from_str("billing"),
            Err(BookyError::UnknownView(_))
        ));
        assert!(matches!(
            View::from_str("reports:weekly"),
            Err(BookyError::UnknownReportsView(_))
        ));
    }

    #[test]
    fn same_screen_ignores_reports_sub_view() {
        let a = View::Reports(Some(ReportsView::Dashboard));
        let b = View::Reports(Some(ReportsView::ManagementReports));
        assert!(a.same_screen(b));
        assert!(a.same_screen(View::Reports(None)));
        assert!(!a.same_screen(View::Dashboard));
        assert_ne!(a, b);
    }

    #[test]
    fn view_serializes_as_string() {
        let json = serde_json::to_string(&View::Reports(Some(ReportsView::Activity))).unwrap();
        assert_eq!(json, "\"reports:activity\"");
        let parsed: View = serde_json::from_str("\"edit-cadence\"").unwrap();
        assert_eq!(parsed, View::EditCadence);
    }

    #[test]
    fn cadence_screens() {
        assert!(View::EditCadence.requires_cadence());
        assert!(View::CloneCadence.requires_cadence());
        assert!(!View::NewCadence.requires_cadence());
    }
}
