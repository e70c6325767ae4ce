use crate::models::{Cadence, CampaignInfo};
use crate::navigation::NavigationState;
use crate::types::{ReportsView, View};
use serde::Serialize;

/// The screen to render for the current navigation state, with the data it
/// needs borrowed from that state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", content = "data", rename_all = "kebab-case")]
pub enum Screen<'a> {
    Dashboard,
    CampaignDetail(Option<&'a CampaignInfo>),
    Cadences,
    CadenceDetail(&'a Cadence),
    NewCadence,
    EditCadence(&'a Cadence),
    /// Carries the draft copy, not the source cadence.
    CloneCadence(Cadence),
    ProspectUpload,
    Prospects,
    AccountSettings,
    Meetings,
    Reports(ReportsView),
    Templates,
    Support,
}

impl Screen<'_> {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::CampaignDetail(_) => "Campaign",
            Screen::Cadences => "Cadences",
            Screen::CadenceDetail(_) => "Cadence",
            Screen::NewCadence => "New Cadence",
            Screen::EditCadence(_) => "Edit Cadence",
            Screen::CloneCadence(_) => "Clone Cadence",
            Screen::ProspectUpload => "Upload Prospects",
            Screen::Prospects => "Prospects",
            Screen::AccountSettings => "Account Settings",
            Screen::Meetings => "Meetings",
            Screen::Reports(_) => "Reports",
            Screen::Templates => "Templates",
            Screen::Support => "Support",
        }
    }
}

/// Pick the screen for `state`. Cadence screens with no selected cadence
/// render nothing (`None`).
pub fn resolve(state: &NavigationState) -> Option<Screen<'_>> {
    let cadence = state.selected_cadence();
    let screen = match state.current() {
        View::Dashboard => Screen::Dashboard,
        View::CampaignDetail => Screen::CampaignDetail(state.campaign()),
        View::Cadences => Screen::Cadences,
        View::CadenceDetail => Screen::CadenceDetail(cadence?),
        View::NewCadence => Screen::NewCadence,
        View::EditCadence => Screen::EditCadence(cadence?),
        View::CloneCadence => Screen::CloneCadence(cadence?.duplicate()),
        View::ProspectUpload => Screen::ProspectUpload,
        View::Prospects => Screen::Prospects,
        View::AccountSettings => Screen::AccountSettings,
        View::Meetings => Screen::Meetings,
        View::Reports(sub) => Screen::Reports(sub.unwrap_or(ReportsView::Dashboard)),
        View::Templates => Screen::Templates,
        View::Support => Screen::Support,
    };
    Some(screen)
}
