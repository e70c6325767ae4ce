use crate::config::Config;
use crate::error::Result;
use crate::fixtures::Fixtures;
use crate::models::CampaignInfo;
use crate::navigation::{NavStep, NavigateRequest, NavigationState, Transition};
use crate::screen::{self, Screen};
use crate::session::{self, SessionRecord, SessionStore};
use crate::template::{self, Template, TemplateContext};
use crate::types::View;

/// Session-scoped state: created at mount, torn down at logout. Screens get
/// it by reference and move around only through `navigate` / `go_back`.
pub struct App<S: SessionStore> {
    store: S,
    user: Option<SessionRecord>,
    nav: NavigationState,
    fixtures: Fixtures,
    config: Config,
}

impl<S: SessionStore> App<S> {
    pub fn mount(mut store: S, fixtures: Fixtures, config: Config) -> Self {
        let user = session::restore(&mut store);
        Self {
            store,
            user,
            nav: NavigationState::new(),
            fixtures,
            config,
        }
    }

    pub fn user(&self) -> Option<&SessionRecord> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn navigate(&mut self, view: View, request: NavigateRequest) -> Transition {
        self.nav.navigate_to(view, request)
    }

    pub fn go_back(&mut self) -> Transition {
        self.nav.go_back()
    }

    /// Run a textual step. `@` arguments name a campaign for
    /// campaign-detail and a cadence id for the cadence screens.
    pub fn apply(&mut self, step: &NavStep) -> Result<Transition> {
        let (view, arg) = match step {
            NavStep::Back => return Ok(self.go_back()),
            NavStep::Go { view, arg } => (*view, arg.as_deref()),
        };

        let mut request = NavigateRequest::default();
        if let Some(arg) = arg {
            if view == View::CampaignDetail {
                request = request.campaign(CampaignInfo::named(arg));
            } else {
                request = request.cadence(self.fixtures.cadence(arg)?.clone());
            }
        }
        Ok(self.navigate(view, request))
    }

    pub fn screen(&self) -> Option<Screen<'_>> {
        screen::resolve(&self.nav)
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    /// Context for previews: the prospect's fields, their next meeting, and
    /// the configured sender. Without a prospect only the sender is known.
    pub fn context_for(&self, prospect_id: Option<&str>) -> Result<TemplateContext> {
        let sender = self.config.sender_name();
        let Some(id) = prospect_id else {
            let mut ctx = TemplateContext::default();
            if let Some(name) = sender {
                ctx.set(template::TemplateTag::SenderName, name);
            }
            return Ok(ctx);
        };

        let prospect = self.fixtures.prospect(id)?;
        let ctx = TemplateContext::for_prospect(prospect, sender);
        Ok(match self.fixtures.meeting_for(id) {
            Some(meeting) => ctx.with_meeting(meeting),
            None => ctx,
        })
    }

    pub fn preview(&self, template: &Template, prospect_id: Option<&str>) -> Result<Template> {
        let ctx = self.context_for(prospect_id)?;
        Ok(template::substitute(template, &ctx))
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    pub fn login(&mut self, email: &str, name: &str) -> Result<&SessionRecord> {
        let record = session::login(&mut self.store, email, name)?;
        Ok(self.user.insert(record))
    }

    pub fn logout(&mut self) -> Result<()> {
        session::logout(&mut self.store, &mut self.nav)?;
        self.user = None;
        Ok(())
    }
}
