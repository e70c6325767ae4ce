use crate::error::{BookyError, Result};
use crate::models::{
    Cadence, CadenceStatus, CadenceStep, EmailTemplate, Meeting, Prospect, StepKind,
};
use crate::template::Template;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// In-memory domain collections handed to screens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub cadences: Vec<Cadence>,
    #[serde(default)]
    pub prospects: Vec<Prospect>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default)]
    pub templates: Vec<EmailTemplate>,
}

impl Fixtures {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn cadence(&self, id: &str) -> Result<&Cadence> {
        self.cadences
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| BookyError::CadenceNotFound(id.to_string()))
    }

    pub fn prospect(&self, id: &str) -> Result<&Prospect> {
        self.prospects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| BookyError::ProspectNotFound(id.to_string()))
    }

    pub fn template(&self, id: &str) -> Result<&EmailTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| BookyError::TemplateNotFound(id.to_string()))
    }

    /// Next meeting booked with a prospect, if any.
    pub fn meeting_for(&self, prospect_id: &str) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.prospect_id == prospect_id)
    }

    pub fn seed() -> Self {
        let intro = Template::new(
            "Quick question, {{first_name}}",
            "Hi {{first_name}},\n\nAs {{title}} at {{company}}, you probably juggle a lot of meetings. \
             Would a 15-minute call next week make sense?\n\nBest,\n{{sender_name}}",
        );
        let follow_up = Template::new(
            "Re: Quick question, {{first_name}}",
            "Hi {{first_name}}, just bumping this up. Is {{company}} still looking at scheduling tools?\n\n{{sender_name}}",
        );
        let confirmation = Template::new(
            "Confirmed: {{meeting_date}} at {{meeting_time}}",
            "Hi {{full_name}},\n\nLooking forward to our call on {{meeting_date}} at {{meeting_time}}. \
             The invite went to {{email}}.\n\n{{sender_name}}",
        );

        Self {
            cadences: vec![
                Cadence {
                    id: "cad-enterprise".to_string(),
                    name: "Enterprise Outbound".to_string(),
                    status: CadenceStatus::Active,
                    steps: vec![
                        CadenceStep {
                            day: 1,
                            kind: StepKind::Email,
                            template: Some(intro.clone()),
                        },
                        CadenceStep {
                            day: 3,
                            kind: StepKind::Linkedin,
                            template: None,
                        },
                        CadenceStep {
                            day: 5,
                            kind: StepKind::Email,
                            template: Some(follow_up.clone()),
                        },
                        CadenceStep {
                            day: 8,
                            kind: StepKind::Call,
                            template: None,
                        },
                    ],
                },
                Cadence {
                    id: "cad-inbound".to_string(),
                    name: "Inbound Follow-up".to_string(),
                    status: CadenceStatus::Paused,
                    steps: vec![
                        CadenceStep {
                            day: 1,
                            kind: StepKind::Email,
                            template: Some(follow_up.clone()),
                        },
                        CadenceStep {
                            day: 2,
                            kind: StepKind::Task,
                            template: None,
                        },
                    ],
                },
            ],
            prospects: vec![
                Prospect {
                    id: "p-ana".to_string(),
                    name: "Ana Souza".to_string(),
                    title: Some("VP of Sales".to_string()),
                    company: Some("Acme".to_string()),
                    email: "ana@acme.io".to_string(),
                },
                Prospect {
                    id: "p-li".to_string(),
                    name: "Li Wei".to_string(),
                    title: None,
                    company: Some("Globex".to_string()),
                    email: "li.wei@globex.com".to_string(),
                },
                Prospect {
                    id: "p-omar".to_string(),
                    name: "Omar".to_string(),
                    title: Some("Head of Growth".to_string()),
                    company: None,
                    email: "omar@initech.dev".to_string(),
                },
            ],
            meetings: vec![Meeting {
                id: "m-1".to_string(),
                prospect_id: "p-ana".to_string(),
                date: "2026-10-21".to_string(),
                time: "10:30 AM".to_string(),
            }],
            templates: vec![
                EmailTemplate {
                    id: "tpl-intro".to_string(),
                    name: "Cold intro".to_string(),
                    category: "prospecting".to_string(),
                    template: intro,
                },
                EmailTemplate {
                    id: "tpl-follow-up".to_string(),
                    name: "Follow-up".to_string(),
                    category: "prospecting".to_string(),
                    template: follow_up,
                },
                EmailTemplate {
                    id: "tpl-confirm".to_string(),
                    name: "Meeting confirmation".to_string(),
                    category: "meetings".to_string(),
                    template: confirmation,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::unknown_tags;
    use tempfile::TempDir;

    #[test]
    fn seed_lookups() {
        let fx = Fixtures::seed();
        assert_eq!(fx.cadence("cad-inbound").unwrap().name, "Inbound Follow-up");
        assert_eq!(fx.prospect("p-li").unwrap().company.as_deref(), Some("Globex"));
        assert!(fx.meeting_for("p-ana").is_some());
        assert!(fx.meeting_for("p-li").is_none());
        assert!(matches!(
            fx.cadence("nope"),
            Err(BookyError::CadenceNotFound(_))
        ));
    }

    #[test]
    fn seed_templates_use_known_tags_only() {
        for t in Fixtures::seed().templates {
            assert!(unknown_tags(&t.template.subject).is_empty(), "{}", t.id);
            assert!(unknown_tags(&t.template.body).is_empty(), "{}", t.id);
        }
    }

    #[test]
    fn seed_survives_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixtures.yaml");
        std::fs::write(&path, Fixtures::seed().to_yaml().unwrap()).unwrap();
        let fx = Fixtures::load(&path).unwrap();
        assert_eq!(fx.cadences, Fixtures::seed().cadences);
        assert_eq!(fx.templates, Fixtures::seed().templates);
    }

    #[test]
    fn load_from_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixtures.yaml");
        std::fs::write(
            &path,
            "prospects:\n  - id: p1\n    name: Joan Doe\n    email: joan@doe.io\n",
        )
        .unwrap();
        let fx = Fixtures::load(&path).unwrap();
        assert_eq!(fx.prospects.len(), 1);
        assert!(fx.cadences.is_empty());
        assert_eq!(fx.prospect("p1").unwrap().title, None);
    }
}
