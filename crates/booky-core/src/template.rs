//! Dynamic-tag substitution for email subjects and bodies.
//!
//! Templates reference prospect and meeting fields with `{{tag}}`
//! placeholders. Substitution is a single left-to-right pass keyed on the
//! nine exact tag strings: inserted values are never rescanned, and anything
//! else between braces (unknown tags, unbalanced `{{`) is literal text.

use crate::error::BookyError;
use crate::models::{Meeting, Prospect};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub const ROLE_FALLBACK: &str = "their role";
pub const COMPANY_FALLBACK: &str = "their company";

// ---------------------------------------------------------------------------
// TemplateTag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateTag {
    FirstName,
    LastName,
    FullName,
    Title,
    Company,
    Email,
    MeetingDate,
    MeetingTime,
    SenderName,
}

impl TemplateTag {
    pub fn all() -> &'static [TemplateTag] {
        &[
            TemplateTag::FirstName,
            TemplateTag::LastName,
            TemplateTag::FullName,
            TemplateTag::Title,
            TemplateTag::Company,
            TemplateTag::Email,
            TemplateTag::MeetingDate,
            TemplateTag::MeetingTime,
            TemplateTag::SenderName,
        ]
    }

    pub fn key(self) -> &'static str {
        match self {
            TemplateTag::FirstName => "first_name",
            TemplateTag::LastName => "last_name",
            TemplateTag::FullName => "full_name",
            TemplateTag::Title => "title",
            TemplateTag::Company => "company",
            TemplateTag::Email => "email",
            TemplateTag::MeetingDate => "meeting_date",
            TemplateTag::MeetingTime => "meeting_time",
            TemplateTag::SenderName => "sender_name",
        }
    }

    /// The literal placeholder, e.g. `{{first_name}}`.
    pub fn placeholder(self) -> String {
        format!("{{{{{}}}}}", self.key())
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateTag::FirstName => "First Name",
            TemplateTag::LastName => "Last Name",
            TemplateTag::FullName => "Full Name",
            TemplateTag::Title => "Job Title",
            TemplateTag::Company => "Company",
            TemplateTag::Email => "Email",
            TemplateTag::MeetingDate => "Meeting Date",
            TemplateTag::MeetingTime => "Meeting Time",
            TemplateTag::SenderName => "Sender Name",
        }
    }

    pub fn from_key(key: &str) -> Option<TemplateTag> {
        Self::all().iter().copied().find(|t| t.key() == key)
    }
}

impl fmt::Display for TemplateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for TemplateTag {
    type Err = BookyError;

    /// Accepts both `first_name` and `{{first_name}}`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .strip_prefix("{{")
            .and_then(|rest| rest.strip_suffix("}}"))
            .unwrap_or(s);
        Self::from_key(key).ok_or_else(|| BookyError::UnknownTag(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Template / TemplateContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub subject: String,
    pub body: String,
}

impl Template {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Field values available to a template. Absent and empty fields fall back
/// per [`TemplateContext::value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateContext {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub meeting_date: Option<String>,
    pub meeting_time: Option<String>,
    pub sender_name: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl TemplateContext {
    /// Context for a prospect. The display name becomes `full_name`; the
    /// first token is left to the `first_name` fallback and the remaining
    /// tokens form `last_name`.
    pub fn for_prospect(prospect: &Prospect, sender_name: Option<&str>) -> Self {
        let last_name = prospect
            .name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            full_name: Some(prospect.name.clone()),
            last_name: Some(last_name),
            title: prospect.title.clone(),
            company: prospect.company.clone(),
            email: Some(prospect.email.clone()),
            sender_name: sender_name.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_meeting(mut self, meeting: &Meeting) -> Self {
        self.meeting_date = Some(meeting.date.clone());
        self.meeting_time = Some(meeting.time.clone());
        self
    }

    pub fn set(&mut self, tag: TemplateTag, value: impl Into<String>) {
        let slot = match tag {
            TemplateTag::FirstName => &mut self.first_name,
            TemplateTag::LastName => &mut self.last_name,
            TemplateTag::FullName => &mut self.full_name,
            TemplateTag::Title => &mut self.title,
            TemplateTag::Company => &mut self.company,
            TemplateTag::Email => &mut self.email,
            TemplateTag::MeetingDate => &mut self.meeting_date,
            TemplateTag::MeetingTime => &mut self.meeting_time,
            TemplateTag::SenderName => &mut self.sender_name,
        };
        *slot = Some(value.into());
    }

    /// The text a tag expands to, after fallbacks.
    pub fn value(&self, tag: TemplateTag) -> &str {
        match tag {
            TemplateTag::FirstName => present(&self.first_name)
                .or_else(|| {
                    present(&self.full_name).and_then(|name| name.split_whitespace().next())
                })
                .unwrap_or(""),
            TemplateTag::Title => present(&self.title).unwrap_or(ROLE_FALLBACK),
            TemplateTag::Company => present(&self.company).unwrap_or(COMPANY_FALLBACK),
            TemplateTag::LastName => present(&self.last_name).unwrap_or(""),
            TemplateTag::FullName => present(&self.full_name).unwrap_or(""),
            TemplateTag::Email => present(&self.email).unwrap_or(""),
            TemplateTag::MeetingDate => present(&self.meeting_date).unwrap_or(""),
            TemplateTag::MeetingTime => present(&self.meeting_time).unwrap_or(""),
            TemplateTag::SenderName => present(&self.sender_name).unwrap_or(""),
        }
    }
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static BRACED_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| {
        let keys: Vec<&str> = TemplateTag::all().iter().map(|t| t.key()).collect();
        Regex::new(&format!(r"\{{\{{({})\}}\}}", keys.join("|"))).unwrap()
    })
}

fn braced_re() -> &'static Regex {
    BRACED_RE.get_or_init(|| Regex::new(r"\{\{([^{}]*)\}\}").unwrap())
}

/// Expand every recognized tag in `text`.
pub fn substitute_str(text: &str, ctx: &TemplateContext) -> String {
    tag_re()
        .replace_all(text, |caps: &Captures| {
            TemplateTag::from_key(&caps[1])
                .map(|tag| ctx.value(tag).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expand every recognized tag in both subject and body.
pub fn substitute(template: &Template, ctx: &TemplateContext) -> Template {
    Template {
        subject: substitute_str(&template.subject, ctx),
        body: substitute_str(&template.body, ctx),
    }
}

/// Brace-delimited names in `text` that are not recognized tags, in order of
/// first appearance. These pass through substitution untouched.
pub fn unknown_tags(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in braced_re().captures_iter(text) {
        let name = &caps[1];
        if TemplateTag::from_key(name).is_none() && !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}

// ---------------------------------------------------------------------------
// Tag insertion
// ---------------------------------------------------------------------------

/// A cursor or selected range, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInsertion {
    pub text: String,
    /// Character position just after the inserted tag.
    pub cursor: usize,
}

fn byte_offset(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Insert `tag` at the selection, replacing the selected range. Without a
/// usable selection the tag is appended.
pub fn insert_tag(text: &str, selection: Option<Selection>, tag: &str) -> TagInsertion {
    let char_count = text.chars().count();
    let tag_chars = tag.chars().count();

    match selection {
        Some(sel) if sel.start <= sel.end && sel.end <= char_count => {
            let start = byte_offset(text, sel.start);
            let end = byte_offset(text, sel.end);
            let mut updated = String::with_capacity(text.len() + tag.len());
            updated.push_str(&text[..start]);
            updated.push_str(tag);
            updated.push_str(&text[end..]);
            TagInsertion {
                text: updated,
                cursor: sel.start + tag_chars,
            }
        }
        _ => {
            let updated = format!("{text}{tag}");
            TagInsertion {
                cursor: char_count + tag_chars,
                text: updated,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(TemplateTag, &str)]) -> TemplateContext {
        let mut c = TemplateContext::default();
        for (tag, value) in pairs {
            c.set(*tag, *value);
        }
        c
    }

    #[test]
    fn substitutes_subject_and_body() {
        let c = ctx(&[
            (TemplateTag::FirstName, "Ana"),
            (TemplateTag::Company, "Acme"),
        ]);
        let out = substitute(
            &Template::new("Hi {{first_name}}, from {{company}}", "{{company}} rocks"),
            &c,
        );
        assert_eq!(out.subject, "Hi Ana, from Acme");
        assert_eq!(out.body, "Acme rocks");
    }

    #[test]
    fn replaces_every_occurrence() {
        let c = ctx(&[(TemplateTag::FirstName, "Ana")]);
        assert_eq!(
            substitute_str("{{first_name}} {{first_name}}{{first_name}}", &c),
            "Ana AnaAna"
        );
    }

    #[test]
    fn fallbacks_for_empty_context() {
        let c = TemplateContext::default();
        assert_eq!(
            substitute_str("{{title}} at {{company}}", &c),
            "their role at their company"
        );
        assert_eq!(
            substitute_str("[{{first_name}}|{{email}}|{{sender_name}}]", &c),
            "[||]"
        );
    }

    #[test]
    fn first_name_falls_back_to_full_name() {
        let c = ctx(&[(TemplateTag::FullName, "Maria  de Souza")]);
        assert_eq!(substitute_str("Hi {{first_name}}", &c), "Hi Maria");
    }

    #[test]
    fn empty_value_counts_as_absent() {
        let c = ctx(&[(TemplateTag::Title, ""), (TemplateTag::FirstName, "")]);
        assert_eq!(substitute_str("{{title}}", &c), "their role");
        assert_eq!(substitute_str("{{first_name}}", &c), "");
    }

    #[test]
    fn values_are_not_re_expanded() {
        let c = ctx(&[
            (TemplateTag::Company, "{{first_name}}"),
            (TemplateTag::FirstName, "{{company}}"),
        ]);
        assert_eq!(substitute_str("{{company}}", &c), "{{first_name}}");
        assert_eq!(substitute_str("{{first_name}}", &c), "{{company}}");
    }

    #[test]
    fn unknown_tags_pass_through() {
        let c = ctx(&[(TemplateTag::FirstName, "Ana")]);
        assert_eq!(
            substitute_str("Hello {{nonexistent_tag}}", &c),
            "Hello {{nonexistent_tag}}"
        );
        assert_eq!(substitute_str("{{ first_name }}", &c), "{{ first_name }}");
    }

    #[test]
    fn unbalanced_braces_are_literal() {
        let c = ctx(&[(TemplateTag::FirstName, "Ana")]);
        assert_eq!(substitute_str("{{first_name", &c), "{{first_name");
        assert_eq!(substitute_str("{{{first_name}}", &c), "{Ana");
        assert_eq!(substitute_str("first_name}}", &c), "first_name}}");
    }

    #[test]
    fn substitution_is_deterministic() {
        let c = ctx(&[(TemplateTag::Email, "ana@acme.io")]);
        let t = Template::new("{{email}}", "Reply to {{email}}");
        assert_eq!(substitute(&t, &c), substitute(&t, &c));
    }

    #[test]
    fn prospect_context() {
        let prospect = Prospect {
            id: "p1".to_string(),
            name: "Ana Maria Souza".to_string(),
            title: None,
            company: Some("Acme".to_string()),
            email: "ana@acme.io".to_string(),
        };
        let meeting = Meeting {
            id: "m1".to_string(),
            prospect_id: "p1".to_string(),
            date: "2026-10-21".to_string(),
            time: "10:30".to_string(),
        };
        let c = TemplateContext::for_prospect(&prospect, Some("Sam")).with_meeting(&meeting);
        let out = substitute_str(
            "{{first_name}}/{{last_name}}/{{title}}/{{meeting_date}} {{meeting_time}}/{{sender_name}}",
            &c,
        );
        assert_eq!(out, "Ana/Maria Souza/their role/2026-10-21 10:30/Sam");
    }

    #[test]
    fn lists_unknown_tags_once() {
        let found = unknown_tags("{{first_name}} {{deal_size}} {{x}} {{deal_size}}");
        assert_eq!(found, vec!["deal_size".to_string(), "x".to_string()]);
    }

    #[test]
    fn tag_parsing() {
        use std::str::FromStr;
        assert_eq!(
            TemplateTag::from_str("{{company}}").unwrap(),
            TemplateTag::Company
        );
        assert_eq!(
            TemplateTag::from_str("sender_name").unwrap(),
            TemplateTag::SenderName
        );
        assert!(TemplateTag::from_str("{{deal}}").is_err());
        assert_eq!(TemplateTag::MeetingDate.placeholder(), "{{meeting_date}}");
    }

    #[test]
    fn insert_replaces_selection() {
        let out = insert_tag("Hi there!", Some(Selection { start: 3, end: 8 }), "{{first_name}}");
        assert_eq!(out.text, "Hi {{first_name}}!");
        assert_eq!(out.cursor, 17);
    }

    #[test]
    fn insert_at_caret() {
        let out = insert_tag("Hi ,", Some(Selection::caret(3)), "{{first_name}}");
        assert_eq!(out.text, "Hi {{first_name}},");
        assert_eq!(out.cursor, 17);
    }

    #[test]
    fn insert_without_selection_appends() {
        let out = insert_tag("Regards, ", None, "{{sender_name}}");
        assert_eq!(out.text, "Regards, {{sender_name}}");
        assert_eq!(out.cursor, out.text.chars().count());
    }

    #[test]
    fn insert_with_invalid_selection_appends() {
        let out = insert_tag("abc", Some(Selection { start: 2, end: 9 }), "{{email}}");
        assert_eq!(out.text, "abc{{email}}");
        assert_eq!(out.cursor, 12);

        let out = insert_tag("abc", Some(Selection { start: 2, end: 1 }), "{{email}}");
        assert_eq!(out.text, "abc{{email}}");
    }

    #[test]
    fn insert_counts_characters_not_bytes() {
        let out = insert_tag("Olá !", Some(Selection::caret(4)), "{{first_name}}");
        assert_eq!(out.text, "Olá {{first_name}}!");
        assert_eq!(out.cursor, 18);
    }
}
