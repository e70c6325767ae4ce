use super::open_app;
use crate::output::{print_json, print_table};
use anyhow::Context;
use booky_core::template::{
    insert_tag, unknown_tags, Selection, Template, TemplateTag, COMPANY_FALLBACK, ROLE_FALLBACK,
};
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum TemplateSubcommand {
    /// List the dynamic tags templates can use
    Tags,

    /// List saved email templates
    List,

    /// Render a template with a prospect's data
    Preview {
        /// Saved template id (see `template list`)
        #[arg(long, conflicts_with_all = ["subject", "body"])]
        id: Option<String>,
        /// Ad-hoc subject line
        #[arg(long)]
        subject: Option<String>,
        /// Ad-hoc body
        #[arg(long)]
        body: Option<String>,
        /// Prospect id; omit to preview with fallbacks only
        #[arg(long)]
        prospect: Option<String>,
    },

    /// Insert a tag into text at a cursor or selection
    Insert {
        #[arg(long)]
        text: String,
        /// Tag name, with or without braces (first_name, {{first_name}})
        #[arg(long)]
        tag: String,
        /// Selection start, in characters; omit to append
        #[arg(long)]
        start: Option<usize>,
        /// Selection end, in characters (default: start)
        #[arg(long, requires = "start")]
        end: Option<usize>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: TemplateSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TemplateSubcommand::Tags => tags(json),
        TemplateSubcommand::List => list(root, json),
        TemplateSubcommand::Preview {
            id,
            subject,
            body,
            prospect,
        } => preview(root, id, subject, body, prospect, json),
        TemplateSubcommand::Insert {
            text,
            tag,
            start,
            end,
        } => insert(&text, &tag, start, end, json),
    }
}

fn fallback_label(tag: TemplateTag) -> &'static str {
    match tag {
        TemplateTag::Title => ROLE_FALLBACK,
        TemplateTag::Company => COMPANY_FALLBACK,
        TemplateTag::FirstName => "first word of full name",
        _ => "",
    }
}

fn tags(json: bool) -> anyhow::Result<()> {
    if json {
        let value: Vec<serde_json::Value> = TemplateTag::all()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "tag": t,
                    "placeholder": t.placeholder(),
                    "label": t.label(),
                })
            })
            .collect();
        return print_json(&value);
    }

    let rows: Vec<Vec<String>> = TemplateTag::all()
        .iter()
        .map(|t| {
            vec![
                t.placeholder(),
                t.label().to_string(),
                fallback_label(*t).to_string(),
            ]
        })
        .collect();
    print_table("", &["TAG", "LABEL", "WHEN EMPTY"], &rows);
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let app = open_app(root)?;
    let templates = &app.fixtures().templates;
    if json {
        return print_json(templates);
    }
    if templates.is_empty() {
        println!("No templates.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.name.clone(),
                t.category.clone(),
                t.template.subject.clone(),
            ]
        })
        .collect();
    print_table("", &["ID", "NAME", "CATEGORY", "SUBJECT"], &rows);
    Ok(())
}

fn preview(
    root: &Path,
    id: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    prospect: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let app = open_app(root)?;
    let source = match id {
        Some(id) => app.fixtures().template(&id)?.template.clone(),
        None => {
            if subject.is_none() && body.is_none() {
                anyhow::bail!("pass --id, or --subject and/or --body");
            }
            Template::new(subject.unwrap_or_default(), body.unwrap_or_default())
        }
    };

    let rendered = app
        .preview(&source, prospect.as_deref())
        .context("failed to render preview")?;
    let mut unknown = unknown_tags(&source.subject);
    for name in unknown_tags(&source.body) {
        if !unknown.contains(&name) {
            unknown.push(name);
        }
    }

    if json {
        let value = serde_json::json!({
            "subject": rendered.subject,
            "body": rendered.body,
            "unknown_tags": unknown,
        });
        return print_json(&value);
    }

    println!("Subject: {}", rendered.subject);
    println!();
    println!("{}", rendered.body);
    if !unknown.is_empty() {
        let names: Vec<String> = unknown.iter().map(|n| format!("{{{{{n}}}}}")).collect();
        eprintln!("note: left as-is: {}", names.join(", "));
    }
    Ok(())
}

fn insert(
    text: &str,
    tag: &str,
    start: Option<usize>,
    end: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let tag: TemplateTag = tag.parse()?;
    let selection = start.map(|start| Selection {
        start,
        end: end.unwrap_or(start),
    });
    let result = insert_tag(text, selection, &tag.placeholder());

    if json {
        return print_json(&result);
    }
    println!("{}", result.text);
    println!("cursor: {}", result.cursor);
    Ok(())
}
