use super::open_app;
use crate::output::{print_json, print_table};
use anyhow::Context;
use booky_core::{
    app::App,
    models::CampaignInfo,
    navigation::{NavStep, Transition},
    screen::Screen,
    session::FileSessionStore,
    types::{ReportsView, View},
};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StepOutput {
    step: String,
    transition: Transition,
}

fn parse_steps(raw: &[String]) -> anyhow::Result<Vec<NavStep>> {
    raw.iter()
        .map(|s| s.parse::<NavStep>().with_context(|| format!("bad step '{s}'")))
        .collect()
}

/// Replay `raw` against a freshly mounted app.
fn replay(
    root: &Path,
    raw: &[String],
) -> anyhow::Result<(App<FileSessionStore>, Vec<StepOutput>)> {
    let steps = parse_steps(raw)?;
    let mut app = open_app(root)?;
    let mut outputs = Vec::with_capacity(steps.len());
    for (text, step) in raw.iter().zip(&steps) {
        let transition = app
            .apply(step)
            .with_context(|| format!("step '{text}' failed"))?;
        outputs.push(StepOutput {
            step: text.clone(),
            transition,
        });
    }
    Ok((app, outputs))
}

fn describe(t: Transition) -> &'static str {
    match t {
        Transition::Ignored => "ignored (already showing)",
        Transition::Moved { pushed: true } => "moved",
        Transition::Moved { pushed: false } => "moved (history unchanged)",
        Transition::Popped => "back",
        Transition::Fallback => "back (history empty, dashboard)",
    }
}

fn campaign_label(c: Option<&CampaignInfo>) -> String {
    c.and_then(|c| c.name.clone()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// nav
// ---------------------------------------------------------------------------

pub fn run(root: &Path, raw: &[String], json: bool) -> anyhow::Result<()> {
    let (app, steps) = replay(root, raw)?;
    let nav = app.navigation();

    if json {
        #[derive(Serialize)]
        struct HistoryRow<'a> {
            view: View,
            #[serde(skip_serializing_if = "Option::is_none")]
            cadence: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            campaign: Option<&'a CampaignInfo>,
        }

        #[derive(Serialize)]
        struct NavOutput<'a> {
            steps: Vec<StepOutput>,
            current: View,
            reports_view: Option<ReportsView>,
            campaign: Option<&'a CampaignInfo>,
            selected_cadence: Option<&'a str>,
            can_go_back: bool,
            history: Vec<HistoryRow<'a>>,
        }

        let output = NavOutput {
            steps,
            current: nav.current(),
            reports_view: nav.reports_view(),
            campaign: nav.campaign(),
            selected_cadence: nav.selected_cadence().map(|c| c.id.as_str()),
            can_go_back: nav.can_go_back(),
            history: nav
                .history()
                .iter()
                .map(|e| HistoryRow {
                    view: e.view,
                    cadence: e.cadence.as_ref().map(|c| c.id.as_str()),
                    campaign: e.campaign.as_ref(),
                })
                .collect(),
        };
        return print_json(&output);
    }

    let rows: Vec<Vec<String>> = steps
        .iter()
        .map(|s| vec![s.step.clone(), describe(s.transition).to_string()])
        .collect();
    print_table("", &["STEP", "RESULT"], &rows);

    println!("\nView: {}", nav.current());
    if let Some(cadence) = nav.selected_cadence() {
        println!("Cadence: {} ({})", cadence.name, cadence.id);
    }
    if let Some(name) = nav.campaign().and_then(|c| c.name.as_deref()) {
        println!("Campaign: {name}");
    }

    if nav.history().is_empty() {
        println!("History: (empty)");
    } else {
        println!("History ({}):", nav.history().len());
        let rows: Vec<Vec<String>> = nav
            .history()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                vec![
                    (i + 1).to_string(),
                    e.view.to_string(),
                    e.cadence.as_ref().map(|c| c.id.clone()).unwrap_or_default(),
                    campaign_label(e.campaign.as_ref()),
                ]
            })
            .collect();
        print_table("  ", &["#", "VIEW", "CADENCE", "CAMPAIGN"], &rows);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// screen
// ---------------------------------------------------------------------------

pub fn screen(root: &Path, raw: &[String], json: bool) -> anyhow::Result<()> {
    let (app, _) = replay(root, raw)?;
    let view = app.navigation().current();
    let screen = app.screen();

    if json {
        #[derive(Serialize)]
        struct ScreenOutput<'a> {
            view: View,
            screen: Option<Screen<'a>>,
        }
        return print_json(&ScreenOutput { view, screen });
    }

    let Some(screen) = screen else {
        println!("(blank) {view} needs a selected cadence");
        return Ok(());
    };

    println!("Screen: {}", screen.title());
    match &screen {
        Screen::CampaignDetail(campaign) => {
            println!("  campaign: {}", campaign_label(*campaign));
        }
        Screen::CadenceDetail(c) | Screen::EditCadence(c) => {
            print_cadence(c);
        }
        Screen::CloneCadence(draft) => print_cadence(draft),
        Screen::Reports(sub) => println!("  report: {sub}"),
        _ => {}
    }
    Ok(())
}

fn print_cadence(c: &booky_core::models::Cadence) {
    println!("  cadence: {} [{}]", c.name, c.status);
    let rows: Vec<Vec<String>> = c
        .steps
        .iter()
        .map(|s| {
            vec![
                format!("day {}", s.day),
                s.kind.to_string(),
                s.template
                    .as_ref()
                    .map(|t| t.subject.clone())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    if !rows.is_empty() {
        print_table("  ", &["DAY", "KIND", "SUBJECT"], &rows);
    }
}
