use super::open_app;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn login(root: &Path, email: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let mut app = open_app(root)?;
    let record = app.login(email, name).context("login failed")?;
    if json {
        return print_json(record);
    }
    println!("Logged in as {} <{}>", record.name, record.email);
    Ok(())
}

pub fn logout(root: &Path) -> anyhow::Result<()> {
    let mut app = open_app(root)?;
    app.logout().context("failed to clear session")?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(root: &Path, json: bool) -> anyhow::Result<()> {
    let app = open_app(root)?;
    if json {
        return print_json(&app.user());
    }
    match app.user() {
        Some(user) => println!("Logged in as {} <{}>", user.name, user.email),
        None => println!("Not logged in."),
    }
    Ok(())
}
