mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, template::TemplateSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "booky",
    about = "Drive the Booky dashboard core from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .booky/)
    #[arg(long, global = true, env = "BOOKY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a Booky workspace in the current directory
    Init {
        /// Workspace name (default: directory name)
        #[arg(long)]
        name: Option<String>,
        /// Sender name used for {{sender_name}}
        #[arg(long)]
        sender: Option<String>,
    },

    /// Log in and save the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },

    /// Clear the saved session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Replay navigation steps from a fresh session and show the result
    ///
    /// Steps: `back`, `<view>`, `reports:<sub-view>`, `<view>@<arg>`
    /// (campaign name for campaign-detail, cadence id for cadence screens).
    Nav {
        #[arg(required = true)]
        steps: Vec<String>,
    },

    /// Replay navigation steps and show the screen that would render
    Screen { steps: Vec<String> },

    /// Email templates and dynamic tags
    Template {
        #[command(subcommand)]
        subcommand: TemplateSubcommand,
    },

    /// Inspect and validate the workspace configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name, sender } => cmd::init::run(&root, name, sender),
        Commands::Login { email, name } => cmd::session::login(&root, &email, &name, cli.json),
        Commands::Logout => cmd::session::logout(&root),
        Commands::Whoami => cmd::session::whoami(&root, cli.json),
        Commands::Nav { steps } => cmd::nav::run(&root, &steps, cli.json),
        Commands::Screen { steps } => cmd::nav::screen(&root, &steps, cli.json),
        Commands::Template { subcommand } => cmd::template::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
