//! ticket-pages CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ticket_pages::{Config, Page};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "ticket-pages")]
#[command(version)]
#[command(about = "Render ticket app pages from templates", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./ticket-pages.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one page to HTML
    Render {
        /// Page to render
        #[arg(value_enum)]
        page: Page,

        /// Tickets JSON file
        #[arg(long)]
        tickets: Option<PathBuf>,

        /// Signed-in user's email (dashboard)
        #[arg(long)]
        user_email: Option<String>,

        /// Notice shown above the login form
        #[arg(long)]
        message: Option<String>,

        /// JSON object with extra bindings; explicit flags take precedence
        #[arg(long)]
        context: Option<PathBuf>,

        /// Template directory (defaults to the embedded templates)
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Print ticket counts by status as JSON
    Stats {
        /// Tickets JSON file
        #[arg(long)]
        tickets: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "ticket_pages=info",
        1 => "ticket_pages=debug,ticket_template=debug",
        _ => "ticket_pages=trace,ticket_template=trace",
    };

    // Initialize logging; stdout is reserved for rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            page,
            tickets,
            user_email,
            message,
            context,
            templates,
            output,
        } => commands::render::execute(
            &config,
            commands::render::RenderArgs {
                page,
                tickets,
                user_email,
                message,
                context,
                templates,
                output,
            },
        ),
        Commands::Stats { tickets } => commands::stats::execute(&config, tickets),
    }
}
