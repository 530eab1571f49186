//! Groundswell CLI - browse, create and back crowdfunding projects.
//!
//! # Usage
//!
//! ```bash
//! # Browse projects, filtered and sorted
//! gs-cli browse --search recorder --category technology --sort funding
//!
//! # Show one project in detail
//! gs-cli show p-42
//!
//! # Create a project (requires GROUNDSWELL_AUTH_UID)
//! gs-cli create --title "Field Recorder" --description "..." \
//!     --category technology --goal 1000 --start 2026-01-01 --end 2026-03-01 \
//!     --reward "25:Early Bird:Early access:2026-06-01"
//!
//! # Back and comment
//! gs-cli back p-42 --amount 100 --reward 2
//! gs-cli comment p-42 --message "Looking forward to this"
//!
//! # Follow a project live until Ctrl-C
//! gs-cli watch p-42
//! ```
//!
//! # Environment Variables
//!
//! See `groundswell_client::config` - `GROUNDSWELL_STORE_URL` and
//! `GROUNDSWELL_STORE_TOKEN` are required; `GROUNDSWELL_AUTH_UID` and
//! `GROUNDSWELL_AUTH_NAME` identify the acting user for mutations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(author, version, about = "Groundswell CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse projects with optional search, category filter and sort order
    Browse {
        /// Case-insensitive match against title or description
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category match (e.g. technology, art, music)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order: newest, funding or deadline
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show one project in detail
    Show {
        /// Project id
        id: String,
    },
    /// Create a new project
    Create(commands::create::CreateArgs),
    /// Back a project with a contribution
    Back {
        /// Project id
        id: String,

        /// Contribution amount
        #[arg(short, long)]
        amount: String,

        /// Reward id to claim (must qualify for the amount)
        #[arg(short, long)]
        reward: Option<String>,
    },
    /// Comment on a project
    Comment {
        /// Project id
        id: String,

        /// Comment text
        #[arg(short, long)]
        message: String,
    },
    /// Follow a project live until interrupted
    Watch {
        /// Project id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with an EnvFilter; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gs_cli=info,groundswell_client=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Browse {
            search,
            category,
            sort,
        } => commands::browse::run(search, category, &sort).await?,
        Commands::Show { id } => commands::show::run(&id).await?,
        Commands::Create(args) => commands::create::run(args).await?,
        Commands::Back { id, amount, reward } => {
            commands::back::run(&id, &amount, reward).await?;
        }
        Commands::Comment { id, message } => commands::comment::run(&id, &message).await?,
        Commands::Watch { id } => commands::watch::run(&id).await?,
    }

    Ok(())
}
