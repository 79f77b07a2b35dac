//! CLI administration tool for link-events.
//!
//! Inspects links and their visit counts, and replays link follows through
//! the same event handlers the server uses.
//!
//! # Usage
//!
//! ```bash
//! # Show a link with its visit statistics
//! cargo run --bin admin -- link show 42
//!
//! # Record a follow of go/wiki as a given user
//! cargo run --bin admin -- link follow go wiki --user alice@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `link_events::config`.

use link_events::config;
use link_events::domain::entities::{RequestContext, ShortLink, User};
use link_events::domain::event::LINK_FOLLOW_CREATED;
use link_events::domain::repositories::ShortLinkRepository;
use link_events::infrastructure::persistence::PgShortLinkRepository;
use link_events::server::build_emitter;
use link_events::utils::last_visited::format_last_visited;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::{Map, json};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-events.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect links and record follows
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a link and its visit statistics
    Show {
        /// Link id
        id: i64,
    },

    /// Record a follow, running all event handlers
    Follow {
        /// Namespace, e.g. "go"
        namespace: String,

        /// Shortpath, e.g. "wiki"
        shortpath: String,

        /// Email of the user following the link
        #[arg(short, long)]
        user: Option<String>,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(
    action: LinkAction,
    config: &config::Config,
    pool: PgPool,
) -> Result<()> {
    let repo: Arc<dyn ShortLinkRepository> =
        Arc::new(PgShortLinkRepository::new(Arc::new(pool)));

    match action {
        LinkAction::Show { id } => {
            let link = repo
                .get_by_id(id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Link not found")?;
            print_link(&link);
        }
        LinkAction::Follow {
            namespace,
            shortpath,
            user,
        } => {
            follow_link(repo, config, &namespace, &shortpath, user).await?;
        }
    }

    Ok(())
}

/// Emits `link_follow.created` for a link and prints the resulting count.
///
/// Uses the same handler set as the server, so the visit counter mode and
/// `EVENT_LOG_ENABLED` apply here too.
async fn follow_link(
    repo: Arc<dyn ShortLinkRepository>,
    config: &config::Config,
    namespace: &str,
    shortpath: &str,
    user: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Record Link Follow".bright_blue().bold());
    println!();

    let link = repo
        .find_by_shortpath(namespace, shortpath)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Link {namespace}/{shortpath} not found"))?;

    let emitter = build_emitter(config, repo.clone());
    let user = user.map(User::with_email);

    let mut object_data = Map::new();
    object_data.insert("link_id".to_string(), json!(link.id));

    let event = emitter
        .emit(
            &RequestContext::anonymous(),
            &config.organization_id,
            LINK_FOLLOW_CREATED,
            "link_follow",
            &mut object_data,
            None,
            user.as_ref(),
        )
        .await?;

    println!("  Event: {}", event.id.bright_black());

    let updated = repo
        .get_by_id(link.id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link disappeared while recording the follow")?;

    if updated.visits() > link.visits() {
        println!(
            "{} {} → {}",
            "✅ Visit counted:".green().bold(),
            link.visits(),
            updated.visits().to_string().bright_green().bold()
        );
    } else {
        println!(
            "{}",
            "⚠️  Visit count unchanged, check the server logs".yellow()
        );
    }
    println!();

    Ok(())
}

/// Prints a link with its statistics.
///
/// # Output Format
///
/// ```text
/// 🔗 go/wiki
///
///   ID:           42
///   Destination:  https://wiki.example.com
///   Owner:        alice@example.com
///   Visits:       6
///   Last visited: 3 hours ago
/// ```
fn print_link(link: &ShortLink) {
    println!("{}", format!("🔗 {}", link.full_shortpath()).bright_blue().bold());
    println!();
    println!("  ID:           {}", link.id.to_string().bright_black());
    println!("  Destination:  {}", link.destination_url.cyan());
    println!("  Owner:        {}", link.owner);
    if link.unlisted {
        println!("  Visibility:   {}", "UNLISTED".yellow());
    }
    println!(
        "  Visits:       {}",
        link.visits().to_string().bright_green().bold()
    );
    let last_visited = format_last_visited(link.visits_count_last_updated, Utc::now())
        .unwrap_or_else(|| "never".to_string());
    println!("  Last visited: {}", last_visited.bright_black());
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links: {}", links.to_string().bright_white());
        }
    }

    Ok(())
}
