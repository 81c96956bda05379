//! Operator CLI for indexing-relay.
//!
//! Uses the same credential sources and configuration as the HTTP service,
//! so it can be used to verify a deployment's credentials or to submit URLs
//! without running the server.
//!
//! # Usage
//!
//! ```bash
//! # Check which credential would be used
//! cargo run --bin indexctl -- credentials check
//!
//! # Print a freshly minted access token
//! cargo run --bin indexctl -- token
//!
//! # Submit URLs
//! cargo run --bin indexctl -- submit https://example.com/a https://example.com/b
//!
//! # Notify about removed pages (asks for confirmation unless -y)
//! cargo run --bin indexctl -- submit --deleted https://example.com/old
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see [`indexing_relay::config`]. `--file` overrides
//! `SERVICE_ACCOUNT_FILE`.

use indexing_relay::config::{self, Config};
use indexing_relay::prelude::*;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;

/// CLI tool for submitting URLs to the Indexing API.
#[derive(Parser)]
#[command(name = "indexctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service-account key file (overrides SERVICE_ACCOUNT_FILE)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Print a freshly minted access token
    Token {
        /// OAuth scope to request (repeatable)
        #[arg(short, long = "scope")]
        scopes: Vec<String>,
    },

    /// Inspect the configured credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },

    /// Submit URL notifications
    Submit {
        /// URLs to submit
        #[arg(required = true)]
        urls: Vec<String>,

        /// Send URL_DELETED instead of URL_UPDATED
        #[arg(long)]
        deleted: bool,

        /// Project billed for the calls
        #[arg(long)]
        project_id: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Credential inspection subcommands.
#[derive(Subcommand)]
enum CredentialsAction {
    /// Resolve credentials and show where they came from
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::load_from_env().context("Invalid configuration")?;
    if let Some(file) = cli.file {
        config.service_account_file = file;
    }

    let state = AppState::from_config(&config)?;

    match cli.command {
        Commands::Token { scopes } => print_token(&state, scopes).await?,
        Commands::Credentials { action } => match action {
            CredentialsAction::Check => check_credentials(&state, &config).await?,
        },
        Commands::Submit {
            urls,
            deleted,
            project_id,
            yes,
        } => submit(&state, urls, deleted, project_id, yes).await?,
    }

    Ok(())
}

/// Resolves credentials and reports the source and identity.
async fn check_credentials(state: &AppState, config: &Config) -> Result<()> {
    println!("{}", "🔍 Resolving credentials...".bright_blue());
    println!();

    let (credential, source) = state
        .credential_resolver
        .resolve_with_source(None)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Source:         {}", source.to_string().cyan());
    println!("  Client email:   {}", credential.client_email.bright_white());
    println!("  Project:        {}", credential.project_id.bright_white());
    println!("  Key ID:         {}", credential.private_key_id.bright_black());
    println!("  Token endpoint: {}", credential.token_uri.bright_black());
    println!(
        "  Indexing API:   {}",
        config.indexing_endpoint.bright_black()
    );
    println!(
        "  Scopes:         {}",
        state.submission_service.default_scopes().join(" ").bright_black()
    );
    println!();
    println!("{}", "✅ Credentials OK".green().bold());

    Ok(())
}

/// Mints and prints an access token.
///
/// Only the token goes to stdout so the output can be captured in scripts.
async fn print_token(state: &AppState, scopes: Vec<String>) -> Result<()> {
    let credential = state
        .credential_resolver
        .resolve(None)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let token = state
        .submission_service
        .acquire_token(&credential, Some(scopes.as_slice()))
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    eprintln!(
        "{} {}",
        "Expires at:".bright_black(),
        token.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", token.secret());

    Ok(())
}

/// Submits URLs as one batch and prints a result table.
///
/// # Output Format
///
/// ```text
/// 📤 Submitting 2 URL(s) as URL_UPDATED
///
///   Status  URL                                      Message
///   ─────────────────────────────────────────────────────────────────
///   200     https://example.com/a                    URL submitted successfully
///   403     https://example.com/b                    Permission denied...
/// ```
///
/// # Errors
///
/// Returns an error if any URL was not accepted.
async fn submit(
    state: &AppState,
    urls: Vec<String>,
    deleted: bool,
    project_id: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let change_type = if deleted {
        ChangeType::UrlDeleted
    } else {
        ChangeType::UrlUpdated
    };

    println!(
        "{}",
        format!("📤 Submitting {} URL(s) as {}", urls.len(), change_type)
            .bright_blue()
            .bold()
    );
    println!();

    if deleted && !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Notify Google that these URLs were removed?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let requests: Vec<SubmissionRequest> = urls
        .into_iter()
        .map(|url| {
            let request = SubmissionRequest::new(url, change_type);
            match &project_id {
                Some(project) => request.with_project_id(project.clone()),
                None => request,
            }
        })
        .collect();

    let credential = state
        .credential_resolver
        .resolve(None)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let results = state
        .submission_service
        .submit_batch(&credential, &requests, None)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!(
        "  {:<7} {:<40} {}",
        "Status".bright_white().bold(),
        "URL".bright_white().bold(),
        "Message".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for result in &results {
        let status = if result.success {
            result.status_code.to_string().green()
        } else {
            result.status_code.to_string().red()
        };

        println!(
            "  {:<7} {:<40} {}",
            status,
            result.url.cyan(),
            first_line(&result.message).bright_black()
        );
    }

    let failed = results.iter().filter(|r| !r.success).count();
    println!();

    if failed > 0 {
        anyhow::bail!("{} of {} submission(s) failed", failed, results.len());
    }

    println!("{}", "✅ All URLs submitted".green().bold());
    Ok(())
}

/// Upstream error bodies are multi-line JSON; keep the table readable.
fn first_line(message: &str) -> String {
    const MAX_LEN: usize = 80;
    let line = message
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && *l != "{")
        .unwrap_or("");

    if line.chars().count() > MAX_LEN {
        let truncated: String = line.chars().take(MAX_LEN).collect();
        format!("{truncated}...")
    } else {
        line.to_string()
    }
}
