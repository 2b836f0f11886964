//! Voxgate CLI - typed and one-shot access to voice sessions.
//!
//! `voxgate chat` runs the same session state machine that drives voice
//! input, reading lines from stdin instead of a speech recognizer. The
//! other subcommands run a single gateway operation and print the result.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod commands;
mod config_bridge;
mod render;
mod theme;

use app::App;
use commands::gateway::{AllowlistEdit, CallAction};
use commands::{chat, gateway, workspaces};
use theme::Theme;

/// Voxgate - voice and text bridge to the `OpenClaw` gateway
#[derive(Parser)]
#[command(name = "voxgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "VOXGATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive typed session
    Chat {
        /// Workspace to start in (defaults to the first configured)
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Probe gateway health
    Health,

    /// Show gateway status, plugins and nodes
    Status,

    /// List configured workspaces
    Workspaces,

    /// Print ACP editor snippets for a workspace
    Snippets {
        /// Workspace id (defaults to the first configured)
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Edit the exec approvals allowlist
    Allowlist {
        #[command(subcommand)]
        command: AllowlistCommands,
    },

    /// Show the exec approvals snapshot
    Approvals,

    /// Inspect or end phone calls
    Call {
        #[command(subcommand)]
        command: CallCommands,
    },
}

#[derive(Subcommand)]
enum AllowlistCommands {
    /// Allow a command pattern for every agent
    Add {
        /// Command pattern
        pattern: String,
    },
    /// Remove a command pattern
    Remove {
        /// Command pattern
        pattern: String,
    },
}

#[derive(Subcommand)]
enum CallCommands {
    /// Show call status
    Status {
        /// Call id
        call_id: String,
    },
    /// End a call
    End {
        /// Call id
        call_id: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", Theme::error(&format!("{e:#}")));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let app = App::load(cli.config.as_deref())?;

    let mut log_config = config_bridge::to_log_config(&app.config);
    if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = voxgate_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Some(Commands::Chat { workspace }) => chat::run_chat(&app, workspace.as_deref()).await,
        None => chat::run_chat(&app, None).await,
        Some(Commands::Health) => gateway::health(&app).await,
        Some(Commands::Status) => gateway::status(&app).await,
        Some(Commands::Workspaces) => workspaces::list(&app),
        Some(Commands::Snippets { workspace }) => workspaces::snippets(&app, workspace.as_deref()),
        Some(Commands::Allowlist { command }) => match command {
            AllowlistCommands::Add { pattern } => {
                gateway::allowlist(&app, AllowlistEdit::Add, &pattern).await
            },
            AllowlistCommands::Remove { pattern } => {
                gateway::allowlist(&app, AllowlistEdit::Remove, &pattern).await
            },
        },
        Some(Commands::Approvals) => gateway::approvals(&app).await,
        Some(Commands::Call { command }) => match command {
            CallCommands::Status { call_id } => {
                gateway::call(&app, CallAction::Status, &call_id).await
            },
            CallCommands::End { call_id } => gateway::call(&app, CallAction::End, &call_id).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_allowlist_add() {
        let cli = Cli::try_parse_from(["voxgate", "allowlist", "add", "git *"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Allowlist {
                command: AllowlistCommands::Add { ref pattern }
            }) if pattern == "git *"
        ));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "voxgate",
            "call",
            "status",
            "CA123",
            "-v",
            "--config",
            "/tmp/v.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/v.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Call {
                command: CallCommands::Status { ref call_id }
            }) if call_id == "CA123"
        ));
    }
}
