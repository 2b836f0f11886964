//! Chat command - interactive typed session.
//!
//! Each line goes through the same path as a spoken utterance, so control
//! phrases ("switch workspace api", "confirm", "cancel") work as typed text.
//! Lines starting with `/` are local commands.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use voxgate_bridge::OpenClawBridge;
use voxgate_core::AgentTurnMode;
use voxgate_orchestrator::{HealthMonitor, VoiceOrchestrator};

use super::print_pending;
use crate::app::App;
use crate::config_bridge;
use crate::theme::Theme;

/// A `/` command typed in the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChatCommand {
    Help,
    Quit,
    Workspaces,
    Switch(String),
    Snippets,
    Health,
    Status,
    Approvals,
    Allow(String),
    Disallow(String),
    CallStatus(String),
    HangUp(String),
    Usage(&'static str),
    Unknown(String),
}

impl ChatCommand {
    /// Parse a local command. Returns `None` for text meant for the session.
    pub(crate) fn parse(input: &str) -> Option<Self> {
        if input == "exit" || input == "quit" {
            return Some(Self::Quit);
        }
        let rest = input.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let with_arg = |build: fn(String) -> Self, usage: &'static str| {
            if arg.is_empty() {
                Self::Usage(usage)
            } else {
                build(arg.to_string())
            }
        };

        Some(match name {
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "workspaces" | "ws" => Self::Workspaces,
            "switch" => with_arg(Self::Switch, "/switch <workspace-id>"),
            "snippets" => Self::Snippets,
            "health" => Self::Health,
            "status" => Self::Status,
            "approvals" => Self::Approvals,
            "allow" => with_arg(Self::Allow, "/allow <pattern>"),
            "disallow" => with_arg(Self::Disallow, "/disallow <pattern>"),
            "call" => with_arg(Self::CallStatus, "/call <call-id>"),
            "hangup" => with_arg(Self::HangUp, "/hangup <call-id>"),
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// Run the interactive session until EOF or `/quit`.
pub(crate) async fn run_chat(app: &App, workspace: Option<&str>) -> Result<()> {
    let mut session = app.session(workspace)?;
    let mut events = session.subscribe();

    let monitor = HealthMonitor::new(Arc::clone(&app.bridge));
    let health_watch = watch_health(&monitor);
    monitor.start(config_bridge::health_interval(&app.config));

    println!(
        "Workspace: {} | Type {} to quit, {} for help\n",
        Theme::workspace(&session.current_workspace().id),
        "exit".cyan(),
        "/help".cyan()
    );
    session.start_listening();
    print_pending(&mut events);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match ChatCommand::parse(input) {
            Some(ChatCommand::Quit) => break,
            Some(command) => run_command(&mut session, command).await,
            None => {
                if let Err(e) = session.handle_input(input, AgentTurnMode::Text).await {
                    println!("{}", Theme::error(&e.to_string()));
                }
            },
        }
        print_pending(&mut events);
    }

    session.stop_listening();
    monitor.stop();
    health_watch.abort();
    println!("{}", Theme::dimmed("Goodbye!"));
    Ok(())
}

async fn run_command(session: &mut VoiceOrchestrator<OpenClawBridge>, command: ChatCommand) {
    let result = match command {
        ChatCommand::Help => {
            print_help();
            Ok(())
        },
        ChatCommand::Workspaces => {
            for ws in session.list_workspaces() {
                let marker = if ws.id == session.current_workspace().id {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {} {}",
                    Theme::workspace(&ws.id),
                    Theme::dimmed(&ws.default_session_key)
                );
            }
            Ok(())
        },
        ChatCommand::Switch(id) => session.switch_workspace(&id),
        ChatCommand::Snippets => {
            for snippet in session.acp_snippets() {
                println!("{}\n{}\n", Theme::header(&snippet.title), snippet.content);
            }
            Ok(())
        },
        ChatCommand::Health => {
            session.get_gateway_health().await;
            Ok(())
        },
        ChatCommand::Status => session.get_gateway_status().await,
        ChatCommand::Approvals => session.fetch_approvals_snapshot().await,
        ChatCommand::Allow(pattern) => session.add_allowlist_command(&pattern).await,
        ChatCommand::Disallow(pattern) => session.remove_allowlist_command(&pattern).await,
        ChatCommand::CallStatus(id) => session.get_call_status(&id).await,
        ChatCommand::HangUp(id) => session.end_call(&id).await,
        ChatCommand::Usage(usage) => {
            println!("{}", Theme::warning(&format!("usage: {usage}")));
            Ok(())
        },
        ChatCommand::Unknown(name) => {
            println!("{}", Theme::warning(&format!("unknown command /{name}, try /help")));
            Ok(())
        },
        ChatCommand::Quit => Ok(()),
    };

    if let Err(e) = result {
        println!("{}", Theme::error(&e.to_string()));
    }
}

/// Print a warning whenever gateway reachability changes.
fn watch_health(monitor: &HealthMonitor<OpenClawBridge>) -> JoinHandle<()> {
    let mut results = monitor.subscribe();
    tokio::spawn(async move {
        let mut last_reachable = None;
        loop {
            let health = match results.recv().await {
                Ok(health) => health,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            };
            if last_reachable == Some(health.reachable) {
                continue;
            }
            if !health.reachable {
                let detail = health.detail.as_deref().unwrap_or("no detail");
                println!(
                    "\n{}",
                    Theme::warning(&format!("gateway unreachable at {}: {detail}", health.url))
                );
            } else if last_reachable.is_some() {
                println!("\n{}", Theme::success("gateway reachable again"));
            }
            last_reachable = Some(health.reachable);
        }
    })
}

fn print_help() {
    println!("{}", Theme::header("Commands"));
    for (command, description) in [
        ("/workspaces", "list workspaces"),
        ("/switch <id>", "switch the active workspace"),
        ("/snippets", "print ACP editor snippets"),
        ("/health", "probe the gateway"),
        ("/status", "gateway status, plugins and nodes"),
        ("/approvals", "show the approvals snapshot"),
        ("/allow <pattern>", "add an allowlist pattern"),
        ("/disallow <pattern>", "remove an allowlist pattern"),
        ("/call <id>", "phone call status"),
        ("/hangup <id>", "end a phone call"),
        ("/quit", "leave the session"),
    ] {
        println!("  {:<22} {}", command.cyan(), Theme::dimmed(description));
    }
    println!(
        "{}",
        Theme::dimmed("Anything else goes to the agent. Say confirm or cancel for held requests.")
    );
}
