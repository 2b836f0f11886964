//! One-shot gateway commands.

use anyhow::Result;
use voxgate_bridge::GatewayBridge;

use super::print_pending;
use crate::app::App;
use crate::theme::Theme;

/// Probe gateway health. Needs no workspaces file.
pub(crate) async fn health(app: &App) -> Result<()> {
    let health = app.bridge.health().await;
    let detail = health.detail.unwrap_or_default();
    if health.reachable {
        println!("{}", Theme::success(&format!("Gateway reachable at {}", health.url)));
        if !detail.is_empty() {
            println!("{}", Theme::dimmed(&detail));
        }
        Ok(())
    } else {
        anyhow::bail!("Gateway unreachable at {}: {detail}", health.url)
    }
}

/// Show gateway status, plugins and nodes.
pub(crate) async fn status(app: &App) -> Result<()> {
    let session = app.session(None)?;
    let mut events = session.subscribe();
    session.get_gateway_status().await?;
    print_pending(&mut events);
    Ok(())
}

/// Which allowlist edit to make.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AllowlistEdit {
    Add,
    Remove,
}

/// Add or remove an allowlist pattern for every agent.
pub(crate) async fn allowlist(app: &App, edit: AllowlistEdit, pattern: &str) -> Result<()> {
    let session = app.session(None)?;
    let mut events = session.subscribe();
    match edit {
        AllowlistEdit::Add => session.add_allowlist_command(pattern).await?,
        AllowlistEdit::Remove => session.remove_allowlist_command(pattern).await?,
    }
    print_pending(&mut events);
    Ok(())
}

/// Show the approvals snapshot.
pub(crate) async fn approvals(app: &App) -> Result<()> {
    let session = app.session(None)?;
    let mut events = session.subscribe();
    session.fetch_approvals_snapshot().await?;
    print_pending(&mut events);
    Ok(())
}

/// Which call command to run.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CallAction {
    Status,
    End,
}

/// Query or hang up a phone call.
pub(crate) async fn call(app: &App, action: CallAction, call_id: &str) -> Result<()> {
    let session = app.session(None)?;
    let mut events = session.subscribe();
    match action {
        CallAction::Status => session.get_call_status(call_id).await?,
        CallAction::End => session.end_call(call_id).await?,
    }
    print_pending(&mut events);
    Ok(())
}
