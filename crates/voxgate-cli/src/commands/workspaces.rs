//! Workspace listing and editor snippets.

use anyhow::Result;
use colored::Colorize;

use crate::app::App;
use crate::theme::Theme;

/// List the allow-listed workspaces.
pub(crate) fn list(app: &App) -> Result<()> {
    let registry = app.registry()?;

    println!("\n{}", Theme::header("Workspaces"));
    println!(
        "{:<20} {:<10} {:<24} {}",
        "ID".dimmed(),
        "IDE".dimmed(),
        "SESSION".dimmed(),
        "HOST PATH".dimmed()
    );
    println!("{}", Theme::separator());

    for ws in registry.list() {
        println!(
            "{:<20} {:<10} {:<24} {}",
            Theme::workspace(&ws.id),
            ws.ide_profile.to_string(),
            ws.default_session_key,
            ws.host_path.display().to_string().dimmed()
        );
    }
    println!();
    Ok(())
}

/// Print ACP editor snippets for a workspace.
pub(crate) fn snippets(app: &App, workspace: Option<&str>) -> Result<()> {
    let session = app.session(workspace)?;

    for snippet in session.acp_snippets() {
        println!("{}", Theme::header(&snippet.title));
        println!("{}", snippet.content);
        println!();
    }

    println!(
        "{}",
        Theme::dimmed(&format!(
            "Workspace {} ({})",
            session.current_workspace().id,
            session.current_workspace().guest_path.display()
        ))
    );
    Ok(())
}
