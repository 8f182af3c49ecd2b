//! Workspace commands

use anyhow::Result;
use dialog_client::{DialogClient, ListOptions, WorkspaceDefinition};

use crate::output::{or_dash, OutputContext, WorkspaceRow};

/// List workspaces
pub async fn list(client: &DialogClient, options: &ListOptions, ctx: &OutputContext) -> Result<()> {
    let page = client.list_workspaces(options).await?;
    let cursor = page.next_cursor().map(String::from);

    let rows: Vec<WorkspaceRow> = page
        .into_iter()
        .map(|w| WorkspaceRow {
            id: w.workspace_id,
            name: w.name,
            language: w.language,
            status: or_dash(w.status),
            updated: or_dash(w.updated),
        })
        .collect();

    ctx.print(&rows);
    ctx.next_page(cursor.as_deref());
    Ok(())
}

/// Show one workspace, with content counts when exported
pub async fn show(
    client: &DialogClient,
    workspace_id: &str,
    export: bool,
    ctx: &OutputContext,
) -> Result<()> {
    let workspace = client
        .get_workspace(workspace_id, export.then_some(true))
        .await?;

    let mut pairs = vec![
        ("ID", workspace.workspace_id),
        ("Name", workspace.name),
        ("Language", workspace.language),
        ("Description", or_dash(workspace.description)),
        ("Status", or_dash(workspace.status)),
        ("Created", or_dash(workspace.created)),
        ("Updated", or_dash(workspace.updated)),
    ];
    if let Some(intents) = &workspace.intents {
        pairs.push(("Intents", intents.len().to_string()));
    }
    if let Some(entities) = &workspace.entities {
        pairs.push(("Entities", entities.len().to_string()));
    }
    if let Some(nodes) = &workspace.dialog_nodes {
        pairs.push(("Dialog nodes", nodes.len().to_string()));
    }

    ctx.print_kv(&pairs);
    Ok(())
}

/// Create an empty workspace
pub async fn create(
    client: &DialogClient,
    name: &str,
    language: &str,
    description: Option<&str>,
    ctx: &OutputContext,
) -> Result<()> {
    let definition = WorkspaceDefinition {
        language: Some(language.to_string()),
        description: description.map(String::from),
        ..WorkspaceDefinition::named(name)
    };
    let workspace = client.create_workspace(&definition).await?;

    ctx.success(&format!(
        "Created workspace {} ({})",
        workspace.name, workspace.workspace_id
    ));
    Ok(())
}

/// Delete a workspace
pub async fn delete(client: &DialogClient, workspace_id: &str, ctx: &OutputContext) -> Result<()> {
    client.delete_workspace(workspace_id).await?;
    ctx.success(&format!("Deleted workspace {}", workspace_id));
    Ok(())
}
