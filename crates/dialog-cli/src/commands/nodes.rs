//! Nodes command - list the dialog nodes of a workspace

use anyhow::Result;
use dialog_client::{DialogClient, ListOptions};

use crate::output::{or_dash, DialogNodeRow, OutputContext};

pub async fn nodes(
    client: &DialogClient,
    workspace_id: &str,
    options: &ListOptions,
    ctx: &OutputContext,
) -> Result<()> {
    let page = client.list_dialog_nodes(workspace_id, options).await?;
    let cursor = page.next_cursor().map(String::from);

    let rows: Vec<DialogNodeRow> = page
        .into_iter()
        .map(|n| DialogNodeRow {
            node: n.dialog_node_id,
            title: or_dash(n.title),
            conditions: or_dash(n.conditions),
            parent: or_dash(n.parent),
        })
        .collect();

    ctx.print(&rows);
    ctx.next_page(cursor.as_deref());
    Ok(())
}
