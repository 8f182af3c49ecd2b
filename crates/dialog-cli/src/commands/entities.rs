//! Entities command - list the entities of a workspace

use anyhow::Result;
use dialog_client::{DialogClient, ListOptions};

use crate::output::{or_dash, EntityRow, OutputContext};

/// List entities and their values
pub async fn entities(
    client: &DialogClient,
    workspace_id: &str,
    options: &ListOptions,
    ctx: &OutputContext,
) -> Result<()> {
    let page = client.list_entities(workspace_id, Some(true), options).await?;
    let cursor = page.next_cursor().map(String::from);

    let rows: Vec<EntityRow> = page
        .into_iter()
        .map(|e| EntityRow {
            entity: e.entity_name,
            description: or_dash(e.description),
            fuzzy_match: or_dash(e.fuzzy_match.map(|f| f.to_string())),
            values: e
                .values
                .map(|values| {
                    values
                        .into_iter()
                        .map(|v| v.value_text)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    ctx.print(&rows);
    ctx.next_page(cursor.as_deref());
    Ok(())
}
