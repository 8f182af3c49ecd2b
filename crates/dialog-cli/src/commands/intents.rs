//! Intent commands

use anyhow::Result;
use dialog_client::{CreateIntent, DialogClient, ListOptions};

use crate::output::{or_dash, IntentRow, OutputContext};

/// List the intents of a workspace with their example counts
pub async fn list(
    client: &DialogClient,
    workspace_id: &str,
    options: &ListOptions,
    ctx: &OutputContext,
) -> Result<()> {
    let page = client.list_intents(workspace_id, Some(true), options).await?;
    let cursor = page.next_cursor().map(String::from);

    let rows: Vec<IntentRow> = page
        .into_iter()
        .map(|i| IntentRow {
            intent: i.intent_name,
            description: or_dash(i.description),
            examples: i
                .examples
                .map(|e| e.len().to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    ctx.print(&rows);
    ctx.next_page(cursor.as_deref());
    Ok(())
}

/// Create an intent with its user examples
pub async fn create(
    client: &DialogClient,
    workspace_id: &str,
    intent: &str,
    examples: &[String],
    ctx: &OutputContext,
) -> Result<()> {
    let mut payload = CreateIntent::new(intent);
    if !examples.is_empty() {
        payload = payload.with_examples(examples.iter().cloned());
    }
    let created = client.create_intent(workspace_id, &payload).await?;

    ctx.success(&format!("Created intent #{}", created.intent_name));
    Ok(())
}

/// Delete an intent
pub async fn delete(
    client: &DialogClient,
    workspace_id: &str,
    intent: &str,
    ctx: &OutputContext,
) -> Result<()> {
    client.delete_intent(workspace_id, intent).await?;
    ctx.success(&format!("Deleted intent #{}", intent));
    Ok(())
}
