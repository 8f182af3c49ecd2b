//! Logs command - show logged message exchanges

use anyhow::{bail, Result};
use dialog_client::{DialogClient, LogQuery};

use crate::output::{LogRow, OutputContext};

/// List logs of one workspace, or across workspaces with a filter
pub async fn logs(
    client: &DialogClient,
    workspace_id: Option<&str>,
    query: &LogQuery,
    ctx: &OutputContext,
) -> Result<()> {
    let page = match (workspace_id, query.filter.as_deref()) {
        (Some(workspace_id), _) => client.list_logs(workspace_id, query).await?,
        (None, Some(filter)) => client.list_all_logs(filter, query).await?,
        (None, None) => bail!("--filter is required when no workspace is given"),
    };
    let cursor = page.pagination.next_cursor.clone();

    let rows: Vec<LogRow> = page
        .logs
        .into_iter()
        .map(|log| LogRow {
            time: log.request_timestamp,
            input: log
                .request
                .input
                .map(|i| i.text)
                .unwrap_or_default(),
            intent: log
                .response
                .top_intent()
                .map(|i| format!("#{} ({:.2})", i.intent, i.confidence))
                .unwrap_or_else(|| "-".to_string()),
            output: log.response.output.text.join(" "),
        })
        .collect();

    ctx.print(&rows);
    ctx.next_page(cursor.as_deref());
    Ok(())
}
