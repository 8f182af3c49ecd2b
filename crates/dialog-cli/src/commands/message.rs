//! Message command - talk to a workspace

use anyhow::Result;
use dialog_client::{DialogClient, MessageRequest, MessageResponse};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::{OutputContext, OutputFormat};

/// Send one message, or chat interactively when no text is given
///
/// The interactive loop carries each response's context into the next
/// request and stops at end of input.
pub async fn message(
    client: &DialogClient,
    workspace_id: &str,
    text: Option<&str>,
    ctx: &OutputContext,
) -> Result<()> {
    if let Some(text) = text {
        let response = client
            .message(workspace_id, Some(&MessageRequest::text(text)), None)
            .await?;
        print_response(&response, ctx)?;
        return Ok(());
    }

    // Opening turn: lets the dialog greet before the user speaks
    let mut last = client.message(workspace_id, None, None).await?;
    print_response(&last, ctx)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let request = MessageRequest::reply(&last, line);
        match client.message(workspace_id, Some(&request), None).await {
            Ok(response) => {
                print_response(&response, ctx)?;
                last = response;
            }
            Err(e) => ctx.error(&format!("Error: {}", e)),
        }
    }
    Ok(())
}

fn print_response(response: &MessageResponse, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response.as_object())?);
        }
        OutputFormat::Table => {
            if let Some(intent) = response.top_intent() {
                ctx.info(&format!("#{} ({:.2})", intent.intent, intent.confidence));
            }
            for line in &response.output.text {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
