//! dialog-cli - Command-line tool for the dialog service
//!
//! Manages workspaces and their training data, and talks to a workspace's
//! dialog from the terminal.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dialog_client::{DialogClient, ListOptions, LogQuery};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Config, Overrides};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "dialog-cli")]
#[command(author, version, about = "Dialog Service CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Service URL
    #[arg(short, long, env = "DIALOG_URL")]
    url: Option<String>,

    /// API version date
    #[arg(long, env = "DIALOG_API_VERSION")]
    api_version: Option<String>,

    /// Username for basic authentication
    #[arg(long, env = "DIALOG_USERNAME")]
    username: Option<String>,

    /// Password for basic authentication
    #[arg(long, env = "DIALOG_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Bearer token, instead of username and password
    #[arg(long, env = "DIALOG_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "DIALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Paging flags shared by list commands
#[derive(Args, Debug, Clone)]
struct PageArgs {
    /// Maximum number of results
    #[arg(long)]
    limit: Option<u32>,

    /// Attribute to sort by; prefix with '-' for descending
    #[arg(long, allow_hyphen_values = true)]
    sort: Option<String>,

    /// Cursor returned by a previous page
    #[arg(long)]
    cursor: Option<String>,
}

impl PageArgs {
    fn to_options(&self) -> ListOptions {
        ListOptions {
            page_limit: self.limit,
            include_count: None,
            sort: self.sort.clone(),
            cursor: self.cursor.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List and manage workspaces
    Workspaces {
        #[command(subcommand)]
        action: WorkspaceAction,
    },

    /// List and manage the intents of a workspace
    Intents {
        /// Workspace ID
        workspace: String,

        #[command(subcommand)]
        action: IntentAction,
    },

    /// List the entities of a workspace
    Entities {
        /// Workspace ID
        workspace: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List the dialog nodes of a workspace
    Nodes {
        /// Workspace ID
        workspace: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Send a message; without text, chat interactively from stdin
    Message {
        /// Workspace ID
        workspace: String,

        /// Text to send
        text: Option<String>,
    },

    /// Show logged message exchanges
    Logs {
        /// Workspace ID; omit to search all workspaces with --filter
        workspace: Option<String>,

        /// Search filter, e.g. "workspace_id::<id>"
        #[arg(long)]
        filter: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand)]
enum WorkspaceAction {
    /// List workspaces
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show workspace details
    Show {
        /// Workspace ID
        workspace: String,

        /// Include intents, entities and dialog nodes
        #[arg(long)]
        export: bool,
    },

    /// Create a workspace
    Create {
        /// Workspace name
        name: String,

        /// Language code
        #[arg(long, default_value = "en")]
        language: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a workspace
    Delete {
        /// Workspace ID
        workspace: String,
    },
}

#[derive(Subcommand)]
enum IntentAction {
    /// List intents
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Create an intent
    Create {
        /// Intent name
        intent: String,

        /// User examples for the intent
        #[arg(short, long = "example")]
        examples: Vec<String>,
    },

    /// Delete an intent
    Delete {
        /// Intent name
        intent: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let overrides = Overrides {
        url: cli.url.as_deref(),
        version: cli.api_version.as_deref(),
        username: cli.username.as_deref(),
        password: cli.password.as_deref(),
        bearer_token: cli.token.as_deref(),
    };
    let merged = config.merge_with_args(
        &overrides,
        cli.output.as_ref().map(OutputFormat::as_str),
        cli.no_color,
    );
    let format = OutputFormat::from_name(&merged.output)
        .with_context(|| format!("Unknown output format in config: {}", merged.output))?;

    // Create output context
    let ctx = OutputContext::new(format, merged.no_color, cli.quiet);

    let client = DialogClient::from_config(&merged.client)
        .context("Failed to create dialog client")?;

    // Execute command
    match &cli.command {
        Commands::Workspaces { action } => match action {
            WorkspaceAction::List { page } => {
                commands::workspaces::list(&client, &page.to_options(), &ctx).await?;
            }
            WorkspaceAction::Show { workspace, export } => {
                commands::workspaces::show(&client, workspace, *export, &ctx).await?;
            }
            WorkspaceAction::Create {
                name,
                language,
                description,
            } => {
                commands::workspaces::create(&client, name, language, description.as_deref(), &ctx)
                    .await?;
            }
            WorkspaceAction::Delete { workspace } => {
                commands::workspaces::delete(&client, workspace, &ctx).await?;
            }
        },

        Commands::Intents { workspace, action } => match action {
            IntentAction::List { page } => {
                commands::intents::list(&client, workspace, &page.to_options(), &ctx).await?;
            }
            IntentAction::Create { intent, examples } => {
                commands::intents::create(&client, workspace, intent, examples, &ctx).await?;
            }
            IntentAction::Delete { intent } => {
                commands::intents::delete(&client, workspace, intent, &ctx).await?;
            }
        },

        Commands::Entities { workspace, page } => {
            commands::entities::entities(&client, workspace, &page.to_options(), &ctx).await?;
        }

        Commands::Nodes { workspace, page } => {
            commands::nodes::nodes(&client, workspace, &page.to_options(), &ctx).await?;
        }

        Commands::Message { workspace, text } => {
            commands::message::message(&client, workspace, text.as_deref(), &ctx).await?;
        }

        Commands::Logs {
            workspace,
            filter,
            page,
        } => {
            let query = LogQuery {
                sort: page.sort.clone(),
                filter: filter.clone(),
                page_limit: page.limit,
                cursor: page.cursor.clone(),
            };
            commands::logs::logs(&client, workspace.as_deref(), &query, &ctx).await?;
        }
    }

    Ok(())
}
