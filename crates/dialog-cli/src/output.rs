//! Output formatting for dialog-cli (table, json)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a format name from the config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.dimmed());
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print rows in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No data");
                    }
                } else {
                    println!("{}", Table::new(data));
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
        }
    }

    /// Print key-value pairs (for show commands)
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Table => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
    }

    /// Print the cursor of the next page, if any
    pub fn next_page(&self, cursor: Option<&str>) {
        if let (Some(cursor), OutputFormat::Table) = (cursor, self.format) {
            self.info(&format!("More results: --cursor {}", cursor));
        }
    }
}

/// Render an optional field
pub fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

// =============================================================================
// Display types for various commands
// =============================================================================

/// Workspace display for workspaces list
#[derive(Debug, Tabled, Serialize)]
pub struct WorkspaceRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Language")]
    pub language: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

/// Intent display for intents command
#[derive(Debug, Tabled, Serialize)]
pub struct IntentRow {
    #[tabled(rename = "Intent")]
    pub intent: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Examples")]
    pub examples: String,
}

/// Entity display for entities command
#[derive(Debug, Tabled, Serialize)]
pub struct EntityRow {
    #[tabled(rename = "Entity")]
    pub entity: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Fuzzy")]
    pub fuzzy_match: String,
    #[tabled(rename = "Values")]
    pub values: String,
}

/// Dialog node display for nodes command
#[derive(Debug, Tabled, Serialize)]
pub struct DialogNodeRow {
    #[tabled(rename = "Node")]
    pub node: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Conditions")]
    pub conditions: String,
    #[tabled(rename = "Parent")]
    pub parent: String,
}

/// Log display for logs command
#[derive(Debug, Tabled, Serialize)]
pub struct LogRow {
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Input")]
    pub input: String,
    #[tabled(rename = "Intent")]
    pub intent: String,
    #[tabled(rename = "Output")]
    pub output: String,
}
