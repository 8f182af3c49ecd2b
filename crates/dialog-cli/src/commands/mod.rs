//! Command implementations for dialog-cli

pub mod entities;
pub mod intents;
pub mod logs;
pub mod message;
pub mod nodes;
pub mod workspaces;
