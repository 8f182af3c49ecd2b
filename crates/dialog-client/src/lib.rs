//! Dialog Client Library
//!
//! Provides a typed async HTTP client for the dialog-management service.
//!
//! # Example
//!
//! ```rust,no_run
//! use dialog_client::{DialogClient, ListOptions, MessageRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DialogClient::with_basic_auth(
//!         "https://dialog.example.com/api",
//!         "2017-05-26",
//!         "username",
//!         "password",
//!     )?;
//!
//!     // List workspaces
//!     let workspaces = client.list_workspaces(&ListOptions::default()).await?;
//!
//!     // Talk to the first one, carrying the context across turns
//!     let workspace_id = &workspaces.items[0].workspace_id;
//!     let first = client.message(workspace_id, None, None).await?;
//!     let reply = MessageRequest::reply(&first, "I want a pizza");
//!     let second = client.message(workspace_id, Some(&reply), None).await?;
//!     println!("{:?}", second.output.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Request pipeline
//!
//! Each endpoint method builds a [`RequestDescriptor`], hands it to the
//! [`Dispatcher`], which performs it through a [`Transport`] and runs the
//! [`ErrorMapper`] over the response before anything is decoded. A call
//! resolves to exactly one of: the decoded value, [`ClientError::Domain`],
//! [`ClientError::Transport`], [`ClientError::ResponseDecodeFailed`], or
//! [`ClientError::RequestEncodeFailed`] (in which case nothing was sent).
//!
//! # Testing
//!
//! The `testing` module provides utilities for integration testing:
//!
//! ```rust,ignore
//! use dialog_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! let workspaces = server.client.list_workspaces(&ListOptions::default()).await?;
//! ```

pub mod auth;
mod client;
pub mod config;
mod dispatch;
mod error;
pub mod error_mapper;
pub mod request;
pub mod testing;
pub mod transport;

pub use auth::{BasicAuth, BearerToken, Credentials};
pub use client::DialogClient;
pub use config::ClientConfig;
pub use dispatch::Dispatcher;
pub use error::{ClientError, DomainError, Result, TransportError};
pub use error_mapper::{ErrorMapper, ServiceErrorMapper};
pub use request::{ListOptions, LogQuery, Method, RequestBuilder, RequestDescriptor};
pub use transport::{RawResponse, ReqwestTransport, Transport};

// Re-export the codec and models for convenience
pub use dialog_core::models::*;
pub use dialog_core::{DecodeError, Decodable, DynamicValue, Encodable, EncodeError, JsonObject};
