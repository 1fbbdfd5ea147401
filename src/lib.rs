// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Lark SDK
//!
//! A Rust client for the Lark/Feishu open platform REST API.
//!
//! ## Features
//!
//! - **Resource Namespaces**: `client.im().chat().list(..)` mirrors the URL layout
//! - **Cursor Pagination**: Every list endpoint has a lazy, page-at-a-time iterator
//! - **Retry and Rate Limit**: Exponential backoff and a token-bucket limiter
//! - **Token Cache**: Pluggable async cache for access tokens
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use lark_sdk::{Client, ClientConfig, Domain, PageRequest, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::new(Domain::Feishu).with_access_token("t-..."))?;
//!
//!     let mut pages = client
//!         .im()
//!         .v1()
//!         .chat()
//!         .list_with_iterator(PageRequest::new().query("page_size", "50"));
//!
//!     while let Some(page) = pages.next().await {
//!         match page {
//!             Some(data) => println!("{:?}", data.get("items")),
//!             None => break, // fetch failed, already logged
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Resource Namespaces                        │
//! │   im.chat   im.message   contact.user   aily.session   ...      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────────┬─────────────────┐
//! │    Client    │           Pagination          │      HTTP       │
//! ├──────────────┼───────────────────────────────┼─────────────────┤
//! │ Path template│ PagedIter / PageStream        │ Retry, Backoff  │
//! │ Bearer token │ has_more + page_token cursor  │ Rate Limit      │
//! │ Token cache  │ None sentinel on failure      │ JSON decode     │
//! └──────────────┴───────────────────────────────┴─────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Access token cache
pub mod cache;

/// Client configuration
pub mod config;

/// Path template interpolation
pub mod template;

/// HTTP client with retry and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// API client and request dispatch
pub mod client;

/// Resource namespaces (im, contact, aily)
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::{ApiResponse, Client, ClientBuilder, RequestOptions};
pub use config::ClientConfig;
pub use pagination::{PageRequest, PageStep, PageStream, PagedIter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
