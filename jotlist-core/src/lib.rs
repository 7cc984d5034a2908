//! Jotlist - Core
//!
//! A minimal to-do list service: a browser UI (served at `/`) lets a user
//! view and add short text tasks; two JSON endpoints persist and retrieve
//! them from a single SQLite table.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jotlist_core::{HttpServer, TaskStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(TaskStore::open("./data/jotlist.db")?);
//!     HttpServer::new(store)
//!         .bind("127.0.0.1:8080")
//!         .await?
//!         .serve()
//!         .await
//! }
//! ```
//!
//! # Architecture
//!
//! - [`http`] - hyper server, route dispatch, the two endpoints
//! - [`store`] - SQLite task storage with embedded migrations
//! - [`frontend`] - embedded browser page, served memory-first
//! - [`client`] - terminal rendition of the UI state machine
//! - [`config`] - layered configuration (defaults < file < env < code)
//!
//! # Behavior notes
//!
//! - Tasks are immutable once created: no edit, no delete, no pagination.
//! - The UI never inserts optimistically; a task appears only after the
//!   create succeeds and a full re-fetch completes.
//! - Storage failures surface as 500 responses whose `details` field
//!   carries the underlying error text verbatim. Deployments that consider
//!   this an information leak should strip it at the edge.

pub mod client;
pub mod config;
pub mod frontend;
pub mod http;
pub mod store;
pub mod task;

// Re-exports of main types
pub use config::JotlistConfig;
pub use http::server::HttpServer;
pub use store::{StoreError, TaskStore};
pub use task::Task;
