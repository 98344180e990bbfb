//! Client-side sync core for a remote todo list.
//!
//! # Overview
//! Mirrors a remote `/todos` collection in memory and turns user intents
//! (add, toggle, rename, delete, filter) into single request/response round
//! trips. The server is the only source of truth: local state changes only
//! after the server confirms, and failures leave it untouched.
//!
//! # Design
//! - `TodoClient` is a stateless codec: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. The core never opens a socket.
//! - A `Transport` executes requests. Native shells supply one through the
//!   FFI crate; tests use `ureq` or stubs.
//! - `RemoteTodoClient` is the seam the `Controller` depends on, so the
//!   orchestration logic is testable against in-memory servers.
//! - `Controller` owns a single `AppState` value: store, input draft, edit
//!   session, filter, theme, loading gate, and the last failure notice.

pub mod client;
pub mod config;
pub mod controller;
pub mod edit;
pub mod error;
pub mod filter;
pub mod http;
pub mod loading;
pub mod remote;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use config::{Config, LoadingPolicy};
pub use controller::{ActionKind, ActionPhase, AppState, Controller, Notice, Outcome};
pub use edit::EditSession;
pub use error::{ActionError, ApiError, ConfigError, ValidationError};
pub use filter::project;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use loading::LoadingGate;
pub use remote::{HttpRemote, RemoteTodoClient};
pub use store::TodoStore;
pub use types::{CreateTodo, FilterMode, Theme, Todo, TodoId, UpdateTodo};
