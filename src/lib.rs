//! # Delete-A-Tweet
//!
//! An interactive terminal tool for cleaning up your Twitter history.
//!
//! ## Overview
//!
//! Delete-A-Tweet signs in with your OAuth 1.0a credentials, loads your most recent
//! tweets and walks you through them one at a time. Anything you no longer want is
//! deleted with a single command.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │     Reads commands, keeps the review cursor, prints posts   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │     Session     │ │     Prompt      │
//! │                 │ │                 │ │                 │
//! │ • TOML file     │ │ • Validate keys │ │ • Line editing  │
//! │ • CLI overrides │ │ • Verify user   │ │ • History       │
//! │ • Error policy  │ │ • Holds client  │ │ • Tab complete  │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │       API       │ │      Auth       │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Timeline      │ │ • Key pairs     │ │ • Post          │
//! │ • Destroy       │ │ • OAuth1 sign   │ │ • User          │
//! │ • Unified trait │ │ • Header format │ │                 │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Twitter v1.1 client behind the [`api::TwitterApi`] trait
//! - [`app`] — Command parsing, review state and the REPL loop
//! - [`auth`] — Credentials and OAuth 1.0a request signing
//! - [`cli`] — Command-line flags
//! - [`config`] — Configuration management
//! - [`error`] — Error types
//! - [`models`] — Data models (Post, User)
//! - [`session`] — Authenticated session
//!
//! ## Example
//!
//! ```no_run
//! use delete_a_tweet::api::TwitterClient;
//! use delete_a_tweet::app::{self, App, BufReadLines};
//! use delete_a_tweet::{Config, Credentials, Session};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::default();
//! let credentials = Credentials::new("key", "secret", "token", "token-secret");
//! let session = Session::login(credentials, |c| TwitterClient::new(c, &config)).await?;
//!
//! let mut app = App::new(session, config.clone(), std::io::stdout());
//! let mut input = BufReadLines::new(std::io::stdin().lock());
//! app::run(&mut app, &mut input).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

// Re-export main types for convenience
pub use api::{TwitterApi, TwitterClient};
pub use auth::{Credentials, KeyPair};
pub use config::Config;
pub use error::{ApiError, AuthenticationError, DeleteError, FetchError, InputError};
pub use models::{Post, User};
pub use session::Session;
