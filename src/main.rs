//! Delete-A-Tweet - review your recent tweets and delete the ones you no longer want
#![allow(clippy::uninlined_format_args)]

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use delete_a_tweet::api::TwitterClient;
use delete_a_tweet::app::{self, App, BufReadLines, TerminalPrompt};
use delete_a_tweet::cli::Args;
use delete_a_tweet::config::Config;
use delete_a_tweet::session::Session;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging (RUST_LOG overrides --verbose)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    let session = match Session::login(args.credentials(), |credentials| {
        TwitterClient::new(credentials, &config)
    })
    .await
    {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut app = App::new(session, config, io::stdout());

    let outcome = if io::stdin().is_terminal() {
        app::run(&mut app, &mut TerminalPrompt::new()).await
    } else {
        let stdin = io::stdin();
        app::run(&mut app, &mut BufReadLines::new(stdin.lock())).await
    }
    .context("Terminal I/O failed")?;

    Ok(outcome.into())
}
