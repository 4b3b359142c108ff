//! Command dispatch: one parsed line in, status and post output out

use std::io::{self, Write};

use crate::api::TwitterApi;
use crate::config::{Config, ErrorPolicy, LoadCountDefault};
use crate::error::{DeleteError, FetchError};
use crate::models::Post;
use crate::session::Session;

use super::command::Command;
use super::state::Reviewer;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `exit` or end of input
    Success,
    /// A remote call failed under the `exit` error policy
    Failure,
}

impl From<Outcome> for std::process::ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Failure => Self::FAILURE,
        }
    }
}

/// Whether the REPL keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop with the given outcome
    Exit(Outcome),
}

/// The REPL's state: session, loaded posts, remembered `load` count and the output sink
pub struct App<A, W> {
    session: Session<A>,
    config: Config,
    reviewer: Option<Reviewer>,
    load_count: usize,
    out: W,
}

impl<A: TwitterApi, W: Write> App<A, W> {
    /// Create the dispatcher for an authenticated session
    pub fn new(session: Session<A>, config: Config, out: W) -> Self {
        let load_count = match config.load_count_default {
            LoadCountDefault::Fixed => config.default_load_count,
            LoadCountDefault::Statuses => {
                usize::try_from(session.user().statuses_count).unwrap_or(usize::MAX)
            }
        }
        .max(1);

        Self {
            session,
            config,
            reviewer: None,
            load_count,
            out,
        }
    }

    /// Whether a `load` has succeeded yet
    pub const fn posts_loaded(&self) -> bool {
        self.reviewer.is_some()
    }

    /// The review state, once something is loaded
    pub const fn reviewer(&self) -> Option<&Reviewer> {
        self.reviewer.as_ref()
    }

    /// The count a bare `load` will use
    pub const fn load_count(&self) -> usize {
        self.load_count
    }

    /// The output sink
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Print the startup banner
    pub fn greet(&mut self) -> io::Result<()> {
        writeln!(self.out, "Welcome to Delete-A-Tweet")?;
        writeln!(self.out, "Please type 'exit' to terminate this program")?;
        writeln!(self.out)?;
        writeln!(self.out, "You have successfully authenticated to Twitter")?;
        writeln!(self.out, "You are signed in as {}", self.session.user().name)?;
        self.out.flush()
    }

    /// Parse and run one line of input
    pub async fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                self.out.flush()?;
                return Ok(Flow::Continue);
            }
        };

        let flow = match command {
            Command::Exit => {
                writeln!(self.out, "exiting...")?;
                Flow::Exit(Outcome::Success)
            }
            Command::Load(count) => self.load(count).await?,
            Command::Delete => self.delete().await?,
            Command::Review => {
                if self.reviewer.is_some() {
                    writeln!(self.out, "Beginning review... ('n' or 'next' to continue)")?;
                }
                self.next()?
            }
            Command::Next => self.next()?,
            Command::Back => self.back()?,
            Command::Help => {
                self.help()?;
                Flow::Continue
            }
            Command::Unknown => {
                tracing::debug!("Ignoring unrecognized input {line:?}");
                Flow::Continue
            }
        };

        self.out.flush()?;
        Ok(flow)
    }

    async fn load(&mut self, count: Option<usize>) -> io::Result<Flow> {
        if let Some(count) = count {
            self.load_count = count;
        }

        let user_id = self.session.user().id;
        let result = self
            .session
            .api()
            .user_timeline(user_id, self.load_count)
            .await
            .map_err(FetchError);

        match result {
            Ok(posts) => {
                writeln!(self.out, "Loaded {} tweets", posts.len())?;
                writeln!(self.out, "Type 'review' or 'r' to begin..")?;
                self.reviewer = Some(Reviewer::new(posts));
                Ok(Flow::Continue)
            }
            Err(e) => self.report(&e),
        }
    }

    async fn delete(&mut self) -> io::Result<Flow> {
        let Some(reviewer) = &self.reviewer else {
            return self.not_loaded();
        };
        let Some(id) = reviewer.current().map(|p| p.id) else {
            writeln!(self.out, "No tweet selected. Type 'review' or 'next' first")?;
            return Ok(Flow::Continue);
        };

        writeln!(self.out, "deleting tweet")?;
        let result = self.session.api().destroy(id).await.map_err(DeleteError);

        match result {
            Ok(_) => {
                if let Some(reviewer) = self.reviewer.as_mut() {
                    reviewer.remove_current();
                }
                writeln!(self.out, "Deleted tweet {id}")?;
                Ok(Flow::Continue)
            }
            Err(e) => self.report(&e),
        }
    }

    fn next(&mut self) -> io::Result<Flow> {
        let Some(reviewer) = self.reviewer.as_mut() else {
            return self.not_loaded();
        };
        match reviewer.advance() {
            Some(post) => write_post(&mut self.out, post, self.config.wrap_width)?,
            None => writeln!(self.out, "All out of tweets")?,
        }
        Ok(Flow::Continue)
    }

    fn back(&mut self) -> io::Result<Flow> {
        let Some(reviewer) = self.reviewer.as_mut() else {
            return self.not_loaded();
        };
        match reviewer.back() {
            Some(post) => write_post(&mut self.out, post, self.config.wrap_width)?,
            None => writeln!(self.out, "Already as far back as you can go")?,
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "Commands:")?;
        writeln!(
            self.out,
            "  load [n]    Load your n most recent tweets (now {})",
            self.load_count
        )?;
        writeln!(self.out, "  review, r   Start reviewing loaded tweets")?;
        writeln!(self.out, "  next, n     Show the next tweet")?;
        writeln!(self.out, "  back, b     Show the previous tweet")?;
        writeln!(self.out, "  delete      Delete the tweet on screen")?;
        writeln!(self.out, "  exit        Leave")
    }

    fn not_loaded(&mut self) -> io::Result<Flow> {
        writeln!(
            self.out,
            "No tweets loaded yet. Type 'load' to fetch your timeline"
        )?;
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &dyn std::error::Error) -> io::Result<Flow> {
        tracing::warn!("{err}");
        writeln!(self.out, "{err}")?;
        match self.config.on_error {
            ErrorPolicy::Continue => Ok(Flow::Continue),
            ErrorPolicy::Exit => Ok(Flow::Exit(Outcome::Failure)),
        }
    }
}

fn write_post(out: &mut impl Write, post: &Post, wrap_width: usize) -> io::Result<()> {
    let line = post.to_string();
    if wrap_width > 0 {
        writeln!(out, "{}", textwrap::fill(&line, wrap_width))?;
    } else {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "    {}", post.detail_line())
}
