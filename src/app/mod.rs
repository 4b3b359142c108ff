//! Interactive review loop

mod command;
mod completion;
mod dispatch;
mod prompt;
mod state;

pub use command::Command;
pub use completion::{Suggestion, suggestions};
pub use dispatch::{App, Flow, Outcome};
pub use prompt::{BufReadLines, LineBuffer, LineReader, TerminalPrompt};
pub use state::Reviewer;

use std::io::{self, Write};

use crate::api::TwitterApi;

/// Prompt shown before every command
pub const PROMPT: &str = "> ";

/// Greet the user, then read and run commands until `exit`, end of input or a fatal failure
pub async fn run<A, R, W>(app: &mut App<A, W>, reader: &mut R) -> io::Result<Outcome>
where
    A: TwitterApi,
    R: LineReader,
    W: Write,
{
    app.greet()?;

    loop {
        let posts_loaded = app.posts_loaded();
        let Some(line) = reader.read_line(PROMPT, posts_loaded)? else {
            writeln!(app.output_mut(), "exiting...")?;
            app.output_mut().flush()?;
            return Ok(Outcome::Success);
        };

        if let Flow::Exit(outcome) = app.execute(&line).await? {
            return Ok(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ErrorPolicy};
    use crate::models::User;
    use crate::session::Session;
    use crate::session::tests::{Call, FakeApi};

    fn session(fake: &FakeApi) -> Session<FakeApi> {
        Session::new(fake.clone(), User::new(99, "Test User", "tester", 3))
    }

    async fn run_script(fake: &FakeApi, config: Config, script: &str) -> (Outcome, String) {
        let mut app = App::new(session(fake), config, Vec::new());
        let mut reader = BufReadLines::new(script.as_bytes());
        let outcome = run(&mut app, &mut reader).await.unwrap();
        let out = String::from_utf8(std::mem::take(app.output_mut())).unwrap();
        (outcome, out)
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let fake = FakeApi::with_posts(&[1, 2, 3]);
        let script = "load 3\nreview\nnext\nback\ndelete\nwhatever\nexit\nload\n";
        let (outcome, out) = run_script(&fake, Config::default(), script).await;

        assert_eq!(outcome, Outcome::Success);
        assert!(out.contains("Loaded 3 tweets"));
        assert!(out.contains("Deleted tweet 1"));
        assert!(out.ends_with("exiting...\n"));
        // nothing after `exit` runs
        assert_eq!(
            fake.calls(),
            vec![
                Call::Timeline {
                    user_id: 99,
                    count: 3
                },
                Call::Destroy(1),
            ]
        );
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let fake = FakeApi::with_posts(&[1]);
        let (outcome, out) = run_script(&fake, Config::default(), "load").await;
        assert_eq!(outcome, Outcome::Success);
        assert!(out.ends_with("Type 'review' or 'r' to begin..\nexiting...\n"));
    }

    #[tokio::test]
    async fn test_exit_policy_stops_loop() {
        let fake = FakeApi {
            fail_timeline: true,
            ..FakeApi::with_posts(&[1])
        };
        let config = Config {
            on_error: ErrorPolicy::Exit,
            ..Config::default()
        };
        let (outcome, out) = run_script(&fake, config, "load\nload\n").await;
        assert_eq!(outcome, Outcome::Failure);
        assert_eq!(fake.calls().len(), 1);
        assert!(out.ends_with("Failed to get user timeline: unexpected status 500 Internal Server Error\n"));
    }
}
