//! Line readers feeding the REPL
//!
//! `TerminalPrompt` is a small line editor on top of crossterm's raw mode (cursor keys,
//! history, Tab completion). `BufReadLines` reads plain lines and is used when stdin is
//! not a terminal, and by tests.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use unicode_width::UnicodeWidthStr;

use super::completion::{self, Suggestion};

/// Source of command lines
pub trait LineReader {
    /// Read one line; `Ok(None)` means the user is done (end of input or interrupt).
    ///
    /// `posts_loaded` decides which commands are offered for completion.
    fn read_line(&mut self, prompt: &str, posts_loaded: bool) -> io::Result<Option<String>>;
}

/// Reads lines from any `BufRead` without echoing a prompt
pub struct BufReadLines<R> {
    reader: R,
}

impl<R: BufRead> BufReadLines<R> {
    /// Wrap a reader
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineReader for BufReadLines<R> {
    fn read_line(&mut self, _prompt: &str, _posts_loaded: bool) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Editable input line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    pos: usize,
}

impl LineBuffer {
    /// Current contents
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Text left of the cursor
    pub fn before_cursor(&self) -> String {
        self.chars[..self.pos].iter().collect()
    }

    /// Whether the line is empty
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replace everything, cursor at the end
    pub fn set(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.pos = self.chars.len();
    }

    /// Insert at the cursor
    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.pos, c);
        self.pos += 1;
    }

    /// Delete left of the cursor
    pub fn backspace(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
            self.chars.remove(self.pos);
        }
    }

    /// Delete under the cursor
    pub fn delete(&mut self) {
        if self.pos < self.chars.len() {
            self.chars.remove(self.pos);
        }
    }

    /// Move left
    pub fn left(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Move right
    pub fn right(&mut self) {
        self.pos = (self.pos + 1).min(self.chars.len());
    }

    /// Jump to start
    pub fn home(&mut self) {
        self.pos = 0;
    }

    /// Jump to end
    pub fn end(&mut self) {
        self.pos = self.chars.len();
    }

    /// Replace the word ending at the cursor with `word` followed by a space
    pub fn complete_word(&mut self, word: &str) {
        let start = self.chars[..self.pos]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(0, |i| i + 1);
        let tail = self.chars.split_off(self.pos);
        self.chars.truncate(start);
        self.chars.extend(word.chars());
        self.chars.push(' ');
        self.pos = self.chars.len();
        self.chars.extend(tail);
    }
}

/// Leaves raw mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// What a key press did to the line
enum KeyOutcome {
    Edited,
    Submit,
    Quit,
    Complete,
}

/// Interactive prompt on a terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    history: Vec<String>,
}

impl TerminalPrompt {
    /// Create a prompt with empty history
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_key(&self, key: KeyEvent, line: &mut LineBuffer, hist: &mut usize) -> KeyOutcome {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => KeyOutcome::Quit,
            (KeyModifiers::CONTROL, KeyCode::Char('d')) if line.is_empty() => KeyOutcome::Quit,
            (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => {
                line.home();
                KeyOutcome::Edited
            }
            (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
                line.end();
                KeyOutcome::Edited
            }
            (_, KeyCode::Enter) => KeyOutcome::Submit,
            (_, KeyCode::Tab) => KeyOutcome::Complete,
            (_, KeyCode::Backspace) => {
                line.backspace();
                KeyOutcome::Edited
            }
            (_, KeyCode::Delete) => {
                line.delete();
                KeyOutcome::Edited
            }
            (_, KeyCode::Left) => {
                line.left();
                KeyOutcome::Edited
            }
            (_, KeyCode::Right) => {
                line.right();
                KeyOutcome::Edited
            }
            (_, KeyCode::Up) => {
                if *hist > 0 {
                    *hist -= 1;
                    line.set(&self.history[*hist]);
                }
                KeyOutcome::Edited
            }
            (_, KeyCode::Down) => {
                if *hist + 1 < self.history.len() {
                    *hist += 1;
                    line.set(&self.history[*hist]);
                } else {
                    *hist = self.history.len();
                    line.set("");
                }
                KeyOutcome::Edited
            }
            (modifiers, KeyCode::Char(c)) if !modifiers.contains(KeyModifiers::CONTROL) => {
                line.insert(c);
                KeyOutcome::Edited
            }
            _ => KeyOutcome::Edited,
        }
    }
}

fn render(out: &mut impl Write, prompt: &str, line: &LineBuffer) -> io::Result<()> {
    let column = prompt.width() + line.before_cursor().width();
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(prompt),
        Print(line.text()),
        MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX))
    )?;
    out.flush()
}

fn print_candidates(out: &mut impl Write, candidates: &[Suggestion]) -> io::Result<()> {
    queue!(out, Print("\r\n"))?;
    for s in candidates {
        queue!(out, Print(format!("  {:<8} {}\r\n", s.text, s.description)))?;
    }
    Ok(())
}

impl LineReader for TerminalPrompt {
    fn read_line(&mut self, prompt: &str, posts_loaded: bool) -> io::Result<Option<String>> {
        let _raw = RawModeGuard::enable()?;
        let mut out = io::stdout();
        let mut line = LineBuffer::default();
        let mut hist = self.history.len();

        render(&mut out, prompt, &line)?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match self.handle_key(key, &mut line, &mut hist) {
                KeyOutcome::Quit => {
                    queue!(out, Print("\r\n"))?;
                    out.flush()?;
                    return Ok(None);
                }
                KeyOutcome::Submit => {
                    queue!(out, Print("\r\n"))?;
                    out.flush()?;
                    let text = line.text();
                    if !text.trim().is_empty() && self.history.last() != Some(&text) {
                        self.history.push(text.clone());
                    }
                    return Ok(Some(text));
                }
                KeyOutcome::Complete => {
                    let candidates = completion::complete(&line.before_cursor(), posts_loaded);
                    match candidates.as_slice() {
                        [] => {}
                        [only] => line.complete_word(only.text),
                        many => print_candidates(&mut out, many)?,
                    }
                }
                KeyOutcome::Edited => {}
            }
            render(&mut out, prompt, &line)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buf_read_lines() {
        let input = b"load 3\r\nreview\n\nexit" as &[u8];
        let mut reader = BufReadLines::new(input);
        assert_eq!(reader.read_line("> ", false).unwrap(), Some("load 3".into()));
        assert_eq!(reader.read_line("> ", false).unwrap(), Some("review".into()));
        assert_eq!(reader.read_line("> ", false).unwrap(), Some(String::new()));
        assert_eq!(reader.read_line("> ", false).unwrap(), Some("exit".into()));
        assert_eq!(reader.read_line("> ", false).unwrap(), None);
    }

    #[test]
    fn test_line_editing() {
        let mut line = LineBuffer::default();
        for c in "lod".chars() {
            line.insert(c);
        }
        line.left();
        line.insert('a');
        assert_eq!(line.text(), "load");
        assert_eq!(line.before_cursor(), "loa");

        line.end();
        line.backspace();
        line.home();
        line.delete();
        assert_eq!(line.text(), "oa");

        line.backspace();
        line.left();
        line.right();
        line.right();
        line.right();
        line.insert('!');
        assert_eq!(line.text(), "oa!");
    }

    #[test]
    fn test_complete_word() {
        let mut line = LineBuffer::default();
        line.set("  rev");
        line.complete_word("review");
        assert_eq!(line.text(), "  review ");

        line.set("ne extra");
        line.home();
        line.right();
        line.right();
        line.complete_word("next");
        assert_eq!(line.text(), "next  extra");
        assert_eq!(line.before_cursor(), "next ");
    }

    #[test]
    fn test_history_keys() {
        let mut prompt = TerminalPrompt::new();
        prompt.history = vec!["load 5".into(), "review".into()];
        let mut line = LineBuffer::default();
        let mut hist = prompt.history.len();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);

        prompt.handle_key(up, &mut line, &mut hist);
        assert_eq!(line.text(), "review");
        prompt.handle_key(up, &mut line, &mut hist);
        assert_eq!(line.text(), "load 5");
        prompt.handle_key(up, &mut line, &mut hist);
        assert_eq!(line.text(), "load 5");
        prompt.handle_key(down, &mut line, &mut hist);
        assert_eq!(line.text(), "review");
        prompt.handle_key(down, &mut line, &mut hist);
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_quit_keys() {
        let prompt = TerminalPrompt::new();
        let mut line = LineBuffer::default();
        let mut hist = 0;
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(matches!(
            prompt.handle_key(ctrl_d, &mut line, &mut hist),
            KeyOutcome::Quit
        ));

        line.set("x");
        assert!(matches!(
            prompt.handle_key(ctrl_d, &mut line, &mut hist),
            KeyOutcome::Edited
        ));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            prompt.handle_key(ctrl_c, &mut line, &mut hist),
            KeyOutcome::Quit
        ));
    }
}
