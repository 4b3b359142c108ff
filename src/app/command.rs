//! Interactive command parsing

use crate::error::InputError;

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `exit`
    Exit,
    /// `load [count]`
    Load(Option<usize>),
    /// `delete`
    Delete,
    /// `review` / `r`
    Review,
    /// `next` / `n`
    Next,
    /// `back` / `b`
    Back,
    /// `help` / `?`
    Help,
    /// Anything else, including a blank line
    Unknown,
}

impl Command {
    /// Parse a line: trimmed, case-sensitive, first whitespace-delimited word selects the command
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Unknown);
        };

        let command = match name {
            "exit" => Self::Exit,
            "load" => Self::Load(words.next().map(parse_count).transpose()?),
            "delete" => Self::Delete,
            "review" | "r" => Self::Review,
            "next" | "n" => Self::Next,
            "back" | "b" => Self::Back,
            "help" | "?" => Self::Help,
            _ => Self::Unknown,
        };
        Ok(command)
    }
}

fn parse_count(word: &str) -> Result<usize, InputError> {
    match word.parse::<usize>() {
        Ok(0) => Err(InputError::ZeroCount),
        Ok(n) => Ok(n),
        Err(_) => Err(InputError::InvalidCount(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("exit"), Ok(Command::Exit));
        assert_eq!(Command::parse("  review  "), Ok(Command::Review));
        assert_eq!(Command::parse("r"), Ok(Command::Review));
        assert_eq!(Command::parse("n"), Ok(Command::Next));
        assert_eq!(Command::parse("next"), Ok(Command::Next));
        assert_eq!(Command::parse("b"), Ok(Command::Back));
        assert_eq!(Command::parse("delete"), Ok(Command::Delete));
        assert_eq!(Command::parse("?"), Ok(Command::Help));
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(Command::parse("load"), Ok(Command::Load(None)));
        assert_eq!(Command::parse("load 25"), Ok(Command::Load(Some(25))));
        assert_eq!(Command::parse("load\t7 extra"), Ok(Command::Load(Some(7))));
        assert_eq!(
            Command::parse("load many"),
            Err(InputError::InvalidCount("many".into()))
        );
        assert_eq!(
            Command::parse("load -3"),
            Err(InputError::InvalidCount("-3".into()))
        );
        assert_eq!(Command::parse("load 0"), Err(InputError::ZeroCount));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("frobnicate"), Ok(Command::Unknown));
        assert_eq!(Command::parse(""), Ok(Command::Unknown));
        assert_eq!(Command::parse("   "), Ok(Command::Unknown));
        // commands are case-sensitive
        assert_eq!(Command::parse("EXIT"), Ok(Command::Unknown));
        assert_eq!(Command::parse("Load 3"), Ok(Command::Unknown));
    }
}
