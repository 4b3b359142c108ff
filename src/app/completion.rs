//! Prefix completion for the interactive prompt

/// A completion candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    /// Command word
    pub text: &'static str,
    /// Short explanation shown next to it
    pub description: &'static str,
}

const ALWAYS: &[Suggestion] = &[
    Suggestion {
        text: "exit",
        description: "Leave Delete-A-Tweet",
    },
    Suggestion {
        text: "load",
        description: "Load your most recent tweets",
    },
];

const WITH_POSTS: &[Suggestion] = &[
    Suggestion {
        text: "delete",
        description: "Delete the current tweet",
    },
    Suggestion {
        text: "review",
        description: "Review loaded tweets",
    },
    Suggestion {
        text: "next",
        description: "Continue on reviewing the next tweet",
    },
    Suggestion {
        text: "back",
        description: "Go back to the previous tweet",
    },
];

/// Candidates for `word`: case-insensitive prefix match; review commands only once posts
/// are loaded; an empty word gets nothing
pub fn suggestions(word: &str, posts_loaded: bool) -> Vec<Suggestion> {
    if word.is_empty() {
        return Vec::new();
    }
    let word = word.to_lowercase();

    let extra: &[Suggestion] = if posts_loaded { WITH_POSTS } else { &[] };
    ALWAYS
        .iter()
        .chain(extra)
        .filter(|s| s.text.starts_with(&word))
        .copied()
        .collect()
}

/// The word the cursor sits at the end of (empty after whitespace)
pub fn word_before_cursor(line: &str) -> &str {
    line.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// Candidates for the word at the end of `line`
pub fn complete(line: &str, posts_loaded: bool) -> Vec<Suggestion> {
    suggestions(word_before_cursor(line), posts_loaded)
}
