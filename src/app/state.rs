//! Review cursor over the loaded timeline

use crate::models::Post;

/// The loaded posts and where the user is in them.
///
/// `cursor` is the index of the next post `advance` will show and `current` is the index of
/// the post on screen. After `advance`, `cursor == current + 1`; `back` from the first post
/// leaves both at 0, so the next `advance` shows that post again.
#[derive(Debug, Clone, Default)]
pub struct Reviewer {
    posts: Vec<Post>,
    cursor: usize,
    current: Option<usize>,
}

impl Reviewer {
    /// Start reviewing a freshly loaded timeline
    pub const fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            cursor: 0,
            current: None,
        }
    }

    /// Number of loaded posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Index of the next post to show
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The post most recently shown, if it is still selected
    pub fn current(&self) -> Option<&Post> {
        self.current.and_then(|i| self.posts.get(i))
    }

    /// Show the post at the cursor and move past it; `None` once the list is used up
    pub fn advance(&mut self) -> Option<&Post> {
        if self.cursor >= self.posts.len() {
            return None;
        }
        let index = self.cursor;
        self.current = Some(index);
        self.cursor += 1;
        tracing::debug!("Cursor advanced to {}", self.cursor);
        self.posts.get(index)
    }

    /// Step the cursor back by one and show the post before it; `None` at cursor 0.
    ///
    /// From the first post the cursor drops to 0 and that post is shown again.
    pub fn back(&mut self) -> Option<&Post> {
        let cursor = self.cursor.checked_sub(1)?;
        let index = cursor.saturating_sub(1);
        if index >= self.posts.len() {
            return None;
        }
        self.cursor = cursor;
        self.current = Some(index);
        tracing::debug!("Cursor moved back to {}", self.cursor);
        self.posts.get(index)
    }

    /// Drop the selected post (after it was deleted remotely); the next `advance` shows
    /// the post that followed it
    pub fn remove_current(&mut self) -> Option<Post> {
        let index = self.current.take()?;
        if index >= self.posts.len() {
            return None;
        }
        self.cursor = index;
        Some(self.posts.remove(index))
    }
}
