use serde::Serialize;

use crate::ids::{PostId, PostRef, UserId};

/// A resolved feed line: who posted what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub author_id: UserId,
    pub author_name: String,
    pub post_id: PostId,
    pub body: String,
}

/// Per-user list of post references. The feed never owns posts; entries are
/// resolved against the directory when rendered.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct NewsFeed {
    // oldest first; reads iterate in reverse
    entries: Vec<PostRef>,
}

impl NewsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `post` at the top of the feed. The same post may appear more than once.
    pub fn add(&mut self, post: PostRef) {
        self.entries.push(post);
    }

    /// References in feed order, most recently added first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = PostRef> + ExactSizeIterator + '_ {
        self.entries.iter().rev().copied()
    }

    /// Lazily resolves each reference with `resolve`, in feed order.
    /// References that no longer resolve are skipped.
    pub fn render<'a, F>(&'a self, resolve: F) -> impl Iterator<Item = FeedEntry> + 'a
    where
        F: Fn(PostRef) -> Option<FeedEntry> + 'a,
    {
        self.iter().filter_map(resolve)
    }

    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&PostRef) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|entry| keep(entry));
        before - self.entries.len()
    }

    /// Drops every entry authored by `author_id`. Returns how many were removed.
    pub fn remove_author(&mut self, author_id: UserId) -> usize {
        self.retain(|entry| entry.author_id != author_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
