//! Flat comment threads with parent back-references.
//!
//! A thread stores its comments in a single sequence. New top-level comments
//! go to the head. A reply is placed immediately after its parent, so the
//! newest reply to a given comment comes first among that comment's replies.
//! Nesting is never stored; it is recovered by walking `parent_id` links
//! (see [`CommentThread::depth_of`]).

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::CommentId;

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    id: CommentId,
    body: String,
    parent_id: Option<CommentId>,
    created_at: DateTime<Utc>,
}

impl Comment {
    fn new(id: CommentId, body: String, parent_id: Option<CommentId>) -> Self {
        Self {
            id,
            body,
            parent_id,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The comment this one replies to. Informational only; it does not own
    /// the reply.
    pub fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct CommentThread {
    comments: VecDeque<Comment>,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a top-level comment at the head of the thread.
    pub fn add_comment(&mut self, id: CommentId, body: impl Into<String>) -> &Comment {
        self.comments.push_front(Comment::new(id, body.into(), None));
        &self.comments[0]
    }

    /// Inserts a reply directly after `parent_id`.
    ///
    /// Returns `None` without modifying the thread when the parent is not part
    /// of this thread.
    pub fn add_reply(&mut self, parent_id: CommentId, id: CommentId, body: impl Into<String>) -> Option<&Comment> {
        let parent_pos = self.position(parent_id)?;
        let slot = parent_pos + 1;
        self.comments.insert(slot, Comment::new(id, body.into(), Some(parent_id)));
        Some(&self.comments[slot])
    }

    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == id)
    }

    pub fn contains(&self, id: CommentId) -> bool {
        self.position(id).is_some()
    }

    /// Comments in thread order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Comment> + ExactSizeIterator {
        self.comments.iter()
    }

    /// Direct replies to `id`, in thread order.
    pub fn replies_to(&self, id: CommentId) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(move |comment| comment.parent_id == Some(id))
    }

    /// Number of `parent_id` hops from `id` to a top-level comment.
    pub fn depth_of(&self, id: CommentId) -> Option<usize> {
        let mut current = self.get(id)?;
        let mut depth = 0;
        while let Some(parent_id) = current.parent_id {
            // parents are always inserted before their replies, so the chain
            // is acyclic and at most `len` long
            if depth >= self.comments.len() {
                break;
            }
            match self.get(parent_id) {
                Some(parent) => {
                    current = parent;
                    depth += 1;
                }
                None => break,
            }
        }
        Some(depth)
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    fn position(&self, id: CommentId) -> Option<usize> {
        self.comments.iter().position(|comment| comment.id == id)
    }
}
