use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::comments::CommentThread;
use crate::ids::{PostId, PostRef, UserId};

/// A post owned by its author's [`PostStore`]. Each post owns its comment thread.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    id: PostId,
    author_id: UserId,
    body: String,
    created_at: DateTime<Utc>,
    comments: CommentThread,
}

impl Post {
    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn comments(&self) -> &CommentThread {
        &self.comments
    }

    pub(crate) fn comments_mut(&mut self) -> &mut CommentThread {
        &mut self.comments
    }

    /// Feed reference for this post.
    pub fn post_ref(&self) -> PostRef {
        PostRef {
            author_id: self.author_id,
            post_id: self.id,
        }
    }
}

/// Per-user post storage keyed by id.
///
/// Post ids are allocated in increasing order, so iterating the map backwards
/// yields posts most-recent-first.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PostStore {
    posts: BTreeMap<PostId, Post>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn create(&mut self, id: PostId, author_id: UserId, body: String) -> &Post {
        let post = Post {
            id,
            author_id,
            body,
            created_at: Utc::now(),
            comments: CommentThread::new(),
        };
        let previous = self.posts.insert(id, post);
        debug_assert!(previous.is_none(), "post id {id} allocated twice");
        &self.posts[&id]
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.posts.get_mut(&id)
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.posts.contains_key(&id)
    }

    /// Posts, most recent first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Post> + ExactSizeIterator {
        self.posts.values().rev()
    }

    pub fn latest(&self) -> Option<&Post> {
        self.posts.values().next_back()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
