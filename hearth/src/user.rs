use std::collections::HashMap;

use serde::Serialize;

use crate::comments::Comment;
use crate::errors::{NetworkError, NetworkResult};
use crate::feed::NewsFeed;
use crate::graph::FriendSet;
use crate::ids::{CommentId, PostId, PostRef, Sequence, UserId};
use crate::notifications::{Notification, NotificationLog};
use crate::posts::{Post, PostStore};

/// A member of the social network.
///
/// A user owns its posts (and through them, their comment threads), its feed
/// and its notifications. Post and comment ids are allocated from per-user
/// counters that start at 1 and are never reused.
///
/// Content is only written through [`SocialNetwork`](crate::SocialNetwork) or
/// [`SharedNetwork`](crate::SharedNetwork), which validate ids and bodies
/// first. A `&mut User` alone cannot add posts, feed entries or notifications:
///
/// ```compile_fail
/// use hearth::{PostId, PostRef, SocialNetwork, UserId};
///
/// let mut network = SocialNetwork::new();
/// network.add_user(UserId(2), "Bob", "").unwrap();
/// let bob = network.get_user_mut(UserId(2)).unwrap();
/// bob.add_to_feed(PostRef::new(UserId(9), PostId(1)));
/// ```
///
/// ```compile_fail
/// use hearth::{SocialNetwork, UserId};
///
/// let mut network = SocialNetwork::new();
/// network.add_user(UserId(1), "Ann", "").unwrap();
/// network.get_user_mut(UserId(1)).unwrap().create_post("   ");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    display_name: String,
    bio: String,
    friends: FriendSet,
    posts: PostStore,
    feed: NewsFeed,
    notifications: NotificationLog,
    #[serde(skip)]
    post_ids: Sequence,
    #[serde(skip)]
    comment_ids: Sequence,
    /// comment id -> id of the post whose thread holds it
    #[serde(skip)]
    comment_index: HashMap<CommentId, PostId>,
}

impl User {
    pub(crate) fn new(id: UserId, display_name: String, bio: String) -> Self {
        Self {
            id,
            display_name,
            bio,
            friends: FriendSet::new(),
            posts: PostStore::new(),
            feed: NewsFeed::new(),
            notifications: NotificationLog::new(),
            post_ids: Sequence::new(),
            comment_ids: Sequence::new(),
            comment_index: HashMap::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub(crate) fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
    }

    pub(crate) fn set_bio(&mut self, bio: String) {
        self.bio = bio;
    }

    // ---- friendship -------------------------------------------------------

    pub fn friends(&self) -> &FriendSet {
        &self.friends
    }

    pub fn is_friend_of(&self, other: UserId) -> bool {
        self.friends.contains(other)
    }

    /// Records one half of a friendship edge. The directory writes the other half.
    pub(crate) fn befriend(&mut self, other: UserId) -> NetworkResult<bool> {
        if other == self.id {
            return Err(NetworkError::SelfFriendship { user_id: self.id });
        }
        Ok(self.friends.insert(other))
    }

    pub(crate) fn unfriend(&mut self, other: UserId) -> bool {
        self.friends.remove(other)
    }

    // ---- posts and comments ----------------------------------------------

    pub fn posts(&self) -> &PostStore {
        &self.posts
    }

    pub(crate) fn create_post(&mut self, body: impl Into<String>) -> &Post {
        let id = PostId(self.post_ids.allocate());
        self.posts.create(id, self.id, body.into())
    }

    pub fn get_post_by_id(&self, post_id: PostId) -> Option<&Post> {
        self.posts.get(post_id)
    }

    /// Adds a top-level comment to one of this user's posts.
    pub(crate) fn add_comment(&mut self, post_id: PostId, body: impl Into<String>) -> NetworkResult<&Comment> {
        let post = self.posts.get_mut(post_id).ok_or(NetworkError::PostNotFound {
            user_id: self.id,
            post_id,
        })?;
        let id = CommentId(self.comment_ids.allocate());
        self.comment_index.insert(id, post_id);
        Ok(post.comments_mut().add_comment(id, body))
    }

    /// Replies to a comment on any of this user's posts. The reply joins the
    /// same thread as its parent.
    pub(crate) fn add_reply(&mut self, parent_id: CommentId, body: impl Into<String>) -> NetworkResult<&Comment> {
        let not_found = NetworkError::CommentNotFound {
            user_id: self.id,
            comment_id: parent_id,
        };
        let Some(post_id) = self.comment_index.get(&parent_id).copied() else {
            return Err(not_found);
        };
        let Some(post) = self.posts.get_mut(post_id) else {
            return Err(not_found);
        };
        if !post.comments().contains(parent_id) {
            return Err(not_found);
        }

        let id = CommentId(self.comment_ids.allocate());
        self.comment_index.insert(id, post_id);
        post.comments_mut().add_reply(parent_id, id, body).ok_or(not_found)
    }

    /// Finds a comment across all of this user's posts.
    pub fn get_comment_by_id(&self, comment_id: CommentId) -> Option<&Comment> {
        let post_id = self.post_of_comment(comment_id)?;
        self.posts.get(post_id)?.comments().get(comment_id)
    }

    /// Id of the post whose thread holds `comment_id`.
    pub fn post_of_comment(&self, comment_id: CommentId) -> Option<PostId> {
        self.comment_index.get(&comment_id).copied()
    }

    // ---- feed -------------------------------------------------------------

    pub fn feed(&self) -> &NewsFeed {
        &self.feed
    }

    pub(crate) fn add_to_feed(&mut self, post: PostRef) {
        self.feed.add(post);
    }

    pub(crate) fn feed_mut(&mut self) -> &mut NewsFeed {
        &mut self.feed
    }

    // ---- notifications ----------------------------------------------------

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub(crate) fn add_notification(&mut self, body: impl Into<String>) -> &Notification {
        self.notifications.add(body)
    }

    /// Notification bodies, most recent first.
    pub fn view_notifications(&self) -> impl Iterator<Item = &str> {
        self.notifications.view().map(Notification::body)
    }
}
