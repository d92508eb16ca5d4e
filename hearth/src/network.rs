//! The user directory: entry point for every engine operation.
//!
//! Operations that touch an entity by id first resolve and validate that id
//! and report a typed [`NetworkError`] on a miss, before anything is mutated.
//! Cross-user writes (friendship edges, cascade pruning on removal) are
//! performed in full or not at all.

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::comments::Comment;
use crate::config::HearthConfig;
use crate::errors::{NetworkError, NetworkResult};
use crate::feed::FeedEntry;
use crate::ids::{CommentId, PostId, PostRef, UserId};
use crate::notifications::Notification;
use crate::posts::Post;
use crate::user::User;
use crate::validators::{validate_body, validate_profile};

/// In-memory social network: a registry of users keyed by id, kept in
/// registration order.
#[derive(Debug, Default)]
pub struct SocialNetwork {
    users: IndexMap<UserId, User>,
    config: HearthConfig,
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HearthConfig) -> Self {
        Self {
            users: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &HearthConfig {
        &self.config
    }

    pub(crate) fn into_parts(self) -> (IndexMap<UserId, User>, HearthConfig) {
        (self.users, self.config)
    }

    // ---- directory ----------------------------------------------------------

    /// Registers a new user. Fails with [`NetworkError::DuplicateId`] when `id`
    /// is already in use.
    pub fn add_user(&mut self, id: UserId, display_name: impl Into<String>, bio: impl Into<String>) -> NetworkResult<&User> {
        let display_name = display_name.into();
        let bio = bio.into();
        validate_profile(&display_name, &bio, &self.config.limits)?;

        if self.users.contains_key(&id) {
            warn!("rejected duplicate user id {id}");
            return Err(NetworkError::DuplicateId { user_id: id });
        }

        info!("added user {id} ({display_name})");
        let entry = self.users.entry(id).or_insert(User::new(id, display_name, bio));
        Ok(&*entry)
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Like [`SocialNetwork::get_user`], reporting a miss as an error.
    pub fn user(&self, id: UserId) -> NetworkResult<&User> {
        self.users.get(&id).ok_or(NetworkError::UserNotFound { user_id: id })
    }

    fn user_mut(&mut self, id: UserId) -> NetworkResult<&mut User> {
        self.users.get_mut(&id).ok_or(NetworkError::UserNotFound { user_id: id })
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// Users in registration order.
    pub fn users(&self) -> impl ExactSizeIterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Replaces the display name and/or bio of an existing user.
    pub fn update_profile(&mut self, id: UserId, display_name: Option<String>, bio: Option<String>) -> NetworkResult<&User> {
        let user = self.users.get(&id).ok_or(NetworkError::UserNotFound { user_id: id })?;
        validate_profile(
            display_name.as_deref().unwrap_or(user.display_name()),
            bio.as_deref().unwrap_or(user.bio()),
            &self.config.limits,
        )?;

        let user = self.user_mut(id)?;
        if let Some(display_name) = display_name {
            user.set_display_name(display_name);
        }
        if let Some(bio) = bio {
            user.set_bio(bio);
        }
        debug!("updated profile of user {id}");
        Ok(&*user)
    }

    /// Removes a user together with everything it owns.
    ///
    /// Friendship edges pointing at the user are pruned from every former
    /// friend, and feed entries referencing the user's posts are dropped from
    /// every remaining feed. Returns the removed user.
    pub fn remove_user(&mut self, id: UserId) -> NetworkResult<User> {
        let removed = self.users.shift_remove(&id).ok_or(NetworkError::UserNotFound { user_id: id })?;

        let mut pruned_edges = 0usize;
        for friend_id in removed.friends().iter() {
            if let Some(friend) = self.users.get_mut(&friend_id)
                && friend.unfriend(id)
            {
                pruned_edges += 1;
            }
        }

        let mut pruned_feed = 0usize;
        for user in self.users.values_mut() {
            pruned_feed += user.feed_mut().remove_author(id);
        }

        info!("removed user {id}: pruned {pruned_edges} friendship edges and {pruned_feed} feed entries");
        Ok(removed)
    }

    // ---- friendship ---------------------------------------------------------

    /// Creates a symmetric friendship edge between `a` and `b`.
    ///
    /// Returns `Ok(false)` when the two users were already friends; the call
    /// is idempotent. Befriending oneself is rejected.
    pub fn add_friendship(&mut self, a: UserId, b: UserId) -> NetworkResult<bool> {
        self.user(a)?;
        self.user(b)?;
        if a == b {
            warn!("rejected self-friendship for user {a}");
            return Err(NetworkError::SelfFriendship { user_id: a });
        }

        // both users exist and differ, so neither half can fail
        let created = self.user_mut(a)?.befriend(b)?;
        self.user_mut(b)?.befriend(a)?;

        if created {
            debug!("users {a} and {b} are now friends");
            if self.config.network.notify_on_friendship {
                self.notify_friendship(a, b)?;
            }
        }
        Ok(created)
    }

    fn notify_friendship(&mut self, a: UserId, b: UserId) -> NetworkResult<()> {
        let a_name = self.user(a)?.display_name().to_string();
        let b_name = self.user(b)?.display_name().to_string();
        self.user_mut(a)?.add_notification(format!("You are now friends with {b_name}"));
        self.user_mut(b)?.add_notification(format!("You are now friends with {a_name}"));
        Ok(())
    }

    /// Removes the edge between `a` and `b`. Returns `Ok(false)` if there was none.
    pub fn remove_friendship(&mut self, a: UserId, b: UserId) -> NetworkResult<bool> {
        self.user(a)?;
        self.user(b)?;
        let removed = self.user_mut(a)?.unfriend(b);
        self.user_mut(b)?.unfriend(a);
        if removed {
            debug!("users {a} and {b} are no longer friends");
        }
        Ok(removed)
    }

    pub fn are_friends(&self, a: UserId, b: UserId) -> NetworkResult<bool> {
        let user = self.user(a)?;
        self.user(b)?;
        Ok(user.is_friend_of(b))
    }

    /// Friend ids of `id`, ascending.
    pub fn friends_of(&self, id: UserId) -> NetworkResult<Vec<UserId>> {
        Ok(self.user(id)?.friends().iter().collect())
    }

    pub fn friend_count(&self, id: UserId) -> NetworkResult<usize> {
        Ok(self.user(id)?.friends().len())
    }

    /// Users who are friends with both `a` and `b`, ascending.
    pub fn mutual_friends(&self, a: UserId, b: UserId) -> NetworkResult<Vec<UserId>> {
        let a = self.user(a)?;
        let b = self.user(b)?;
        Ok(a.friends().mutual(b.friends()).collect())
    }

    // ---- posts and comments -------------------------------------------------

    pub fn create_post(&mut self, author: UserId, body: impl Into<String>) -> NetworkResult<&Post> {
        let body = body.into();
        validate_body("body", &body, &self.config.limits)?;
        let post = self.user_mut(author)?.create_post(body);
        debug!("user {author} created post {}", post.id());
        Ok(post)
    }

    /// Creates a post and, when `network.fan_out_posts` is enabled, pushes it
    /// into the feed of every friend of the author.
    pub fn publish_post(&mut self, author: UserId, body: impl Into<String>) -> NetworkResult<PostRef> {
        let post = self.create_post(author, body)?.post_ref();
        if self.config.network.fan_out_posts {
            let friends: Vec<UserId> = self.user(author)?.friends().iter().collect();
            for friend in &friends {
                self.user_mut(*friend)?.add_to_feed(post);
            }
            debug!("fanned out post {post} to {} feeds", friends.len());
        }
        Ok(post)
    }

    pub fn get_post(&self, owner: UserId, post_id: PostId) -> NetworkResult<&Post> {
        self.user(owner)?.get_post_by_id(post_id).ok_or(NetworkError::PostNotFound {
            user_id: owner,
            post_id,
        })
    }

    pub fn get_comment(&self, owner: UserId, comment_id: CommentId) -> NetworkResult<&Comment> {
        self.user(owner)?
            .get_comment_by_id(comment_id)
            .ok_or(NetworkError::CommentNotFound {
                user_id: owner,
                comment_id,
            })
    }

    /// Adds a top-level comment to post `post_id` of user `owner`.
    pub fn add_comment_to_post(&mut self, owner: UserId, post_id: PostId, text: impl Into<String>) -> NetworkResult<&Comment> {
        let text = text.into();
        validate_body("text", &text, &self.config.limits)?;
        let notify = self.config.network.notify_on_comment;

        let user = self.user_mut(owner)?;
        let comment_id = user.add_comment(post_id, text)?.id();
        debug!("comment {comment_id} added to post {post_id} of user {owner}");
        if notify {
            user.add_notification(format!("New comment on your post {post_id}"));
        }
        self.get_comment(owner, comment_id)
    }

    /// Replies to comment `comment_id` on any post of user `owner`.
    pub fn add_reply_to_comment(
        &mut self,
        owner: UserId,
        comment_id: CommentId,
        text: impl Into<String>,
    ) -> NetworkResult<&Comment> {
        let text = text.into();
        validate_body("text", &text, &self.config.limits)?;
        let notify = self.config.network.notify_on_comment;

        let user = self.user_mut(owner)?;
        let reply_id = user.add_reply(comment_id, text)?.id();
        debug!("reply {reply_id} added under comment {comment_id} of user {owner}");
        if notify {
            user.add_notification(format!("New reply to comment {comment_id} on your post"));
        }
        self.get_comment(owner, reply_id)
    }

    // ---- feeds --------------------------------------------------------------

    /// Puts an existing post at the top of `user`'s feed.
    pub fn add_to_feed(&mut self, user: UserId, post: PostRef) -> NetworkResult<()> {
        self.get_post(post.author_id, post.post_id)?;
        self.user_mut(user)?.add_to_feed(post);
        debug!("post {post} added to feed of user {user}");
        Ok(())
    }

    /// Lazily renders `user`'s feed as `(author name, body)` lines, most
    /// recently added first.
    pub fn render_feed(&self, user: UserId) -> NetworkResult<impl Iterator<Item = FeedEntry> + '_> {
        let user = self.user(user)?;
        Ok(user.feed().render(move |post| self.resolve_post(post)))
    }

    fn resolve_post(&self, post: PostRef) -> Option<FeedEntry> {
        let author = self.users.get(&post.author_id)?;
        let found = author.get_post_by_id(post.post_id)?;
        Some(FeedEntry {
            author_id: author.id(),
            author_name: author.display_name().to_string(),
            post_id: found.id(),
            body: found.body().to_string(),
        })
    }

    // ---- notifications ------------------------------------------------------

    pub fn add_notification(&mut self, user: UserId, text: impl Into<String>) -> NetworkResult<&Notification> {
        let text = text.into();
        validate_body("text", &text, &self.config.limits)?;
        Ok(self.user_mut(user)?.add_notification(text))
    }

    /// Notification bodies for `user`, most recent first.
    pub fn view_notifications(&self, user: UserId) -> NetworkResult<impl Iterator<Item = &str>> {
        Ok(self.user(user)?.view_notifications())
    }
}
