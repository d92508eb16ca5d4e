//! Thread-safe directory with per-user locking.
//!
//! The directory map sits behind a [`RwLock`]; each user sits behind its own
//! [`Mutex`]. Ordinary operations hold the directory read lock for their whole
//! duration and lock only the users they touch, so work on different users
//! proceeds in parallel. Operations that lock two users take the locks in
//! ascending id order. Removing a user takes the directory write lock, which
//! waits for every in-flight operation to finish before pruning.
//!
//! Closures passed to [`SharedNetwork::with_user`] run while locks are held
//! and must not call back into the same `SharedNetwork`. Mutable access to a
//! user stays inside the crate so every write goes through validation.
//!
//! ```compile_fail
//! use hearth::{PostId, PostRef, SharedNetwork, UserId};
//!
//! let network = SharedNetwork::new();
//! network.add_user(UserId(1), "Ann", "").unwrap();
//! network.with_user_mut(UserId(1), |user| user.add_to_feed(PostRef::new(UserId(5), PostId(3))));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::config::HearthConfig;
use crate::errors::{NetworkError, NetworkResult};
use crate::feed::FeedEntry;
use crate::ids::{CommentId, PostId, PostRef, UserId};
use crate::network::SocialNetwork;
use crate::user::User;
use crate::validators::{validate_body, validate_profile};

type UserCell = Arc<Mutex<User>>;

#[derive(Debug, Default)]
pub struct SharedNetwork {
    users: RwLock<HashMap<UserId, UserCell>>,
    config: HearthConfig,
}

fn cell(users: &HashMap<UserId, UserCell>, id: UserId) -> NetworkResult<&UserCell> {
    users.get(&id).ok_or(NetworkError::UserNotFound { user_id: id })
}

/// Locks two distinct users, acquiring them in ascending id order.
/// Guards are returned in argument order.
fn lock_pair<'a>(
    a: UserId,
    a_cell: &'a UserCell,
    b: UserId,
    b_cell: &'a UserCell,
) -> (MutexGuard<'a, User>, MutexGuard<'a, User>) {
    if a < b {
        let a_guard = a_cell.lock();
        let b_guard = b_cell.lock();
        (a_guard, b_guard)
    } else {
        let b_guard = b_cell.lock();
        let a_guard = a_cell.lock();
        (a_guard, b_guard)
    }
}

impl SharedNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HearthConfig) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &HearthConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.users.read().contains_key(&id)
    }

    pub fn add_user(&self, id: UserId, display_name: impl Into<String>, bio: impl Into<String>) -> NetworkResult<()> {
        let display_name = display_name.into();
        let bio = bio.into();
        validate_profile(&display_name, &bio, &self.config.limits)?;

        let mut users = self.users.write();
        if users.contains_key(&id) {
            warn!("rejected duplicate user id {id}");
            return Err(NetworkError::DuplicateId { user_id: id });
        }
        info!("added user {id} ({display_name})");
        users.insert(id, Arc::new(Mutex::new(User::new(id, display_name, bio))));
        Ok(())
    }

    /// Runs `f` against a locked user.
    pub fn with_user<R>(&self, id: UserId, f: impl FnOnce(&User) -> R) -> NetworkResult<R> {
        let users = self.users.read();
        let user = cell(&users, id)?.lock();
        Ok(f(&user))
    }

    /// Runs `f` against a locked, mutable user.
    pub(crate) fn with_user_mut<R>(&self, id: UserId, f: impl FnOnce(&mut User) -> R) -> NetworkResult<R> {
        let users = self.users.read();
        let mut user = cell(&users, id)?.lock();
        Ok(f(&mut user))
    }

    /// Removes a user, pruning friendship edges and feed entries network-wide.
    pub fn remove_user(&self, id: UserId) -> NetworkResult<User> {
        let mut users = self.users.write();
        let removed = users.remove(&id).ok_or(NetworkError::UserNotFound { user_id: id })?;
        let removed = Arc::try_unwrap(removed)
            .map(|cell| cell.into_inner())
            .unwrap_or_else(|shared| shared.lock().clone());

        for friend_id in removed.friends().iter() {
            if let Some(friend) = users.get(&friend_id) {
                friend.lock().unfriend(id);
            }
        }
        for user in users.values() {
            user.lock().feed_mut().remove_author(id);
        }

        info!("removed user {id}");
        Ok(removed)
    }

    /// Creates a symmetric friendship edge; see [`SocialNetwork::add_friendship`].
    pub fn add_friendship(&self, a: UserId, b: UserId) -> NetworkResult<bool> {
        let users = self.users.read();
        let a_cell = cell(&users, a)?;
        let b_cell = cell(&users, b)?;
        if a == b {
            warn!("rejected self-friendship for user {a}");
            return Err(NetworkError::SelfFriendship { user_id: a });
        }

        let (mut a_user, mut b_user) = lock_pair(a, a_cell, b, b_cell);
        let created = a_user.befriend(b)?;
        b_user.befriend(a)?;

        if created {
            debug!("users {a} and {b} are now friends");
            if self.config.network.notify_on_friendship {
                let a_name = a_user.display_name().to_string();
                let b_name = b_user.display_name().to_string();
                a_user.add_notification(format!("You are now friends with {b_name}"));
                b_user.add_notification(format!("You are now friends with {a_name}"));
            }
        }
        Ok(created)
    }

    pub fn remove_friendship(&self, a: UserId, b: UserId) -> NetworkResult<bool> {
        let users = self.users.read();
        let a_cell = cell(&users, a)?;
        let b_cell = cell(&users, b)?;
        if a == b {
            return Ok(false);
        }

        let (mut a_user, mut b_user) = lock_pair(a, a_cell, b, b_cell);
        let removed = a_user.unfriend(b);
        b_user.unfriend(a);
        if removed {
            debug!("users {a} and {b} are no longer friends");
        }
        Ok(removed)
    }

    pub fn are_friends(&self, a: UserId, b: UserId) -> NetworkResult<bool> {
        let users = self.users.read();
        let a_cell = cell(&users, a)?;
        cell(&users, b)?;
        Ok(a_cell.lock().is_friend_of(b))
    }

    pub fn create_post(&self, author: UserId, body: impl Into<String>) -> NetworkResult<PostRef> {
        let body = body.into();
        validate_body("body", &body, &self.config.limits)?;
        let post = self.with_user_mut(author, |user| user.create_post(body).post_ref())?;
        debug!("user {author} created post {}", post.post_id);
        Ok(post)
    }

    /// Creates a post and fans it out to friends' feeds when configured.
    pub fn publish_post(&self, author: UserId, body: impl Into<String>) -> NetworkResult<PostRef> {
        let body = body.into();
        validate_body("body", &body, &self.config.limits)?;

        let users = self.users.read();
        let (post, friends) = {
            let mut user = cell(&users, author)?.lock();
            let post = user.create_post(body).post_ref();
            (post, user.friends().iter().collect::<Vec<_>>())
        };
        debug!("user {author} created post {}", post.post_id);

        if self.config.network.fan_out_posts {
            for friend in &friends {
                if let Some(friend) = users.get(friend) {
                    friend.lock().add_to_feed(post);
                }
            }
            debug!("fanned out post {post} to {} feeds", friends.len());
        }
        Ok(post)
    }

    pub fn add_comment_to_post(&self, owner: UserId, post_id: PostId, text: impl Into<String>) -> NetworkResult<CommentId> {
        let text = text.into();
        validate_body("text", &text, &self.config.limits)?;
        let notify = self.config.network.notify_on_comment;
        self.with_user_mut(owner, |user| -> NetworkResult<CommentId> {
            let id = user.add_comment(post_id, text)?.id();
            if notify {
                user.add_notification(format!("New comment on your post {post_id}"));
            }
            Ok(id)
        })?
    }

    pub fn add_reply_to_comment(
        &self,
        owner: UserId,
        comment_id: CommentId,
        text: impl Into<String>,
    ) -> NetworkResult<CommentId> {
        let text = text.into();
        validate_body("text", &text, &self.config.limits)?;
        let notify = self.config.network.notify_on_comment;
        self.with_user_mut(owner, |user| -> NetworkResult<CommentId> {
            let id = user.add_reply(comment_id, text)?.id();
            if notify {
                user.add_notification(format!("New reply to comment {comment_id} on your post"));
            }
            Ok(id)
        })?
    }

    pub fn add_to_feed(&self, user: UserId, post: PostRef) -> NetworkResult<()> {
        let users = self.users.read();
        let exists = cell(&users, post.author_id)?.lock().posts().contains(post.post_id);
        if !exists {
            return Err(NetworkError::PostNotFound {
                user_id: post.author_id,
                post_id: post.post_id,
            });
        }
        cell(&users, user)?.lock().add_to_feed(post);
        Ok(())
    }

    /// Renders `user`'s feed. Never holds more than one user lock at a time.
    pub fn render_feed(&self, user: UserId) -> NetworkResult<Vec<FeedEntry>> {
        let users = self.users.read();
        let refs: Vec<PostRef> = cell(&users, user)?.lock().feed().iter().collect();

        Ok(refs
            .into_iter()
            .filter_map(|post| {
                let author = users.get(&post.author_id)?.lock();
                let found = author.get_post_by_id(post.post_id)?;
                Some(FeedEntry {
                    author_id: author.id(),
                    author_name: author.display_name().to_string(),
                    post_id: found.id(),
                    body: found.body().to_string(),
                })
            })
            .collect())
    }

    pub fn add_notification(&self, user: UserId, text: impl Into<String>) -> NetworkResult<()> {
        let text = text.into();
        validate_body("text", &text, &self.config.limits)?;
        self.with_user_mut(user, |user| {
            user.add_notification(text);
        })
    }

    pub fn view_notifications(&self, user: UserId) -> NetworkResult<Vec<String>> {
        self.with_user(user, |user| user.view_notifications().map(str::to_string).collect())
    }
}

impl From<SocialNetwork> for SharedNetwork {
    fn from(network: SocialNetwork) -> Self {
        let (users, config) = network.into_parts();
        let users = users
            .into_iter()
            .map(|(id, user)| (id, Arc::new(Mutex::new(user))))
            .collect();
        Self {
            users: RwLock::new(users),
            config,
        }
    }
}
