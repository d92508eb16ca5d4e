//! Hearth: an in-memory social graph engine.
//!
//! The [`SocialNetwork`] directory owns every [`User`]; users own their posts,
//! comment threads, feeds and notification logs. Entities refer to each other
//! by id only, so removing a user never leaves a dangling reference behind:
//! friendship edges and feed entries pointing at the removed user are pruned
//! eagerly. [`SharedNetwork`] wraps the same model for concurrent use.
//!
//! ```
//! use hearth::{SocialNetwork, UserId};
//!
//! let mut network = SocialNetwork::new();
//! network.add_user(UserId(1), "Ann", "bio1")?;
//! network.add_user(UserId(2), "Bob", "bio2")?;
//! network.add_friendship(UserId(1), UserId(2))?;
//!
//! let post = network.create_post(UserId(1), "hello")?.post_ref();
//! network.add_to_feed(UserId(2), post)?;
//!
//! let feed: Vec<_> = network.render_feed(UserId(2))?.collect();
//! assert_eq!(feed[0].author_name, "Ann");
//! assert_eq!(feed[0].body, "hello");
//! # Ok::<(), hearth::NetworkError>(())
//! ```

pub mod comments;
pub mod config;
pub mod errors;
pub mod feed;
pub mod graph;
pub mod ids;
pub mod network;
pub mod notifications;
pub mod posts;
pub mod shared;
pub mod user;
pub mod validators;

pub use comments::{Comment, CommentThread};
pub use config::{HearthConfig, Limits, NetworkSettings};
pub use errors::*;
pub use feed::{FeedEntry, NewsFeed};
pub use graph::FriendSet;
pub use ids::{CommentId, PostId, PostRef, UserId};
pub use network::SocialNetwork;
pub use notifications::{Notification, NotificationLog};
pub use posts::{Post, PostStore};
pub use shared::SharedNetwork;
pub use user::User;
