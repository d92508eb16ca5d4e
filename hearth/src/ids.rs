use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

numeric_id!(
    /// Caller-assigned user identifier, unique within a directory.
    UserId
);
numeric_id!(
    /// Post identifier, unique within the authoring user.
    PostId
);
numeric_id!(
    /// Comment identifier, unique within the id space of the user owning the post.
    CommentId
);

/// Monotonic id source. Starts at 1 and never hands out a value twice.
#[derive(Debug, Clone, Serialize)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> u64 {
        let value = self.next;
        self.next += 1;
        value
    }

    /// Value the next call to [`Sequence::allocate`] will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Id-based reference to a post, used by feeds instead of a borrowed pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostRef {
    pub author_id: UserId,
    pub post_id: PostId,
}

impl PostRef {
    pub fn new(author_id: UserId, post_id: PostId) -> Self {
        Self { author_id, post_id }
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author_id, self.post_id)
    }
}
