//! Friendship graph storage.
//!
//! The graph is kept as one adjacency set per user. Each edge is stored in
//! both endpoints' sets; the directory writes both halves in a single call
//! after validating both users, so the relation stays symmetric.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::ids::UserId;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FriendSet {
    ids: BTreeSet<UserId>,
}

impl FriendSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the edge is new.
    pub fn insert(&mut self, friend: UserId) -> bool {
        self.ids.insert(friend)
    }

    /// Returns `true` when an edge was removed.
    pub fn remove(&mut self, friend: UserId) -> bool {
        self.ids.remove(&friend)
    }

    pub fn contains(&self, friend: UserId) -> bool {
        self.ids.contains(&friend)
    }

    /// Friend ids in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = UserId> + ExactSizeIterator + '_ {
        self.ids.iter().copied()
    }

    /// Ids present in both sets, ascending.
    pub fn mutual<'a>(&'a self, other: &'a FriendSet) -> impl Iterator<Item = UserId> + 'a {
        self.ids.intersection(&other.ids).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
