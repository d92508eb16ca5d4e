use thiserror::Error;

use crate::ids::{CommentId, PostId, UserId};

/// Top-level error type returned by the social network engine.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// No user with this id exists in the directory.
    #[error("user {user_id} not found")]
    UserNotFound { user_id: UserId },

    /// The user exists but has no post with this id.
    #[error("post {post_id} not found for user {user_id}")]
    PostNotFound { user_id: UserId, post_id: PostId },

    /// No post owned by the user carries a comment with this id.
    #[error("comment {comment_id} not found for user {user_id}")]
    CommentNotFound { user_id: UserId, comment_id: CommentId },

    /// A user with this id is already registered.
    #[error("user id {user_id} is already taken")]
    DuplicateId { user_id: UserId },

    /// Friendship edges must join two distinct users.
    #[error("user {user_id} cannot befriend themselves")]
    SelfFriendship { user_id: UserId },

    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),
}

impl NetworkError {
    /// True for lookup misses, as opposed to rejected input.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NetworkError::UserNotFound { .. } | NetworkError::PostNotFound { .. } | NetworkError::CommentNotFound { .. }
        )
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Collection of validation issues encountered while preparing a mutation.
#[derive(Debug, Clone, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the issue reported for `field`, if any.
    pub fn issue_for(&self, field: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }
}

/// Detailed validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
