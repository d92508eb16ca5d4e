//! Serializable views rendered by the shell.

use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};
use hearth::{CommentId, FeedEntry, Post, PostId, User, UserId};
use serde::Serialize;

use crate::output::{GlobalOptions, TableDisplay, themed_table};

#[derive(Debug, Serialize)]
pub struct UserRow {
    pub id: UserId,
    pub display_name: String,
    pub bio: String,
    pub friends: usize,
    pub posts: usize,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            display_name: user.display_name().to_string(),
            bio: user.bio().to_string(),
            friends: user.friends().len(),
            posts: user.posts().len(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct UserList(pub Vec<UserRow>);

impl TableDisplay for UserList {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Id", "Name", "Bio", "Friends", "Posts"]);
        for row in &self.0 {
            table.add_row(vec![
                Cell::new(row.id),
                Cell::new(&row.display_name),
                Cell::new(&row.bio),
                Cell::new(row.friends),
                Cell::new(row.posts),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|row| format!("{}:{}", row.id, row.display_name))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Serialize)]
pub struct CommentRow {
    pub id: CommentId,
    pub parent_id: Option<CommentId>,
    pub depth: usize,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub author_id: UserId,
    pub id: PostId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentRow>,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        let thread = post.comments();
        let comments = thread
            .iter()
            .map(|comment| CommentRow {
                id: comment.id(),
                parent_id: comment.parent_id(),
                depth: thread.depth_of(comment.id()).unwrap_or_default(),
                body: comment.body().to_string(),
            })
            .collect();
        Self {
            author_id: post.author_id(),
            id: post.id(),
            body: post.body().to_string(),
            created_at: post.created_at(),
            comments,
        }
    }
}

impl TableDisplay for PostView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Comment", "Reply to", "Text"]);
        table.add_row(vec![
            Cell::new(format!("post {}/{}", self.author_id, self.id)),
            Cell::new(""),
            Cell::new(&self.body),
        ]);
        for comment in &self.comments {
            let indent = "  ".repeat(comment.depth);
            table.add_row(vec![
                Cell::new(comment.id),
                Cell::new(comment.parent_id.map(|id| id.to_string()).unwrap_or_default()),
                Cell::new(format!("{indent}{}", comment.body)),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        format!("{}/{} {} ({} comments)", self.author_id, self.id, self.body, self.comments.len())
    }
}

#[derive(Debug, Serialize)]
pub struct FeedView {
    pub user: UserId,
    pub entries: Vec<FeedEntry>,
}

impl TableDisplay for FeedView {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Author", "Post", "Text"]);
        for entry in &self.entries {
            table.add_row(vec![
                Cell::new(format!("{} ({})", entry.author_name, entry.author_id)),
                Cell::new(entry.post_id),
                Cell::new(&entry.body),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}: {}", entry.author_name, entry.body))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A titled list of user ids, for friend listings.
#[derive(Debug, Serialize)]
pub struct IdList {
    #[serde(skip)]
    pub title: String,
    pub ids: Vec<UserId>,
}

impl TableDisplay for IdList {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &[self.title.as_str()]);
        for id in &self.ids {
            table.add_row(vec![Cell::new(id)]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub user: UserId,
    pub notifications: Vec<String>,
}

impl TableDisplay for NotificationList {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["#", "Notification"]);
        for (index, body) in self.notifications.iter().enumerate() {
            table.add_row(vec![Cell::new(index + 1), Cell::new(body)]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.notifications.join(" | ")
    }
}
