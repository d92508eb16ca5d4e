//! Command execution shared by the interactive shell and script runner.

mod parser;
mod views;

use anyhow::Result;
use hearth::{NetworkError, PostRef, SocialNetwork};

use crate::output::OutputManager;

use parser::{ParseError, Parsed, ShellCommand, join_words, parse_line};
use views::{FeedView, IdList, NotificationList, PostView, UserList, UserRow};

/// Whether the caller should keep reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Output(#[from] anyhow::Error),
}

pub struct Session<'a> {
    network: SocialNetwork,
    output: &'a OutputManager,
}

impl<'a> Session<'a> {
    pub fn new(network: SocialNetwork, output: &'a OutputManager) -> Self {
        Self { network, output }
    }

    pub fn output(&self) -> &'a OutputManager {
        self.output
    }

    pub fn network(&self) -> &SocialNetwork {
        &self.network
    }

    /// Parse and execute one line.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, LineError> {
        match parse_line(line)? {
            Parsed::Empty => Ok(Flow::Continue),
            Parsed::Help(text) => {
                if !self.output.options.quiet {
                    println!("{}", text.trim_end());
                }
                Ok(Flow::Continue)
            }
            Parsed::Command(command) => self.execute(command),
        }
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Flow, LineError> {
        let output = self.output;
        let network = &mut self.network;

        match command {
            ShellCommand::AddUser { id, name, bio } => {
                let user = network.add_user(id, name, bio)?;
                output.success(&format!("Added user {} ({})", user.id(), user.display_name()));
            }
            ShellCommand::EditUser { id, name, bio } => {
                let user = network.update_profile(id, name, bio)?;
                output.success(&format!("Updated user {} ({})", user.id(), user.display_name()));
            }
            ShellCommand::RemoveUser { id } => {
                let removed = network.remove_user(id)?;
                output.success(&format!("Removed user {id} ({})", removed.display_name()));
                output.verbose(&format!(
                    "dropped {} friendships and {} posts",
                    removed.friends().len(),
                    removed.posts().len()
                ));
            }
            ShellCommand::Users => {
                let rows = network.users().map(UserRow::from).collect();
                output.display(&UserList(rows))?;
            }
            ShellCommand::ShowUser { id } => {
                let user = network.user(id)?;
                output.heading(&format!("User {id}"));
                output.key_value("name", user.display_name());
                output.key_value("bio", user.bio());
                output.key_value("friends", &user.friends().len().to_string());
                output.key_value("posts", &user.posts().len().to_string());
                for post in user.posts().iter() {
                    output.bullet(&format!("{} {}", post.id(), post.body()));
                }
            }
            ShellCommand::Befriend { a, b } => {
                if network.add_friendship(a, b)? {
                    output.success(&format!("Users {a} and {b} are now friends"));
                } else {
                    output.info(&format!("Users {a} and {b} were already friends"));
                }
            }
            ShellCommand::Unfriend { a, b } => {
                if network.remove_friendship(a, b)? {
                    output.success(&format!("Users {a} and {b} are no longer friends"));
                } else {
                    output.warning(&format!("Users {a} and {b} were not friends"));
                }
            }
            ShellCommand::AreFriends { a, b } => {
                let answer = if network.are_friends(a, b)? { "yes" } else { "no" };
                output.info(answer);
            }
            ShellCommand::Friends { id } => {
                output.display(&IdList {
                    title: format!("Friends of {id}"),
                    ids: network.friends_of(id)?,
                })?;
            }
            ShellCommand::Mutual { a, b } => {
                output.display(&IdList {
                    title: format!("Mutual friends of {a} and {b}"),
                    ids: network.mutual_friends(a, b)?,
                })?;
            }
            ShellCommand::Post { author, body } => {
                let post = network.publish_post(author, join_words(&body))?;
                output.success(&format!("Created post {post}"));
            }
            ShellCommand::Comment { owner, post, text } => {
                let comment = network.add_comment_to_post(owner, post, join_words(&text))?;
                output.success(&format!("Added comment {} to post {owner}/{post}", comment.id()));
            }
            ShellCommand::Reply { owner, comment, text } => {
                let reply = network.add_reply_to_comment(owner, comment, join_words(&text))?;
                output.success(&format!("Added reply {} to comment {comment}", reply.id()));
            }
            ShellCommand::ShowPost { owner, post } => {
                output.display(&PostView::from(network.get_post(owner, post)?))?;
            }
            ShellCommand::Share { user, author, post } => {
                network.add_to_feed(user, PostRef::new(author, post))?;
                output.success(&format!("Shared post {author}/{post} to user {user}"));
            }
            ShellCommand::Feed { user } => {
                let entries = network.render_feed(user)?.collect();
                output.display(&FeedView { user, entries })?;
            }
            ShellCommand::Notify { user, text } => {
                network.add_notification(user, join_words(&text))?;
                output.success(&format!("Notified user {user}"));
            }
            ShellCommand::Notifications { user } => {
                let notifications = network.view_notifications(user)?.map(str::to_string).collect();
                output.display(&NotificationList { user, notifications })?;
            }
            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}
