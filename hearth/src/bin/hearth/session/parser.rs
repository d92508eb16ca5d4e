//! Line parsing for shell input and command scripts.

use clap::{Parser, Subcommand};
use hearth::{CommentId, PostId, UserId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// 1-based char column of the opening quote.
    #[error("unterminated quote starting at column {0}")]
    UnterminatedQuote(usize),
}

/// Split a line into words. Double quotes group words; inside quotes `\"`
/// and `\\` are escapes. Returns no words for blank lines and `#` comments.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Vec::new());
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    // columns count chars, not bytes
    let mut chars = line.chars().enumerate();

    while let Some((column, ch)) = chars.next() {
        match ch {
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.next() {
                            Some((_, escaped @ ('"' | '\\'))) => current.push(escaped),
                            Some((_, other)) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(TokenizeError::UnterminatedQuote(column + 1)),
                        },
                        Some((_, other)) => current.push(other),
                        None => return Err(TokenizeError::UnterminatedQuote(column + 1)),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum ShellCommand {
    /// Register a user
    AddUser {
        id: UserId,
        name: String,
        /// Profile text, may be empty
        #[arg(default_value = "")]
        bio: String,
    },

    /// Change a user's display name or bio
    EditUser {
        id: UserId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Remove a user with their friendships and feed entries
    RemoveUser { id: UserId },

    /// List all users in registration order
    Users,

    /// Show one user's profile
    ShowUser { id: UserId },

    /// Make two users friends
    Befriend { a: UserId, b: UserId },

    /// End a friendship
    Unfriend { a: UserId, b: UserId },

    /// Check whether two users are friends
    AreFriends { a: UserId, b: UserId },

    /// List a user's friends
    Friends { id: UserId },

    /// List the friends two users have in common
    Mutual { a: UserId, b: UserId },

    /// Create a post
    Post {
        author: UserId,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        body: Vec<String>,
    },

    /// Comment on a post
    Comment {
        owner: UserId,
        post: PostId,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Reply to a comment
    Reply {
        owner: UserId,
        comment: CommentId,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show a post with its comment thread
    ShowPost { owner: UserId, post: PostId },

    /// Put another user's post into a feed
    Share {
        user: UserId,
        author: UserId,
        post: PostId,
    },

    /// Show a user's feed, most recent first
    Feed { user: UserId },

    /// Send a notification to a user
    Notify {
        user: UserId,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show a user's notifications, most recent first
    Notifications { user: UserId },

    /// Leave the shell or stop the script
    #[command(alias = "quit")]
    Exit,
}

/// Outcome of parsing one line.
#[derive(Debug)]
pub enum Parsed {
    Empty,
    Command(ShellCommand),
    /// Help text requested with `help` or `--help`.
    Help(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error("{0}")]
    Usage(String),
}

pub fn parse_line(line: &str) -> Result<Parsed, ParseError> {
    let words = tokenize(line)?;
    if words.is_empty() {
        return Ok(Parsed::Empty);
    }

    match ShellLine::try_parse_from(words) {
        Ok(parsed) => Ok(Parsed::Command(parsed.command)),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp
            | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Parsed::Help(err.render().to_string()))
            }
            _ => Err(ParseError::Usage(err.render().to_string().trim_end().to_string())),
        },
    }
}

/// Rejoin trailing words of a free-text argument.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
