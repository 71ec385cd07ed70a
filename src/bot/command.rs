//! Command token extraction.
//!
//! A message starting with `/` and at least one lowercase ASCII letter is a
//! command: everything up to the first space is the token, everything after
//! it the payload. Any other message is all payload.

/// Commands the bot recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Bind,
    Verify,
    Send,
    /// No command, or one the bot doesn't know; handled like [`Command::Send`].
    Default,
}

impl Command {
    pub fn from_token(token: &str) -> Self {
        match token {
            "/start" => Command::Start,
            "/bind" => Command::Bind,
            "/verify" => Command::Verify,
            "/send" => Command::Send,
            _ => Command::Default,
        }
    }
}

/// Split `text` into its command token and payload.
///
/// ```
/// use memobird_bot::bot::command::split_command;
///
/// assert_eq!(split_command("/bind ABC123"), ("/bind", "ABC123"));
/// assert_eq!(split_command("hello"), ("", "hello"));
/// ```
pub fn split_command(text: &str) -> (&str, &str) {
    if !is_command(text) {
        return ("", text);
    }
    match text.split_once(' ') {
        Some((cmd, payload)) => (cmd, payload),
        None => (text, ""),
    }
}

fn is_command(text: &str) -> bool {
    text.strip_prefix('/')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_lowercase())
}

/// Parse an inbound message into a command and its payload.
pub fn parse(text: &str) -> (Command, &str) {
    let (token, payload) = split_command(text);
    (Command::from_token(token), payload)
}
