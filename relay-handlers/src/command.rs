//! Bot command detection on raw message text.

/// Name of the session-initialization command.
pub const START_COMMAND: &str = "start";

/// Returns the command name when `text` starts with a bot command (`/name` or `/name@botname`).
///
/// Leading whitespace disqualifies the text, as does a bare `/`.
pub fn parse_command(text: &str) -> Option<&str> {
    let first = text.split(char::is_whitespace).next()?;
    let command = first.strip_prefix('/')?;
    let name = command.split('@').next().unwrap_or(command);
    (!name.is_empty()).then_some(name)
}
