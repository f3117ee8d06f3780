//! REPL input parsing.

use honeypot_core::session::SessionSummary;

pub const COMMANDS: &[&str] = &[
    "/new", "/sessions", "/load", "/delete", "/intel", "/refresh", "/sidebar", "/help", "/quit",
    "/exit",
];

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: a message for the honeypot conversation.
    Send(String),
    New,
    Sessions,
    Load(String),
    Delete(String),
    Intel,
    Refresh,
    Sidebar,
    Help,
    Quit,
    /// A slash command we do not know, or one missing its argument.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            // Messages are sent as typed, surrounding whitespace included.
            return Self::Send(line.to_string());
        }

        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match (name, arg) {
            ("/new", _) => Self::New,
            ("/sessions", _) => Self::Sessions,
            ("/load", Some(target)) => Self::Load(target.to_string()),
            ("/delete", Some(target)) => Self::Delete(target.to_string()),
            ("/load" | "/delete", None) => {
                Self::Invalid(format!("{} needs a session number or id", name))
            }
            ("/intel", _) => Self::Intel,
            ("/refresh", _) => Self::Refresh,
            ("/sidebar", _) => Self::Sidebar,
            ("/help", _) => Self::Help,
            ("/quit" | "/exit", _) => Self::Quit,
            _ => Self::Invalid(format!("Unknown command: {}", name)),
        }
    }
}

/// Resolves a `/load` or `/delete` argument: a 1-based position in the
/// listed sessions, otherwise taken as a session id.
pub fn resolve_session(sessions: &[SessionSummary], target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| sessions.get(index))
        .map(|s| s.id.clone())
        .unwrap_or_else(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            title: id.to_string(),
            is_scam: false,
            confidence: 0.0,
        }
    }

    #[test]
    fn test_plain_text_is_sent() {
        assert_eq!(Command::parse("hello there"), Command::Send("hello there".to_string()));
        assert_eq!(Command::parse("   "), Command::Send("   ".to_string()));
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(Command::parse("/new"), Command::New);
        assert_eq!(Command::parse("  /load 2 "), Command::Load("2".to_string()));
        assert_eq!(Command::parse("/delete abc-123"), Command::Delete("abc-123".to_string()));
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert!(matches!(Command::parse("/load"), Command::Invalid(_)));
        assert!(matches!(Command::parse("/plan"), Command::Invalid(_)));
    }

    #[test]
    fn test_resolve_by_position_or_id() {
        let sessions = vec![summary("newest"), summary("older")];
        assert_eq!(resolve_session(&sessions, "1"), "newest");
        assert_eq!(resolve_session(&sessions, "2"), "older");
        assert_eq!(resolve_session(&sessions, "3"), "3");
        assert_eq!(resolve_session(&sessions, "0"), "0");
        assert_eq!(resolve_session(&sessions, "older"), "older");
    }
}
