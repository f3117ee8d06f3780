//! Terminal rendering of the chat, the session list and the analysis panel.
//!
//! Everything here builds a `String` so the REPL decides when to print.

use colored::{ColoredString, Colorize};
use honeypot_core::display::{ConfidenceTier, Severity, confidence_percent};
use honeypot_core::session::{ChatMessage, ConversationState, MessageRole, SessionSummary};

const BAR_WIDTH: usize = 20;

const EXAMPLE_OPENERS: [&str; 2] = [
    "Hello, I am calling from tech support. Your computer has a virus.",
    "I accidentally sent you money, please refund via UPI.",
];

pub fn welcome() -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Welcome to AI Honeypot".bright_magenta().bold()));
    out.push_str(&format!(
        "{}\n",
        "Start chatting to bait the potential scammer. The AI analyzes the conversation and extracts actionable intel."
            .bright_black()
    ));
    out.push_str(&format!("{}\n", "For example:".bright_black()));
    for opener in EXAMPLE_OPENERS {
        out.push_str(&format!("  \"{}\"\n", opener).bright_black().to_string());
    }
    out
}

pub fn help() -> String {
    let rows = [
        ("<text>", "send a message to the scammer"),
        ("/new", "start a new conversation"),
        ("/sessions", "list recent chats"),
        ("/load <n|id>", "open a chat from the list"),
        ("/delete <n|id>", "delete a chat"),
        ("/intel", "show the live analysis"),
        ("/refresh", "re-fetch the chat list"),
        ("/sidebar", "toggle automatic chat list display"),
        ("/quit", "exit"),
    ];
    rows.iter()
        .map(|(cmd, what)| format!("  {:<16} {}\n", cmd.bright_cyan(), what))
        .collect()
}

pub fn message(message: &ChatMessage) -> String {
    let (label, body): (ColoredString, fn(&str) -> ColoredString) = match message.role {
        MessageRole::User => ("You".green().bold(), |line| line.green()),
        MessageRole::Assistant => ("Honeypot".bright_blue().bold(), |line| line.bright_blue()),
    };

    let mut out = format!("[{}]\n", label);
    for line in message.content.lines() {
        out.push_str(&format!("{}\n", body(line)));
    }
    out
}

/// The whole conversation, or the welcome text when it has no messages.
pub fn transcript(conversation: &ConversationState) -> String {
    if conversation.messages.is_empty() {
        return welcome();
    }
    conversation
        .messages
        .iter()
        .map(|m| format!("{}\n", message(m)))
        .collect()
}

pub fn typing_indicator() -> String {
    "Honeypot is typing...".bright_black().italic().to_string()
}

pub fn session_list(sessions: &[SessionSummary], active_id: Option<&str>) -> String {
    let mut out = format!("{}\n", "Recent Chats".bright_magenta().bold());
    if sessions.is_empty() {
        out.push_str(&format!("  {}\n", "No previous chats".bright_black()));
        return out;
    }

    for (index, session) in sessions.iter().enumerate() {
        let marker = if active_id == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        let caption = if session.is_scam {
            session.status_caption().red()
        } else {
            session.status_caption().bright_black()
        };
        out.push_str(&format!(
            "{} {:>2}. {}  {}\n",
            marker,
            index + 1,
            session.title,
            caption
        ));
    }
    out
}

/// The analysis panel: status card, confidence bar, extracted artifacts.
pub fn intel(conversation: &ConversationState) -> String {
    let mut out = format!("{}\n", "Live Analysis".bright_magenta().bold());

    let status = format!(
        "{} {}",
        conversation.status_icon().glyph(),
        conversation.scam_status.label()
    );
    let status = match conversation.severity() {
        Severity::High => status.red().bold(),
        Severity::Medium => status.yellow().bold(),
        Severity::Low => status.green().bold(),
    };
    out.push_str(&format!("  Alert Status: {}\n", status));
    out.push_str(&format!(
        "  Confidence:   {} {}\n",
        confidence_bar(conversation.confidence, conversation.confidence_tier()),
        confidence_percent(conversation.confidence)
    ));

    out.push_str(&format!("\n{}\n", "Extracted Artifacts".bright_magenta().bold()));
    let extracted = &conversation.extracted;
    if extracted.is_empty() {
        out.push_str(&format!("  {}\n", "No artifacts extracted yet".bright_black()));
        return out;
    }

    if let Some(scam_type) = extracted.scam_type_label() {
        out.push_str(&format!("  Scam Classification: {}\n", scam_type.red()));
    }
    for (label, values) in extracted.artifact_groups() {
        if values.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}\n", label.bright_black()));
        for value in values {
            out.push_str(&format!("    - {}\n", value));
        }
    }
    out
}

fn confidence_bar(confidence: f64, tier: ConfidenceTier) -> String {
    let filled = ((confidence.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let fill = "#".repeat(filled);
    let fill = match tier {
        ConfidenceTier::Danger => fill.red(),
        ConfidenceTier::Warning => fill.yellow(),
        ConfidenceTier::Safe => fill.green(),
    };
    format!("[{}{}]", fill, ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeypot_core::session::{ExtractedData, ScamStatus};

    fn plain() {
        colored::control::set_override(false);
    }

    fn summary(id: &str, title: &str, is_scam: bool) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            title: title.to_string(),
            is_scam,
            confidence: 0.0,
        }
    }

    #[test]
    fn test_empty_transcript_shows_welcome() {
        plain();
        let out = transcript(&ConversationState::empty());
        assert!(out.contains("Welcome to AI Honeypot"));
        assert!(out.contains(EXAMPLE_OPENERS[1]));
    }

    #[test]
    fn test_transcript_lists_messages_in_order() {
        plain();
        let mut conversation = ConversationState::empty();
        conversation.messages.push(ChatMessage::user("Hello"));
        conversation.messages.push(ChatMessage::assistant("who is this"));

        let out = transcript(&conversation);
        let user_at = out.find("Hello").unwrap();
        let reply_at = out.find("who is this").unwrap();
        assert!(user_at < reply_at);
        assert!(!out.contains("Welcome"));
    }

    #[test]
    fn test_session_list_marks_active_and_captions() {
        plain();
        let sessions = vec![summary("s2", "Refund call", true), summary("s1", "Hi", false)];
        let out = session_list(&sessions, Some("s1"));

        assert!(out.contains(" 1. Refund call  Scam Detected"));
        assert!(out.contains("*  2. Hi  Analyzing..."));
    }

    #[test]
    fn test_empty_session_list() {
        plain();
        assert!(session_list(&[], None).contains("No previous chats"));
    }

    #[test]
    fn test_intel_panel() {
        plain();
        let mut conversation = ConversationState::empty();
        conversation.messages.push(ChatMessage::user("pay"));
        conversation.scam_status = ScamStatus::ScamConfirmed;
        conversation.confidence = 0.92;
        conversation.extracted = ExtractedData {
            upi: Some(vec!["x@upi".to_string()]),
            phones: Some(vec![]),
            ..Default::default()
        };

        let out = intel(&conversation);
        assert!(out.contains("[!!] SCAM CONFIRMED"));
        assert!(out.contains("92.0%"));
        assert!(out.contains("UPI IDs"));
        assert!(out.contains("x@upi"));
        assert!(!out.contains("Phone Numbers"));
        assert!(!out.contains("Scam Classification"));
    }

    #[test]
    fn test_intel_without_artifacts() {
        plain();
        let out = intel(&ConversationState::empty());
        assert!(out.contains("[?] ONGOING"));
        assert!(out.contains("No artifacts extracted yet"));
    }

    #[test]
    fn test_confidence_bar_fill() {
        plain();
        assert_eq!(
            confidence_bar(0.5, ConfidenceTier::Warning),
            format!("[{}{}]", "#".repeat(10), ".".repeat(10))
        );
        assert_eq!(
            confidence_bar(1.4, ConfidenceTier::Danger),
            format!("[{}]", "#".repeat(20))
        );
    }
}
