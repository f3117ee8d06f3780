mod command;
mod helper;
mod render;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

use honeypot_application::{
    DeleteOutcome, LoadOutcome, RefreshOutcome, SendOutcome, SessionSynchronizer, Viewport,
};
use honeypot_core::config::ClientConfig;
use honeypot_infrastructure::{ConfigService, HttpSessionStore};

use command::{Command, resolve_session};
use helper::CliHelper;

const LOG_ENV: &str = "HONEYPOT_LOG";
const DEFAULT_LOG_FILTER: &str = "error";

#[derive(Parser, Debug)]
#[command(name = "honeypot")]
#[command(version)]
#[command(about = "Terminal client for the AI scam-baiting honeypot", long_about = None)]
struct Cli {
    /// Honeypot service URL (overrides config file and HONEYPOT_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file to use instead of ~/.config/honeypot/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// A finished send, handed from the request task to the printer.
struct ReplyEvent {
    text: String,
    outcome: SendOutcome,
}

/// Filter directives: `HONEYPOT_LOG`, then `RUST_LOG`, then errors only.
/// Failures the REPL already reports are logged below that level.
fn log_directives<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let directives = log_directives(|key| std::env::var(key).ok());
    let filter =
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new_default()?,
    };
    let mut config = service.load()?;

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
        config = config.validated()?;
    }
    Ok(config)
}

fn update_viewport(sync: &SessionSynchronizer, narrow_below: u16) {
    if let Ok((columns, _rows)) = crossterm::terminal::size() {
        sync.set_viewport(Viewport::from_width(columns, narrow_below));
    }
}

fn print_sessions(sync: &SessionSynchronizer) {
    let active = sync.active_session_id();
    print!("{}", render::session_list(&sync.sessions(), active.as_deref()));
}

fn print_reply(sync: &SessionSynchronizer, event: ReplyEvent) {
    match event.outcome {
        SendOutcome::Replied(reply) => print!("{}", render::message(&reply)),
        SendOutcome::Failed(e, reply) => {
            print!("{}", render::message(&reply));
            eprintln!("{}", format!("Send failed: {}", e).red());
        }
        SendOutcome::Stale => {
            println!(
                "{}",
                "A reply arrived for a conversation that is no longer open.".bright_black()
            );
        }
        SendOutcome::Busy => {
            sync.set_draft(event.text);
            println!(
                "{}",
                "Still waiting for the last reply. Your message was kept as a draft.".yellow()
            );
        }
        SendOutcome::Blank => {}
    }
}

/// Entry point for the honeypot chat REPL.
///
/// Sends run in background tasks so the prompt stays usable while a reply
/// is pending. Everything else is awaited in the loop.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    // ===== Backend Initialization =====
    let config = load_config(&cli)?;
    let store = Arc::new(HttpSessionStore::new(&config.api)?);
    tracing::info!("[honeypot] using service at {}", store.base_url());

    let sync = SessionSynchronizer::new(store);
    let narrow_below = config.ui.narrow_width;
    update_viewport(&sync, narrow_below);

    // Channel for finished sends
    let (reply_tx, mut reply_rx) = mpsc::channel::<ReplyEvent>(16);

    let printer = sync.clone();
    let response_handler = tokio::spawn(async move {
        while let Some(event) = reply_rx.recv().await {
            print_reply(&printer, event);
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Honeypot Chat ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands, or '/quit' to exit.".bright_black());
    println!();

    match sync.refresh_sessions().await {
        RefreshOutcome::Refreshed(_) => {
            if sync.sidebar_open() {
                print_sessions(&sync);
                println!();
            }
        }
        RefreshOutcome::Failed(e) => {
            eprintln!("{}", format!("Could not fetch previous chats: {}", e).yellow());
        }
    }
    print!("{}", render::transcript(&sync.conversation()));

    // ===== Main REPL Loop =====
    loop {
        update_viewport(&sync, narrow_below);

        let draft = sync.draft();
        let readline = if draft.is_empty() {
            rl.readline(">> ")
        } else {
            rl.readline_with_initial(">> ", (draft.as_str(), ""))
        };

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        match Command::parse(&line) {
            Command::Send(text) => {
                if sync.is_pending() {
                    sync.set_draft(text);
                    println!(
                        "{}",
                        "Still waiting for the last reply. Your message was kept as a draft."
                            .yellow()
                    );
                    continue;
                }

                println!("{}", render::typing_indicator());

                let tx = reply_tx.clone();
                let sender = sync.clone();
                tokio::spawn(async move {
                    let outcome = sender.send_message(&text).await;
                    let _ = tx.send(ReplyEvent { text, outcome }).await;
                });
            }
            Command::New => {
                sync.start_new_conversation();
                print!("{}", render::transcript(&sync.conversation()));
            }
            Command::Sessions => {
                sync.set_sidebar_open(true);
                print_sessions(&sync);
            }
            Command::Load(target) => {
                let id = resolve_session(&sync.sessions(), &target);
                match sync.load_session(&id).await {
                    LoadOutcome::Loaded => {
                        print!("{}", render::transcript(&sync.conversation()));
                    }
                    LoadOutcome::NotFound => {
                        println!("{}", format!("Session '{}' not found.", id).yellow());
                    }
                    LoadOutcome::Stale => {}
                    LoadOutcome::Failed(e) => {
                        eprintln!("{}", format!("Failed to load session: {}", e).red());
                    }
                }
            }
            Command::Delete(target) => {
                let id = resolve_session(&sync.sessions(), &target);
                let outcome = sync.delete_session(&id).await;
                match &outcome {
                    DeleteOutcome::Deleted { .. } => {
                        println!("{}", "Chat deleted.".bright_black());
                    }
                    DeleteOutcome::Reconciled { error, .. } => {
                        eprintln!(
                            "{}",
                            format!("Delete failed ({}); chat list re-fetched.", error).red()
                        );
                    }
                }
                if outcome.was_active() {
                    print!("{}", render::transcript(&sync.conversation()));
                }
                if sync.sidebar_open() {
                    print_sessions(&sync);
                }
            }
            Command::Intel => {
                print!("{}", render::intel(&sync.conversation()));
            }
            Command::Refresh => match sync.refresh_sessions().await {
                RefreshOutcome::Refreshed(_) => print_sessions(&sync),
                RefreshOutcome::Failed(e) => {
                    eprintln!("{}", format!("Could not fetch chats: {}", e).red());
                }
            },
            Command::Sidebar => {
                let open = !sync.sidebar_open();
                sync.set_sidebar_open(open);
                if open {
                    print_sessions(&sync);
                } else {
                    println!("{}", "Chat list hidden. '/sessions' shows it again.".bright_black());
                }
            }
            Command::Help => print!("{}", render::help()),
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Invalid(message) => {
                println!("{}", message.yellow());
                println!("{}", "Type '/help' for commands.".bright_black());
            }
        }
    }

    // Drop the channel so the printer finishes; give pending sends a moment.
    drop(reply_tx);
    let _ = timeout(Duration::from_secs(2), response_handler).await;

    Ok(())
}
