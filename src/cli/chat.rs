// src/cli/chat.rs — Interactive REPL

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::infra::config::Config;
use crate::session::{delay, ChatSession, SendOutcome};
use crate::analytics::AnalyticsLog;
use crate::storage::{JsonFileStore, KeyValueStore};

/// Run the interactive chat REPL.
pub async fn run_chat(config: &Config, no_delay: bool, ephemeral: bool) -> anyhow::Result<()> {
    let catalog = Arc::new(Catalog::new()?);
    let responder = super::build_responder(config, catalog);

    let store: Option<Arc<dyn KeyValueStore>> = if config.storage.persist && !ephemeral {
        match config.data_dir() {
            Some(dir) => Some(Arc::new(JsonFileStore::new(dir)?)),
            None => None,
        }
    } else {
        None
    };

    let delay: delay::DelayFn = if config.chat.typing_delay && !no_delay {
        Arc::new(delay::natural_typing_delay)
    } else {
        Arc::new(delay::no_delay)
    };

    let analytics = Arc::new(AnalyticsLog::new(store.clone()));
    let session = ChatSession::new(responder, analytics, store, delay);

    eprintln!(
        "PageTurner Books assistant v{} | session {}\n",
        env!("CARGO_PKG_VERSION"),
        session.session_id(),
    );
    if !session.messages().is_empty() {
        eprintln!(
            "  (resumed conversation with {} earlier message(s); /new for a fresh start)\n",
            session.messages().len()
        );
    }

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        if trimmed.starts_with('/') {
            if let Err(e) = handle_slash_command(trimmed, &session).await {
                eprintln!("[error] {e}");
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        match session.send(trimmed).await {
            Ok(SendOutcome::Replied(message)) => {
                println!("{}\n", message.content);
            }
            Ok(SendOutcome::Ignored) => {}
            Err(e) => {
                eprintln!("[error] {e} — type /retry to try again");
            }
        }
    }

    let stats = session.stats();
    eprintln!(
        "\nSession total: {} message(s), {} question(s), {} topic(s), {} min",
        stats.total_messages,
        stats.questions_asked,
        stats.topics_discussed,
        stats.session_duration_minutes,
    );
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

async fn handle_slash_command(input: &str, session: &ChatSession) -> anyhow::Result<()> {
    match input {
        "/stats" => {
            let stats = session.stats();
            eprintln!("  Session: {}", session.session_id());
            eprintln!(
                "  Messages: {} total ({} you, {} assistant)",
                stats.total_messages, stats.user_messages, stats.bot_messages
            );
            eprintln!("  Questions asked: {}", stats.questions_asked);
            eprintln!("  Topics discussed: {}", stats.topics_discussed);
            eprintln!("  Duration: {} min", stats.session_duration_minutes);
        }

        "/context" => {
            let ctx = session.context();
            eprintln!(
                "  Last intent: {}",
                ctx.last_intent.map(|i| i.to_string()).unwrap_or_else(|| "-".into())
            );
            eprintln!(
                "  Last book: {}",
                ctx.last_book_mentioned.as_deref().unwrap_or("-")
            );
            eprintln!(
                "  Last genre: {}",
                ctx.last_genre_viewed.map(|g| g.name().to_string()).unwrap_or_else(|| "-".into())
            );
            eprintln!(
                "  Last order: {}",
                ctx.last_order_checked.as_deref().unwrap_or("-")
            );
            eprintln!(
                "  Favorite genre: {}",
                ctx.preferences.favorite_genre.map(|g| g.name().to_string()).unwrap_or_else(|| "-".into())
            );
            eprintln!(
                "  Favorite author: {}",
                ctx.preferences.favorite_author.as_deref().unwrap_or("-")
            );
        }

        "/clear" => {
            session.clear()?;
            eprintln!("  Conversation cleared.");
        }

        "/new" => {
            let id = session.new_session()?;
            eprintln!("  New session started: {id}");
        }

        "/retry" => match session.retry_last().await? {
            SendOutcome::Replied(message) => println!("{}\n", message.content),
            SendOutcome::Ignored => eprintln!("  Nothing to retry."),
        },

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /stats             Show session statistics");
            eprintln!("  /context           Show what the assistant remembers");
            eprintln!("  /clear             Clear the conversation (same session)");
            eprintln!("  /new               Start a fresh session");
            eprintln!("  /retry             Re-send your last message");
            eprintln!("  /help              Show this help");
            eprintln!("  /quit, quit, exit  End session");
        }

        _ => {
            eprintln!("Unknown command: {input}. Type /help for commands.");
        }
    }
    Ok(())
}
