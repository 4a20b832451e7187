use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use scholia_client::{ClientConfig, HttpSearchClient};
use scholia_core::dispatch::{QueryDispatcher, RejectReason, Submission};
use scholia_core::session::{Message, MessageRole, SessionManager};

#[derive(Parser)]
#[command(name = "scholia")]
#[command(about = "Scholia - textbook question answering client", long_about = None)]
struct Cli {
    /// Retrieval backend base URL (overrides config file)
    #[arg(long)]
    backend_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::load()?;
    if let Some(backend_url) = cli.backend_url {
        config.backend_url = backend_url;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    let backend = HttpSearchClient::new(&config)?;
    if !backend.health().await {
        eprintln!(
            "{}",
            format!(
                "warning: search backend at {} is not responding; queries will fail until it is reachable",
                config.backend_url
            )
            .yellow()
        );
    }

    let sessions = Arc::new(SessionManager::new());
    sessions.create_session().await;
    let dispatcher = QueryDispatcher::new(backend.clone(), sessions.clone());

    println!("{}", "Scholia - ask about your textbooks".bold());
    println!("Type a question, or :help for commands.\n");

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("scholia> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                if let Some(command) = line.strip_prefix(':') {
                    if run_command(command, &sessions, &backend).await? {
                        break;
                    }
                } else {
                    run_query(&dispatcher, &sessions, &line).await?;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Dispatches one query against the active session and prints the reply.
async fn run_query(
    dispatcher: &QueryDispatcher<HttpSearchClient>,
    sessions: &Arc<SessionManager>,
    query: &str,
) -> Result<()> {
    let session_id = match sessions.active_session_id().await {
        Some(id) => id,
        None => sessions.create_session().await,
    };

    // The REPL is line-oriented, so the cycle is awaited here and the
    // indicator stands in for an in-flight marker.
    println!("{}", "Searching...".dimmed());
    match dispatcher.submit(&session_id, query).await? {
        Submission::Completed { session_id } => {
            let messages = sessions.snapshot(&session_id).await?;
            if let Some(reply) = messages.last() {
                print_message(reply);
            }
        }
        Submission::Discarded { .. } => {}
        Submission::Rejected(RejectReason::InFlight) => {
            println!("{}", "A query is already in flight for this session.".yellow());
        }
        Submission::Rejected(RejectReason::EmptyQuery) => {}
    }
    Ok(())
}

/// Handles a `:command` line. Returns true when the REPL should exit.
async fn run_command(
    command: &str,
    sessions: &Arc<SessionManager>,
    backend: &HttpSearchClient,
) -> Result<bool> {
    let mut parts = command.splitn(2, ' ');
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "quit" | "q" => return Ok(true),
        "help" => print_help(),
        "new" => {
            let session_id = sessions.create_session().await;
            println!("Started session {}", session_id.cyan());
        }
        "sessions" => {
            let active = sessions.active_session_id().await;
            for summary in sessions.list_summaries().await {
                let marker = if active.as_deref() == Some(summary.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {}  [{} {}, {}]",
                    marker,
                    summary.id.cyan(),
                    summary.title.bold(),
                    summary.query_count,
                    if summary.query_count == 1 { "query" } else { "queries" },
                    summary.timestamp_label.dimmed(),
                );
                println!("     {}", summary.last_query_preview.dimmed());
            }
        }
        "switch" => {
            if arg.is_empty() {
                println!("usage: :switch <session-id>");
            } else {
                match sessions.switch_session(arg).await {
                    Ok(()) => println!("Switched to session {}", arg.cyan()),
                    Err(err) => println!("{}", err.to_string().red()),
                }
            }
        }
        "history" => {
            if let Some(session_id) = sessions.active_session_id().await {
                for message in sessions.snapshot(&session_id).await? {
                    print_message(&message);
                }
            }
        }
        "clear" => {
            if let Some(session_id) = sessions.active_session_id().await {
                sessions.clear_conversation(&session_id).await?;
                println!("Conversation cleared.");
            }
        }
        "collections" => match backend.list_collections().await {
            Ok(collections) => {
                println!("Available collections: {}", collections.join(", "));
            }
            Err(err) => println!("{}", err.to_string().red()),
        },
        other => println!("Unknown command :{other} (try :help)"),
    }
    Ok(false)
}

fn print_message(message: &Message) {
    match message.role {
        MessageRole::User => {
            println!("{} {}", "you:".green().bold(), message.content);
        }
        MessageRole::Assistant => {
            println!("{} {}", "scholia:".blue().bold(), message.content);
            if let Some(provenance) = &message.provenance {
                let title = provenance.title.as_deref().unwrap_or("unknown source");
                match &provenance.subject_collection {
                    Some(collection) => {
                        println!("  {} {title} ({collection})", "source:".dimmed())
                    }
                    None => println!("  {} {title}", "source:".dimmed()),
                }
            }
            if let Some(score) = message.relevance_score() {
                println!("  {} {score:.3}", "relevance:".dimmed());
            }
            if let Some(collections) = &message.searched_collections {
                println!("  {} {}", "searched:".dimmed(), collections.join(", "));
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :new              start a new session");
    println!("  :sessions         list sessions (* marks the active one)");
    println!("  :switch <id>      switch the active session");
    println!("  :history          show the active session's conversation");
    println!("  :clear            clear the active session's conversation");
    println!("  :collections      list the backend's subject collections");
    println!("  :quit             exit");
    println!("Anything else is sent to the backend as a question.");
}
