//! Console front-end: ask one question, or chat interactively.

use std::sync::Arc;

use anyhow::{Result, bail};
use askai_backend::{
    config::Config,
    services::{
        gemini::GeminiClient,
        relay::{Relay, RelayError},
        session::GeminiSession,
    },
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "askai", version, about = "Ask a hosted Gemini model a question")]
struct Cli {
    /// Question to send
    question: Option<String>,

    /// Interactive session with a running chat history
    #[arg(long, conflicts_with = "question")]
    chat: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = GeminiClient::new(&config.api_key, &config.model, &config.api_base);
    let relay = Relay::new(Arc::new(
        GeminiSession::new(client).with_max_turns(config.max_turns),
    ));

    if cli.chat {
        return chat(&relay).await;
    }

    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };
    let answer = relay.ask(&question).await?;
    println!("{answer}");
    Ok(())
}

async fn chat(relay: &Relay) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"Input: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/history" => {
                println!("Chat History:");
                for entry in relay.history().entries().await {
                    println!("{}: {}", entry.role, entry.text);
                }
            }
            "/reset" => {
                relay.reset().await;
                println!("History cleared.");
            }
            question => match relay.ask(question).await {
                Ok(answer) => println!("Response:\n{answer}\n"),
                Err(RelayError::EmptyQuestion) => continue,
                Err(e) => eprintln!("error: {e}"),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_question_parses() {
        let cli = Cli::try_parse_from(["askai", "Capital of France?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("Capital of France?"));
        assert!(!cli.chat);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn chat_mode_and_verbosity_parse() {
        let cli = Cli::try_parse_from(["askai", "--chat", "-vv"]).unwrap();
        assert!(cli.chat);
        assert!(cli.question.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn question_and_chat_conflict() {
        let err = Cli::try_parse_from(["askai", "--chat", "hello"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
