use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::warn;

use crate::model::{Message, MessageRole};
use crate::model_gateway::CompletionBackend;
use crate::session::ChatSession;

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Clear,
    History,
    ShowModel,
    SetModel(&'a str),
    Prompt(&'a str),
}

fn parse_command(input: &str) -> Option<Command<'_>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
        return Some(Command::Quit);
    }
    if input.eq_ignore_ascii_case("/clear") || input.eq_ignore_ascii_case("/reset") {
        return Some(Command::Clear);
    }
    if input.eq_ignore_ascii_case("/history") {
        return Some(Command::History);
    }
    if let Some(rest) = input.strip_prefix("/model") {
        if rest.is_empty() {
            return Some(Command::ShowModel);
        }
        if rest.starts_with(char::is_whitespace) {
            return Some(Command::SetModel(rest.trim()));
        }
    }
    Some(Command::Prompt(input))
}

fn speaker(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "you",
        MessageRole::Assistant => "assistant",
        MessageRole::System => "system",
    }
}

pub async fn run_repl<B>(session: &mut ChatSession<B>) -> Result<()>
where
    B: CompletionBackend,
{
    println!("routerchat");
    println!("model: {}", session.model());
    println!(
        "type a message, '/model <id>' to switch models, '/history' to show the conversation, \
         '/clear' to start over, or 'exit' to quit"
    );

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = io::stdin()
            .read_line(&mut input)
            .context("Failed to read stdin")?;
        if read == 0 {
            break;
        }

        let Some(command) = parse_command(&input) else {
            continue;
        };
        match command {
            Command::Quit => break,
            Command::Clear => {
                session.clear();
                println!("conversation cleared\n");
            }
            Command::History => print_history(session.history()),
            Command::ShowModel => println!("model: {}\n", session.model()),
            Command::SetModel(model) => {
                session.set_model(model);
                println!("model set to {}\n", session.model());
            }
            Command::Prompt(prompt) => {
                eprintln!("thinking...");
                match session.submit(prompt).await {
                    Ok(reply) => {
                        println!("{}: {}\n", speaker(MessageRole::Assistant), reply.trim())
                    }
                    Err(err) if err.is_recoverable() => {
                        warn!(kind = err.kind(), error = %err, "turn failed");
                        println!("[{} error] {}\n", err.kind(), err);
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }

    Ok(())
}

fn print_history(history: &[Message]) {
    let turns = history.get(1..).unwrap_or_default();
    if turns.is_empty() {
        println!("(no messages yet)\n");
        return;
    }

    for msg in turns {
        println!("{}: {}", speaker(msg.role), msg.content);
    }
    println!();
}
