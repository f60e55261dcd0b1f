use std::env;
use std::io::{self, BufRead, Write};

use casecrux::chat::{ChatClient, ChatSession, RenderEvent};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/kbquery";

/// Terminal chat client for the knowledge-base assistant. One question per
/// turn; each submission blocks until the round trip completes or fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let endpoint = env::args()
        .nth(1)
        .or_else(|| env::var("CASECRUX_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let client = ChatClient::new(endpoint.clone());
    let mut session = ChatSession::new();

    println!("CaseCrux Legal Knowledge Assistant");
    println!("Endpoint: {}", endpoint);
    println!(
        "Session {} started at {}",
        session.id,
        session.started_at.to_rfc3339()
    );
    println!("Type a question, /clear to reset the session, /quit to exit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                println!("Chat history cleared (session {}).", session.id);
                continue;
            }
            prompt => {
                let events = client.ask(&mut session, prompt).await;
                render(&events);
            }
        }
    }

    Ok(())
}

fn render(events: &[RenderEvent]) {
    for event in events {
        match event {
            RenderEvent::Answer(text) => println!("assistant> {}", text),
            RenderEvent::Source { context, doc_url } => {
                println!("Context used: {}", context);
                println!("Source Document: {}", doc_url);
            }
            RenderEvent::NoSource => println!("No context/source provided."),
            RenderEvent::UpstreamError(message) => println!("Error: {}", message),
            RenderEvent::CallFailed(message) => println!("API call failed: {}", message),
        }
    }
}
