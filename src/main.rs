//! Read-print loop over the engine: one utterance in, one response out.

use anyhow::{Context as _, Result};
use parley::context::ContextValue;
use parley::engine::corpus;
use parley::{ContextStore, Engine, EngineConfig, EngineError};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::warn;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let corpus_path = args.next().unwrap_or_else(|| "data/corpus.json".to_string());
    let config_path = args.next().unwrap_or_else(|| "parley.toml".to_string());
    let context_path = args.next().unwrap_or_else(|| "data/context.json".to_string());

    let config = if Path::new(&config_path).exists() {
        EngineConfig::load(&config_path)
            .with_context(|| format!("loading config from {config_path}"))?
    } else {
        EngineConfig::default()
    };
    let samples = corpus::load(&corpus_path)
        .with_context(|| format!("loading corpus from {corpus_path}"))?;
    let store = ContextStore::open(&context_path)
        .with_context(|| format!("opening context at {context_path}"))?;
    let mut engine = Engine::new(config, samples, store)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("You: ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let response = match engine.process_turn(input) {
            Ok(turn) => turn.response,
            Err(EngineError::Persist { response, source }) => {
                warn!(%source, "context was not durably saved");
                response
            }
            Err(err) => return Err(err.into()),
        };

        let bot_name = engine
            .context()
            .get("botname")
            .and_then(ContextValue::as_scalar)
            .unwrap_or("Bot");
        println!("{bot_name}: {response}");
    }
    Ok(())
}
