//! Appends new input/response training pairs to the corpus file.

use anyhow::Result;
use parley::engine::corpus;
use parley::Sample;
use std::io::{self, BufRead, Write};

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/corpus.json".to_string());

    loop {
        let Some(input) = prompt("Input: ")? else { break };
        let Some(response) = prompt("Response: ")? else { break };
        if input.is_empty() || response.is_empty() {
            continue;
        }
        corpus::append(&path, &Sample { input, response })?;
    }
    Ok(())
}
