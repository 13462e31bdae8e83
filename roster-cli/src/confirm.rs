use std::io::{self, BufRead, Write};

use tracing::warn;

/// Ask a yes/no question on the terminal. Anything but an explicit yes declines, and so
/// does a terminal that can't be written to or read from.
pub fn confirm(prompt: &str) -> bool {
    ask(prompt, io::stdin().lock(), io::stderr()).unwrap_or_else(|err| {
        warn!("Failed to read confirmation: {err}");
        false
    })
}

fn ask(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
