//! Keyboard commands read from stdin while the dashboard runs.
//!
//! One command per line: `n`/`next`, `p`/`prev`, a page number, `t`/`theme` or
//! `q`/`quit`. Lines are parsed on a background thread and forwarded over a
//! `crossbeam_channel`.
use std::io::{self, BufRead};
use std::str::FromStr;
use std::thread;

use crossbeam_channel::{Receiver, unbounded};
use log::{debug, warn};
use rate_common::FeedError;

/// Command entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Next table page.
    Next,
    /// Previous table page.
    Prev,
    /// Jump to a 1-based page.
    Page(usize),
    /// Flip and save the theme.
    ToggleTheme,
    /// Stop the dashboard.
    Quit,
}

impl FromStr for Input {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Ok(Input::Next),
            "p" | "prev" => Ok(Input::Prev),
            "t" | "theme" => Ok(Input::ToggleTheme),
            "q" | "quit" => Ok(Input::Quit),
            other => other
                .parse::<usize>()
                .map(Input::Page)
                .map_err(|_| FeedError::Format(format!("unknown command: {:?}", other))),
        }
    }
}

/// Spawns the stdin reader. The channel closes when stdin reaches EOF.
pub fn spawn_stdin_reader() -> Receiver<Input> {
    let (tx, rx) = unbounded::<Input>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Input>() {
                Ok(input) => {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
        debug!("Stdin reader stopping...");
    });
    rx
}
