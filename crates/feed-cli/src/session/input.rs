//! Line commands read by the browse session.
//!
//! Each input line becomes one [`UserCommand`]; the session turns it into a
//! feed event or a local action such as `status`.

use anyhow::{Context, bail};

pub const HELP: &str = "\
commands:
  j, down [n]      scroll down (n rows, default step)
  k, up [n]        scroll up
  f, pgdn          scroll down one screen
  b, pgup          scroll up one screen
  G, end           jump to the bottom
  g, home          jump to the top
  /term            filter titles (`/` alone clears)
  search <term>    same as /term
  clear            clear the filter
  reset            drop loaded posts and start from page 1
  status           show page, post and load counts
  help             show this text
  q, quit          leave";

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserCommand {
    Down(u32),
    Up(u32),
    PageDown,
    PageUp,
    Bottom,
    Top,
    Search(String),
    Reset,
    Status,
    Help,
    /// Empty line: draw the screen again.
    Redraw,
    Quit,
}

/// Parse one input line. `step` is the row count for a bare `j`/`k`.
///
/// Search terms keep their inner and trailing whitespace; only the line
/// terminator is removed.
pub fn parse(line: &str, step: u32) -> anyhow::Result<UserCommand> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(term) = line.strip_prefix('/') {
        return Ok(UserCommand::Search(term.to_string()));
    }
    if let Some(term) = line.strip_prefix("search ") {
        return Ok(UserCommand::Search(term.to_string()));
    }

    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(UserCommand::Redraw);
    };
    let count = words
        .next()
        .map(|raw| {
            raw.parse::<u32>()
                .with_context(|| format!("'{raw}' is not a row count"))
        })
        .transpose()?
        .unwrap_or(step);

    let command = match word {
        "j" | "down" => UserCommand::Down(count),
        "k" | "up" => UserCommand::Up(count),
        "f" | "pgdn" => UserCommand::PageDown,
        "b" | "pgup" => UserCommand::PageUp,
        "G" | "end" => UserCommand::Bottom,
        "g" | "home" => UserCommand::Top,
        "search" | "clear" => UserCommand::Search(String::new()),
        "reset" => UserCommand::Reset,
        "status" => UserCommand::Status,
        "help" | "?" => UserCommand::Help,
        "q" | "quit" | "exit" => UserCommand::Quit,
        other => bail!("unknown command '{other}' (type 'help')"),
    };
    Ok(command)
}
