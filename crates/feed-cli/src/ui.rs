use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};

/// Rows assumed when neither config nor `LINES` says otherwise.
pub const FALLBACK_ROWS: u32 = 24;
/// Columns assumed when neither config nor `COLUMNS` says otherwise.
pub const FALLBACK_COLUMNS: u32 = 80;

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
    pub term_rows: Option<usize>,
    /// Redraw the browse screen in place instead of appending frames.
    pub redraw: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let is_tty = std::io::stdout().is_terminal();
    let table_color = match flags.color {
        ColorMode::Always => flags.format == OutputFormat::Table,
        ColorMode::Never => false,
        ColorMode::Auto => {
            is_tty
                && flags.format == OutputFormat::Table
                && !flags.quiet
                && std::env::var_os("NO_COLOR").is_none()
        }
    };

    let progress = match flags.progress {
        ProgressMode::On => !flags.quiet,
        ProgressMode::Off => false,
        ProgressMode::Auto => is_tty && !flags.quiet && flags.format != OutputFormat::Json,
    };

    let _ = UI_PREFS.set(UiPrefs {
        table_color,
        progress,
        term_width: env_dimension("COLUMNS", 40),
        term_rows: env_dimension("LINES", 10),
        redraw: is_tty,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
        term_rows: None,
        redraw: false,
    })
}

/// Positive terminal dimension from the environment, ignoring tiny values.
fn env_dimension(key: &str, min: usize) -> Option<usize> {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value >= min)
}

/// Pick a configured dimension, then the terminal's, then the fallback.
#[must_use]
pub fn resolve_dimension(configured: u32, terminal: Option<usize>, fallback: u32) -> u32 {
    if configured > 0 {
        return configured;
    }
    terminal
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(fallback)
}
