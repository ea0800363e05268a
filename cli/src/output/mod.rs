//! Terminal output for the harness: status lines and the suite report.

pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::fmt;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::Outcome;
use crate::domain::phase::Phase;

const KEY_WIDTH: usize = 12;

/// Word shown for a stage outcome in human output.
#[must_use]
pub fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Passed => "passed",
        Outcome::Failed { .. } => "FAILED",
        Outcome::Skipped => "skipped",
    }
}

/// Styling plus where and whether to print.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Suppress everything except errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Colours are used only on a TTY and when `no_color` is unset. The
    /// `NO_COLOR` variable reaches `no_color` through the CLI parser.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let styles = if no_color || !is_tty {
            Styles::default()
        } else {
            Styles::colored()
        };
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet stdout.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    fn line(&self, args: fmt::Arguments<'_>) {
        if !self.quiet {
            println!("  {args}");
        }
    }

    pub fn success(&self, msg: &str) {
        self.line(format_args!("{} {msg}", "✓".style(self.styles.ok)));
    }

    pub fn warn(&self, msg: &str) {
        self.line(format_args!("{} {msg}", "!".style(self.styles.warn)));
    }

    /// Printed to stderr, even when quiet.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.fail));
    }

    pub fn header(&self, title: &str) {
        self.line(format_args!("{}", title.style(self.styles.title)));
    }

    pub fn kv(&self, key: &str, value: &str) {
        let key = format!("{key:<KEY_WIDTH$}");
        self.line(format_args!("{}{value}", key.style(self.styles.key)));
    }

    /// Report row naming a phase.
    pub fn phase(&self, key: &str, phase: Phase) {
        let key = format!("{key:<KEY_WIDTH$}");
        self.line(format_args!(
            "{}{}",
            key.style(self.styles.key),
            phase.style(self.styles.phase)
        ));
    }

    /// Report row for a stage; a failure adds the first line of its message.
    pub fn outcome(&self, key: &str, outcome: &Outcome) {
        let key = format!("{key:<KEY_WIDTH$}");
        let label = outcome_label(outcome);
        let label = label.style(self.styles.outcome(outcome));
        match outcome {
            Outcome::Failed { message } => {
                let first = message.lines().next().unwrap_or_default();
                self.line(format_args!("{}{label}  {first}", key.style(self.styles.key)));
            }
            _ => self.line(format_args!("{}{label}", key.style(self.styles.key))),
        }
    }
}
