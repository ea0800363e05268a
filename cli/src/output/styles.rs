//! Colour roles for harness output.

use owo_colors::Style;

use crate::application::services::Outcome;

/// One style per role the harness prints. The default leaves text plain.
#[derive(Debug, Default, Clone, Copy)]
pub struct Styles {
    /// `✓` lines and passed stages
    pub ok: Style,
    /// `!` lines
    pub warn: Style,
    /// `✗` lines and failed stages
    pub fail: Style,
    /// `→` step markers
    pub step: Style,
    /// Report keys
    pub key: Style,
    /// Section titles
    pub title: Style,
    /// Phase names
    pub phase: Style,
    /// Skipped stages
    pub skipped: Style,
}

impl Styles {
    #[must_use]
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
            step: Style::new().blue(),
            key: Style::new().dimmed(),
            title: Style::new().bold().cyan(),
            phase: Style::new().magenta(),
            skipped: Style::new().dimmed().italic(),
        }
    }

    /// Style for a stage outcome.
    #[must_use]
    pub fn outcome(&self, outcome: &Outcome) -> Style {
        match outcome {
            Outcome::Passed => self.ok,
            Outcome::Failed { .. } => self.fail,
            Outcome::Skipped => self.skipped,
        }
    }
}
