//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{progress_percent, Week};

const BAR_WIDTH: usize = 20;

/// Newtype wrapper for displaying the week list with its progress.
///
/// Each week is rendered as a task-list item; weeks that are still locked
/// behind an incomplete earlier week are marked as such.
pub struct Weeks(pub Vec<Week>);

impl Weeks {
    fn progress(&self) -> u8 {
        progress_percent(&self.0)
    }
}

impl fmt::Display for Weeks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No weeks to track.");
        }

        let progress = self.progress();
        let filled = usize::from(progress) * BAR_WIDTH / 100;
        writeln!(
            f,
            "`{}{}` {progress}% complete",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled)
        )?;
        writeln!(f)?;

        let mut unlocked = true;
        for week in &self.0 {
            if unlocked {
                writeln!(f, "- {week} (id: {})", week.id)?;
            } else {
                writeln!(f, "- {week} (id: {}, locked)", week.id)?;
            }
            unlocked &= week.completed;
        }
        Ok(())
    }
}
