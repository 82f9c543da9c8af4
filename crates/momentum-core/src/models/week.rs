//! Week progress model definition and related functionality.

use serde::{Deserialize, Serialize};

/// Number of weeks tracked before any plan has been generated.
pub const DEFAULT_WEEK_COUNT: usize = 4;

/// Completion flag for one week of the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Week {
    /// Stable identifier ("1", "2", ...)
    pub id: String,

    /// Display name ("Week 1", ...)
    pub name: String,

    #[serde(default)]
    pub completed: bool,
}

impl Week {
    /// Incomplete week at the given 0-based position.
    pub fn numbered(index: usize) -> Self {
        Self {
            id: (index + 1).to_string(),
            name: format!("Week {}", index + 1),
            completed: false,
        }
    }
}

/// `count` incomplete weeks named "Week 1".."Week N".
pub fn numbered_weeks(count: usize) -> Vec<Week> {
    (0..count).map(Week::numbered).collect()
}

/// Rounded completion percentage; an empty list counts as 0.
///
/// # Examples
///
/// ```rust
/// use momentum_core::models::{numbered_weeks, progress_percent};
///
/// let mut weeks = numbered_weeks(3);
/// weeks[0].completed = true;
/// assert_eq!(progress_percent(&weeks), 33);
/// weeks[1].completed = true;
/// assert_eq!(progress_percent(&weeks), 67);
/// ```
pub fn progress_percent(weeks: &[Week]) -> u8 {
    if weeks.is_empty() {
        return 0;
    }
    let completed = weeks.iter().filter(|week| week.completed).count();
    // Half-up rounding on integers: (200c + n) / 2n == round(100c / n)
    ((200 * completed + weeks.len()) / (2 * weeks.len())) as u8
}
