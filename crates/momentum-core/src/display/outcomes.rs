//! Display types for operation outcomes.

use std::fmt;

use crate::{
    models::Profile,
    params::ProfileUpdate,
    plan::{LoadedPlan, PlanSource},
    progress::Toggle,
};

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self {
            PlanSource::Memory => "current session",
            PlanSource::Cache => "cache",
            PlanSource::Network => "freshly generated",
        };
        write!(f, "{source}")
    }
}

/// A loaded plan with its provenance.
///
/// # Examples
///
/// ```rust
/// use momentum_core::{
///     display::PlanView,
///     models::PlanPayload,
///     plan::{LoadedPlan, PlanSource},
/// };
///
/// let loaded = LoadedPlan {
///     plan: PlanPayload::parse(r#"{"weeks":[{"week":"Week 1"}]}"#).unwrap(),
///     source: PlanSource::Cache,
/// };
/// let output = PlanView::new(&loaded, "Guitar").to_string();
/// assert!(output.starts_with("# Guitar learning plan"));
/// assert!(output.contains("1 weeks, from cache"));
/// ```
pub struct PlanView<'a> {
    pub loaded: &'a LoadedPlan,
    pub hobby: &'a str,
}

impl<'a> PlanView<'a> {
    pub fn new(loaded: &'a LoadedPlan, hobby: &'a str) -> Self {
        Self { loaded, hobby }
    }
}

impl fmt::Display for PlanView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} learning plan", self.hobby)?;
        writeln!(f)?;
        writeln!(
            f,
            "_{} weeks, from {}_",
            self.loaded.plan.week_count(),
            self.loaded.source
        )?;
        writeln!(f)?;
        write!(f, "{}", self.loaded.plan)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::Completed { week, progress } => {
                writeln!(f, "Completed {} ({progress}% complete)", week.name)
            }
            Toggle::Reopened {
                week,
                progress,
                cleared,
            } => {
                write!(f, "Reopened {} ({progress}% complete)", week.name)?;
                if *cleared > 0 {
                    write!(f, ", {cleared} later weeks reopened too")?;
                }
                writeln!(f)
            }
            Toggle::Locked { week, blocked_by } => {
                writeln!(f, "{} is locked until {blocked_by} is completed", week.name)
            }
        }
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of changes made.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl UpdateResult<Profile> {
    /// Describes each field an update provided.
    pub fn from_update(profile: Profile, update: &ProfileUpdate) -> Self {
        let changes = update
            .fields()
            .into_iter()
            .map(|(field, value)| format!("{field} set to '{value}'"))
            .collect();
        Self::with_changes(profile, changes)
    }
}

impl fmt::Display for UpdateResult<Profile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated profile")?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
            writeln!(f)?;
            writeln!(f, "The learning plan will be regenerated on next view.")?;
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}
