//! Display implementations for domain models.
//!
//! These are kept apart from the model definitions so the models stay plain
//! data. Everything renders as markdown.

use std::fmt;

use crate::models::{
    GoalLevel, LastViewedResource, PlanPayload, Profile, ProfileField, ResourceItem,
    ResourceKind, SkillLevel, TimeCommitment, Week, WeekPlan,
};

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for GoalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for TimeCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileField::HobbyName => "Hobby",
            ProfileField::CurrentSkillLevel => "Current level",
            ProfileField::DesiredSkillLevel => "Goal",
            ProfileField::TimeCommitment => "Time commitment",
        };
        write!(f, "{name}")
    }
}

/// Label for a stored profile value. Option ids are looked up in the table
/// of their own field; anything else is shown verbatim.
fn value_label(field: ProfileField, value: &str) -> String {
    let label = match field {
        ProfileField::HobbyName => None,
        ProfileField::CurrentSkillLevel => value.parse::<SkillLevel>().ok().map(|l| l.label()),
        ProfileField::DesiredSkillLevel => value.parse::<GoalLevel>().ok().map(|l| l.label()),
        ProfileField::TimeCommitment => value.parse::<TimeCommitment>().ok().map(|c| c.label()),
    };
    label.unwrap_or(value).to_string()
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Profile")?;
        writeln!(f)?;
        for field in ProfileField::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                writeln!(f, "- **{field}**: _not set_")?;
            } else {
                writeln!(f, "- **{field}**: {}", value_label(field, value))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ResourceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.title, self.url)?;
        if let Some(duration) = &self.duration {
            write!(f, " ({duration})")?;
        }
        Ok(())
    }
}

impl fmt::Display for WeekPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.week)?;
        writeln!(f)?;

        if self.resource_count() == 0 {
            writeln!(f, "No resources for this week.")?;
            return writeln!(f);
        }

        if !self.youtube_videos.is_empty() {
            writeln!(f, "#### Videos")?;
            writeln!(f)?;
            for video in &self.youtube_videos {
                writeln!(f, "- {video}")?;
            }
            writeln!(f)?;
        }

        if !self.learning_articles.is_empty() {
            writeln!(f, "#### Articles")?;
            writeln!(f)?;
            for article in &self.learning_articles {
                writeln!(f, "- {article}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_usable() {
            return writeln!(f, "No learning plan yet.");
        }
        for week in &self.weeks {
            write!(f, "{week}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(f, "[{mark}] {}", self.name)
    }
}

impl fmt::Display for LastViewedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Continue learning")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **{}** ({}, week {})",
            self.title,
            self.kind,
            self.week_index + 1
        )?;
        writeln!(f, "- {}", self.url)
    }
}
