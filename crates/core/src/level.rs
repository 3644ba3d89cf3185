//! Learning-progress levels attachable to a skill.
//!
//! The level drives the default node color on the canvas when the user has
//! not picked a color explicitly.

pub const LEVEL_MASTERED: &str = "mastered";
pub const LEVEL_IN_PROGRESS: &str = "in_progress";
pub const LEVEL_POSTPONED: &str = "postponed";

/// All recognised levels.
pub const ALL: &[&str] = &[LEVEL_MASTERED, LEVEL_IN_PROGRESS, LEVEL_POSTPONED];

/// Check whether a level string is recognised.
pub fn is_valid_level(level: &str) -> bool {
    ALL.contains(&level)
}

/// Default display color for a level.
///
/// Unknown levels fall back to the in-progress color.
pub fn default_color(level: &str) -> &'static str {
    match level {
        LEVEL_MASTERED => "#4caf50",
        LEVEL_POSTPONED => "#9e9e9e",
        _ => "#2196f3",
    }
}
