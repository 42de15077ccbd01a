//! Tracking-list status constants and validation.
//!
//! The list feature itself lives outside this engine; these constants define
//! the interface contract for the add-on-accept path so both the API handler
//! and the client orchestrator agree on valid status strings.

use crate::error::CoreError;

/// Currently watching.
pub const STATUS_WATCHING: &str = "watching";
/// Finished.
pub const STATUS_COMPLETED: &str = "completed";
/// Saved for later; the status a right-swipe records.
pub const STATUS_PLAN_TO_WATCH: &str = "plan_to_watch";
/// Paused.
pub const STATUS_ON_HOLD: &str = "on_hold";
/// Abandoned.
pub const STATUS_DROPPED: &str = "dropped";

/// All valid watchlist statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_WATCHING,
    STATUS_COMPLETED,
    STATUS_PLAN_TO_WATCH,
    STATUS_ON_HOLD,
    STATUS_DROPPED,
];

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown watchlist status: '{status}'. Valid statuses: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_validate() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(validate_status("binge").is_err());
    }

    #[test]
    fn empty_status_rejected() {
        assert!(validate_status("").is_err());
    }
}
