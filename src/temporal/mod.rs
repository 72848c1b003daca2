//! Temporal validator
//!
//! Pure, side-effect-free checks over timestamps and validity windows.
//! Every check takes `now` explicitly so results are deterministic and
//! testable; nothing here reads the clock.
//!
//! Failures are descriptive strings, never panics: the write path
//! surfaces them to callers alongside schema errors.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Sanity floor for timestamps: 2000-01-01T00:00:00Z in Unix ms.
/// Anything earlier is a corrupt or unconverted value, not real data.
pub const TIMESTAMP_FLOOR_MS: i64 = 946_684_800_000;

/// Upper drift bound: 100 years (in days) past `now`.
pub const MAX_FUTURE_DAYS: i64 = 36_525;

/// Where a validity window stands relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    /// `valid_from` has not arrived yet.
    Future,
    /// Inside the window.
    Active,
    /// `valid_to` has passed.
    Expired,
    /// Neither bound is set.
    Unknown,
}

/// Evaluated validity-window status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindowStatus {
    pub is_valid: bool,
    pub status: WindowState,
    /// Days until the applicable bound: window start when `Future`,
    /// window end when `Active` with an end set. `None` otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

/// Direction of a time delta relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Past,
    Future,
}

/// Magnitude of `|now - ts|` in successive units, plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDelta {
    pub milliseconds: i64,
    pub seconds: i64,
    pub minutes: i64,
    pub hours: i64,
    pub days: i64,
    pub years: i64,
    pub direction: Direction,
}

/// One break in an event sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceViolation {
    pub index: usize,
    pub error: String,
}

/// Check a validity window for inversion.
///
/// Only an inverted window (both bounds present, `valid_from` after
/// `valid_to`) is rejected. A future `valid_from` is a scheduled window
/// and a past `valid_to` is an expired one; both are legitimate data.
pub fn validate_window(
    valid_from: Option<DateTime<Utc>>,
    valid_to: Option<DateTime<Utc>>,
) -> Result<(), String> {
    if let (Some(from), Some(to)) = (valid_from, valid_to) {
        if from > to {
            return Err(format!(
                "inverted validity window: valid_from {} is after valid_to {}",
                from.to_rfc3339(),
                to.to_rfc3339()
            ));
        }
    }
    Ok(())
}

/// Check a single timestamp for sanity against `now`.
///
/// Rejects values before the year-2000 floor, values in the future
/// unless `allow_future`, and values more than 100 years past `now`.
pub fn validate_timestamp(
    ts: DateTime<Utc>,
    now: DateTime<Utc>,
    allow_future: bool,
) -> Result<(), String> {
    if ts.timestamp_millis() < TIMESTAMP_FLOOR_MS {
        return Err(format!(
            "timestamp {} predates the year-2000 sanity floor",
            ts.to_rfc3339()
        ));
    }
    if ts > now {
        if !allow_future {
            return Err(format!("timestamp {} is in the future", ts.to_rfc3339()));
        }
        if ts > now + Duration::days(MAX_FUTURE_DAYS) {
            return Err(format!(
                "timestamp {} is more than 100 years ahead",
                ts.to_rfc3339()
            ));
        }
    }
    Ok(())
}

/// Check an entity's created/updated pair.
pub fn validate_entity_timestamps(
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), String> {
    validate_timestamp(created_at, now, false)?;
    validate_timestamp(updated_at, now, false)?;
    if created_at > updated_at {
        return Err(format!(
            "created_at {} is after updated_at {}",
            created_at.to_rfc3339(),
            updated_at.to_rfc3339()
        ));
    }
    Ok(())
}

/// Check a deletion timestamp against the record's other timestamps.
///
/// A future `deleted_at` is a scheduled deletion and is accepted.
pub fn validate_deletion_timestamp(
    deleted_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), String> {
    validate_timestamp(deleted_at, now, true)?;
    if deleted_at < created_at {
        return Err(format!(
            "deleted_at {} is before created_at {}",
            deleted_at.to_rfc3339(),
            created_at.to_rfc3339()
        ));
    }
    if deleted_at < updated_at {
        return Err(format!(
            "deleted_at {} is before updated_at {}",
            deleted_at.to_rfc3339(),
            updated_at.to_rfc3339()
        ));
    }
    Ok(())
}

/// Check an ordered event sequence.
///
/// Each event's timestamp is checked individually, and timestamps must
/// be non-decreasing across the slice (duplicates allowed). Returns one
/// entry per violation rather than short-circuiting: callers need the
/// full list to locate every break in an audit trail.
pub fn validate_event_sequence(
    timestamps: &[DateTime<Utc>],
    now: DateTime<Utc>,
) -> Vec<SequenceViolation> {
    let mut violations = Vec::new();

    for (index, ts) in timestamps.iter().enumerate() {
        if let Err(error) = validate_timestamp(*ts, now, false) {
            violations.push(SequenceViolation { index, error });
        }
        if index > 0 && *ts < timestamps[index - 1] {
            violations.push(SequenceViolation {
                index,
                error: format!(
                    "timestamp {} decreases below predecessor {}",
                    ts.to_rfc3339(),
                    timestamps[index - 1].to_rfc3339()
                ),
            });
        }
    }

    violations
}

/// Evaluate where a validity window stands relative to `now`.
pub fn time_window_status(
    valid_from: Option<DateTime<Utc>>,
    valid_to: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TimeWindowStatus {
    match (valid_from, valid_to) {
        (None, None) => TimeWindowStatus {
            // Unbounded window: nothing constrains the record.
            is_valid: true,
            status: WindowState::Unknown,
            days_remaining: None,
        },
        (Some(from), _) if from > now => TimeWindowStatus {
            is_valid: false,
            status: WindowState::Future,
            days_remaining: Some((from - now).num_days()),
        },
        (_, Some(to)) if to < now => TimeWindowStatus {
            is_valid: false,
            status: WindowState::Expired,
            days_remaining: None,
        },
        (_, to) => TimeWindowStatus {
            is_valid: true,
            status: WindowState::Active,
            days_remaining: to.map(|t| (t - now).num_days()),
        },
    }
}

/// Express `|now - ts|` in successive units with directionality.
pub fn time_delta(ts: DateTime<Utc>, now: DateTime<Utc>) -> TimeDelta {
    let delta = now.signed_duration_since(ts);
    let magnitude = delta.abs();
    let milliseconds = magnitude.num_milliseconds();

    TimeDelta {
        milliseconds,
        seconds: magnitude.num_seconds(),
        minutes: magnitude.num_minutes(),
        hours: magnitude.num_hours(),
        days: magnitude.num_days(),
        years: magnitude.num_days() / 365,
        direction: if delta >= Duration::zero() {
            Direction::Past
        } else {
            Direction::Future
        },
    }
}
