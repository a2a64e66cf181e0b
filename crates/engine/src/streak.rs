//! Daily check-in streak rules

use chrono::{DateTime, Utc};

/// Reason surfaced when a same-day check-in is rejected
pub const ALREADY_CHECKED_IN: &str = "already_checked_in";

/// What a check-in attempt does to the streak.
///
/// Decided on calendar dates, not timestamps: checking in at 23:59 and again
/// at 00:01 the next day continues the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInDecision {
    /// Second attempt within the same calendar day; a no-op for the day
    AlreadyCheckedIn,
    /// Checked in yesterday as well; the streak extends
    Continued { streak: i32 },
    /// First ever check-in, or a gap of two or more days
    Reset { streak: i32 },
}

impl CheckInDecision {
    pub fn accepted(&self) -> bool {
        !matches!(self, CheckInDecision::AlreadyCheckedIn)
    }
}

/// Decide what a check-in at `now` does, comparing UTC calendar dates
pub fn evaluate_check_in(
    now: DateTime<Utc>,
    last_check_in_at: Option<DateTime<Utc>>,
    current_streak: i32,
) -> CheckInDecision {
    let today = now.date_naive();

    let last = match last_check_in_at {
        Some(t) => t.date_naive(),
        None => return CheckInDecision::Reset { streak: 1 },
    };

    if last == today {
        CheckInDecision::AlreadyCheckedIn
    } else if today.pred_opt() == Some(last) {
        CheckInDecision::Continued {
            streak: current_streak + 1,
        }
    } else {
        CheckInDecision::Reset { streak: 1 }
    }
}
