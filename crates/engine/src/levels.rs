//! Points ledger and level thresholds

use common::{Error, Result};

/// Points required to reach each level; index 0 is level 1.
/// Strictly increasing, so the level function is monotonic by construction.
const LEVEL_THRESHOLDS: &[i64] = &[
    0, 100, 300, 600, 1000, 1500, 2500, 4000, 6000, 9000, 13000, 18000, 25000,
];

/// Level for a points total
pub fn level_for_points(points: i64) -> i32 {
    let mut level = 1;
    for (idx, threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if points >= *threshold {
            level = idx as i32 + 1;
        } else {
            break;
        }
    }
    level
}

/// Points total at which the next level starts, None at the cap
pub fn next_level_at(points: i64) -> Option<i64> {
    LEVEL_THRESHOLDS.iter().copied().find(|t| *t > points)
}

/// Outcome of applying an award to a points total
#[derive(Debug, Clone, Copy)]
pub struct PointsApplied {
    pub points: i64,
    pub level: i32,
    pub leveled_up: bool,
}

/// Apply an award to a points total.
///
/// Award-only: a non-positive delta is rejected before anything is written.
pub fn apply_points(points: i64, delta: i64) -> Result<PointsApplied> {
    if delta <= 0 {
        return Err(Error::Validation(format!(
            "point award must be positive, got {delta}"
        )));
    }

    let new_points = points + delta;
    let new_level = level_for_points(new_points);

    Ok(PointsApplied {
        points: new_points,
        level: new_level,
        leveled_up: new_level > level_for_points(points),
    })
}
