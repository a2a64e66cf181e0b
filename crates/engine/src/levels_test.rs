#[cfg(test)]
mod tests {
    use crate::levels::*;

    #[test]
    fn test_level_starts_at_1() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
    }

    #[test]
    fn test_level_threshold_boundaries() {
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(299), 2);
        assert_eq!(level_for_points(300), 3);
    }

    #[test]
    fn test_level_beyond_last_threshold() {
        assert_eq!(level_for_points(25000), 13);
        assert_eq!(level_for_points(1_000_000), 13);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut previous = level_for_points(0);
        for points in (0..30_000).step_by(7) {
            let level = level_for_points(points);
            assert!(
                level >= previous,
                "level dropped from {} to {} at {} points",
                previous,
                level,
                points
            );
            previous = level;
        }
    }

    #[test]
    fn test_next_level_at() {
        assert_eq!(next_level_at(0), Some(100));
        assert_eq!(next_level_at(100), Some(300));
        assert_eq!(next_level_at(24_999), Some(25_000));
        assert_eq!(next_level_at(25_000), None);
    }

    #[test]
    fn test_apply_points_accumulates() {
        let applied = apply_points(0, 15).unwrap();
        assert_eq!(applied.points, 15);
        assert_eq!(applied.level, 1);
        assert!(!applied.leveled_up);
    }

    #[test]
    fn test_apply_points_detects_level_up() {
        let applied = apply_points(95, 10).unwrap();
        assert_eq!(applied.points, 105);
        assert_eq!(applied.level, 2);
        assert!(applied.leveled_up);
    }

    #[test]
    fn test_apply_points_can_skip_levels() {
        let applied = apply_points(0, 650).unwrap();
        assert_eq!(applied.level, 4);
        assert!(applied.leveled_up);
    }

    #[test]
    fn test_apply_points_rejects_zero() {
        assert!(apply_points(10, 0).is_err());
    }

    #[test]
    fn test_apply_points_rejects_negative() {
        assert!(apply_points(10, -5).is_err());
    }
}
