#[cfg(test)]
mod tests {
    use crate::streak::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_first_ever_check_in_starts_at_1() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

        let decision = evaluate_check_in(now, None, 0);
        assert_eq!(decision, CheckInDecision::Reset { streak: 1 });
        assert!(decision.accepted());
    }

    #[test]
    fn test_same_day_is_rejected() {
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let retry = Utc.with_ymd_and_hms(2024, 1, 1, 22, 30, 0).unwrap();

        let decision = evaluate_check_in(retry, Some(first), 1);
        assert_eq!(decision, CheckInDecision::AlreadyCheckedIn);
        assert!(!decision.accepted());
    }

    #[test]
    fn test_next_day_continues() {
        let yesterday = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();

        let decision = evaluate_check_in(today, Some(yesterday), 4);
        assert_eq!(decision, CheckInDecision::Continued { streak: 5 });
    }

    #[test]
    fn test_time_of_day_does_not_matter() {
        // 23:59 then 00:01 the next day is still consecutive
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 2, 0, 1, 0).unwrap();

        let decision = evaluate_check_in(early, Some(late), 2);
        assert_eq!(decision, CheckInDecision::Continued { streak: 3 });
    }

    #[test]
    fn test_two_day_gap_resets() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();

        let decision = evaluate_check_in(now, Some(last), 10);
        assert_eq!(decision, CheckInDecision::Reset { streak: 1 });
    }

    #[test]
    fn test_long_gap_resets() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

        let decision = evaluate_check_in(now, Some(last), 30);
        assert_eq!(decision, CheckInDecision::Reset { streak: 1 });
    }

    #[test]
    fn test_month_boundary_continues() {
        let last = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();

        let decision = evaluate_check_in(now, Some(last), 6);
        assert_eq!(decision, CheckInDecision::Continued { streak: 7 });
    }

    #[test]
    fn test_consecutive_days_sequence() {
        // Day 1: first check-in, day 1 again: rejected, day 2: streak of 2
        let day1 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let day1_retry = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();

        let first = evaluate_check_in(day1, None, 0);
        assert_eq!(first, CheckInDecision::Reset { streak: 1 });

        let retry = evaluate_check_in(day1_retry, Some(day1), 1);
        assert_eq!(retry, CheckInDecision::AlreadyCheckedIn);

        let second = evaluate_check_in(day2, Some(day1), 1);
        assert_eq!(second, CheckInDecision::Continued { streak: 2 });
    }
}
