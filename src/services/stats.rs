//! Streak and KPI calculations over a date-keyed event log.
//!
//! Every function here is pure: callers fetch the entry dates for the
//! tracking window (sorted ascending, distinct, none after the as-of date)
//! and pass the window bounds in explicitly, which keeps the calculations
//! testable with arbitrary dates.

use chrono::{Days, NaiveDate};

/// Consecutive days ending at `today` that all have an entry. Walks
/// backwards one day at a time and stops at the first missing day or at the
/// day before `period_start`. Zero when `today` itself has no entry.
pub fn current_presence_streak(
    dates: &[NaiveDate],
    period_start: NaiveDate,
    today: NaiveDate,
) -> i64 {
    let mut streak = 0;
    let mut check = today;
    while check >= period_start {
        if dates.binary_search(&check).is_err() {
            break;
        }
        streak += 1;
        match check.checked_sub_days(Days::new(1)) {
            Some(prev) => check = prev,
            None => break,
        }
    }
    streak
}

/// Consecutive days ending at `today` with no entry. The dual of
/// `current_presence_streak`: a smoking log's clean streak.
pub fn current_absence_streak(
    dates: &[NaiveDate],
    period_start: NaiveDate,
    today: NaiveDate,
) -> i64 {
    let mut streak = 0;
    let mut check = today;
    while check >= period_start {
        if dates.binary_search(&check).is_ok() {
            break;
        }
        streak += 1;
        match check.checked_sub_days(Days::new(1)) {
            Some(prev) => check = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive calendar days present in `dates`. A break
/// resets the run to 1, so any non-empty input yields at least 1.
pub fn longest_presence_streak(dates: &[NaiveDate]) -> i64 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates {
        run = match prev {
            Some(p) if p.checked_add_days(Days::new(1)) == Some(date) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(date);
    }
    best
}

/// Longest run of entry-free days within `[period_start, today]`: the
/// largest of the gap before the first entry, the gaps between consecutive
/// entries, and the gap after the last entry. The whole elapsed period when
/// there are no entries at all.
pub fn longest_absence_streak(
    dates: &[NaiveDate],
    period_start: NaiveDate,
    today: NaiveDate,
) -> i64 {
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return elapsed_days(period_start, today);
    };

    let mut best = (first - period_start).num_days();
    for pair in dates.windows(2) {
        best = best.max((pair[1] - pair[0]).num_days() - 1);
    }
    best.max((today - last).num_days())
}

/// Days elapsed in the tracking period, inclusive of both endpoints. Zero
/// before the period has started.
pub fn elapsed_days(period_start: NaiveDate, today: NaiveDate) -> i64 {
    if today < period_start {
        0
    } else {
        (today - period_start).num_days() + 1
    }
}

/// Share of elapsed days with an entry, as a percentage rounded to one
/// decimal place. Zero when no days have elapsed.
pub fn presence_percentage(entry_days: i64, elapsed: i64) -> f64 {
    if elapsed == 0 {
        return 0.0;
    }
    round1(entry_days as f64 / elapsed as f64 * 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn ds(specs: &[&str]) -> Vec<NaiveDate> {
        specs.iter().map(|s| d(s)).collect()
    }

    const START: &str = "2026-01-01";

    #[test]
    fn test_current_streak_empty() {
        assert_eq!(current_presence_streak(&[], d(START), d("2026-01-17")), 0);
    }

    #[test]
    fn test_current_streak_today_missing() {
        let dates = ds(&["2026-01-14", "2026-01-15"]);
        assert_eq!(current_presence_streak(&dates, d(START), d("2026-01-17")), 0);
    }

    #[test]
    fn test_current_streak_counts_back_from_today() {
        let dates = ds(&["2026-01-12", "2026-01-15", "2026-01-16", "2026-01-17"]);
        assert_eq!(current_presence_streak(&dates, d(START), d("2026-01-17")), 3);
    }

    #[test]
    fn test_current_streak_stops_at_period_start() {
        // Every day from Jan 1 has an entry; the walk must not run past
        // the period start even if earlier dates exist.
        let mut dates = ds(&["2025-12-31"]);
        let mut day = d("2026-01-01");
        while day <= d("2026-01-05") {
            dates.push(day);
            day = day.succ_opt().unwrap();
        }
        assert_eq!(current_presence_streak(&dates, d(START), d("2026-01-05")), 5);
    }

    #[test]
    fn test_longest_streak_empty() {
        assert_eq!(longest_presence_streak(&[]), 0);
    }

    #[test]
    fn test_longest_streak_single_day() {
        assert_eq!(longest_presence_streak(&ds(&["2026-01-13"])), 1);
    }

    #[test]
    fn test_longest_streak_with_gap() {
        // Jan 10, 11, gap, 13 → longest run is 2.
        let dates = ds(&["2026-01-10", "2026-01-11", "2026-01-13"]);
        assert_eq!(longest_presence_streak(&dates), 2);
    }

    #[test]
    fn test_longest_streak_run_at_end() {
        let dates = ds(&[
            "2026-01-02",
            "2026-01-05",
            "2026-01-06",
            "2026-01-07",
            "2026-01-08",
        ]);
        assert_eq!(longest_presence_streak(&dates), 4);
    }

    #[test]
    fn test_longest_streak_across_month_boundary() {
        let dates = ds(&["2026-01-31", "2026-02-01", "2026-02-02"]);
        assert_eq!(longest_presence_streak(&dates), 3);
    }

    #[test]
    fn test_current_never_exceeds_longest() {
        let cases: Vec<Vec<NaiveDate>> = vec![
            vec![],
            ds(&["2026-01-17"]),
            ds(&["2026-01-10", "2026-01-11", "2026-01-13"]),
            ds(&["2026-01-15", "2026-01-16", "2026-01-17"]),
            ds(&["2026-01-01", "2026-01-03", "2026-01-05", "2026-01-17"]),
        ];
        for dates in cases {
            let current = current_presence_streak(&dates, d(START), d("2026-01-17"));
            let longest = longest_presence_streak(&dates);
            assert!(
                current <= longest,
                "current {current} > longest {longest} for {dates:?}"
            );
        }
    }

    #[test]
    fn test_absence_streak_no_entries_spans_period() {
        // Empty smoking log: clean since tracking began.
        assert_eq!(current_absence_streak(&[], d(START), d("2026-01-17")), 17);
        assert_eq!(longest_absence_streak(&[], d(START), d("2026-01-17")), 17);
    }

    #[test]
    fn test_absence_streak_ends_at_entry() {
        let dates = ds(&["2026-01-10"]);
        // Jan 11..17 clean → 7 days.
        assert_eq!(current_absence_streak(&dates, d(START), d("2026-01-17")), 7);
    }

    #[test]
    fn test_absence_streak_zero_when_today_has_entry() {
        let dates = ds(&["2026-01-17"]);
        assert_eq!(current_absence_streak(&dates, d(START), d("2026-01-17")), 0);
    }

    #[test]
    fn test_longest_absence_gap_before_first_entry() {
        // Entry on Jan 9 leaves Jan 1..8 clean: 8 days.
        let dates = ds(&["2026-01-09"]);
        assert_eq!(longest_absence_streak(&dates, d(START), d("2026-01-17")), 8);
    }

    #[test]
    fn test_longest_absence_gap_between_entries() {
        let dates = ds(&["2026-01-02", "2026-01-09", "2026-01-16"]);
        // Jan 3..8 → 6 clean days; Jan 10..15 → 6; tail Jan 17 → 1; head Jan 1 → 1.
        assert_eq!(longest_absence_streak(&dates, d(START), d("2026-01-17")), 6);
    }

    #[test]
    fn test_longest_absence_gap_after_last_entry() {
        let dates = ds(&["2026-01-02", "2026-01-03"]);
        assert_eq!(longest_absence_streak(&dates, d(START), d("2026-01-17")), 14);
    }

    #[test]
    fn test_longest_absence_consecutive_entries_no_gap() {
        let dates = ds(&["2026-01-01", "2026-01-02", "2026-01-03"]);
        // Only the tail remains clean: Jan 4..17.
        assert_eq!(longest_absence_streak(&dates, d(START), d("2026-01-17")), 14);
    }

    #[test]
    fn test_absence_streak_entry_today() {
        let dates = ds(&["2026-01-17"]);
        // Head gap Jan 1..16 is the longest clean run; tail gap is 0.
        assert_eq!(longest_absence_streak(&dates, d(START), d("2026-01-17")), 16);
    }

    #[test]
    fn test_elapsed_days_inclusive() {
        assert_eq!(elapsed_days(d(START), d("2026-01-01")), 1);
        assert_eq!(elapsed_days(d(START), d("2026-01-17")), 17);
    }

    #[test]
    fn test_elapsed_days_before_period() {
        assert_eq!(elapsed_days(d(START), d("2025-12-31")), 0);
    }

    #[test]
    fn test_percentage_zero_denominator() {
        assert_eq!(presence_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_percentage_rounding() {
        // 5 of 17 days → 29.411…% → 29.4
        assert_eq!(presence_percentage(5, 17), 29.4);
        // 1 of 3 → 33.333…% → 33.3
        assert_eq!(presence_percentage(1, 3), 33.3);
        assert_eq!(presence_percentage(17, 17), 100.0);
    }

    #[test]
    fn test_percentage_stays_in_range() {
        for days in 0..=31 {
            let pct = presence_percentage(days, 31);
            assert!((0.0..=100.0).contains(&pct), "{pct} out of range");
        }
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(45.55), 45.6);
        assert_eq!(round1(45.54), 45.5);
        assert_eq!(round1(0.0), 0.0);
    }
}
