// Date utility functions

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Canvas exports all-day due dates without a time; they are due at the
/// end of that day, 23:59:00 local.
pub fn end_of_day_due(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(23, 59, 0)
}

/// Build a wall-clock time from calendar fields, carrying any overflow into
/// the next larger unit.
///
/// Month 13 is January of the next year, Feb 30 is early March, hour 24 is
/// midnight of the next day. Month and day 0 step back one unit. `None` only
/// when the result leaves chrono's supported range.
pub fn rollover_datetime(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;

    let start = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let offset = Duration::days(i64::from(day) - 1)
        + Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute))
        + Duration::seconds(i64::from(second));
    start.checked_add_signed(offset)
}

/// Read a wall-clock time in the machine's local zone as an absolute instant.
pub fn local_to_utc(naive: &NaiveDateTime) -> DateTime<Utc> {
    wall_clock_to_utc(&Local, naive)
}

/// Read a wall-clock time in `tz` as an absolute instant.
///
/// A time repeated by a DST fold resolves to the earlier instant. A time
/// skipped by a DST gap is read with the offset in force a day earlier, so
/// 02:30 on a spring-forward night lands at 03:30 of the new offset.
pub fn wall_clock_to_utc<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let day_before = *naive - Duration::days(1);
            let offset = match tz.from_local_datetime(&day_before) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.offset().fix(),
                LocalResult::None => tz.offset_from_utc_datetime(naive).fix(),
            };
            let utc = *naive - Duration::seconds(i64::from(offset.local_minus_utc()));
            Utc.from_utc_datetime(&utc)
        }
    }
}

pub fn utc_to_local(instant: DateTime<Utc>) -> DateTime<Local> {
    instant.with_timezone(&Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Los_Angeles;
    use test_case::test_case;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_end_of_day_due() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 22).unwrap();
        let due = end_of_day_due(date).unwrap();
        assert_eq!((due.hour(), due.minute(), due.second()), (23, 59, 0));
        assert_eq!(due.date(), date);
    }

    #[test]
    fn test_local_round_trip() {
        let naive = naive(2025, 6, 10, 12, 0, 0);
        let instant = local_to_utc(&naive);
        assert_eq!(utc_to_local(instant).naive_local(), naive);
    }

    #[test_case((2025, 3, 17, 18, 30, 0), naive(2025, 3, 17, 18, 30, 0) ; "in range")]
    #[test_case((2025, 2, 30, 0, 0, 0), naive(2025, 3, 2, 0, 0, 0) ; "february thirtieth")]
    #[test_case((2024, 2, 30, 0, 0, 0), naive(2024, 3, 1, 0, 0, 0) ; "february thirtieth leap year")]
    #[test_case((2025, 13, 1, 0, 0, 0), naive(2026, 1, 1, 0, 0, 0) ; "month thirteen")]
    #[test_case((2025, 0, 15, 0, 0, 0), naive(2024, 12, 15, 0, 0, 0) ; "month zero")]
    #[test_case((2025, 3, 0, 0, 0, 0), naive(2025, 2, 28, 0, 0, 0) ; "day zero")]
    #[test_case((2025, 12, 31, 24, 30, 0), naive(2026, 1, 1, 0, 30, 0) ; "hour twenty four")]
    #[test_case((2025, 3, 17, 18, 60, 0), naive(2025, 3, 17, 19, 0, 0) ; "minute sixty")]
    #[test_case((2025, 3, 17, 18, 30, 99), naive(2025, 3, 17, 18, 31, 39) ; "second ninety nine")]
    fn test_rollover_datetime(fields: (i32, u32, u32, u32, u32, u32), expected: NaiveDateTime) {
        let (y, mo, d, h, mi, s) = fields;
        assert_eq!(rollover_datetime(y, mo, d, h, mi, s), Some(expected));
    }

    #[test]
    fn test_dst_gap_moves_forward() {
        // 2025-03-09 02:30 does not exist in Los Angeles; PST (-8) still applies.
        let instant = wall_clock_to_utc(&Los_Angeles, &naive(2025, 3, 9, 2, 30, 0));
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 3, 9, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_dst_fold_takes_earlier_instant() {
        // 2025-11-02 01:30 happens twice; the PDT (-7) reading comes first.
        let instant = wall_clock_to_utc(&Los_Angeles, &naive(2025, 11, 2, 1, 30, 0));
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 11, 2, 8, 30, 0).unwrap());
    }
}
