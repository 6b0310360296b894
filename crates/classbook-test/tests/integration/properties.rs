#![allow(clippy::unwrap_used)]
//! Invariants of expansion, conversion and rescheduling over broad inputs.

use std::collections::HashSet;

use chrono::{Datelike, TimeDelta};

use classbook_test::component::expand::expand;
use classbook_test::component::model::{RecurrenceRule, WeekdayRule};
use classbook_test::component::reschedule::reschedule;
use classbook_test::component::time::{to_absolute, to_local};
use classbook_test::component::types::TimezoneOffset;
use uuid::Uuid;

use super::helpers::{date, time, weekday_rule};

// Brings in `NaiveDate` and `Weekday` along with the shared cases.
include!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../classbook-schedule/tests/expansion_cases_data/mod.rs"
));

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const OFFSETS: [i32; 6] = [-600, -330, 0, 330, 345, 840];

/// Every non-empty subset of the week, as a bitmask over `WEEK`.
fn weekday_subsets() -> impl Iterator<Item = Vec<Weekday>> {
    (1_u8..128).map(|mask| {
        WEEK.iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, weekday)| *weekday)
            .collect()
    })
}

fn rule_for(start_date: NaiveDate, weekdays: &[Weekday], count: u32, offset: i32) -> RecurrenceRule {
    RecurrenceRule {
        start_date,
        weekday_rules: weekdays
            .iter()
            .map(|weekday| weekday_rule(*weekday, (6, 45), (8, 0)))
            .collect(),
        session_count: count,
        timezone_offset_minutes: TimezoneOffset::from_minutes(offset).unwrap(),
    }
}

/// ## Summary
/// Integration-level validation of expansion using the shared cases.
#[test_log::test]
fn expansion_cases_integration() {
    for case in expansion_cases() {
        assert_case(&case);
    }
}

#[test]
fn expansion_count_order_and_weekdays_hold_for_every_weekday_set() {
    let start_dates = [date(2024, 2, 26), date(2024, 12, 29), date(2025, 3, 1)];

    for weekdays in weekday_subsets() {
        let allowed: HashSet<Weekday> = weekdays.iter().copied().collect();
        for start_date in start_dates {
            for offset in OFFSETS {
                let rule = rule_for(start_date, &weekdays, 11, offset);
                let sessions = expand(Uuid::new_v4(), &rule).unwrap();

                assert_eq!(sessions.len(), 11);
                assert!(
                    sessions
                        .windows(2)
                        .all(|pair| pair[0].start_instant < pair[1].start_instant),
                    "not strictly increasing for {weekdays:?} from {start_date} at {offset}"
                );
                for session in &sessions {
                    let (local_date, local_time) =
                        to_local(session.start_instant, rule.timezone_offset_minutes);
                    assert!(allowed.contains(&local_date.weekday()));
                    assert!(local_date >= start_date);
                    assert_eq!(local_time, time(6, 45));
                }
            }
        }
    }
}

#[test]
fn expansion_is_idempotent_for_the_same_booking() {
    let booking_id = Uuid::new_v4();
    for weekdays in weekday_subsets().step_by(9) {
        let rule = rule_for(date(2024, 6, 3), &weekdays, 20, 330);
        assert_eq!(expand(booking_id, &rule).unwrap(), expand(booking_id, &rule).unwrap());
    }
}

#[test]
fn local_round_trip_holds_across_offsets() {
    let dates = [
        date(2024, 1, 1),
        date(2024, 2, 29),
        date(2024, 6, 30),
        date(2024, 12, 31),
    ];
    let times = [time(0, 0), time(0, 15), time(5, 29), time(12, 0), time(18, 30), time(23, 59)];

    for offset in (-1439..=1439).step_by(53).chain(OFFSETS) {
        let offset = TimezoneOffset::from_minutes(offset).unwrap();
        for day in dates {
            for wall in times {
                let instant = to_absolute(day, wall, offset).unwrap();
                assert_eq!(to_local(instant, offset), (day, wall), "offset {offset}");
            }
        }
    }
}

#[test]
fn rescheduling_any_session_leaves_the_rest_alone() {
    let booking = classbook_test::component::model::ClassBooking::recurring(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        vec![],
        String::new(),
        rule_for(date(2024, 6, 3), &[Weekday::Mon, Weekday::Thu], 7, 330),
    )
    .unwrap();

    for target in booking.sessions() {
        let new_start = target.start_instant + TimeDelta::days(1) + TimeDelta::minutes(30);
        let updated =
            reschedule(&booking, Some(target.id), new_start, new_start + TimeDelta::hours(1))
                .unwrap();

        for (before, after) in booking.sessions().iter().zip(updated.sessions()) {
            if before.id == target.id {
                assert_eq!(after.start_instant, new_start);
                assert_eq!(after.end_instant, new_start + TimeDelta::hours(1));
                assert!(after.is_rescheduled);
                assert_eq!(after.sequence_number, before.sequence_number);
            } else {
                assert_eq!(before, after);
            }
        }
    }
}

/// Sweeps start dates across a fortnight and compares against RFC 5545
/// weekly expansion in `Asia/Kolkata`, which has a fixed +05:30 offset.
/// Only starts that fall on a class day are compared, since `rrule` does not
/// count an unmatched `DTSTART` as an occurrence.
#[test]
fn expansion_agrees_with_rrule_for_ist() {
    const BYDAY: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

    for weekdays in weekday_subsets().step_by(5) {
        let byday: Vec<&str> = weekdays
            .iter()
            .map(|weekday| BYDAY[weekday.num_days_from_monday() as usize])
            .collect();

        let starts = date(2024, 3, 1)
            .iter_days()
            .take(14)
            .filter(|day| weekdays.contains(&day.weekday()));
        for start_date in starts {
            let rrule_set: rrule::RRuleSet = format!(
                "DTSTART;TZID=Asia/Kolkata:{}T064500\nRRULE:FREQ=WEEKLY;COUNT=9;BYDAY={}",
                start_date.format("%Y%m%d"),
                byday.join(",")
            )
            .parse()
            .unwrap();
            let expected: Vec<i64> = rrule_set
                .all(100)
                .dates
                .iter()
                .map(chrono::DateTime::timestamp)
                .collect();

            let actual: Vec<i64> = expand(Uuid::new_v4(), &rule_for(start_date, &weekdays, 9, 330))
                .unwrap()
                .iter()
                .map(|session| session.start_instant.timestamp())
                .collect();

            assert_eq!(actual, expected, "{start_date} BYDAY={}", byday.join(","));
        }
    }
}
