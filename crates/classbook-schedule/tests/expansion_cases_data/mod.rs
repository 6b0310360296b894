// Shared expansion cases. Includers must have `expand`, `to_local`,
// `RecurrenceRule`, `WeekdayRule`, `TimezoneOffset` and `Uuid` in scope.

use chrono::{DateTime, NaiveDate, NaiveTime, Weekday};

pub struct ExpansionCase {
    pub name: &'static str,
    pub start_date: &'static str,
    pub weekday_rules: &'static [(Weekday, &'static str, &'static str)],
    pub session_count: u32,
    pub offset_minutes: i32,
    /// Expected session starts in UTC.
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn expansion_cases() -> Vec<ExpansionCase> {
    vec![
        ExpansionCase {
            name: "mon_wed_ist",
            start_date: "2024-06-03",
            weekday_rules: &[
                (Weekday::Mon, "09:00", "10:00"),
                (Weekday::Wed, "14:00", "15:00"),
            ],
            session_count: 3,
            offset_minutes: 330,
            expected: &[
                "2024-06-03T03:30:00+00:00",
                "2024-06-05T08:30:00+00:00",
                "2024-06-10T03:30:00+00:00",
            ],
        },
        ExpansionCase {
            name: "start_on_unmatched_weekday",
            start_date: "2024-06-04",
            weekday_rules: &[(Weekday::Mon, "09:00", "10:00")],
            session_count: 2,
            offset_minutes: 330,
            expected: &["2024-06-10T03:30:00+00:00", "2024-06-17T03:30:00+00:00"],
        },
        ExpansionCase {
            name: "local_early_morning_is_previous_utc_day",
            start_date: "2024-06-03",
            weekday_rules: &[(Weekday::Mon, "02:00", "03:00")],
            session_count: 2,
            offset_minutes: 330,
            expected: &["2024-06-02T20:30:00+00:00", "2024-06-09T20:30:00+00:00"],
        },
        ExpansionCase {
            name: "single_session_utc",
            start_date: "2024-12-31",
            weekday_rules: &[(Weekday::Tue, "18:00", "19:00")],
            session_count: 1,
            offset_minutes: 0,
            expected: &["2024-12-31T18:00:00+00:00"],
        },
        ExpansionCase {
            name: "across_year_boundary",
            start_date: "2024-12-30",
            weekday_rules: &[
                (Weekday::Sat, "08:00", "09:00"),
                (Weekday::Mon, "10:00", "11:00"),
                (Weekday::Thu, "10:00", "11:00"),
            ],
            session_count: 4,
            offset_minutes: 330,
            expected: &[
                "2024-12-30T04:30:00+00:00",
                "2025-01-02T04:30:00+00:00",
                "2025-01-04T02:30:00+00:00",
                "2025-01-06T04:30:00+00:00",
            ],
        },
        ExpansionCase {
            name: "leap_day_negative_offset",
            start_date: "2024-02-26",
            weekday_rules: &[(Weekday::Thu, "09:00", "10:00")],
            session_count: 2,
            offset_minutes: -300,
            expected: &["2024-02-29T14:00:00+00:00", "2024-03-07T14:00:00+00:00"],
        },
        ExpansionCase {
            name: "every_day_of_the_week",
            start_date: "2024-06-01",
            weekday_rules: &[
                (Weekday::Mon, "07:00", "07:30"),
                (Weekday::Tue, "07:00", "07:30"),
                (Weekday::Wed, "07:00", "07:30"),
                (Weekday::Thu, "07:00", "07:30"),
                (Weekday::Fri, "07:00", "07:30"),
                (Weekday::Sat, "07:00", "07:30"),
                (Weekday::Sun, "07:00", "07:30"),
            ],
            session_count: 7,
            offset_minutes: 0,
            expected: &[
                "2024-06-01T07:00:00+00:00",
                "2024-06-02T07:00:00+00:00",
                "2024-06-03T07:00:00+00:00",
                "2024-06-04T07:00:00+00:00",
                "2024-06-05T07:00:00+00:00",
                "2024-06-06T07:00:00+00:00",
                "2024-06-07T07:00:00+00:00",
            ],
        },
        ExpansionCase {
            name: "late_evening_west_of_utc",
            start_date: "2024-03-08",
            weekday_rules: &[(Weekday::Fri, "22:30", "23:45")],
            session_count: 3,
            offset_minutes: -480,
            expected: &[
                "2024-03-09T06:30:00+00:00",
                "2024-03-16T06:30:00+00:00",
                "2024-03-23T06:30:00+00:00",
            ],
        },
    ]
}

pub fn build_rule(case: &ExpansionCase) -> RecurrenceRule {
    RecurrenceRule {
        start_date: NaiveDate::parse_from_str(case.start_date, "%Y-%m-%d")
            .unwrap_or_else(|err| panic!("Bad start date in {}: {err}", case.name)),
        weekday_rules: case
            .weekday_rules
            .iter()
            .map(|(weekday, start, end)| {
                WeekdayRule::new(*weekday, parse_local_time(start), parse_local_time(end))
            })
            .collect(),
        session_count: case.session_count,
        timezone_offset_minutes: TimezoneOffset::from_minutes(case.offset_minutes)
            .unwrap_or_else(|err| panic!("Bad offset in {}: {err}", case.name)),
    }
}

pub fn assert_case(case: &ExpansionCase) {
    let rule = build_rule(case);
    let sessions = expand(Uuid::new_v4(), &rule)
        .unwrap_or_else(|err| panic!("Failed to expand {}: {err}", case.name));

    let actual: Vec<i64> = sessions.iter().map(|s| s.start_instant.timestamp()).collect();
    let expected: Vec<i64> = case
        .expected
        .iter()
        .map(|value| parse_rfc3339(value).timestamp())
        .collect();
    assert_eq!(actual, expected, "Case {} did not match", case.name);

    assert_eq!(
        sessions.len(),
        usize::try_from(case.session_count).unwrap_or(usize::MAX),
        "Case {} produced the wrong number of sessions",
        case.name
    );
    assert!(
        sessions.windows(2).all(|pair| pair[0].start_instant < pair[1].start_instant),
        "Case {} is not strictly ascending",
        case.name
    );
    for session in &sessions {
        let (local_date, local_start) = to_local(session.start_instant, rule.timezone_offset_minutes);
        let weekday_rule = rule
            .rule_for(chrono::Datelike::weekday(&local_date))
            .unwrap_or_else(|| panic!("Case {} produced a session on {local_date}", case.name));
        assert_eq!(weekday_rule.local_start_time, local_start, "Case {}", case.name);
        assert!(session.end_instant > session.start_instant, "Case {}", case.name);
    }
}

fn parse_local_time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M")
        .unwrap_or_else(|err| panic!("Failed to parse local time {value}: {err}"))
}

fn parse_rfc3339(value: &str) -> DateTime<chrono::FixedOffset> {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|err| panic!("Failed to parse rfc3339 value {value}: {err}"))
}
