//! Argument parsing and command execution for the `classbook` binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use classbook_core::types::CalendarMonth;
use classbook_schedule::model::RecurrenceRule;
use classbook_service::error::ServiceError;
use classbook_service::scheduling::service::SchedulingService;
use classbook_service::snapshot::CalendarSnapshot;
use uuid::Uuid;

use crate::report::{DayReport, ExpansionReport, MonthReport};

pub const USAGE: &str = "\
Usage:
  classbook expand <rule.json>
  classbook day <snapshot.json> <teacher-id> <YYYY-MM-DD>
  classbook month <snapshot.json> <teacher-id> <YYYY-MM>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Expand {
        rule_path: PathBuf,
    },
    Day {
        snapshot_path: PathBuf,
        teacher_id: Uuid,
        date: NaiveDate,
    },
    Month {
        snapshot_path: PathBuf,
        teacher_id: Uuid,
        month: CalendarMonth,
    },
}

impl Command {
    /// ## Summary
    /// Parses the arguments following the program name.
    ///
    /// ## Errors
    /// Returns an error carrying the usage text for an unknown command, a
    /// wrong argument count, or an unparseable id, date or month.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["expand", rule_path] => Ok(Self::Expand {
                rule_path: PathBuf::from(rule_path),
            }),
            ["day", snapshot_path, teacher_id, date] => Ok(Self::Day {
                snapshot_path: PathBuf::from(snapshot_path),
                teacher_id: parse_teacher_id(teacher_id)?,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date `{date}`, expected YYYY-MM-DD"))?,
            }),
            ["month", snapshot_path, teacher_id, month] => Ok(Self::Month {
                snapshot_path: PathBuf::from(snapshot_path),
                teacher_id: parse_teacher_id(teacher_id)?,
                month: month
                    .parse()
                    .with_context(|| format!("Invalid month `{month}`, expected YYYY-MM"))?,
            }),
            _ => bail!("{USAGE}"),
        }
    }

    /// ## Summary
    /// Runs the command and returns the pretty-printed JSON result.
    ///
    /// ## Errors
    /// Returns an error if an input file cannot be read or parsed, or if the
    /// scheduling operation fails.
    pub fn run(&self, service: &SchedulingService) -> Result<String> {
        match self {
            Self::Expand { rule_path } => {
                let rule: RecurrenceRule = read_json(rule_path)?;
                let booking_id = Uuid::new_v4();
                let sessions = service.expand_recurrence(booking_id, &rule)?;
                tracing::debug!(%booking_id, sessions = sessions.len(), "Expanded rule");

                Ok(serde_json::to_string_pretty(&ExpansionReport {
                    booking_id,
                    sessions,
                })?)
            }
            Self::Day {
                snapshot_path,
                teacher_id,
                date,
            } => {
                let snapshot = load_snapshot(snapshot_path)?;
                let index = service.build_calendar_index(&snapshot, None);

                let rejection = match service.can_mark_available(&index, *teacher_id, *date) {
                    Ok(()) => None,
                    Err(ServiceError::Rejected(rejection)) => Some(rejection),
                    Err(e) => return Err(e.into()),
                };

                Ok(serde_json::to_string_pretty(&DayReport {
                    teacher_id: *teacher_id,
                    date: *date,
                    sessions: index.sessions_on(*teacher_id, *date).to_vec(),
                    availability: index.availability_on(*teacher_id, *date).cloned(),
                    can_mark_available: rejection.is_none(),
                    rejection,
                })?)
            }
            Self::Month {
                snapshot_path,
                teacher_id,
                month,
            } => {
                let snapshot = load_snapshot(snapshot_path)?;
                let index = service.build_calendar_index(&snapshot, Some(*month));

                let available_dates = month
                    .days()
                    .filter(|date| index.availability_on(*teacher_id, *date).is_some())
                    .collect();

                Ok(serde_json::to_string_pretty(&MonthReport {
                    teacher_id: *teacher_id,
                    month: month.to_string(),
                    dates_with_sessions: index.dates_with_sessions(*teacher_id),
                    available_dates,
                })?)
            }
        }
    }
}

fn parse_teacher_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Invalid teacher id `{raw}`"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_snapshot(path: &Path) -> Result<CalendarSnapshot> {
    let snapshot: CalendarSnapshot = read_json(path)?;
    snapshot.validate()?;
    tracing::debug!(
        path = %path.display(),
        bookings = snapshot.bookings.len(),
        availability = snapshot.availability.len(),
        "Loaded calendar snapshot"
    );
    Ok(snapshot)
}
