// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use crate::catalog::{Location, Subject, Teacher};

/// Earliest hour an event may start at.
pub const EARLIEST_HOUR: i64 = 7;

/// Latest hour an event may end at.
pub const LATEST_HOUR: i64 = 20;

/// A persisted timetable entry. The three name fields reference rows in the
/// subjects, teachers and locations tables (restrict-on-delete).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScheduleEvent {
    /// Generated row id, 0 for a not-yet-persisted event.
    pub id: i64,

    /// Name of the teacher holding the class.
    pub teacher_name: String,

    /// Room the class takes place in.
    pub room_code: String,

    /// Shortened code of the subject.
    pub subject_code: String,

    /// How mandatory attendance is.
    pub obligation: Obligation,

    /// Weekday the event occurs on.
    pub day: Weekday,

    /// First hour of the event, inclusive.
    pub start_hour: i64,

    /// Hour the event ends at, exclusive.
    pub end_hour: i64,
}

/// A [`ScheduleEvent`] joined with its subject, teacher and location rows.
/// Never persisted directly, always derived by query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FullScheduleEvent {
    pub event: ScheduleEvent,
    pub subject: Subject,
    pub teacher: Teacher,
    pub location: Location,
}

/// How mandatory attending a scheduled class is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Obligation {
    /// Attendance is required.
    #[default]
    #[serde(rename = "P")]
    Mandatory,

    /// Attendance is required for part of the classes.
    #[serde(rename = "PV")]
    PartiallyMandatory,

    /// Attendance is optional.
    #[serde(rename = "V")]
    Optional,
}

const OBLIGATION_MANDATORY: &str = "P";
const OBLIGATION_PARTIALLY_MANDATORY: &str = "PV";
const OBLIGATION_OPTIONAL: &str = "V";

impl Obligation {
    /// Human readable label for pickers and cards.
    pub fn label(&self) -> &'static str {
        match self {
            Obligation::Mandatory => "Mandatory",
            Obligation::PartiallyMandatory => "Partially mandatory",
            Obligation::Optional => "Optional",
        }
    }
}

impl AsRef<str> for Obligation {
    fn as_ref(&self) -> &str {
        match self {
            Obligation::Mandatory => OBLIGATION_MANDATORY,
            Obligation::PartiallyMandatory => OBLIGATION_PARTIALLY_MANDATORY,
            Obligation::Optional => OBLIGATION_OPTIONAL,
        }
    }
}

impl Display for Obligation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Obligation {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            OBLIGATION_MANDATORY => Ok(Obligation::Mandatory),
            OBLIGATION_PARTIALLY_MANDATORY => Ok(Obligation::PartiallyMandatory),
            OBLIGATION_OPTIONAL => Ok(Obligation::Optional),
            _ => Err(()),
        }
    }
}

/// Weekday of a timetable slot. The schedule covers Monday through Friday,
/// numbered 1 to 5 in the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in schedule order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// The 1-based day number used in the store (Monday = 1).
    pub fn number(self) -> i64 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
        }
    }

    /// Parse a 1-based day number.
    pub fn from_number(n: i64) -> Option<Weekday> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            _ => None,
        }
    }

    /// Three letter label, as shown in the grid and the widget.
    pub fn short_label(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        };
        write!(f, "{name}")
    }
}
