//! To-do tasks, bound to a calendar day

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{NaiveDate, NaiveTime, Timelike};
use uuid::Uuid;

use crate::error::ValidationError;

/// The only textual form dates are stored and compared with
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// The only textual form times are stored with
pub const TIME_FORMAT: &str = "%H:%M";

/// Other date layouts that are accepted as input, and normalized to [`DATE_FORMAT`]
const ACCEPTED_DATE_FORMATS: [&str; 2] = [DATE_FORMAT, "%Y/%m/%d"];
/// Other time layouts that are accepted as input, and normalized to [`TIME_FORMAT`]
const ACCEPTED_TIME_FORMATS: [&str; 3] = [TIME_FORMAT, "%H:%M:%S", "%I:%M %p"];


/// Globally unique, immutable identifier of a task
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}



/// A calendar day, always rendered as `YYYY-MM-DD`.
///
/// This is the partition key of every day-based query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskDate(NaiveDate);

impl TaskDate {
    /// The current day, in the local time zone
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a date that must already be in its stored `YYYY-MM-DD` form
    pub fn parse_normalized(s: &str) -> Result<Self, ValidationError> {
        let date: TaskDate = s.parse()?;
        if date.to_string() != s {
            return Err(ValidationError::InvalidDate(s.to_string()));
        }
        Ok(date)
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for TaskDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for TaskDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if has_date_shape(trimmed) == false {
            return Err(ValidationError::InvalidDate(s.to_string()));
        }
        ACCEPTED_DATE_FORMATS.iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidDate(s.to_string()))
    }
}

/// Four unsigned year digits, then one or two digits for both the month and the day
fn has_date_shape(s: &str) -> bool {
    let separator = if s.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = s.split(separator).collect();
    if parts.len() != 3 {
        return false;
    }
    let all_digits = |part: &str| part.is_empty() == false && part.bytes().all(|b| b.is_ascii_digit());

    parts[0].len() == 4 && all_digits(parts[0])
        && parts[1].len() <= 2 && all_digits(parts[1])
        && parts[2].len() <= 2 && all_digits(parts[2])
}

impl Display for TaskDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Used to support serde
impl Serialize for TaskDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskDate {
    fn deserialize<D>(deserializer: D) -> Result<TaskDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Stored dates are never normalized on the fly: anything else than `YYYY-MM-DD` is invalid
        let s = String::deserialize(deserializer)?;
        TaskDate::parse_normalized(&s).map_err(serde::de::Error::custom)
    }
}



/// A clock time, always rendered as a 24-hour `HH:mm`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskTime(NaiveTime);

impl TaskTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }

    /// The label shown in a day list: `9:05 PM`, or `All Day` for tasks without a time
    pub fn label(time: Option<&TaskTime>) -> String {
        match time {
            Some(t) => t.0.format("%-I:%M %p").to_string(),
            None => String::from("All Day"),
        }
    }
}

impl FromStr for TaskTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ACCEPTED_TIME_FORMATS.iter()
            .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
            // seconds are not part of the stored form
            .and_then(|t| Self::from_hm(t.hour(), t.minute()))
            .ok_or_else(|| ValidationError::InvalidTime(s.to_string()))
    }
}

impl Display for TaskTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

/// Used to support serde
impl Serialize for TaskTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Missing, `null` and empty times all mean "all day"
fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<TaskTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}



/// A to-do task, as it is persisted.
///
/// Tasks are immutable once they have been created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    assignee: String,
    date: TaskDate,
    /// `None` means "all day"
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    time: Option<TaskTime>,
}

impl Task {
    pub fn id(&self) -> &TaskId            { &self.id       }
    pub fn title(&self) -> &str            { &self.title    }
    pub fn notes(&self) -> &str            { &self.notes    }
    pub fn assignee(&self) -> &str         { &self.assignee }
    pub fn date(&self) -> &TaskDate        { &self.date     }
    pub fn time(&self) -> Option<&TaskTime> { self.time.as_ref() }

    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }
}



/// The content of the New-Task form, before it has been validated and normalized into a [`Task`]
#[derive(Clone, Debug, Default)]
pub struct NewTask {
    id: Option<TaskId>,
    title: String,
    notes: String,
    assignee: String,
    date: Option<String>,
    time: Option<String>,
}

impl NewTask {
    /// A new task scheduled now, with empty notes and no assignee
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Force the id of this task, instead of having a random one picked when it is stored
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = notes.into();
        self
    }
    pub fn with_assignee<S: Into<String>>(mut self, assignee: S) -> Self {
        self.assignee = assignee.into();
        self
    }
    /// Any layout accepted by [`TaskDate`]'s `FromStr` can be used
    pub fn with_date<S: Into<String>>(mut self, date: S) -> Self {
        self.date = Some(date.into());
        self
    }
    /// Any layout accepted by [`TaskTime`]'s `FromStr` can be used. An empty string means "all day"
    pub fn with_time<S: Into<String>>(mut self, time: S) -> Self {
        self.time = Some(time.into());
        self
    }
    /// Do not stamp a time on this task
    pub fn all_day(self) -> Self {
        self.with_time("")
    }

    pub fn id(&self) -> Option<&TaskId> {
        self.id.as_ref()
    }

    /// Validate and normalize this draft.
    ///
    /// Text fields are trimmed, the date defaults to today and the time to the current time of day,
    /// and a random id is picked if none was set. An empty time (see [`NewTask::all_day`]) means "all day".
    pub fn into_task(self) -> Result<Task, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let now = chrono::Local::now().naive_local();
        let date = match &self.date {
            None => TaskDate(now.date()),
            Some(raw) => raw.parse()?,
        };
        let time = match &self.time {
            None => TaskTime::from_hm(now.hour(), now.minute()),
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw.parse()?),
        };

        Ok(Task {
            id: self.id.unwrap_or_else(TaskId::random),
            title,
            notes: self.notes.trim().to_string(),
            assignee: self.assignee.trim().to_string(),
            date,
            time,
        })
    }
}
