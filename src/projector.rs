//! Derives the month-view calendar marks from a task collection
//!
//! Marks are never persisted: they are a pure function of the tasks (and of the selected day),
//! that can be computed again whenever needed.

use std::collections::BTreeMap;

use bitflags::bitflags;
use chrono::Datelike;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::config::MarkStyle;
use crate::task::{Task, TaskDate};

/// The key of the single dot that is drawn on days that have tasks
pub const TASK_DOT_KEY: &str = "taskDot";

bitflags! {
    pub struct MarkFlags: u8 {
        /// The day has at least one task (rendered as a dot)
        const HAS_TASKS = 1;
        /// The day is the currently selected one (rendered as a highlighted background)
        const SELECTED = 2;
    }
}

/// The visual annotation of a single day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    flags: MarkFlags,
}

impl Mark {
    /// The mark of a day that has tasks
    pub fn dot() -> Self {
        Self { flags: MarkFlags::HAS_TASKS }
    }

    /// The mark of the selected day, that has tasks
    pub fn selected_dot() -> Self {
        Self { flags: MarkFlags::HAS_TASKS | MarkFlags::SELECTED }
    }

    pub fn flags(&self) -> MarkFlags {
        self.flags
    }

    pub fn has_tasks(&self) -> bool {
        self.flags.contains(MarkFlags::HAS_TASKS)
    }

    pub fn is_selected(&self) -> bool {
        self.flags.contains(MarkFlags::SELECTED)
    }
}


/// Marks of every day that has tasks, indexed by date.
///
/// Days without tasks have no entry at all.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkedDates {
    marks: BTreeMap<TaskDate, Mark>,
    style: MarkStyle,
}

impl MarkedDates {
    /// Get the mark of a given `YYYY-MM-DD` day. Other layouts match nothing
    pub fn get(&self, date: &str) -> Option<&Mark> {
        let date = TaskDate::parse_normalized(date).ok()?;
        self.marks.get(&date)
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Iterate over marked days, in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (&TaskDate, &Mark)> {
        self.marks.iter()
    }

    /// The marked days of a given month
    pub fn month(&self, year: i32, month: u32) -> impl Iterator<Item = (&TaskDate, &Mark)> {
        self.marks.iter()
            .filter(move |(date, _)| {
                let d = date.as_naive_date();
                d.year() == year && d.month() == month
            })
    }

    /// The selected day, if it has a mark.
    ///
    /// A selected day that has no task has no mark, hence this returns `None` for it.
    pub fn selected(&self) -> Option<(&TaskDate, &Mark)> {
        self.marks.iter().find(|(_, mark)| mark.is_selected())
    }

    pub fn style(&self) -> &MarkStyle {
        &self.style
    }
}

/// Serializes as a `{"YYYY-MM-DD": mark}` object, that month views can render as-is
impl Serialize for MarkedDates {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.marks.len()))?;
        for (date, mark) in &self.marks {
            map.serialize_entry(date, &StyledMark { mark, style: &self.style })?;
        }
        map.end()
    }
}

struct StyledMark<'a> {
    mark: &'a Mark,
    style: &'a MarkStyle,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Dot {
    key: &'static str,
    color: String,
    selected_dot_color: String,
}

impl<'a> Serialize for StyledMark<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let selected = self.mark.is_selected();
        let n_fields = if selected { 3 } else { 1 };
        let mut state = serializer.serialize_struct("Mark", n_fields)?;

        let dots: Vec<Dot> = if self.mark.has_tasks() {
            vec![Dot {
                key: TASK_DOT_KEY,
                color: self.style.dot_color.to_hex_string(),
                selected_dot_color: self.style.selected_dot_color.to_hex_string(),
            }]
        } else {
            Vec::new()
        };
        state.serialize_field("dots", &dots)?;

        if selected {
            state.serialize_field("selected", &true)?;
            state.serialize_field("selectedColor", &self.style.selected_color.to_hex_string())?;
        }
        state.end()
    }
}



/// Computes [`MarkedDates`] with a given style
#[derive(Clone, Debug, Default)]
pub struct Projector {
    style: MarkStyle,
}

impl Projector {
    pub fn new(style: MarkStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &MarkStyle {
        &self.style
    }

    /// Compute the marks of a task collection.
    ///
    /// This does not depend on the order of `tasks`. `selected` is a `YYYY-MM-DD` day (any other layout selects nothing); it is flagged only if it has tasks.
    pub fn project(&self, tasks: &[Task], selected: Option<&str>) -> MarkedDates {
        let mut marks = BTreeMap::new();
        for task in tasks {
            marks.entry(*task.date())
                .or_insert(Mark { flags: MarkFlags::empty() })
                .flags.insert(MarkFlags::HAS_TASKS);
        }

        if let Some(raw) = selected {
            // Same string comparison as day lookups: `2024/06/05` selects nothing
            match TaskDate::parse_normalized(raw) {
                Err(err) => log::debug!("Ignoring selection: {}", err),
                Ok(date) => {
                    if let Some(mark) = marks.get_mut(&date) {
                        mark.flags.insert(MarkFlags::SELECTED);
                    }
                },
            }
        }

        MarkedDates { marks, style: self.style.clone() }
    }
}

/// Compute the marks of a task collection, with the default style.
///
/// See [`Projector::project`]
pub fn project(tasks: &[Task], selected: Option<&str>) -> MarkedDates {
    Projector::default().project(tasks, selected)
}
