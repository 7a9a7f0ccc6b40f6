//! Some utility functions

use crate::projector::MarkedDates;
use crate::task::{Task, TaskTime};

/// A one-line description of a task, e.g. `9:05 PM	Prep (@Sam)`
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!("{}\t{}", TaskTime::label(task.time()), task.title());
    if task.assignee().is_empty() == false {
        line.push_str(&format!(" (@{})", task.assignee()));
    }
    line
}

/// A debug utility that pretty-prints the tasks of a day
pub fn print_day(date: &str, tasks: &[Task]) {
    println!("DAY {}", date);
    if tasks.is_empty() {
        println!("    No tasks scheduled for this day.");
    }
    for task in tasks {
        println!("    {}", format_task_line(task));
        if task.notes().is_empty() == false {
            println!("        {}", task.notes());
        }
    }
}

/// A debug utility that pretty-prints calendar marks
pub fn print_marks(marks: &MarkedDates) {
    for (date, mark) in marks.iter() {
        let selection = if mark.is_selected() { "*" } else { " " };
        let dot = if mark.has_tasks() { "•" } else { " " };
        println!("    {}{} {}", selection, dot, date);
    }
}
