//! Single-cell editing of lesson periods.
//!
//! Break cells are not editable through this path; they only move via
//! [`relocate_break`](crate::relocate).

use crate::errors::{TimetableError, TimetableResult};
use crate::models::period::{Assignment, Period};
use crate::models::timetable::{Schedule, Timetable};
use crate::models::weekday::Weekday;

impl Schedule {
    /// Current content of a lesson cell, as loaded when the editor opens.
    /// Rejects break cells and out-of-range positions.
    pub fn assignment_at(&self, day: Weekday, index: usize) -> TimetableResult<Assignment> {
        let period = self.lesson_cell(day, index)?;
        Ok(Assignment {
            subject: period.subject,
            teacher: period.teacher,
            room: period.room.clone(),
        })
    }

    /// Replaces the content of one lesson cell. Every other cell and all
    /// slot timings are untouched.
    pub fn assign(
        &self,
        day: Weekday,
        index: usize,
        assignment: Assignment,
    ) -> TimetableResult<Schedule> {
        self.lesson_cell(day, index)?;

        let mut next = self.clone();
        let period = &mut next.days[day.index()][index];
        period.subject = assignment.subject;
        period.teacher = assignment.teacher;
        period.room = assignment.room;
        Ok(next)
    }

    /// Empties one lesson cell: no subject, no teacher, empty room. The
    /// cell stays a lesson slot.
    pub fn clear(&self, day: Weekday, index: usize) -> TimetableResult<Schedule> {
        self.assign(day, index, Assignment::default())
    }

    fn lesson_cell(&self, day: Weekday, index: usize) -> TimetableResult<&Period> {
        self.check_index(index)?;
        let period = &self.days[day.index()][index];
        if period.is_break {
            return Err(TimetableError::Validation(format!(
                "period {index} on {day} is a break and cannot be edited"
            )));
        }
        Ok(period)
    }
}

impl Timetable {
    pub fn assignment_at(&self, day: Weekday, index: usize) -> TimetableResult<Assignment> {
        self.schedule.assignment_at(day, index)
    }

    pub fn assign(
        &self,
        day: Weekday,
        index: usize,
        assignment: Assignment,
    ) -> TimetableResult<Timetable> {
        Ok(Timetable {
            schedule: self.schedule.assign(day, index, assignment)?,
            ..self.clone()
        })
    }

    pub fn clear(&self, day: Weekday, index: usize) -> TimetableResult<Timetable> {
        Ok(Timetable {
            schedule: self.schedule.clear(day, index)?,
            ..self.clone()
        })
    }
}
