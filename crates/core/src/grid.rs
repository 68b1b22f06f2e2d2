//! Read-only presentation of the weekly grid.

use std::collections::HashMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::period::{hhmm, BreakKind, Period};
use crate::models::refs::{Subject, Teacher};
use crate::models::timetable::{Schedule, Timetable};
use crate::models::weekday::Weekday;

/// One rendered row: a slot index with its shared timing and the six
/// per-day cells in Monday..Saturday order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow<'a> {
    pub index: usize,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub cells: [&'a Period; 6],
}

/// Lookup view over a schedule. Borrowing and read-only: the grid never
/// mutates the aggregate it presents.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleGrid<'a> {
    schedule: &'a Schedule,
}

impl<'a> ScheduleGrid<'a> {
    pub fn new(schedule: &'a Schedule) -> Self {
        ScheduleGrid { schedule }
    }

    pub fn periods_per_day(&self) -> usize {
        self.schedule.periods_per_day()
    }

    /// Shared start/end of a slot. Times at a given index are equal on
    /// every day, so the Monday column answers for the week.
    pub fn slot_times(&self, index: usize) -> Option<(NaiveTime, NaiveTime)> {
        self.schedule
            .cell(Weekday::Monday, index)
            .map(|period| (period.start_time, period.end_time))
    }

    pub fn cell(&self, day: Weekday, index: usize) -> Option<&'a Period> {
        self.schedule.cell(day, index)
    }

    /// Slot indexes currently occupied by breaks.
    pub fn break_columns(&self) -> Vec<usize> {
        self.schedule
            .day(Weekday::Monday)
            .iter()
            .enumerate()
            .filter(|(_, period)| period.is_break)
            .map(|(index, _)| index)
            .collect()
    }

    /// Rows in display order, one per slot index.
    pub fn rows(&self) -> impl Iterator<Item = GridRow<'a>> + 'a {
        let schedule = self.schedule;
        (0..schedule.periods_per_day()).map(move |index| {
            let monday = &schedule.day(Weekday::Monday)[index];
            GridRow {
                index,
                start_time: monday.start_time,
                end_time: monday.end_time,
                cells: Weekday::ALL.map(|day| &schedule.day(day)[index]),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCellResponse {
    pub day: Weekday,
    pub is_break: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub break_type: Option<BreakKind>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<Subject>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub teacher: Option<Teacher>,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRowResponse {
    pub index: usize,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub cells: Vec<GridCellResponse>,
}

/// The grid with subject and teacher references resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    pub timetable_id: Uuid,
    pub rows: Vec<GridRowResponse>,
}

impl Timetable {
    pub fn grid(&self) -> ScheduleGrid<'_> {
        ScheduleGrid::new(&self.schedule)
    }

    /// Renders the grid with reference ids resolved against the given
    /// lookup maps. Ids missing from a map render as unresolved (`None`),
    /// the same as an empty cell label.
    pub fn grid_view(
        &self,
        subjects: &HashMap<Uuid, Subject>,
        teachers: &HashMap<Uuid, Teacher>,
    ) -> GridResponse {
        let rows = self
            .grid()
            .rows()
            .map(|row| GridRowResponse {
                index: row.index,
                start_time: row.start_time,
                end_time: row.end_time,
                cells: Weekday::ALL
                    .iter()
                    .zip(row.cells)
                    .map(|(&day, period)| GridCellResponse {
                        day,
                        is_break: period.is_break,
                        break_type: period.break_type,
                        subject: period
                            .subject
                            .and_then(|id| subjects.get(&id).cloned()),
                        teacher: period
                            .teacher
                            .and_then(|id| teachers.get(&id).cloned()),
                        room: period.room.clone(),
                    })
                    .collect(),
            })
            .collect();

        GridResponse {
            timetable_id: self.id,
            rows,
        }
    }
}
