//! Break relocation: moving a break column to a different slot index across
//! the whole week in one transformation.

use crate::errors::{TimetableError, TimetableResult};
use crate::models::timetable::{Schedule, Timetable};
use crate::models::weekday::Weekday;

impl Schedule {
    /// Moves the break column at `source_index` to `target_index`.
    ///
    /// For every day, the break flag and break type move to the target slot
    /// while the target's lesson content moves to the vacated source slot.
    /// Slot timings stay with their positions; only content and the break
    /// flag travel, so the week's clock layout is identical before and
    /// after.
    ///
    /// The source must be a break on every day (a synchronized break
    /// column). Relocating onto another break column is rejected rather
    /// than exchanging break types. Equal indexes are a no-op.
    pub fn relocate_break(
        &self,
        source_index: usize,
        target_index: usize,
    ) -> TimetableResult<Schedule> {
        self.check_index(source_index)?;
        self.check_index(target_index)?;

        if source_index == target_index {
            return Ok(self.clone());
        }

        for day in Weekday::ALL {
            if !self.days[day.index()][source_index].is_break {
                return Err(TimetableError::Validation(format!(
                    "period {source_index} is not a break on {day}"
                )));
            }
        }
        // Break columns are synchronized, so monday answers for the week.
        if self.days[Weekday::Monday.index()][target_index].is_break {
            return Err(TimetableError::Validation(format!(
                "period {target_index} is already a break"
            )));
        }

        let mut next = self.clone();
        for periods in next.days.iter_mut() {
            let source = periods[source_index].clone();
            let target = periods[target_index].clone();

            let vacated = &mut periods[source_index];
            vacated.is_break = false;
            vacated.break_type = None;
            vacated.subject = target.subject;
            vacated.teacher = target.teacher;
            vacated.room = target.room;

            let relocated = &mut periods[target_index];
            relocated.is_break = true;
            relocated.break_type = source.break_type;
            relocated.subject = None;
            relocated.teacher = None;
            relocated.room = String::new();
        }
        Ok(next)
    }
}

impl Timetable {
    pub fn relocate_break(
        &self,
        source_index: usize,
        target_index: usize,
    ) -> TimetableResult<Timetable> {
        Ok(Timetable {
            schedule: self.schedule.relocate_break(source_index, target_index)?,
            ..self.clone()
        })
    }
}
