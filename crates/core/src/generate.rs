//! Default schedule generation.
//!
//! Produces the initial grid for a new timetable: consecutive slots from
//! the day start, the same layout on all six days, with tea and lunch
//! breaks at their customary positions.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{TimetableError, TimetableResult};
use crate::models::period::{hhmm, BreakKind, Period};
use crate::models::timetable::Schedule;

/// Tea break slot, present once a day reaches this many periods.
const TEA_BREAK_INDEX: usize = 2;
const TEA_BREAK_MIN_PERIODS: u32 = 4;

/// Lunch break slot, present once a day reaches this many periods.
const LUNCH_BREAK_INDEX: usize = 5;
const LUNCH_BREAK_MIN_PERIODS: u32 = 6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateParams {
    pub periods_per_day: u32,
    #[serde(with = "hhmm")]
    pub day_start_time: NaiveTime,
    /// Minutes per period.
    pub period_duration: u32,
}

pub fn generate_schedule(params: &GenerateParams) -> TimetableResult<Schedule> {
    if params.periods_per_day == 0 || params.periods_per_day > 12 {
        return Err(TimetableError::Validation(format!(
            "periodsPerDay must be between 1 and 12, got {}",
            params.periods_per_day
        )));
    }
    if params.period_duration < 5 || params.period_duration > 240 {
        return Err(TimetableError::Validation(format!(
            "periodDuration must be between 5 and 240 minutes, got {}",
            params.period_duration
        )));
    }

    let mut day = Vec::with_capacity(params.periods_per_day as usize);
    let mut start = params.day_start_time;
    let slot = Duration::minutes(i64::from(params.period_duration));
    for index in 0..params.periods_per_day as usize {
        let end = start + slot;
        let period = match break_kind_for(index, params.periods_per_day) {
            Some(kind) => Period::break_slot(start, end, kind),
            None => Period::lesson(start, end),
        };
        day.push(period);
        start = end;
    }

    // The same sequence on every day keeps slot timing and break placement
    // synchronized across the week.
    Schedule::from_days(std::array::from_fn(|_| day.clone()))
}

fn break_kind_for(index: usize, periods_per_day: u32) -> Option<BreakKind> {
    if index == TEA_BREAK_INDEX && periods_per_day >= TEA_BREAK_MIN_PERIODS {
        Some(BreakKind::Tea)
    } else if index == LUNCH_BREAK_INDEX && periods_per_day >= LUNCH_BREAK_MIN_PERIODS {
        Some(BreakKind::Lunch)
    } else {
        None
    }
}
