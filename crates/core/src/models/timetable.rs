use chrono::NaiveTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::errors::{TimetableError, TimetableResult};
use crate::models::period::{hhmm, Period};
use crate::models::weekday::Weekday;

/// The six-day period matrix.
///
/// Days are stored in fixed Monday..Saturday order and addressed by
/// [`Weekday`]; the wire format labels each entry with the day name. A
/// `Schedule` can only be built through [`Schedule::from_days`] or
/// deserialization, both of which enforce:
///
/// - all six days have the same number of periods,
/// - `start_time`/`end_time` at a given position agree across all days,
/// - breaks occupy the same positions on every day,
/// - break cells carry a break type and no lesson content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub(crate) days: [Vec<Period>; 6],
}

impl Schedule {
    pub fn from_days(days: [Vec<Period>; 6]) -> TimetableResult<Self> {
        let schedule = Schedule { days };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn periods_per_day(&self) -> usize {
        self.days[0].len()
    }

    pub fn day(&self, day: Weekday) -> &[Period] {
        &self.days[day.index()]
    }

    pub fn cell(&self, day: Weekday, index: usize) -> Option<&Period> {
        self.days[day.index()].get(index)
    }

    /// Distinct subjects referenced anywhere in the grid.
    pub fn referenced_subjects(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .days
            .iter()
            .flatten()
            .filter_map(|period| period.subject)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Distinct teachers referenced anywhere in the grid.
    pub fn referenced_teachers(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .days
            .iter()
            .flatten()
            .filter_map(|period| period.teacher)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub(crate) fn check_index(&self, index: usize) -> TimetableResult<()> {
        if index >= self.periods_per_day() {
            return Err(TimetableError::Validation(format!(
                "period index {} out of range (0..{})",
                index,
                self.periods_per_day()
            )));
        }
        Ok(())
    }

    fn validate(&self) -> TimetableResult<()> {
        let expected = self.days[0].len();
        for day in Weekday::ALL {
            let count = self.day(day).len();
            if count != expected {
                return Err(TimetableError::Validation(format!(
                    "{day} has {count} periods, monday has {expected}"
                )));
            }
        }

        let monday = &self.days[Weekday::Monday.index()];
        for day in &Weekday::ALL[1..] {
            for (index, (reference, period)) in monday.iter().zip(self.day(*day)).enumerate() {
                if reference.start_time != period.start_time
                    || reference.end_time != period.end_time
                {
                    return Err(TimetableError::Validation(format!(
                        "timing of period {index} on {day} differs from monday"
                    )));
                }
                if reference.is_break != period.is_break {
                    return Err(TimetableError::Validation(format!(
                        "break placement of period {index} on {day} differs from monday"
                    )));
                }
            }
        }

        for day in Weekday::ALL {
            for (index, period) in self.day(day).iter().enumerate() {
                if !period.content_is_consistent() {
                    return Err(TimetableError::Validation(format!(
                        "period {index} on {day} mixes break and lesson content"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct WireDayRef<'a> {
    day: Weekday,
    periods: &'a [Period],
}

#[derive(Deserialize)]
struct WireDay {
    day: Weekday,
    periods: Vec<Period>,
}

impl Serialize for Schedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<WireDayRef<'_>> = Weekday::ALL
            .iter()
            .map(|&day| WireDayRef {
                day,
                periods: self.day(day),
            })
            .collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<WireDay>::deserialize(deserializer)?;
        if entries.len() != Weekday::COUNT {
            return Err(D::Error::custom(format!(
                "expected {} day entries, got {}",
                Weekday::COUNT,
                entries.len()
            )));
        }

        let mut days: [Vec<Period>; 6] = Default::default();
        let mut seen = [false; 6];
        for entry in entries {
            let slot = entry.day.index();
            if seen[slot] {
                return Err(D::Error::custom(format!("duplicate day entry: {}", entry.day)));
            }
            seen[slot] = true;
            days[slot] = entry.periods;
        }

        // Six entries with no duplicates cover every day.
        Schedule::from_days(days).map_err(D::Error::custom)
    }
}

/// The persisted timetable aggregate for one class and optional section.
///
/// All mutating operations are pure: they borrow `self` and return a new
/// aggregate, so a rejected operation can never leave a half-applied grid
/// behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub class: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub section: Option<Uuid>,
    pub academic_year: String,
    pub periods_per_day: u32,
    /// Length of one period, in minutes.
    pub period_duration: u32,
    #[serde(with = "hhmm")]
    pub day_start_time: NaiveTime,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimetableRequest {
    pub class: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub section: Option<Uuid>,
    pub academic_year: String,
    pub periods_per_day: u32,
    pub period_duration: u32,
    #[serde(with = "hhmm")]
    pub day_start_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePeriodRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub teacher: Option<Uuid>,
    #[serde(default)]
    pub room: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocateBreakRequest {
    pub source_index: usize,
    pub target_index: usize,
}
