use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use classtable_core::errors::{TimetableError, TimetableResult};
use classtable_core::models::timetable::{Schedule, Timetable};

/// Stored timetable row. The grid lives in the `schedule` JSONB column as
/// the full wire-shaped day array; updates always replace the whole
/// document, never a diff.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimetable {
    pub id: Uuid,
    pub class_id: Uuid,
    pub section_id: Option<Uuid>,
    pub academic_year: String,
    pub periods_per_day: i32,
    pub period_duration: i32,
    pub day_start_time: NaiveTime,
    pub schedule: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbTimetable {
    /// Decodes the stored row into the domain aggregate, re-validating the
    /// grid invariants on the way in.
    pub fn into_timetable(self) -> TimetableResult<Timetable> {
        let schedule: Schedule = serde_json::from_value(self.schedule)
            .map_err(|e| TimetableError::Validation(format!("stored schedule is invalid: {e}")))?;

        Ok(Timetable {
            id: self.id,
            class: self.class_id,
            section: self.section_id,
            academic_year: self.academic_year,
            periods_per_day: self.periods_per_day as u32,
            period_duration: self.period_duration as u32,
            day_start_time: self.day_start_time,
            schedule,
        })
    }
}

/// Serializes a schedule into the JSONB document shape.
pub fn schedule_to_json(schedule: &Schedule) -> TimetableResult<serde_json::Value> {
    serde_json::to_value(schedule).map_err(|e| TimetableError::Internal(Box::new(e)))
}

/// Column values for inserting a new timetable row.
#[derive(Debug, Clone)]
pub struct NewTimetable {
    pub class_id: Uuid,
    pub section_id: Option<Uuid>,
    pub academic_year: String,
    pub periods_per_day: i32,
    pub period_duration: i32,
    pub day_start_time: NaiveTime,
    pub schedule: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubject {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTeacher {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClass {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSection {
    pub id: Uuid,
    pub class_id: Uuid,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use classtable_core::generate::{generate_schedule, GenerateParams};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_row() -> DbTimetable {
        let schedule = generate_schedule(&GenerateParams {
            periods_per_day: 6,
            day_start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            period_duration: 45,
        })
        .unwrap();

        DbTimetable {
            id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
            section_id: None,
            academic_year: "2025-2026".to_string(),
            periods_per_day: 6,
            period_duration: 45,
            day_start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            schedule: schedule_to_json(&schedule).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_decodes_into_timetable() {
        let row = sample_row();
        let id = row.id;
        let class_id = row.class_id;

        let timetable = row.into_timetable().expect("Failed to decode row");
        assert_eq!(timetable.id, id);
        assert_eq!(timetable.class, class_id);
        assert_eq!(timetable.schedule.periods_per_day(), 6);
    }

    #[test]
    fn test_corrupt_schedule_column_is_rejected() {
        let mut row = sample_row();
        row.schedule = json!([{ "day": "monday", "periods": [] }]);

        let result = row.into_timetable();
        assert!(matches!(
            result,
            Err(TimetableError::Validation(_))
        ));
    }
}
