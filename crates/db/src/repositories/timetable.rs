use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbTimetable, NewTimetable};

pub async fn create_timetable(pool: &Pool<Postgres>, new: NewTimetable) -> Result<DbTimetable> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating timetable: id={}, class_id={}, section_id={:?}, academic_year={}",
        id,
        new.class_id,
        new.section_id,
        new.academic_year
    );

    let timetable = sqlx::query_as::<_, DbTimetable>(
        r#"
        INSERT INTO timetables (
            id, class_id, section_id, academic_year,
            periods_per_day, period_duration, day_start_time,
            schedule, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING id, class_id, section_id, academic_year,
                  periods_per_day, period_duration, day_start_time,
                  schedule, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(new.class_id)
    .bind(new.section_id)
    .bind(new.academic_year)
    .bind(new.periods_per_day)
    .bind(new.period_duration)
    .bind(new.day_start_time)
    .bind(new.schedule)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Timetable created successfully: id={}", id);
    Ok(timetable)
}

pub async fn get_timetable_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimetable>> {
    tracing::debug!("Getting timetable by id: {}", id);

    let timetable = sqlx::query_as::<_, DbTimetable>(
        r#"
        SELECT id, class_id, section_id, academic_year,
               periods_per_day, period_duration, day_start_time,
               schedule, created_at, updated_at
        FROM timetables
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if timetable.is_none() {
        tracing::debug!("Timetable not found: id={}", id);
    }

    Ok(timetable)
}

pub async fn get_timetable_by_class(
    pool: &Pool<Postgres>,
    class_id: Uuid,
    section_id: Option<Uuid>,
) -> Result<Option<DbTimetable>> {
    tracing::debug!(
        "Getting timetable by class: class_id={}, section_id={:?}",
        class_id,
        section_id
    );

    // IS NOT DISTINCT FROM also matches the section-less case
    let timetable = sqlx::query_as::<_, DbTimetable>(
        r#"
        SELECT id, class_id, section_id, academic_year,
               periods_per_day, period_duration, day_start_time,
               schedule, created_at, updated_at
        FROM timetables
        WHERE class_id = $1 AND section_id IS NOT DISTINCT FROM $2
        "#,
    )
    .bind(class_id)
    .bind(section_id)
    .fetch_optional(pool)
    .await?;

    Ok(timetable)
}

/// Replaces the whole schedule document of one timetable. Scalar slot
/// metadata (periods per day, duration, start time) never changes through
/// this path.
pub async fn replace_schedule(
    pool: &Pool<Postgres>,
    id: Uuid,
    schedule: serde_json::Value,
) -> Result<DbTimetable> {
    tracing::debug!("Replacing schedule for timetable: id={}", id);

    let timetable = sqlx::query_as::<_, DbTimetable>(
        r#"
        UPDATE timetables
        SET schedule = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, class_id, section_id, academic_year,
                  periods_per_day, period_duration, day_start_time,
                  schedule, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(schedule)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Timetable not found"))?;

    tracing::debug!("Schedule replaced successfully: id={}", id);
    Ok(timetable)
}

pub async fn delete_timetable(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting timetable: id={}", id);

    let result = sqlx::query("DELETE FROM timetables WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
