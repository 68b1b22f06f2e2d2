use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use classtable_core::errors::TimetableError;
use classtable_core::generate::{generate_schedule, GenerateParams};
use classtable_core::grid::GridResponse;
use classtable_core::models::period::Assignment;
use classtable_core::models::refs::{Subject, Teacher};
use classtable_core::models::timetable::{
    CreateTimetableRequest, RelocateBreakRequest, Timetable, UpdatePeriodRequest,
};
use classtable_core::models::weekday::Weekday;
use classtable_db::models::{schedule_to_json, NewTimetable};

use crate::middleware::error_handling::AppError;
use crate::ApiState;

#[derive(Debug, Deserialize)]
pub struct ClassQuery {
    pub section: Option<Uuid>,
}

async fn load_timetable(state: &ApiState, id: Uuid) -> Result<Timetable, AppError> {
    let row = classtable_db::repositories::timetable::get_timetable_by_id(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound(format!("Timetable with ID {} not found", id)))?;

    Ok(row.into_timetable()?)
}

/// Persists the transformed aggregate by replacing the whole schedule
/// document and returns the stored result.
async fn persist_schedule(state: &ApiState, timetable: &Timetable) -> Result<Json<Timetable>, AppError> {
    let schedule = schedule_to_json(&timetable.schedule)?;

    let row = classtable_db::repositories::timetable::replace_schedule(
        &state.db_pool,
        timetable.id,
        schedule,
    )
    .await
    .map_err(TimetableError::Database)?;

    Ok(Json(row.into_timetable()?))
}

#[axum::debug_handler]
pub async fn create_timetable(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimetableRequest>,
) -> Result<Json<Timetable>, AppError> {
    // The class must exist and the section, if given, must belong to it
    let class = classtable_db::repositories::refs::get_class(&state.db_pool, payload.class)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound(format!("Class {} not found", payload.class)))?;

    if let Some(section_id) = payload.section {
        let section = classtable_db::repositories::refs::get_section(&state.db_pool, section_id)
            .await
            .map_err(TimetableError::Database)?
            .ok_or_else(|| TimetableError::NotFound(format!("Section {} not found", section_id)))?;

        if section.class_id != class.id {
            return Err(AppError(TimetableError::Validation(format!(
                "Section {} does not belong to class {}",
                section_id, class.id
            ))));
        }
    }

    // One timetable per (class, section)
    let existing = classtable_db::repositories::timetable::get_timetable_by_class(
        &state.db_pool,
        payload.class,
        payload.section,
    )
    .await
    .map_err(TimetableError::Database)?;

    if existing.is_some() {
        return Err(AppError(TimetableError::Validation(
            "A timetable already exists for this class and section".to_string(),
        )));
    }

    let schedule = generate_schedule(&GenerateParams {
        periods_per_day: payload.periods_per_day,
        day_start_time: payload.day_start_time,
        period_duration: payload.period_duration,
    })?;

    let row = classtable_db::repositories::timetable::create_timetable(
        &state.db_pool,
        NewTimetable {
            class_id: payload.class,
            section_id: payload.section,
            academic_year: payload.academic_year,
            periods_per_day: payload.periods_per_day as i32,
            period_duration: payload.period_duration as i32,
            day_start_time: payload.day_start_time,
            schedule: schedule_to_json(&schedule)?,
        },
    )
    .await
    .map_err(TimetableError::Database)?;

    Ok(Json(row.into_timetable()?))
}

#[axum::debug_handler]
pub async fn get_timetable(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Timetable>, AppError> {
    let timetable = load_timetable(&state, id).await?;
    Ok(Json(timetable))
}

/// Fetch-on-select: the console requests the timetable when a class and
/// section are picked. A 404 is the "no timetable yet" signal on which the
/// client renders its create view.
#[axum::debug_handler]
pub async fn get_timetable_by_class(
    State(state): State<Arc<ApiState>>,
    Path(class_id): Path<Uuid>,
    Query(query): Query<ClassQuery>,
) -> Result<Json<Timetable>, AppError> {
    let row = classtable_db::repositories::timetable::get_timetable_by_class(
        &state.db_pool,
        class_id,
        query.section,
    )
    .await
    .map_err(TimetableError::Database)?
    .ok_or_else(|| TimetableError::NotFound(format!("No timetable for class {}", class_id)))?;

    Ok(Json(row.into_timetable()?))
}

#[axum::debug_handler]
pub async fn get_grid(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GridResponse>, AppError> {
    let timetable = load_timetable(&state, id).await?;

    let subject_rows = classtable_db::repositories::refs::get_subjects_by_ids(
        &state.db_pool,
        &timetable.schedule.referenced_subjects(),
    )
    .await
    .map_err(TimetableError::Database)?;

    let teacher_rows = classtable_db::repositories::refs::get_teachers_by_ids(
        &state.db_pool,
        &timetable.schedule.referenced_teachers(),
    )
    .await
    .map_err(TimetableError::Database)?;

    let subjects: HashMap<Uuid, Subject> = subject_rows
        .into_iter()
        .map(|row| {
            (
                row.id,
                Subject {
                    id: row.id,
                    name: row.name,
                },
            )
        })
        .collect();
    let teachers: HashMap<Uuid, Teacher> = teacher_rows
        .into_iter()
        .map(|row| {
            (
                row.id,
                Teacher {
                    id: row.id,
                    first_name: row.first_name,
                    last_name: row.last_name,
                },
            )
        })
        .collect();

    Ok(Json(timetable.grid_view(&subjects, &teachers)))
}

#[axum::debug_handler]
pub async fn update_period(
    State(state): State<Arc<ApiState>>,
    Path((id, day, index)): Path<(Uuid, Weekday, usize)>,
    Json(payload): Json<UpdatePeriodRequest>,
) -> Result<Json<Timetable>, AppError> {
    // Assignment references must resolve before anything is touched
    if let Some(subject_id) = payload.subject {
        classtable_db::repositories::refs::get_subject(&state.db_pool, subject_id)
            .await
            .map_err(TimetableError::Database)?
            .ok_or_else(|| TimetableError::Validation(format!("Unknown subject {}", subject_id)))?;
    }
    if let Some(teacher_id) = payload.teacher {
        classtable_db::repositories::refs::get_teacher(&state.db_pool, teacher_id)
            .await
            .map_err(TimetableError::Database)?
            .ok_or_else(|| TimetableError::Validation(format!("Unknown teacher {}", teacher_id)))?;
    }

    let lock = state.mutation_locks.for_timetable(id);
    let _guard = lock.lock().await;

    let timetable = load_timetable(&state, id).await?;
    let updated = timetable.assign(
        day,
        index,
        Assignment {
            subject: payload.subject,
            teacher: payload.teacher,
            room: payload.room,
        },
    )?;

    persist_schedule(&state, &updated).await
}

#[axum::debug_handler]
pub async fn clear_period(
    State(state): State<Arc<ApiState>>,
    Path((id, day, index)): Path<(Uuid, Weekday, usize)>,
) -> Result<Json<Timetable>, AppError> {
    let lock = state.mutation_locks.for_timetable(id);
    let _guard = lock.lock().await;

    let timetable = load_timetable(&state, id).await?;
    let updated = timetable.clear(day, index)?;

    persist_schedule(&state, &updated).await
}

#[axum::debug_handler]
pub async fn relocate_break(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RelocateBreakRequest>,
) -> Result<Json<Timetable>, AppError> {
    let lock = state.mutation_locks.for_timetable(id);
    let _guard = lock.lock().await;

    let timetable = load_timetable(&state, id).await?;
    let updated = timetable.relocate_break(payload.source_index, payload.target_index)?;

    tracing::debug!(
        "Relocated break for timetable {}: {} -> {}",
        id,
        payload.source_index,
        payload.target_index
    );

    persist_schedule(&state, &updated).await
}

#[axum::debug_handler]
pub async fn delete_timetable(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = classtable_db::repositories::timetable::delete_timetable(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?;

    if !deleted {
        return Err(AppError(TimetableError::NotFound(format!(
            "Timetable with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}
