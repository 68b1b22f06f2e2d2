use axum::Json;
use mockall::predicate;
use serde_json::{json, Value};
use uuid::Uuid;

use classtable_api::middleware::error_handling::AppError;
use classtable_core::errors::TimetableError;
use classtable_core::models::period::Assignment;
use classtable_core::models::timetable::Timetable;
use classtable_core::models::weekday::Weekday;
use classtable_db::models::{schedule_to_json, DbSubject};

use crate::test_utils::{sample_row, TestContext};

// Test wrappers replicate the handler logic against mock repositories.

async fn get_timetable_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
) -> Result<Json<Timetable>, AppError> {
    match ctx.timetable_repo.get_timetable_by_id(id).await? {
        Some(row) => Ok(Json(row.into_timetable()?)),
        None => Err(AppError(TimetableError::NotFound(format!(
            "Timetable with ID {} not found",
            id
        )))),
    }
}

async fn update_period_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    day: Weekday,
    index: usize,
    assignment: Assignment,
) -> Result<Json<Timetable>, AppError> {
    if let Some(subject_id) = assignment.subject {
        ctx.refs_repo
            .get_subject(subject_id)
            .await?
            .ok_or_else(|| TimetableError::Validation(format!("Unknown subject {}", subject_id)))?;
    }

    let row = ctx
        .timetable_repo
        .get_timetable_by_id(id)
        .await?
        .ok_or_else(|| TimetableError::NotFound(format!("Timetable with ID {} not found", id)))?;
    let timetable = row.into_timetable()?;
    let updated = timetable.assign(day, index, assignment)?;

    let schedule = schedule_to_json(&updated.schedule)?;
    let row = ctx.timetable_repo.replace_schedule(id, schedule).await?;
    Ok(Json(row.into_timetable()?))
}

async fn relocate_break_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    source_index: usize,
    target_index: usize,
) -> Result<Json<Timetable>, AppError> {
    let row = ctx
        .timetable_repo
        .get_timetable_by_id(id)
        .await?
        .ok_or_else(|| TimetableError::NotFound(format!("Timetable with ID {} not found", id)))?;
    let timetable = row.into_timetable()?;
    let updated = timetable.relocate_break(source_index, target_index)?;

    let schedule = schedule_to_json(&updated.schedule)?;
    let row = ctx.timetable_repo.replace_schedule(id, schedule).await?;
    Ok(Json(row.into_timetable()?))
}

async fn delete_timetable_wrapper(ctx: &mut TestContext, id: Uuid) -> Result<(), AppError> {
    let deleted = ctx.timetable_repo.delete_timetable(id).await?;
    if !deleted {
        return Err(AppError(TimetableError::NotFound(format!(
            "Timetable with ID {} not found",
            id
        ))));
    }
    Ok(())
}

#[tokio::test]
async fn test_get_timetable_returns_stored_grid() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let row = sample_row(id);
    let expected_class = row.class_id;

    ctx.timetable_repo
        .expect_get_timetable_by_id()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(row.clone())));

    let Json(timetable) = get_timetable_wrapper(&mut ctx, id)
        .await
        .expect("Request failed");

    assert_eq!(timetable.id, id);
    assert_eq!(timetable.class, expected_class);
    assert_eq!(timetable.schedule.periods_per_day(), 6);
}

#[tokio::test]
async fn test_get_timetable_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_get_timetable_by_id()
        .returning(|_| Ok(None));

    let result = get_timetable_wrapper(&mut ctx, id).await;
    assert!(matches!(
        result,
        Err(AppError(TimetableError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_update_period_persists_whole_document() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let subject = Uuid::new_v4();
    let row = sample_row(id);

    ctx.refs_repo.expect_get_subject().returning(|subject_id| {
        Ok(Some(DbSubject {
            id: subject_id,
            name: "Mathematics".to_string(),
        }))
    });

    let stored = row.clone();
    ctx.timetable_repo
        .expect_get_timetable_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let base = row.clone();
    ctx.timetable_repo
        .expect_replace_schedule()
        .withf(move |_, schedule: &Value| {
            // The whole six-day document is sent, with exactly one cell
            // changed.
            let days = schedule.as_array().unwrap();
            days.len() == 6
                && days[0]["periods"][1]["subject"] == json!(subject)
                && days[1]["periods"][1].get("subject").is_none()
        })
        .returning(move |_, schedule| {
            let mut updated = base.clone();
            updated.schedule = schedule;
            Ok(updated)
        });

    let Json(timetable) = update_period_wrapper(
        &mut ctx,
        id,
        Weekday::Monday,
        1,
        Assignment {
            subject: Some(subject),
            teacher: None,
            room: "101".to_string(),
        },
    )
    .await
    .expect("Request failed");

    let cell = timetable.schedule.cell(Weekday::Monday, 1).unwrap();
    assert_eq!(cell.subject, Some(subject));
    assert_eq!(cell.room, "101");
}

#[tokio::test]
async fn test_update_period_rejects_break_cell() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let row = sample_row(id);

    // No replace_schedule expectation: a rejected edit must never persist.
    ctx.timetable_repo
        .expect_get_timetable_by_id()
        .returning(move |_| Ok(Some(row.clone())));

    let result =
        update_period_wrapper(&mut ctx, id, Weekday::Monday, 2, Assignment::default()).await;

    assert!(matches!(
        result,
        Err(AppError(TimetableError::Validation(_)))
    ));
}

#[tokio::test]
async fn test_update_period_rejects_unknown_subject() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.refs_repo.expect_get_subject().returning(|_| Ok(None));

    let result = update_period_wrapper(
        &mut ctx,
        id,
        Weekday::Monday,
        1,
        Assignment {
            subject: Some(Uuid::new_v4()),
            teacher: None,
            room: String::new(),
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(AppError(TimetableError::Validation(_)))
    ));
}

#[tokio::test]
async fn test_relocate_break_moves_column_in_persisted_document() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let row = sample_row(id);

    let stored = row.clone();
    ctx.timetable_repo
        .expect_get_timetable_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let base = row.clone();
    ctx.timetable_repo
        .expect_replace_schedule()
        .withf(|_, schedule: &Value| {
            let days = schedule.as_array().unwrap();
            days.iter().all(|day| {
                day["periods"][0]["isBreak"] == json!(true)
                    && day["periods"][0]["breakType"] == json!("tea")
                    && day["periods"][2]["isBreak"] == json!(false)
            })
        })
        .returning(move |_, schedule| {
            let mut updated = base.clone();
            updated.schedule = schedule;
            Ok(updated)
        });

    let Json(timetable) = relocate_break_wrapper(&mut ctx, id, 2, 0)
        .await
        .expect("Request failed");

    assert!(timetable.schedule.cell(Weekday::Monday, 0).unwrap().is_break);
    assert!(!timetable.schedule.cell(Weekday::Monday, 2).unwrap().is_break);
}

#[tokio::test]
async fn test_relocate_break_rejects_out_of_range_target() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();
    let row = sample_row(id);

    // No replace_schedule expectation: a rejected relocation must never
    // persist.
    ctx.timetable_repo
        .expect_get_timetable_by_id()
        .returning(move |_| Ok(Some(row.clone())));

    let result = relocate_break_wrapper(&mut ctx, id, 2, 6).await;

    assert!(matches!(
        result,
        Err(AppError(TimetableError::Validation(_)))
    ));
}

#[tokio::test]
async fn test_delete_timetable() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_delete_timetable()
        .with(predicate::eq(id))
        .returning(|_| Ok(true));

    delete_timetable_wrapper(&mut ctx, id)
        .await
        .expect("Request failed");
}

#[tokio::test]
async fn test_delete_missing_timetable_is_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_delete_timetable()
        .returning(|_| Ok(false));

    let result = delete_timetable_wrapper(&mut ctx, id).await;
    assert!(matches!(
        result,
        Err(AppError(TimetableError::NotFound(_)))
    ));
}
