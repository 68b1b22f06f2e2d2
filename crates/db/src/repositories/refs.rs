//! Read-only lookups of reference data owned by other modules (subjects,
//! teachers, classes, sections). Nothing here writes.

use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbClass, DbSection, DbSubject, DbTeacher};

pub async fn get_subject(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSubject>> {
    let subject = sqlx::query_as::<_, DbSubject>("SELECT id, name FROM subjects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(subject)
}

pub async fn get_subjects_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbSubject>> {
    let subjects =
        sqlx::query_as::<_, DbSubject>("SELECT id, name FROM subjects WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;

    Ok(subjects)
}

pub async fn get_teacher(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTeacher>> {
    let teacher = sqlx::query_as::<_, DbTeacher>(
        "SELECT id, first_name, last_name FROM teachers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(teacher)
}

pub async fn get_teachers_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbTeacher>> {
    let teachers = sqlx::query_as::<_, DbTeacher>(
        "SELECT id, first_name, last_name FROM teachers WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(teachers)
}

pub async fn get_class(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbClass>> {
    let class = sqlx::query_as::<_, DbClass>("SELECT id, name FROM classes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(class)
}

pub async fn get_section(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSection>> {
    let section =
        sqlx::query_as::<_, DbSection>("SELECT id, class_id, name FROM sections WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(section)
}
