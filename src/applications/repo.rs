use anyhow::Context;
use sqlx::SqlitePool;

use super::repo_types::{ApplicationFields, ApplicationPatch, JobApplication};

// Every query below filters on user_id; a row owned by someone else is
// indistinguishable from a missing one.

pub async fn create(
    db: &SqlitePool,
    user_id: i64,
    fields: &ApplicationFields,
) -> anyhow::Result<JobApplication> {
    let row = sqlx::query_as::<_, JobApplication>(
        r#"
        INSERT INTO job_applications
            (user_id, role, company, date_applied, status,
             contact_name, contact_email, location, notes, next_steps)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, role, company, date_applied, status,
                  contact_name, contact_email, location, notes, next_steps
        "#,
    )
    .bind(user_id)
    .bind(&fields.role)
    .bind(&fields.company)
    .bind(fields.date_applied)
    .bind(&fields.status)
    .bind(&fields.contact_name)
    .bind(&fields.contact_email)
    .bind(&fields.location)
    .bind(&fields.notes)
    .bind(fields.next_steps)
    .fetch_one(db)
    .await
    .context("insert job application")?;
    Ok(row)
}

pub async fn list_by_user(
    db: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<JobApplication>> {
    let rows = sqlx::query_as::<_, JobApplication>(
        r#"
        SELECT id, user_id, role, company, date_applied, status,
               contact_name, contact_email, location, notes, next_steps
          FROM job_applications
         WHERE user_id = ?
         ORDER BY date_applied DESC, id DESC
         LIMIT ? OFFSET ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("list job applications")?;
    Ok(rows)
}

pub async fn get_for_user(
    db: &SqlitePool,
    user_id: i64,
    id: i64,
) -> anyhow::Result<Option<JobApplication>> {
    let row = sqlx::query_as::<_, JobApplication>(
        r#"
        SELECT id, user_id, role, company, date_applied, status,
               contact_name, contact_email, location, notes, next_steps
          FROM job_applications
         WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get job application")?;
    Ok(row)
}

/// Applies `patch` in one statement; `None` when nothing owned matched.
pub async fn update_for_user(
    db: &SqlitePool,
    user_id: i64,
    id: i64,
    patch: &ApplicationPatch,
) -> anyhow::Result<Option<JobApplication>> {
    let row = sqlx::query_as::<_, JobApplication>(
        r#"
        UPDATE job_applications
           SET role          = COALESCE(?, role),
               company       = COALESCE(?, company),
               date_applied  = COALESCE(?, date_applied),
               status        = COALESCE(?, status),
               contact_name  = COALESCE(?, contact_name),
               contact_email = COALESCE(?, contact_email),
               location      = COALESCE(?, location),
               notes         = COALESCE(?, notes),
               next_steps    = COALESCE(?, next_steps)
         WHERE id = ? AND user_id = ?
        RETURNING id, user_id, role, company, date_applied, status,
                  contact_name, contact_email, location, notes, next_steps
        "#,
    )
    .bind(&patch.role)
    .bind(&patch.company)
    .bind(patch.date_applied)
    .bind(&patch.status)
    .bind(&patch.contact_name)
    .bind(&patch.contact_email)
    .bind(&patch.location)
    .bind(&patch.notes)
    .bind(patch.next_steps)
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("update job application")?;
    Ok(row)
}

/// Returns false when nothing owned matched.
pub async fn delete_for_user(db: &SqlitePool, user_id: i64, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        DELETE FROM job_applications
         WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await
    .context("delete job application")?;
    Ok(res.rows_affected() > 0)
}
