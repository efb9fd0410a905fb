//! Job repository for database operations

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use common::models::{Creator, Job, JobFilter, NewJob};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use uuid::Uuid;

use super::{ApplyOutcome, JobStore};

/// PostgreSQL-backed job store
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Create a new job repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Job columns with the creator populated, read from `source` aliased as `j`
fn select_from(source: &str) -> String {
    format!(
        r#"
        SELECT j.id, j.title, j.description, j.location, j.salary, j.salary_type,
               j.negotiable, j.job_type, j.tags, j.skills, j.created_by, j.likes,
               j.applicants, j.created_at, j.updated_at,
               COALESCE(u.name, '') AS creator_name,
               u.profile_picture AS creator_picture
        FROM {source} j
        LEFT JOIN users u ON u.id = j.created_by
        "#
    )
}

/// Newest first, ties broken by id so equal timestamps keep a stable order
const NEWEST_FIRST: &str = " ORDER BY j.created_at DESC, j.id DESC";

fn list_sql() -> String {
    format!("{}{}", select_from("jobs"), NEWEST_FIRST)
}

fn list_by_creator_sql() -> String {
    format!("{} WHERE j.created_by = $1{}", select_from("jobs"), NEWEST_FIRST)
}

fn search_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(select_from("jobs"));
    builder.push(" WHERE TRUE");

    if !filter.tags.is_empty() {
        builder
            .push(" AND j.tags && ")
            .push_bind(filter.tags.clone())
            .push("::text[]");
    }
    if let Some(location) = &filter.location {
        builder
            .push(" AND j.location ILIKE ")
            .push_bind(like_pattern(location))
            .push(r" ESCAPE '\'");
    }
    if let Some(title) = &filter.title {
        builder
            .push(" AND j.title ILIKE ")
            .push_bind(like_pattern(title))
            .push(r" ESCAPE '\'");
    }
    builder.push(NEWEST_FIRST);
    builder
}

fn job_from_row(row: &PgRow) -> Result<Job> {
    Ok(Job {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        location: row.try_get("location")?,
        salary: row.try_get("salary")?,
        salary_type: row.try_get("salary_type")?,
        negotiable: row.try_get("negotiable")?,
        job_type: row.try_get("job_type")?,
        tags: row.try_get("tags")?,
        skills: row.try_get("skills")?,
        created_by: Creator {
            id: row.try_get("created_by")?,
            name: row.try_get("creator_name")?,
            profile_picture: row.try_get("creator_picture")?,
        },
        likes: row.try_get("likes")?,
        applicants: row.try_get("applicants")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn jobs_from_rows(rows: &[PgRow]) -> Result<Vec<Job>> {
    rows.iter().map(job_from_row).collect()
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards taken literally
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl JobStore for JobRepository {
    async fn create(&self, creator_id: Uuid, job: &NewJob) -> Result<Job> {
        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO jobs (title, description, location, salary, salary_type,
                                  negotiable, job_type, tags, skills, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            {}
            "#,
            select_from("inserted")
        );

        let row = sqlx::query(&sql)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.location)
            .bind(job.salary)
            .bind(&job.salary_type)
            .bind(job.negotiable)
            .bind(&job.job_type)
            .bind(&job.tags)
            .bind(&job.skills)
            .bind(creator_id)
            .fetch_one(&self.pool)
            .await?;

        job_from_row(&row)
    }

    async fn list(&self) -> Result<Vec<Job>> {
        let sql = list_sql();
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        jobs_from_rows(&rows)
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Job>> {
        let sql = list_by_creator_sql();
        let rows = sqlx::query(&sql)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?;

        jobs_from_rows(&rows)
    }

    async fn search(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let mut builder = search_query(filter);
        let rows = builder.build().fetch_all(&self.pool).await?;

        jobs_from_rows(&rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        let sql = format!("{} WHERE j.id = $1", select_from("jobs"));
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(job_from_row).transpose()
    }

    async fn toggle_like(&self, job_id: Uuid, user_id: Uuid) -> Result<Option<Job>> {
        // Single statement so concurrent toggles cannot duplicate a like
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE jobs
                SET likes = CASE
                        WHEN $2::uuid = ANY(likes) THEN array_remove(likes, $2::uuid)
                        ELSE array_append(likes, $2::uuid)
                    END,
                    updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_from("updated")
        );

        let row = sqlx::query(&sql)
            .bind(job_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(job_from_row).transpose()
    }

    async fn add_applicant(&self, job_id: Uuid, user_id: Uuid) -> Result<ApplyOutcome> {
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE jobs
                SET applicants = array_append(applicants, $2::uuid),
                    updated_at = now()
                WHERE id = $1 AND NOT ($2::uuid = ANY(applicants))
                RETURNING *
            )
            {}
            "#,
            select_from("updated")
        );

        let row = sqlx::query(&sql)
            .bind(job_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            return Ok(ApplyOutcome::Applied(job_from_row(&row)?));
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM jobs WHERE id = $1)")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to check job {}: {}", job_id, e))?;

        Ok(if exists {
            ApplyOutcome::AlreadyApplied
        } else {
            ApplyOutcome::JobNotFound
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
