//! User repository for database operations

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use common::models::{Identity, Role, User};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::{Provisioned, UserDirectory};

/// PostgreSQL-backed user directory
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User> {
    let role: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        auth0_id: row.try_get("auth0_id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        role: role.parse::<Role>().map_err(|e| anyhow!(e))?,
        profile_picture: row.try_get("profile_picture")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn get_or_create(&self, identity: &Identity) -> Result<Provisioned> {
        // The unique index on auth0_id makes concurrent first logins converge
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (auth0_id, email, name, role, profile_picture)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (auth0_id) DO NOTHING
            RETURNING id, auth0_id, email, name, role, profile_picture, created_at, updated_at
            "#,
        )
        .bind(&identity.sub)
        .bind(identity.email.as_deref().unwrap_or_default())
        .bind(identity.name.as_deref().unwrap_or_default())
        .bind(Role::default().as_str())
        .bind(identity.picture.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            let user = user_from_row(&row)?;
            info!("User {} provisioned for {}", user.id, user.auth0_id);
            return Ok(Provisioned {
                user,
                created: true,
            });
        }

        let user = self
            .find_by_auth0_id(&identity.sub)
            .await?
            .ok_or_else(|| anyhow!("User {} vanished after insert conflict", identity.sub))?;

        Ok(Provisioned {
            user,
            created: false,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, auth0_id, email, name, role, profile_picture, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_auth0_id(&self, auth0_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, auth0_id, email, name, role, profile_picture, created_at, updated_at
            FROM users
            WHERE auth0_id = $1
            "#,
        )
        .bind(auth0_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }
}
