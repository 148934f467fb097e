//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Account, Profile, ProfileChanges, ProfileRefresh};
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::value_object::{AccountId, email::Email};
use crate::error::{ProfileError, ProfileResult};

/// PostgreSQL-backed profile and account repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate constraint violations into domain errors.
///
/// `on_unique` is the error for a primary-key collision on the table being
/// written.
fn map_write_error(err: sqlx::Error, on_unique: ProfileError) -> ProfileError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return on_unique;
        }
        if db_err.is_check_violation() {
            return ProfileError::InvalidEmail(db_err.message().to_string());
        }
    }
    ProfileError::Database(err)
}

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgProfileRepository {
    async fn insert(&self, profile: &Profile) -> ProfileResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                id,
                email,
                full_name,
                avatar_url,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(profile.email.as_ref().map(Email::as_str))
        .bind(&profile.full_name)
        .bind(&profile.avatar_url)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, ProfileError::ProfileExists))?;

        Ok(())
    }

    async fn refresh(&self, refresh: &ProfileRefresh) -> ProfileResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles SET
                email = $2,
                full_name = COALESCE($3, full_name),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = $5
            WHERE id = $1
            RETURNING id, email, full_name, avatar_url, created_at, updated_at
            "#,
        )
        .bind(refresh.id.as_uuid())
        .bind(refresh.email.as_ref().map(Email::as_str))
        .bind(&refresh.full_name)
        .bind(&refresh.avatar_url)
        .bind(refresh.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, ProfileError::ProfileExists))?;

        row.map(ProfileRow::into_profile)
            .ok_or(ProfileError::ProfileNotFound)
    }

    async fn find_by_id(&self, id: &AccountId) -> ProfileResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, full_name, avatar_url, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn list(&self) -> ProfileResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, full_name, avatar_url, created_at, updated_at
            FROM profiles
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProfileRow::into_profile).collect())
    }

    async fn update(&self, changes: &ProfileChanges) -> ProfileResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                avatar_url = CASE WHEN $3 THEN $4 ELSE avatar_url END,
                updated_at = $5
            WHERE id = $1
            RETURNING id, email, full_name, avatar_url, created_at, updated_at
            "#,
        )
        .bind(changes.id.as_uuid())
        .bind(changes.full_name.as_deref())
        .bind(changes.avatar_url.is_some())
        .bind(changes.avatar_url.as_ref().and_then(Option::as_deref))
        .bind(changes.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProfileRow::into_profile)
            .ok_or(ProfileError::ProfileNotFound)
    }

    async fn delete(&self, id: &AccountId) -> ProfileResult<bool> {
        let deleted = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgProfileRepository {
    async fn create(&self, account: &Account) -> ProfileResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                metadata,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_ref().map(Email::as_str))
        .bind(sqlx::types::Json(account.metadata.as_map()))
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, ProfileError::AccountExists))?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: Option<String>,
    full_name: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            id: AccountId::from_uuid(self.id),
            email: self.email.map(Email::from_db),
            full_name: self.full_name,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
