// src/infrastructure/repositories/sqlite_profile.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::profile::{
    NewProfile, PasswordHash, Profile, ProfileId, ProfileInformation, ProfileRepository,
    TokenVersion,
};
use crate::infrastructure::repositories::error::map_sqlx;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

const PROFILE_COLUMNS: &str =
    "id, password_hash, token_version, display_name, url, photo_url, email, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteProfileRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteProfileRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: String,
    password_hash: String,
    token_version: i64,
    display_name: String,
    url: String,
    photo_url: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: ProfileId::from_canonical(row.id),
            password_hash: PasswordHash::new(row.password_hash)?,
            token_version: TokenVersion::new(row.token_version),
            information: ProfileInformation {
                name: row.display_name,
                url: row.url,
                photo: row.photo_url,
                email: row.email,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn not_found(id: &ProfileId) -> DomainError {
    DomainError::NotFound(format!("profile {id} not found"))
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn exists(&self, id: &ProfileId) -> DomainResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM profiles WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(found.is_some())
    }

    async fn is_initialised(&self) -> DomainResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(count > 0)
    }

    async fn insert(&self, new_profile: NewProfile) -> DomainResult<Profile> {
        let profile = new_profile.into_profile();

        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(profile.id.as_str())
        .bind(profile.password_hash.as_str())
        .bind(profile.token_version.value())
        .bind(&profile.information.name)
        .bind(&profile.information.url)
        .bind(&profile.information.photo)
        .bind(&profile.information.email)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Profile::try_from(row)
    }

    async fn insert_initial(&self, new_profile: NewProfile) -> DomainResult<Option<Profile>> {
        let profile = new_profile.into_profile();

        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO profiles ({PROFILE_COLUMNS}) SELECT ?, ?, ?, ?, ?, ?, ?, ?, ? WHERE NOT EXISTS (SELECT 1 FROM profiles) RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(profile.id.as_str())
        .bind(profile.password_hash.as_str())
        .bind(profile.token_version.value())
        .bind(&profile.information.name)
        .bind(&profile.information.url)
        .bind(&profile.information.photo)
        .bind(&profile.information.email)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Profile::try_from).transpose()
    }

    async fn find_by_id(&self, id: &ProfileId) -> DomainResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?"
        ))
        .bind(id.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Profile::try_from).transpose()
    }

    async fn update_information(
        &self,
        id: &ProfileId,
        information: ProfileInformation,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE profiles SET display_name = ?, url = ?, photo_url = ?, email = ?, updated_at = ? WHERE id = ? RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(information.name)
        .bind(information.url)
        .bind(information.photo)
        .bind(information.email)
        .bind(updated_at)
        .bind(id.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| not_found(id))?;

        Profile::try_from(row)
    }

    async fn token_version(&self, id: &ProfileId) -> DomainResult<TokenVersion> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT token_version FROM profiles WHERE id = ?")
                .bind(id.as_str())
                .fetch_optional(&*self.pool)
                .await
                .map_err(map_sqlx)?;

        version.map(TokenVersion::new).ok_or_else(|| not_found(id))
    }

    async fn increment_token_version(&self, id: &ProfileId) -> DomainResult<TokenVersion> {
        // A single statement so concurrent logouts never lose an increment.
        let version: Option<i64> = sqlx::query_scalar(
            "UPDATE profiles SET token_version = CASE WHEN token_version >= 9223372036854775807 THEN 0 ELSE token_version + 1 END WHERE id = ? RETURNING token_version",
        )
        .bind(id.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        version.map(TokenVersion::new).ok_or_else(|| not_found(id))
    }
}
