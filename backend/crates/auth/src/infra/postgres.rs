//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, identity_key::IdentityKey, user_id::UserId,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.email_key`
const EMAIL_KEY_CONSTRAINT: &str = "users_email_key_key";

/// Partial unique index allowing a single admin row
const SINGLE_ADMIN_INDEX: &str = "users_single_admin";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

/// Translate unique violations on `users` into domain errors
fn map_user_insert_error(err: sqlx::Error) -> AuthError {
    let constraint = match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            db_err.constraint().map(str::to_owned)
        }
        _ => None,
    };

    match constraint.as_deref() {
        Some(EMAIL_KEY_CONSTRAINT) => AuthError::EmailTaken,
        Some(SINGLE_ADMIN_INDEX) => AuthError::AdminConflict,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                display_name,
                email_key,
                user_role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.display_name.as_str())
        .bind(user.email_key.as_str())
        .bind(user.user_role.id())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_user_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO user_credentials (
                user_id,
                method,
                salt,
                digest,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(credential.user_id.as_uuid())
        .bind(credential.password.method())
        .bind(credential.password.salt())
        .bind(credential.password.digest())
        .bind(credential.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                display_name,
                email_key,
                user_role,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email_key(&self, email_key: &IdentityKey) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                display_name,
                email_key,
                user_role,
                created_at,
                updated_at
            FROM users
            WHERE email_key = $1
            "#,
        )
        .bind(email_key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email_key(&self, email_key: &IdentityKey) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email_key = $1)",
        )
        .bind(email_key.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn admin_exists(&self) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_role = $1)",
        )
        .bind(UserRole::Admin.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                user_id,
                method,
                salt,
                digest,
                created_at
            FROM user_credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                user_role,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(session.user_role.id())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                user_role,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        PgAuthRepository::cleanup_expired(self).await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn decode_role(id: i16) -> AuthResult<UserRole> {
    UserRole::from_id(id).ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {id}")))
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    display_name: String,
    email_key: String,
    user_role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let email_key = IdentityKey::from_db(self.email_key)
            .ok_or_else(|| AuthError::Internal("Invalid email_key".to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            display_name: DisplayName::from_db(self.display_name),
            email_key,
            user_role: decode_role(self.user_role)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    method: String,
    salt: String,
    digest: String,
    created_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<Credential> {
        let password = UserPassword::from_db(&self.method, self.salt, self.digest).map_err(|e| {
            tracing::error!(user_id = %self.user_id, error = %e, "Malformed stored credential");
            AuthError::CredentialIntegrity
        })?;

        Ok(Credential {
            user_id: UserId::from_uuid(self.user_id),
            password,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    user_role: i16,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        Ok(AuthSession {
            session_id: self.session_id,
            user_id: UserId::from_uuid(self.user_id),
            user_role: decode_role(self.user_role)?,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        })
    }
}
