//! PostgreSQL Repository Implementation
//!
//! Durable user store. The `users.email` unique constraint backs up the
//! explicit duplicate check done by the sign-up use case.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::{StoreBackend, UserFilter, UserRepository};
use crate::domain::value_object::{
    email::Email, user_password::UserPassword, vehicle_type::VehicleType,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Connect, bounded by `connect_timeout`, and apply migrations.
    pub async fn connect(
        database_url: &str,
        connect_timeout: Duration,
        query_timeout: Duration,
    ) -> AuthResult<Self> {
        let connecting = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(connect_timeout)
            .connect(database_url);

        let pool = within(connect_timeout, "Connection attempt", async {
            connecting.await.map_err(AuthError::from)
        })
        .await?;

        // A server that accepts connections but hangs on the migration lock
        // must not stall startup either
        within(connect_timeout, "Migration", async {
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await
                .map_err(|e| AuthError::StoreUnavailable(format!("Migration failed: {e}")))
        })
        .await?;

        Ok(Self::new(pool, query_timeout))
    }

    /// Run one query under the per-query timeout
    async fn bounded<T, F>(&self, operation: &'static str, query: F) -> AuthResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        within(self.query_timeout, operation, async {
            query.await.map_err(AuthError::from)
        })
        .await
    }
}

/// Await `work` for at most `limit`; running out of time is a store outage.
async fn within<T, F>(limit: Duration, operation: &str, work: F) -> AuthResult<T>
where
    F: Future<Output = AuthResult<T>>,
{
    tokio::time::timeout(limit, work).await.map_err(|_| {
        AuthError::StoreUnavailable(format!(
            "{operation} timed out after {}s",
            limit.as_secs()
        ))
    })?
}

/// `host:port/database` for logging. Credentials never appear, whether they
/// sit in the userinfo or in query parameters.
pub fn describe_target(database_url: &str) -> String {
    match PgConnectOptions::from_str(database_url) {
        Ok(options) => format!(
            "{}:{}/{}",
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or_default()
        ),
        Err(_) => "<unparseable database url>".to_string(),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = self
            .bounded(
                "find_by_email",
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT
                        user_id,
                        name,
                        email,
                        phone,
                        vehicle_number,
                        vehicle_type,
                        password_hash,
                        created_at
                    FROM users
                    WHERE email = $1
                    "#,
                )
                .bind(email.as_str())
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn insert(&self, user: User) -> AuthResult<User> {
        self.bounded(
            "insert",
            sqlx::query(
                r#"
                INSERT INTO users (
                    user_id,
                    name,
                    email,
                    phone,
                    vehicle_number,
                    vehicle_type,
                    password_hash,
                    created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(user.user_id.as_uuid())
            .bind(&user.name)
            .bind(user.email.as_str())
            .bind(&user.phone)
            .bind(&user.vehicle_number)
            .bind(user.vehicle_type.code())
            .bind(user.password_hash.as_phc_string())
            .bind(user.created_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(user)
    }

    async fn count(&self, filter: Option<&UserFilter>) -> AuthResult<u64> {
        let email = filter.and_then(|f| f.email.as_ref()).map(Email::as_str);
        let vehicle_type = filter.and_then(|f| f.vehicle_type).map(|v| v.code());

        let count = self
            .bounded(
                "count",
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COUNT(*)
                    FROM users
                    WHERE ($1::TEXT IS NULL OR email = $1)
                      AND ($2::TEXT IS NULL OR vehicle_type = $2)
                    "#,
                )
                .bind(email)
                .bind(vehicle_type)
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(count.max(0) as u64)
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Durable
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    phone: String,
    vehicle_number: String,
    vehicle_type: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let vehicle_type = VehicleType::from_code(&self.vehicle_type).ok_or_else(|| {
            AuthError::Internal(format!("Invalid vehicle_type in database: {}", self.vehicle_type))
        })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: Email::from_db(self.email),
            phone: self.phone,
            vehicle_number: self.vehicle_number,
            vehicle_type,
            password_hash: UserPassword::from_db(self.password_hash),
            created_at: self.created_at,
        })
    }
}
