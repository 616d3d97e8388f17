//! User repository for custodia.
//!
//! CRUD operations for the users table.

use sqlx::SqliteConnection;

use super::user::{NewUser, Status, User};
use super::DbPool;
use crate::{CustodiaError, Result};

const USER_COLUMNS: &str =
    "id, name, email, password, role, police_station, status, created_at, last_login";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;
        Self::create_with(&mut conn, new_user).await
    }

    /// Create a new user on an explicit connection.
    ///
    /// Used by workflows that insert inside a transaction so the record
    /// can still be rolled back after the insert.
    pub async fn create_with(conn: &mut SqliteConnection, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password, role, police_station, status)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(new_user.role.as_str())
        .bind(&new_user.police_station)
        .bind(new_user.status.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| CustodiaError::Database(e.to_string()))?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?
            .ok_or_else(|| CustodiaError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Get a user by email address (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 COLLATE NOCASE");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Find the admin account for a police station, if one exists.
    pub async fn find_station_admin(&self, police_station: &str) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE police_station = $1 AND role = 'admin'"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(police_station)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;

        Ok(user)
    }

    /// List all users with the given status, in store order.
    pub async fn list_by_status(&self, status: Status) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE status = $1");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(status.as_str())
            .fetch_all(self.pool)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;

        Ok(users)
    }

    /// Set a user's approval status in a single atomic update.
    ///
    /// Returns the updated user, or None if no such user exists. No
    /// transition guard: re-asserting a terminal status is allowed.
    pub async fn update_status(&self, id: i64, status: Status) -> Result<Option<User>> {
        let result = sqlx::query("UPDATE users SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Stamp the last login time.
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;

        Ok(())
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| CustodiaError::Database(e.to_string()))?;

        Ok(count)
    }
}
