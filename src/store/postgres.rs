//! PostgreSQL store

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use super::{NewShift, Shift, ShiftStore, StoreError, User, UserStore};
use crate::error::Result;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";

const SHIFT_COLUMNS: &str = "id, start_time, end_time, type, created_by, created_at";

const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    id            SERIAL PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS shifts (
    id         SERIAL PRIMARY KEY,
    start_time TIMESTAMPTZ NOT NULL,
    end_time   TIMESTAMPTZ NOT NULL CHECK (end_time > start_time),
    type       TEXT NOT NULL,
    created_by BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);";

/// User and shift store backed by a single pipelined PostgreSQL connection
pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    /// Connect using a libpq-style connection string or URL
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    /// Create the users and shifts tables if they do not exist yet
    pub async fn migrate(&self) -> Result<()> {
        self.client.batch_execute(CREATE_TABLES).await?;
        tracing::debug!("users and shifts tables ready");
        Ok(())
    }

    fn client(&self) -> std::result::Result<&Client, StoreError> {
        if self.client.is_closed() {
            return Err(StoreError::Unavailable("database connection closed".to_string()));
        }
        Ok(&self.client)
    }
}

fn user_from_row(row: &Row) -> std::result::Result<User, StoreError> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

fn shift_from_row(row: &Row) -> std::result::Result<Shift, StoreError> {
    Ok(Shift {
        id: row.try_get("id")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        kind: row.try_get("type")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn get_user(&self, id: i32) -> std::result::Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = self
            .client()?
            .query_opt(&query, &[&id])
            .await?
            .ok_or(StoreError::NotFound)?;
        user_from_row(&row)
    }

    async fn get_users(&self) -> std::result::Result<Vec<User>, StoreError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = self.client()?.query(&query, &[]).await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn get_user_by_email(&self, email: &str) -> std::result::Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE lower(email) = lower($1)", USER_COLUMNS);
        let row = self
            .client()?
            .query_opt(&query, &[&email])
            .await?
            .ok_or(StoreError::NotFound)?;
        user_from_row(&row)
    }
}

#[async_trait]
impl ShiftStore for PostgresStore {
    async fn create_shift(&self, shift: NewShift) -> std::result::Result<Shift, StoreError> {
        let query = format!(
            "INSERT INTO shifts (start_time, end_time, type, created_by) VALUES ($1, $2, $3, $4) RETURNING {}",
            SHIFT_COLUMNS
        );
        let row = self
            .client()?
            .query_one(
                &query,
                &[&shift.start_time, &shift.end_time, &shift.kind, &shift.created_by],
            )
            .await?;
        shift_from_row(&row)
    }

    async fn get_shifts(&self) -> std::result::Result<Vec<Shift>, StoreError> {
        let query = format!("SELECT {} FROM shifts ORDER BY start_time, id", SHIFT_COLUMNS);
        let rows = self.client()?.query(&query, &[]).await?;
        rows.iter().map(shift_from_row).collect()
    }
}
