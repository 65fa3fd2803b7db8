//! Pizza table DDL and persistence. Uniqueness on `name` is enforced by the
//! table constraint, not by application-side locking.

use crate::error::{AppError, ALREADY_EXISTS_MSG};
use crate::schema::{NewPizza, PizzaPatch};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const PIZZA_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS pizza (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL UNIQUE,
    price       REAL    NOT NULL,
    created_at  TEXT    NOT NULL,
    modified_at TEXT    NOT NULL
)
"#;

const PIZZA_COLUMNS: &str = "id, name, price, created_at, modified_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Open a pool on the given URL, creating the database file if missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct PizzaStore {
    pool: SqlitePool,
}

impl PizzaStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the pizza table if it does not exist.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query(PIZZA_DDL).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a new row; both timestamps are set to now.
    pub async fn create(&self, draft: &NewPizza) -> Result<Pizza, AppError> {
        let now = Utc::now();
        tracing::debug!(name = %draft.name, "insert pizza");
        sqlx::query_as::<_, Pizza>(&format!(
            "INSERT INTO pizza (name, price, created_at, modified_at) \
             VALUES (?, ?, ?, ?) RETURNING {}",
            PIZZA_COLUMNS
        ))
        .bind(&draft.name)
        .bind(draft.price)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)
    }

    /// All rows in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Pizza>, AppError> {
        let rows = sqlx::query_as::<_, Pizza>(&format!(
            "SELECT {} FROM pizza ORDER BY id",
            PIZZA_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Pizza>, AppError> {
        let row = sqlx::query_as::<_, Pizza>(&format!(
            "SELECT {} FROM pizza WHERE id = ?",
            PIZZA_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite the provided fields on an existing row; `modified_at` is
    /// refreshed even for an empty patch.
    pub async fn update(&self, pizza: &Pizza, patch: &PizzaPatch) -> Result<Pizza, AppError> {
        let now = Utc::now();
        tracing::debug!(id = pizza.id, "update pizza");
        sqlx::query_as::<_, Pizza>(&format!(
            "UPDATE pizza SET name = COALESCE(?, name), price = COALESCE(?, price), \
             modified_at = ? WHERE id = ? RETURNING {}",
            PIZZA_COLUMNS
        ))
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(now)
        .bind(pizza.id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)
    }

    /// Remove the row permanently.
    pub async fn delete(&self, pizza: &Pizza) -> Result<(), AppError> {
        tracing::debug!(id = pizza.id, "delete pizza");
        sqlx::query("DELETE FROM pizza WHERE id = ?")
            .bind(pizza.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn map_db_err(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(ALREADY_EXISTS_MSG.into())
        }
        _ => AppError::Db(e),
    }
}
