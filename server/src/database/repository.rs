//! Repository layer for the `Computers` collection
//!
//! Each operation maps onto a single statement against the store.
//! Identifiers are validated up front; a malformed id never reaches SQL.

use super::models::*;
use super::parse_id;
use crate::config::COLLECTION_NAME;
use crate::error::{AppError, Result};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

/// Repository for computer records
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool, shared with the image bucket
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// List computers matching every constraint present in the filter.
    ///
    /// The name pattern is a literal, case-sensitive substring match.
    /// Results come back in insertion order.
    pub async fn list_computers(&self, filter: &ComputerFilter) -> Result<Vec<Computer>> {
        // Start from "match everything" and narrow per constraint
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT id, name, year, image_id FROM {} WHERE 1 = 1",
            COLLECTION_NAME
        ));

        // Literal substring; never a pattern
        if let Some(name) = filter.name.as_deref().filter(|n| !n.trim().is_empty()) {
            query.push(" AND instr(name, ").push_bind(name).push(") > 0");
        }

        if let Some(year) = filter.year {
            query.push(" AND year = ").push_bind(year);
        }

        query.push(" ORDER BY rowid ASC");

        let computers = query
            .build_query_as::<Computer>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Listed {} computers for filter {:?}", computers.len(), filter);
        Ok(computers)
    }

    /// Get a computer by ID
    pub async fn get_computer(&self, id: &str) -> Result<Computer> {
        let id = parse_id(id)?;

        let sql = format!(
            "SELECT id, name, year, image_id FROM {} WHERE id = ?",
            COLLECTION_NAME
        );

        let computer = sqlx::query_as::<_, Computer>(&sql)
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::ComputerNotFound(id.clone()))?;

        Ok(computer)
    }

    /// Create a new computer with a fresh identifier and no image
    pub async fn create_computer(&self, req: CreateComputerRequest) -> Result<Computer> {
        // Fresh identifier, no image yet
        let id = Uuid::new_v4().to_string();

        let sql = format!(
            r#"
            INSERT INTO {} (id, name, year, image_id)
            VALUES (?, ?, ?, NULL)
            RETURNING id, name, year, image_id
            "#,
            COLLECTION_NAME
        );

        let computer = sqlx::query_as::<_, Computer>(&sql)
            .bind(&id)
            .bind(&req.name)
            .bind(req.year)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Created computer: {}", id);
        Ok(computer)
    }

    /// Replace every field of the stored computer with the same id.
    ///
    /// Replacing a record that does not exist changes nothing and is not an
    /// error. Returns the number of records replaced.
    pub async fn update_computer(&self, computer: &Computer) -> Result<u64> {
        let id = parse_id(&computer.id)?;

        // Whole-record replace; zero rows is not an error
        let sql = format!(
            "UPDATE {} SET name = ?, year = ?, image_id = ? WHERE id = ?",
            COLLECTION_NAME
        );

        let rows = sqlx::query(&sql)
            .bind(&computer.name)
            .bind(computer.year)
            .bind(&computer.image_id)
            .bind(&id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            tracing::debug!("Replace matched no computer: {}", id);
        } else {
            tracing::debug!("Replaced computer: {}", id);
        }
        Ok(rows)
    }

    /// Point a computer at a different image, leaving other fields untouched.
    ///
    /// Returns whether a record was updated.
    pub async fn set_image_id(&self, id: &str, image_id: Option<&str>) -> Result<bool> {
        let id = parse_id(id)?;

        let sql = format!("UPDATE {} SET image_id = ? WHERE id = ?", COLLECTION_NAME);

        let rows = sqlx::query(&sql)
            .bind(image_id)
            .bind(&id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Set image for computer {}: {:?}", id, image_id);
        Ok(rows > 0)
    }

    /// Delete a computer. Deleting a missing record succeeds.
    ///
    /// The attached image, if any, is left in the bucket.
    pub async fn delete_computer(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;

        let sql = format!("DELETE FROM {} WHERE id = ?", COLLECTION_NAME);

        let rows = sqlx::query(&sql)
            .bind(&id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Deleted computer: {} ({} rows)", id, rows);
        Ok(())
    }
}
