//! Review persistence.

use chrono::Utc;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::error::DiningError;

/// A rating and comment attached to a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    /// Calendar date the review was written (`YYYY-MM-DD`, UTC).
    pub date_created: String,
    pub service: i64,
    pub decor: i64,
    pub food: i64,
    pub description: String,
    pub restaurant_id: i64,
}

/// Parameters for creating a new review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewParams {
    pub restaurant_id: i64,
    pub service: i64,
    pub decor: i64,
    pub food: i64,
    pub description: String,
}

fn map_row_to_review(row: &Row) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        date_created: row.get(1)?,
        service: row.get(2)?,
        decor: row.get(3)?,
        food: row.get(4)?,
        description: row.get(5)?,
        restaurant_id: row.get(6)?,
    })
}

/// Lists the reviews of a restaurant, oldest first.
pub fn list_reviews(conn: &Connection, restaurant_id: i64) -> Result<Vec<Review>, DiningError> {
    let mut stmt = conn.prepare(
        "SELECT id, date_created, service, decor, food, description, restaurant_id
         FROM review WHERE restaurant_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([restaurant_id], map_row_to_review)?;

    let mut reviews = Vec::new();
    for row in rows {
        reviews.push(row?);
    }
    Ok(reviews)
}

/// Inserts a review dated today (UTC) and returns the stored record.
///
/// The existence check and the insert share one `IMMEDIATE` transaction, so
/// a restaurant deleted concurrently yields `RestaurantNotFound`, never a
/// foreign key failure.
///
/// # Errors
///
/// Returns `DiningError::RestaurantNotFound` if the restaurant does not
/// exist, or `DiningError::Database` on SQL failure.
pub fn create_review(conn: &Connection, params: &CreateReviewParams) -> Result<Review, DiningError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM restaurant WHERE id = ?1)",
        [params.restaurant_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(DiningError::RestaurantNotFound(params.restaurant_id));
    }

    let date_created = Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let review = tx.query_row(
        "INSERT INTO review (date_created, service, decor, food, description, restaurant_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING id, date_created, service, decor, food, description, restaurant_id",
        params![
            date_created,
            params.service,
            params.decor,
            params.food,
            params.description,
            params.restaurant_id,
        ],
        map_row_to_review,
    )?;
    tx.commit()?;

    Ok(review)
}
