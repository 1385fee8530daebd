//! Restaurant persistence.
//!
//! A [`Restaurant`] is always materialized together with its reviews. The
//! per-location listing fetches ids first and then loads each restaurant
//! through [`get_restaurant`], which keeps a single code path for shaping
//! records.

use rusqlite::{
    params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use serde::{Deserialize, Serialize};

use crate::error::DiningError;
use crate::review::{list_reviews, Review};

/// Rating given to a restaurant when the creator does not supply one.
pub const DEFAULT_RATING: u8 = 3;

/// A dining establishment belonging to one location, with its reviews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub id: i64,
    pub description: String,
    pub cuisine: String,
    pub address: String,
    pub image: String,
    pub rating: f64,
    pub location_id: i64,
    /// Reviews attached to this restaurant, oldest first.
    pub reviews: Vec<Review>,
}

/// Parameters for creating a new restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantParams {
    pub description: String,
    pub cuisine: String,
    pub address: String,
    pub image: String,
    /// Initial rating; [`DEFAULT_RATING`] when `None`.
    pub rating: Option<u8>,
    pub location_id: i64,
}

fn map_row_to_restaurant(row: &Row) -> rusqlite::Result<Restaurant> {
    Ok(Restaurant {
        id: row.get(0)?,
        description: row.get(1)?,
        cuisine: row.get(2)?,
        address: row.get(3)?,
        image: row.get(4)?,
        rating: row.get(5)?,
        location_id: row.get(6)?,
        reviews: Vec::new(),
    })
}

/// Retrieves a restaurant and its reviews, or `None` if it does not exist.
pub fn get_restaurant(conn: &Connection, id: i64) -> Result<Option<Restaurant>, DiningError> {
    let restaurant = conn
        .query_row(
            "SELECT id, description, cuisine, address, image, rating, location_id
             FROM restaurant WHERE id = ?1",
            [id],
            map_row_to_restaurant,
        )
        .optional()?;

    match restaurant {
        Some(mut restaurant) => {
            restaurant.reviews = list_reviews(conn, restaurant.id)?;
            Ok(Some(restaurant))
        }
        None => Ok(None),
    }
}

/// Lists every restaurant at a location, each with its reviews.
///
/// The location is not checked here; callers that need a "location not
/// found" distinction must look it up first.
pub fn list_restaurants_for_location(
    conn: &Connection,
    location_id: i64,
) -> Result<Vec<Restaurant>, DiningError> {
    let mut stmt =
        conn.prepare("SELECT id FROM restaurant WHERE location_id = ?1 ORDER BY id ASC")?;
    let ids = stmt
        .query_map([location_id], |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut restaurants = Vec::with_capacity(ids.len());
    for id in ids {
        // A concurrent delete between the two queries just drops the row.
        if let Some(restaurant) = get_restaurant(conn, id)? {
            restaurants.push(restaurant);
        }
    }
    Ok(restaurants)
}

/// Inserts a restaurant and returns the stored record.
///
/// # Errors
///
/// Returns `DiningError::Database` on SQL failure, including a foreign key
/// violation when `location_id` does not exist.
pub fn create_restaurant(
    conn: &Connection,
    params: &CreateRestaurantParams,
) -> Result<Restaurant, DiningError> {
    let rating = f64::from(params.rating.unwrap_or(DEFAULT_RATING));

    conn.execute(
        "INSERT INTO restaurant (description, cuisine, address, image, rating, location_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            params.description,
            params.cuisine,
            params.address,
            params.image,
            rating,
            params.location_id,
        ],
    )?;
    let id = conn.last_insert_rowid();

    get_restaurant(conn, id)?.ok_or(DiningError::RestaurantNotFound(id))
}

/// Deletes a restaurant and returns the record as it was before deletion.
///
/// Returns `None` if no restaurant has the given ID. Reviews are removed by
/// the cascading foreign key.
///
/// The transaction is `IMMEDIATE`: the write lock is held before the
/// snapshot is read, so concurrent deleters wait out the busy timeout.
pub fn delete_restaurant(conn: &Connection, id: i64) -> Result<Option<Restaurant>, DiningError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let Some(snapshot) = get_restaurant(&tx, id)? else {
        return Ok(None);
    };
    tx.execute("DELETE FROM restaurant WHERE id = ?1", [id])?;
    tx.commit()?;

    Ok(Some(snapshot))
}
