//! Campus locations. Seeded by migration and read-only afterwards.

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::error::DiningError;

/// A campus area grouping restaurants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

fn map_row_to_location(row: &Row) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Lists every location in insertion order.
pub fn list_locations(conn: &Connection) -> Result<Vec<Location>, DiningError> {
    let mut stmt = conn.prepare("SELECT id, name FROM location ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row_to_location)?;

    let mut locations = Vec::new();
    for row in rows {
        locations.push(row?);
    }
    Ok(locations)
}

/// Retrieves a location by ID, or `None` if it does not exist.
pub fn get_location(conn: &Connection, id: i64) -> Result<Option<Location>, DiningError> {
    let location = conn
        .query_row(
            "SELECT id, name FROM location WHERE id = ?1",
            [id],
            map_row_to_location,
        )
        .optional()?;
    Ok(location)
}
