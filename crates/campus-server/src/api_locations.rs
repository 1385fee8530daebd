//! Location read endpoints.

use crate::api::{with_conn, ApiError};
use crate::AppState;
use axum::extract::{Extension, Json, Path};
use campus_dining::{
    get_location, list_locations, list_restaurants_for_location, Location, Restaurant,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response body for `GET /locations/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<Location>,
}

/// Response body for `GET /restaurants/{location_id}/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
}

/// GET /locations/
pub async fn list_locations_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let locations = with_conn(&state.pool, "list_locations", |conn| {
        Ok(list_locations(conn)?)
    })
    .await?;

    Ok(Json(LocationsResponse { locations }))
}

/// GET /restaurants/{location_id}/
///
/// 404 when the location does not exist; an existing location with no
/// restaurants yields an empty list.
pub async fn list_location_restaurants_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(location_id): Path<i64>,
) -> Result<Json<RestaurantsResponse>, ApiError> {
    let restaurants = with_conn(&state.pool, "list_location_restaurants", move |conn| {
        if get_location(conn, location_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "location {} doesn't exist",
                location_id
            )));
        }
        Ok(list_restaurants_for_location(conn, location_id)?)
    })
    .await?;

    Ok(Json(RestaurantsResponse { restaurants }))
}
