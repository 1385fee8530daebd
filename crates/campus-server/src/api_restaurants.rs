//! Restaurant and review endpoints.
//!
//! Request bodies are taken as raw JSON objects and checked field by field,
//! so that a missing field and a field of the wrong type both produce a 400
//! with a message naming the field.

use crate::api::{is_constraint_violation, with_conn, ApiError};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, Json, Path},
    http::StatusCode,
};
use campus_dining::{
    create_restaurant, create_review, delete_restaurant, get_location, get_restaurant,
    CreateRestaurantParams, CreateReviewParams, Restaurant, Review,
};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Accepted range for restaurant ratings and review scores.
const SCORE_RANGE: RangeInclusive<i64> = 1..=5;

/// Body of a validated request: a JSON object keyed by field name.
struct JsonFields<'a> {
    fields: &'a Map<String, Value>,
    route: &'static str,
}

impl<'a> JsonFields<'a> {
    fn parse(
        payload: &'a Result<Json<Value>, JsonRejection>,
        route: &'static str,
    ) -> Result<Self, ApiError> {
        let value = match payload {
            Ok(Json(value)) => value,
            Err(rejection) => {
                return Err(ApiError::BadRequest(format!(
                    "malformed body in {}: {}",
                    route,
                    rejection.body_text()
                )))
            }
        };
        let fields = value.as_object().ok_or_else(|| {
            ApiError::BadRequest(format!("body of {} must be a JSON object", route))
        })?;
        Ok(Self { fields, route })
    }

    /// A JSON `null` counts as missing.
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    fn missing(&self, name: &str) -> ApiError {
        ApiError::BadRequest(format!("missing field '{}' in {}", name, self.route))
    }

    fn invalid(&self, name: &str) -> ApiError {
        ApiError::BadRequest(format!("invalid field '{}' in {}", name, self.route))
    }

    fn require(&self, name: &str) -> Result<&'a Value, ApiError> {
        self.get(name).ok_or_else(|| self.missing(name))
    }

    fn string(&self, name: &str) -> Result<String, ApiError> {
        self.require(name)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.invalid(name))
    }

    fn integer(&self, name: &str) -> Result<i64, ApiError> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| self.invalid(name))
    }

    fn score(&self, name: &str) -> Result<i64, ApiError> {
        let value = self.integer(name)?;
        if SCORE_RANGE.contains(&value) {
            Ok(value)
        } else {
            Err(self.invalid(name))
        }
    }

    fn optional_rating(&self, name: &str) -> Result<Option<u8>, ApiError> {
        if self.get(name).is_none() {
            return Ok(None);
        }
        let rating = u8::try_from(self.score(name)?).map_err(|_| self.invalid(name))?;
        Ok(Some(rating))
    }
}

/// GET /restaurant/{restaurant_id}/
pub async fn get_restaurant_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<Restaurant>, ApiError> {
    let restaurant = with_conn(&state.pool, "get_restaurant", move |conn| {
        get_restaurant(conn, restaurant_id)?.ok_or_else(|| {
            ApiError::NotFound(format!("restaurant {} doesn't exist", restaurant_id))
        })
    })
    .await?;

    Ok(Json(restaurant))
}

/// POST /restaurants/
///
/// Required: `description`, `cuisine`, `address`, `image` (strings) and
/// `location_id` (integer naming an existing location). Optional: `rating`,
/// an integer in 1..=5 defaulting to 3.
pub async fn create_restaurant_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    const ROUTE: &str = "POST /restaurants/";
    let body = JsonFields::parse(&payload, ROUTE)?;

    // Presence first, so a body missing one field and mistyping another
    // reports the missing one.
    for name in ["description", "location_id", "cuisine", "address", "image"] {
        body.require(name)?;
    }

    let params = CreateRestaurantParams {
        description: body.string("description")?,
        cuisine: body.string("cuisine")?,
        address: body.string("address")?,
        image: body.string("image")?,
        rating: body.optional_rating("rating")?,
        location_id: body.integer("location_id")?,
    };

    let restaurant = with_conn(&state.pool, "create_restaurant", move |conn| {
        let unknown_location = || {
            ApiError::BadRequest(format!(
                "invalid field 'location_id' in {}: location {} doesn't exist",
                ROUTE, params.location_id
            ))
        };

        if get_location(conn, params.location_id)?.is_none() {
            return Err(unknown_location());
        }
        create_restaurant(conn, &params).map_err(|e| {
            if is_constraint_violation(&e) {
                unknown_location()
            } else {
                e.into()
            }
        })
    })
    .await?;

    tracing::info!(
        restaurant_id = restaurant.id,
        location_id = restaurant.location_id,
        "restaurant created"
    );

    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// DELETE /restaurants/{restaurant_id}/
///
/// Responds with the restaurant as it was before deletion, reviews included.
pub async fn delete_restaurant_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<Restaurant>, ApiError> {
    let snapshot = with_conn(&state.pool, "delete_restaurant", move |conn| {
        delete_restaurant(conn, restaurant_id)?.ok_or_else(|| {
            ApiError::NotFound(format!("restaurant {} does not exist", restaurant_id))
        })
    })
    .await?;

    tracing::info!(
        restaurant_id,
        reviews = snapshot.reviews.len(),
        "restaurant deleted"
    );

    Ok(Json(snapshot))
}

/// POST /restaurant/{restaurant_id}/reviews/
///
/// Required: `service`, `decor`, `food` (integers in 1..=5) and
/// `description` (string).
pub async fn create_review_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(restaurant_id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let body = JsonFields::parse(&payload, "POST /restaurant/{restaurant_id}/reviews/")?;

    for name in ["service", "decor", "food", "description"] {
        body.require(name)?;
    }

    let params = CreateReviewParams {
        restaurant_id,
        service: body.score("service")?,
        decor: body.score("decor")?,
        food: body.score("food")?,
        description: body.string("description")?,
    };

    let review = with_conn(&state.pool, "create_review", move |conn| {
        Ok(create_review(conn, &params)?)
    })
    .await?;

    tracing::info!(review_id = review.id, restaurant_id, "review created");

    Ok((StatusCode::CREATED, Json(review)))
}
