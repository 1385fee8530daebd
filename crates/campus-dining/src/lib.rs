//! Data access layer for campus locations, restaurants, and reviews.
//!
//! Every operation borrows a [`rusqlite::Connection`] checked out by the
//! caller, so the same functions serve request handlers (one pooled
//! connection per request) and tests (a bare in-memory connection).
//!
//! # Record shapes
//!
//! | Record | Fields |
//! |--------|--------|
//! | [`Location`] | `id`, `name` |
//! | [`Restaurant`] | `id`, `description`, `cuisine`, `address`, `image`, `rating`, `location_id`, `reviews` |
//! | [`Review`] | `id`, `date_created`, `service`, `decor`, `food`, `description`, `restaurant_id` |
//!
//! Restaurants are always returned with their reviews embedded. Deleting a
//! restaurant removes its reviews through the `ON DELETE CASCADE` foreign key.

mod error;
mod location;
mod restaurant;
mod review;

pub use error::DiningError;
pub use location::{get_location, list_locations, Location};
pub use restaurant::{
    create_restaurant, delete_restaurant, get_restaurant, list_restaurants_for_location,
    CreateRestaurantParams, Restaurant, DEFAULT_RATING,
};
pub use review::{create_review, list_reviews, CreateReviewParams, Review};
