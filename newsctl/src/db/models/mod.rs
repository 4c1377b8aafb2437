//! Database record models matching table schemas.
//!
//! These structs correspond to database rows and the inputs used to write them.
//! They are kept separate from the API models in [`crate::api::models`] so the
//! storage and wire representations can evolve independently.
//!
//! - [`news`]: news items, joined with their category ids on read

pub mod news;
