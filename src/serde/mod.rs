//! Serde helpers.

pub mod duration;
pub mod quantity;
pub mod token_id;
