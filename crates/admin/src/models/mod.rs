//! Entity records mirrored from the store backend.
//!
//! Each entity comes with an `*Input` payload used for create/update calls.
//! Inputs double as the field state of the matching mutation dialog.
//!
//! Wire format is JSON with camelCase keys. Ids are accepted as `id` or
//! Mongo-style `_id`.

mod coupon;
mod customer;
mod image;
mod order;
mod product;
mod review;
mod settings;
mod sub_category;
mod user;

pub use coupon::*;
pub use customer::*;
pub use image::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use settings::*;
pub use sub_category::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

pub(crate) const fn default_true() -> bool {
    true
}

/// Accept either a JSON string or a JSON number and keep it as a string.
///
/// Order numbers are sometimes stored as integers by the backend.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
