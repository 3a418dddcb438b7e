//! Per-resource backend operations.
//!
//! Each submodule adds an `impl ApiClient` block for one resource, and wires
//! the resource into the generic screen machinery via
//! [`Resource`](crate::controller::Resource) and, where a dialog exists,
//! [`FormModel`](crate::dialog::FormModel).
//!
//! Operations issue exactly one request (uploads included), never retry and
//! never cache.

mod coupons;
mod customers;
mod images;
mod orders;
mod products;
mod reviews;
mod settings;
mod sub_categories;
mod upload;
mod users;

pub use upload::UploadedMedia;

/// Discards whatever the backend returns for an inline action.
type Ack = serde::de::IgnoredAny;
