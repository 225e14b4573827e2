#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared models, wire types and validation for the wish service and its clients.

pub mod api;
pub mod model;
pub mod validation;

mod util;

pub use model::{NewWish, WishRecord, WishStatus};
pub use util::{new_ulid, now_ms, EpochMs};
pub use validation::{validate_new_wish, ValidWish, ValidationError};
