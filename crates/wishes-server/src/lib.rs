#![forbid(unsafe_code)]

//! Wish submission service: validation, persistence and the HTTP surface.

pub mod config;
pub mod db;
pub mod http;
pub mod logging;
pub mod service;
pub mod store;
pub mod supervisor;

pub use service::{Health, ServiceError, WishService};
pub use store::{MemoryStore, StoreError, SurrealStore, WishStore};
