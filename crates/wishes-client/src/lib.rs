#![forbid(unsafe_code)]

//! HTTP clients for the wish service: a typed API client, a load generator,
//! and a file-drop ingester.

pub mod client;
pub mod ingest;
pub mod loadgen;

pub use client::{ClientError, WishesClient};
