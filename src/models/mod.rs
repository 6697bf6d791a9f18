//! Data structures for client records.

mod client;

pub use client::{ClientRecord, Fields};
