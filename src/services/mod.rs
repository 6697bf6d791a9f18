//! Service layer.

mod search_service;

pub use search_service::{ClientSearchService, DuplicateGroup};
