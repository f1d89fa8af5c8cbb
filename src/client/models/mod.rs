//! Search API data models

mod organic;

pub use organic::{OrganicResult, SearchResponse};
