//! Local breed search.
//!
//! - `filter`: pure filtering of a cached breed list by a free-text query
//! - `debounce`: collapses bursts of query updates into single evaluations

mod debounce;
mod filter;

pub use debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
pub use filter::{filter_breeds, is_blank_query};
