pub mod criteria;

pub use criteria::matches_search_request;
