//! Parsers for the two kinds of page on the ratings site.
//!
//! A run is a two-level crawl and each level has its own parser:
//!
//! 1. **Index**: [`index::IndexPage`] discovers every rated source and the
//!    URL of its detail page.
//! 2. **Detail**: [`detail::parse_detail`] extracts the reliability and bias
//!    scores from one source's page.
//!
//! Both are pure functions of the HTML; fetching lives in
//! [`crate::fetcher`] and pacing in [`crate::pacing`].

pub mod detail;
pub mod index;

pub use detail::parse_detail;
pub use index::IndexPage;
