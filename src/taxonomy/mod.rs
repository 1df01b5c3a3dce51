//! Tag and series aggregation over a loaded post collection.
//!
//! These views back the tag pages, the tag cloud and series navigation.
//! Like the search engine they are pure functions of the collection and
//! borrow posts rather than copying them.

pub mod series;
pub mod tags;

pub use series::{SeriesInfo, SeriesNavigation, SeriesProgress};
pub use tags::{TagCloudEntry, TagInfo};
