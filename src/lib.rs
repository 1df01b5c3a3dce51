//! Postseek - relevance-ranked search over blog posts.
//!
//! Postseek scores an in-memory post collection against a free-text query
//! using weighted substring matching across title, description, tags, series,
//! body text and author, with exact-match bonuses and a recency boost. Text is
//! NFC-normalized before comparison so composed and decomposed Korean input
//! match each other.
//!
//! Alongside search it provides the views a blog builds from the same
//! collection: tag and series aggregation, related posts, search suggestions
//! and URL slugs.

pub mod context;
pub mod engine;
pub mod error;
pub mod extension;
pub mod highlight;
pub mod normalize;
pub mod related;
pub mod rules;
pub mod scoring;
pub mod slug;
pub mod suggestions;
pub mod taxonomy;
pub mod types;

pub mod prelude {
  //! Convenient re-exports for common types and functions.

  pub use crate::engine::{search_posts, SearchEngine, SearchEngineBuilder};
  pub use crate::error::Error;
  pub use crate::extension::SearchExtension;
  pub use crate::related::related_posts;
  pub use crate::rules::*;
  pub use crate::slug::to_slug;
  pub use crate::suggestions::search_suggestions;
  pub use crate::taxonomy::series::*;
  pub use crate::taxonomy::tags::*;
  pub use crate::types::*;
}
