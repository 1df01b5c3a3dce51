//! Lifecycle hooks around a search call.

use crate::types::SearchResult;

/// A trait for extensions that can hook into the search lifecycle.
///
/// Extensions are stateless from the engine's point of view: the engine
/// keeps no data between calls, and anything an extension remembers is its
/// own business.
///
/// # Examples
///
/// Rewriting an abbreviation before it is matched:
///
/// ```rust
/// use postseek::prelude::*;
///
/// struct Expand;
///
/// impl SearchExtension for Expand {
///     fn before_query(&self, query: &mut String) {
///         if query.trim().eq_ignore_ascii_case("ts") {
///             *query = "typescript".to_string();
///         }
///     }
/// }
///
/// let engine = SearchEngine::builder().with_extension(Box::new(Expand)).build();
/// let posts = vec![Post::new("a", "TypeScript Tips", chrono::Utc::now())];
/// assert_eq!(engine.search(&posts, "ts", &SearchOptions::default()).len(), 1);
/// ```
pub trait SearchExtension: Send + Sync {
  /// Called with the raw query before it is normalized.
  fn before_query(&self, _query: &mut String) {}

  /// Called with the ranked results before `limit` is applied. Reordering
  /// here changes what survives truncation.
  fn before_limit(&self, _query: &str, _results: &mut Vec<SearchResult<'_>>) {}

  /// Called with the final results.
  fn after_limit(&self, _query: &str, _results: &mut Vec<SearchResult<'_>>) {}
}
