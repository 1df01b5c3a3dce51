//! Search suggestions drawn from existing tags and series.

use crate::types::Post;
use std::collections::BTreeSet;

/// Distinct tag and series names across `posts`, sorted ascending.
///
/// Names are kept exactly as written, so differently cased duplicates both
/// appear. Useful for autocomplete or a "popular searches" list.
pub fn search_suggestions(posts: &[Post]) -> Vec<String> {
  let mut suggestions = BTreeSet::new();

  for post in posts {
    suggestions.extend(post.tags.iter().cloned());
    if let Some(series) = &post.series {
      suggestions.insert(series.clone());
    }
  }

  suggestions.into_iter().collect()
}
