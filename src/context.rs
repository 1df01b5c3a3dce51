//! Per-call state shared by the scoring and highlighting stages.

use crate::highlight::extract_highlights;
use crate::normalize::NormalizedQuery;
use crate::rules::ScoringRules;
use crate::scoring::score_post;
use crate::types::{Post, SearchOptions, SearchResult};
use chrono::{DateTime, Utc};

/// Everything one search call needs, built fresh for each call and dropped
/// when it returns.
///
/// `'p` is the lifetime of the post collection, which results borrow from;
/// `'c` covers the per-call configuration.
pub struct SearchContext<'p, 'c> {
  /// The posts being searched.
  pub posts: &'p [Post],
  pub query: NormalizedQuery,
  pub options: &'c SearchOptions,
  pub rules: &'c ScoringRules,
  /// Instant the recency boost is measured from.
  pub now: DateTime<Utc>,
}

impl<'p, 'c> SearchContext<'p, 'c> {
  /// Bundles one call's inputs. `query` must already be normalized.
  pub fn new(
    posts: &'p [Post],
    query: NormalizedQuery,
    options: &'c SearchOptions,
    rules: &'c ScoringRules,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      posts,
      query,
      options,
      rules,
      now,
    }
  }

  /// Score `post` with this call's rules, content flag and evaluation instant.
  pub fn score(&self, post: &Post) -> f64 {
    score_post(post, &self.query, self.rules, self.options.include_content, self.now)
  }

  /// Score one post and, if it survives the zero and `min_score` filters,
  /// build its result.
  pub fn evaluate(&self, post: &'p Post) -> Option<SearchResult<'p>> {
    let score = self.score(post);
    tracing::trace!(slug = %post.slug, score, "scored post");

    if score == 0.0 || score < self.options.effective_min_score() {
      return None;
    }

    let mut result = SearchResult::new(post, score);
    if self.options.include_highlights {
      result.highlights =
        extract_highlights(post, &self.query, self.rules, self.options.include_content);
    }
    Some(result)
  }
}
