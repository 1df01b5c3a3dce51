//! The search engine that scores, ranks and truncates posts.

use crate::context::SearchContext;
use crate::extension::SearchExtension;
use crate::normalize::NormalizedQuery;
use crate::rules::ScoringRules;
use crate::types::{Post, SearchOptions, SearchResult};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Relevance-ranked search over an in-memory collection of posts.
///
/// The engine holds only its read-only [`ScoringRules`] and extensions. Every
/// call rescans the whole collection, so callers that search on each
/// keystroke should debounce at their own boundary and discard results of
/// superseded queries.
///
/// # Examples
///
/// ```rust
/// use postseek::prelude::*;
/// use chrono::{Duration, Utc};
///
/// let posts = vec![
///     Post::new("guide", "Next.js Guide", Utc::now()).with_tags(["react"]),
///     Post::new("notes", "Old Notes", Utc::now() - Duration::days(730)).with_tags(["nextjs"]),
/// ];
///
/// let engine = SearchEngine::default();
/// let results = engine.search(&posts, "next", &SearchOptions::default().limit(10));
///
/// assert_eq!(results[0].post.slug, "guide");
/// assert_eq!(results[1].post.slug, "notes");
/// ```
pub struct SearchEngine {
  rules: ScoringRules,
  extensions: Vec<Box<dyn SearchExtension>>,
}

impl Default for SearchEngine {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl SearchEngine {
  /// Returns a new `SearchEngineBuilder` with default rules and no extensions.
  pub fn builder() -> SearchEngineBuilder {
    SearchEngineBuilder::new()
  }

  /// The scoring rules this engine ranks with.
  pub fn rules(&self) -> &ScoringRules {
    &self.rules
  }

  /// Search `posts` for `query`, measuring recency from the current time.
  ///
  /// # Returns
  ///
  /// The matching posts ranked best first. Never fails; an empty or
  /// whitespace-only query returns an empty `Vec`.
  pub fn search<'a>(
    &self,
    posts: &'a [Post],
    query: &str,
    options: &SearchOptions,
  ) -> Vec<SearchResult<'a>> {
    self.search_at(posts, query, options, Utc::now())
  }

  /// Search `posts` for `query`, measuring recency from `now`.
  ///
  /// ## Pipeline
  ///
  /// 1. `before_query` hooks may rewrite the raw query.
  /// 2. The query is normalized; an empty query yields no results.
  /// 3. Every post is scored. Zero scores and scores below `min_score` are
  ///    dropped; survivors get highlights when enabled.
  /// 4. Results are sorted by score, then publish date, both descending.
  ///    Posts tied on both keep their input order.
  /// 5. `before_limit` hooks run, then `limit` is applied, then `after_limit`
  ///    hooks run.
  pub fn search_at<'a>(
    &self,
    posts: &'a [Post],
    query: &str,
    options: &SearchOptions,
    now: DateTime<Utc>,
  ) -> Vec<SearchResult<'a>> {
    let mut raw = query.to_string();
    for ext in &self.extensions {
      ext.before_query(&mut raw);
    }

    let Some(normalized) = NormalizedQuery::new(&raw) else {
      return Vec::new();
    };

    let context = SearchContext::new(posts, normalized, options, &self.rules, now);

    #[cfg(feature = "parallel")]
    let mut results: Vec<SearchResult<'a>> = posts
      .par_iter()
      .filter_map(|post| context.evaluate(post))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<SearchResult<'a>> = posts
      .iter()
      .filter_map(|post| context.evaluate(post))
      .collect();

    let matched = results.len();
    sort_results(&mut results);

    for ext in &self.extensions {
      ext.before_limit(&raw, &mut results);
    }

    if let Some(limit) = options.effective_limit() {
      results.truncate(limit);
    }

    for ext in &self.extensions {
      ext.after_limit(&raw, &mut results);
    }

    tracing::debug!(
      query = %context.query.raw(),
      candidates = posts.len(),
      matched,
      returned = results.len(),
      "search complete"
    );

    results
  }

  /// The score `post` would get for `query`, or zero for an empty query.
  ///
  /// Runs no extensions and applies no `min_score`; useful for explaining a
  /// ranking.
  pub fn score(&self, post: &Post, query: &str, include_content: bool, now: DateTime<Utc>) -> f64 {
    match NormalizedQuery::new(query) {
      Some(q) => crate::scoring::score_post(post, &q, &self.rules, include_content, now),
      None => 0.0,
    }
  }
}

/// Ranking order: higher score first, then newer publish date.
pub fn compare_results(a: &SearchResult<'_>, b: &SearchResult<'_>) -> Ordering {
  b.score
    .total_cmp(&a.score)
    .then_with(|| b.post.date.cmp(&a.post.date))
}

/// Stable sort by [`compare_results`].
#[cfg(feature = "parallel")]
pub fn sort_results(results: &mut [SearchResult<'_>]) {
  results.par_sort_by(compare_results);
}

/// Stable sort by [`compare_results`].
#[cfg(not(feature = "parallel"))]
pub fn sort_results(results: &mut [SearchResult<'_>]) {
  results.sort_by(compare_results);
}

/// Search with the default rules and no extensions.
pub fn search_posts<'a>(
  posts: &'a [Post],
  query: &str,
  options: &SearchOptions,
) -> Vec<SearchResult<'a>> {
  SearchEngine::default().search(posts, query, options)
}

/// A builder for creating `SearchEngine` instances.
#[derive(Default)]
pub struct SearchEngineBuilder {
  rules: Option<ScoringRules>,
  extensions: Vec<Box<dyn SearchExtension>>,
}

impl SearchEngineBuilder {
  /// Creates an empty builder.
  pub fn new() -> Self {
    Self {
      rules: None,
      extensions: Vec::new(),
    }
  }

  /// Replace the default scoring rules.
  pub fn rules(mut self, rules: ScoringRules) -> Self {
    self.rules = Some(rules);
    self
  }

  /// Adds an extension. Hooks run in registration order.
  pub fn with_extension(mut self, extension: Box<dyn SearchExtension>) -> Self {
    self.extensions.push(extension);
    self
  }

  /// Builds the engine, falling back to [`ScoringRules::DEFAULT`] when no rules
  /// were set.
  pub fn build(self) -> SearchEngine {
    SearchEngine {
      rules: self.rules.unwrap_or(ScoringRules::DEFAULT),
      extensions: self.extensions,
    }
  }
}
