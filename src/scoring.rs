//! Relevance scoring for a single post.
//!
//! The score is a weighted sum of substring matches across fields, plus bonuses
//! for whole-field equality, multiplied by the recency boost when the post is
//! recent. A score of zero means "no match".

use crate::normalize::{contains, count_matches, equals, take_chars, NormalizedQuery};
use crate::rules::ScoringRules;
use crate::types::Post;
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Score `post` against `query` as of `now`.
pub fn score_post(
  post: &Post,
  query: &NormalizedQuery,
  rules: &ScoringRules,
  include_content: bool,
  now: DateTime<Utc>,
) -> f64 {
  let q = query.folded();
  let weights = &rules.weights;
  let bonus = &rules.exact_bonus;
  let mut score = 0.0;

  score += count_matches(&post.title, q) as f64 * weights.title;
  if equals(&post.title, q) {
    score += bonus.title;
  }

  score += count_matches(&post.description, q) as f64 * weights.description;

  // One weight per matching tag regardless of how often the query repeats
  // inside it.
  for tag in &post.tags {
    if contains(tag, q) {
      score += weights.tags;
      if equals(tag, q) {
        score += bonus.tag;
      }
    }
  }

  if post.series.as_deref().is_some_and(|s| contains(s, q)) {
    score += weights.series;
  }

  if include_content && !post.content.is_empty() {
    let preview = take_chars(&post.content, rules.content_windows.scoring);
    score += count_matches(preview, q) as f64 * weights.content;
  }

  if post.author.as_deref().is_some_and(|a| contains(a, q)) {
    score += weights.author;
  }

  if is_recent(post.date, rules, now) {
    score *= rules.recency.multiplier;
  }

  score
}

/// Whether a post published at `date` falls inside the recency window.
/// Future dates count as recent.
pub fn is_recent(date: DateTime<Utc>, rules: &ScoringRules, now: DateTime<Utc>) -> bool {
  let days_since = (now - date).num_milliseconds() as f64 / MILLIS_PER_DAY;
  days_since <= rules.recency.window_days as f64
}
