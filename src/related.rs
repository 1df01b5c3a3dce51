//! Related-post ranking for the "you might also like" block.

use crate::types::Post;
use chrono::Duration;

/// Points per tag shared with the current post.
pub const SHARED_TAG_POINTS: u32 = 10;
/// Points for belonging to the same series.
pub const SAME_SERIES_POINTS: u32 = 50;
/// Points for having the same author.
pub const SAME_AUTHOR_POINTS: u32 = 5;
/// Points for being published within 30 days of the current post.
pub const CLOSE_DATE_POINTS: u32 = 3;
/// Points for being published within 90 days of the current post.
pub const NEAR_DATE_POINTS: u32 = 1;

/// Default number of related posts shown.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// How strongly `candidate` relates to `current`.
///
/// Tags and series compare case-insensitively; authors compare exactly.
pub fn relatedness(current: &Post, candidate: &Post) -> u32 {
  let mut score = 0;

  let shared = candidate
    .tags
    .iter()
    .filter(|tag| current.tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase()))
    .count() as u32;
  score += shared * SHARED_TAG_POINTS;

  if let (Some(a), Some(b)) = (&candidate.series, &current.series) {
    if a.to_lowercase() == b.to_lowercase() {
      score += SAME_SERIES_POINTS;
    }
  }

  if let (Some(a), Some(b)) = (&candidate.author, &current.author) {
    if a == b {
      score += SAME_AUTHOR_POINTS;
    }
  }

  let diff = candidate.date - current.date;
  let gap = if diff < Duration::zero() { -diff } else { diff };
  if gap < Duration::days(30) {
    score += CLOSE_DATE_POINTS;
  } else if gap < Duration::days(90) {
    score += NEAR_DATE_POINTS;
  }

  score
}

/// Up to `limit` posts related to `current`, strongest first.
///
/// The current post (matched by slug) is never included, and posts with no
/// relation at all are dropped. Equal scores keep collection order.
pub fn related_posts<'a>(current: &Post, posts: &'a [Post], limit: usize) -> Vec<&'a Post> {
  let mut scored: Vec<(&Post, u32)> = posts
    .iter()
    .filter(|post| post.slug != current.slug)
    .map(|post| (post, relatedness(current, post)))
    .filter(|(_, score)| *score > 0)
    .collect();

  scored.sort_by(|a, b| b.1.cmp(&a.1));
  scored.truncate(limit);

  tracing::debug!(slug = %current.slug, found = scored.len(), "related posts");
  scored.into_iter().map(|(post, _)| post).collect()
}
