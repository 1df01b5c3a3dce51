//! Tag aggregation.

use crate::normalize::normalize_text;
use crate::slug::to_slug;
use crate::types::Post;
use serde::Serialize;
use std::collections::HashMap;

/// Posts sharing one (normalized) tag.
#[derive(Debug, Clone, Serialize)]
pub struct TagInfo<'a> {
  /// Normalized tag name.
  pub name: String,
  pub slug: String,
  pub count: usize,
  pub posts: Vec<&'a Post>,
}

/// A tag with its display weight in a tag cloud.
#[derive(Debug, Clone, Serialize)]
pub struct TagCloudEntry<'a> {
  #[serde(flatten)]
  pub tag: TagInfo<'a>,
  /// Between 1.0 and 5.0, one decimal place.
  pub weight: f64,
}

/// Lowercased, trimmed, NFC tag key.
pub fn normalize_tag(tag: &str) -> String {
  normalize_text(tag)
}

/// Every tag in use, most used first. Tags with equal counts keep the order
/// in which they first appear in `posts`.
pub fn all_tags(posts: &[Post]) -> Vec<TagInfo<'_>> {
  let mut index: HashMap<String, usize> = HashMap::new();
  let mut tags: Vec<TagInfo<'_>> = Vec::new();

  for post in posts {
    for tag in &post.tags {
      let name = normalize_tag(tag);
      if name.is_empty() {
        continue;
      }
      let slot = *index.entry(name.clone()).or_insert_with(|| {
        tags.push(TagInfo {
          slug: to_slug(&name),
          name,
          count: 0,
          posts: Vec::new(),
        });
        tags.len() - 1
      });
      let info = &mut tags[slot];
      // A post listing the same tag twice is still one post on the tag page.
      if !info.posts.iter().any(|p| std::ptr::eq(*p, post)) {
        info.posts.push(post);
        info.count += 1;
      }
    }
  }

  tags.sort_by(|a, b| b.count.cmp(&a.count));
  tags
}

/// Look a tag up by name or slug.
pub fn tag_info<'a>(posts: &'a [Post], tag: &str) -> Option<TagInfo<'a>> {
  let key = normalize_tag(tag);
  all_tags(posts)
    .into_iter()
    .find(|t| t.name == key || t.slug == key)
}

/// The `limit` most used tags.
pub fn popular_tags(posts: &[Post], limit: usize) -> Vec<TagInfo<'_>> {
  let mut tags = all_tags(posts);
  tags.truncate(limit);
  tags
}

/// Every tag weighted linearly from 1 (least used) to 5 (most used), sorted
/// by name. When all counts are equal every weight is 1.
pub fn tag_cloud(posts: &[Post]) -> Vec<TagCloudEntry<'_>> {
  let tags = all_tags(posts);
  let (Some(min), Some(max)) = (
    tags.iter().map(|t| t.count).min(),
    tags.iter().map(|t| t.count).max(),
  ) else {
    return Vec::new();
  };

  let mut cloud: Vec<TagCloudEntry<'_>> = tags
    .into_iter()
    .map(|tag| {
      let weight = if max > min {
        1.0 + ((tag.count - min) as f64 / (max - min) as f64) * 4.0
      } else {
        1.0
      };
      TagCloudEntry {
        tag,
        weight: (weight * 10.0).round() / 10.0,
      }
    })
    .collect();

  cloud.sort_by(|a, b| a.tag.name.cmp(&b.tag.name));
  cloud
}

/// Tags that appear alongside `tag`, most frequent first.
pub fn related_tags<'a>(posts: &'a [Post], tag: &str, limit: usize) -> Vec<TagInfo<'a>> {
  let Some(info) = tag_info(posts, tag) else {
    return Vec::new();
  };

  let mut order: Vec<String> = Vec::new();
  let mut counts: HashMap<String, usize> = HashMap::new();
  for post in &info.posts {
    for other in &post.tags {
      let name = normalize_tag(other);
      if name == info.name || name.is_empty() {
        continue;
      }
      let count = counts.entry(name.clone()).or_insert_with(|| {
        order.push(name);
        0
      });
      *count += 1;
    }
  }

  order.sort_by(|a, b| counts[b].cmp(&counts[a]));
  order.truncate(limit);

  let mut all = all_tags(posts);
  order
    .iter()
    .filter_map(|name| {
      let pos = all.iter().position(|t| &t.name == name)?;
      Some(all.swap_remove(pos))
    })
    .collect()
}

/// Tags whose name contains `query` (case-insensitive). An empty query finds
/// nothing.
pub fn search_tags<'a>(posts: &'a [Post], query: &str) -> Vec<TagInfo<'a>> {
  let q = normalize_tag(query);
  if q.is_empty() {
    return Vec::new();
  }
  all_tags(posts)
    .into_iter()
    .filter(|t| t.name.contains(&q))
    .collect()
}

/// Number of posts carrying `tag`.
pub fn tag_count(posts: &[Post], tag: &str) -> usize {
  tag_info(posts, tag).map_or(0, |t| t.count)
}

/// Up to `limit` distinct tags taken from the front of `posts`, which the
/// content layer orders newest first. Returned in popularity order.
pub fn recent_tags(posts: &[Post], limit: usize) -> Vec<TagInfo<'_>> {
  let mut recent: Vec<String> = Vec::new();

  'outer: for post in posts {
    for tag in &post.tags {
      if recent.len() >= limit {
        break 'outer;
      }
      let name = normalize_tag(tag);
      if !name.is_empty() && !recent.contains(&name) {
        recent.push(name);
      }
    }
  }

  all_tags(posts)
    .into_iter()
    .filter(|t| recent.contains(&t.name))
    .collect()
}
