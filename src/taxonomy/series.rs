//! Series aggregation and navigation.

use crate::slug::to_slug;
use crate::types::Post;
use serde::Serialize;
use std::collections::HashMap;

/// All posts of one series, in reading order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesInfo<'a> {
  /// Display name, as first written in the collection.
  pub name: String,
  pub slug: String,
  pub count: usize,
  /// Sorted by `series_order`; posts without an order come last.
  pub posts: Vec<&'a Post>,
  /// Sum of reading minutes over all posts.
  pub total_reading_time: f64,
  /// Cover image of the first post that has one.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cover_image: Option<String>,
}

impl<'a> SeriesInfo<'a> {
  pub fn first_post(&self) -> Option<&'a Post> {
    self.posts.first().copied()
  }

  pub fn last_post(&self) -> Option<&'a Post> {
    self.posts.last().copied()
  }

  fn matches(&self, query: &str) -> bool {
    let key = query.trim().to_lowercase();
    self.name.to_lowercase() == key || self.slug == key || self.slug == to_slug(query)
  }
}

/// Neighbours of a post inside its series.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesNavigation<'a> {
  pub previous: Option<&'a Post>,
  pub next: Option<&'a Post>,
  pub current: &'a Post,
  pub series: SeriesInfo<'a>,
}

/// Position of a post within its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesProgress {
  /// 1-based position, 0 when the post is not part of the series.
  pub current: usize,
  pub total: usize,
  /// Rounded to the nearest whole percent.
  pub percentage: u32,
}

/// Every series, most recently extended first.
///
/// Series names group case-insensitively. "Most recently extended" compares
/// the publish date of the last post in reading order.
pub fn all_series(posts: &[Post]) -> Vec<SeriesInfo<'_>> {
  let mut index: HashMap<String, usize> = HashMap::new();
  let mut groups: Vec<(String, Vec<&Post>)> = Vec::new();

  for post in posts {
    let Some(series) = &post.series else {
      continue;
    };
    let name = series.trim();
    if name.is_empty() {
      continue;
    }
    let slot = *index.entry(name.to_lowercase()).or_insert_with(|| {
      groups.push((name.to_string(), Vec::new()));
      groups.len() - 1
    });
    groups[slot].1.push(post);
  }

  let mut series: Vec<SeriesInfo<'_>> = groups
    .into_iter()
    .map(|(name, mut members)| {
      members.sort_by_key(|p| p.series_order.unwrap_or(u32::MAX));
      SeriesInfo {
        slug: to_slug(&name),
        name,
        count: members.len(),
        total_reading_time: members.iter().map(|p| p.reading_time.minutes).sum(),
        cover_image: members.iter().find_map(|p| p.cover_image.clone()),
        posts: members,
      }
    })
    .collect();

  series.sort_by(|a, b| {
    let a_last = a.last_post().map(|p| p.date);
    let b_last = b.last_post().map(|p| p.date);
    b_last.cmp(&a_last)
  });
  series
}

/// Look a series up by name (case-insensitive) or slug.
pub fn series_info<'a>(posts: &'a [Post], series: &str) -> Option<SeriesInfo<'a>> {
  all_series(posts).into_iter().find(|s| s.matches(series))
}

/// Previous and next posts around `slug` in its series.
pub fn series_navigation<'a>(posts: &'a [Post], slug: &str) -> Option<SeriesNavigation<'a>> {
  let current = posts.iter().find(|p| p.slug == slug)?;
  let series = series_info(posts, current.series.as_deref()?)?;
  let position = series.posts.iter().position(|p| p.slug == slug)?;

  Some(SeriesNavigation {
    previous: position.checked_sub(1).map(|i| series.posts[i]),
    next: series.posts.get(position + 1).copied(),
    current,
    series,
  })
}

/// Posts of a series in reading order; empty when the series is unknown.
pub fn posts_by_series<'a>(posts: &'a [Post], series: &str) -> Vec<&'a Post> {
  series_info(posts, series).map_or_else(Vec::new, |s| s.posts)
}

/// The first `limit` series in [`all_series`] order.
pub fn popular_series(posts: &[Post], limit: usize) -> Vec<SeriesInfo<'_>> {
  let mut series = all_series(posts);
  series.truncate(limit);
  series
}

/// Series ordered by the date of their latest post, newest first.
pub fn ongoing_series(posts: &[Post]) -> Vec<SeriesInfo<'_>> {
  let mut series = all_series(posts);
  series.sort_by(|a, b| {
    let a_latest = a.posts.iter().map(|p| p.date).max();
    let b_latest = b.posts.iter().map(|p| p.date).max();
    b_latest.cmp(&a_latest)
  });
  series
}

/// The `limit` series whose first post is newest.
pub fn recent_series(posts: &[Post], limit: usize) -> Vec<SeriesInfo<'_>> {
  let mut series = all_series(posts);
  series.sort_by(|a, b| {
    let a_start = a.first_post().map(|p| p.date);
    let b_start = b.first_post().map(|p| p.date);
    b_start.cmp(&a_start)
  });
  series.truncate(limit);
  series
}

/// A series is complete when its explicit orders run 1, 2, ... without gaps.
/// Posts without an order are ignored; a series with no orders at all is not
/// complete.
pub fn is_series_completed(series: &SeriesInfo<'_>) -> bool {
  let mut orders: Vec<u32> = series.posts.iter().filter_map(|p| p.series_order).collect();
  if orders.is_empty() {
    return false;
  }
  orders.sort_unstable();
  orders.iter().zip(1u32..).all(|(&order, expected)| order == expected)
}

/// Where `slug` sits in `series`.
pub fn series_progress(slug: &str, series: &SeriesInfo<'_>) -> SeriesProgress {
  let total = series.count;
  match series.posts.iter().position(|p| p.slug == slug) {
    Some(index) => {
      let current = index + 1;
      SeriesProgress {
        current,
        total,
        percentage: ((current as f64 / total as f64) * 100.0).round() as u32,
      }
    }
    None => SeriesProgress {
      current: 0,
      total,
      percentage: 0,
    },
  }
}

/// Series whose name contains `query` (case-insensitive). An empty query finds
/// nothing.
pub fn search_series<'a>(posts: &'a [Post], query: &str) -> Vec<SeriesInfo<'a>> {
  let q = query.trim().to_lowercase();
  if q.is_empty() {
    return Vec::new();
  }
  all_series(posts)
    .into_iter()
    .filter(|s| s.name.to_lowercase().contains(&q))
    .collect()
}
