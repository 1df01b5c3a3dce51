//! Core data types for post search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single blog post as produced by the content layer.
///
/// Only `title`, `description`, `tags`, `series`, `author`, `content` and
/// `date` take part in search scoring. The remaining fields ride along so that
/// callers can render results without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  /// Unique key of the post, usually derived from its file path.
  pub slug: String,
  pub title: String,
  #[serde(default)]
  pub description: String,
  /// Publish date. Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
  #[serde(with = "flexible_date")]
  pub date: DateTime<Utc>,
  #[serde(default, with = "flexible_date::option", skip_serializing_if = "Option::is_none")]
  pub modified_date: Option<DateTime<Utc>>,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub series: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub series_order: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cover_image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  #[serde(default)]
  pub draft: bool,
  /// Full body text.
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub reading_time: ReadingTime,
}

impl Post {
  /// Creates a post with the given slug, title and publish date. Every other
  /// field starts empty.
  pub fn new(slug: impl Into<String>, title: impl Into<String>, date: DateTime<Utc>) -> Self {
    Self {
      slug: slug.into(),
      title: title.into(),
      description: String::new(),
      date,
      modified_date: None,
      tags: Vec::new(),
      series: None,
      series_order: None,
      cover_image: None,
      author: None,
      draft: false,
      content: String::new(),
      reading_time: ReadingTime::default(),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_tags<I, S>(mut self, tags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.tags = tags.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_series(mut self, series: impl Into<String>, order: Option<u32>) -> Self {
    self.series = Some(series.into());
    self.series_order = order;
    self
  }

  pub fn with_author(mut self, author: impl Into<String>) -> Self {
    self.author = Some(author.into());
    self
  }

  pub fn with_content(mut self, content: impl Into<String>) -> Self {
    self.content = content.into();
    self
  }

  pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
    self.cover_image = Some(cover_image.into());
    self
  }

  pub fn with_reading_time(mut self, reading_time: ReadingTime) -> Self {
    self.reading_time = reading_time;
    self
  }
}

/// Reading-time estimate computed by the content layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingTime {
  /// Human readable label, e.g. "5 min read".
  pub text: String,
  pub minutes: f64,
  /// Estimated reading time in milliseconds.
  pub time: f64,
  pub words: u64,
}

impl ReadingTime {
  /// Builds an estimate from whole minutes.
  pub fn from_minutes(minutes: f64) -> Self {
    Self {
      text: format!("{} min read", minutes.ceil()),
      minutes,
      time: minutes * 60_000.0,
      words: 0,
    }
  }
}

/// The post field a highlight snippet was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightField {
  Title,
  Description,
  Tags,
  Series,
  Content,
  Author,
}

impl HighlightField {
  pub fn as_str(self) -> &'static str {
    match self {
      HighlightField::Title => "title",
      HighlightField::Description => "description",
      HighlightField::Tags => "tags",
      HighlightField::Series => "series",
      HighlightField::Content => "content",
      HighlightField::Author => "author",
    }
  }
}

impl fmt::Display for HighlightField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A snippet showing where the query matched inside one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
  pub field: HighlightField,
  /// Field text around the match, with `...` where it was cut.
  pub text: String,
  /// The query as typed (trimmed, original casing).
  pub matched_text: String,
}

/// A ranked search hit.
///
/// Results borrow the post they were scored from; the engine never copies or
/// mutates the input collection.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a> {
  #[serde(flatten)]
  pub post: &'a Post,
  /// Relevance score. Always greater than zero for returned results.
  pub score: f64,
  /// At most one entry per scalar field, one per matching tag.
  pub highlights: Vec<Highlight>,
}

impl<'a> SearchResult<'a> {
  pub fn new(post: &'a Post, score: f64) -> Self {
    Self {
      post,
      score,
      highlights: Vec::new(),
    }
  }

  /// Returns the highlights taken from `field`.
  pub fn highlights_for(&self, field: HighlightField) -> impl Iterator<Item = &Highlight> {
    self.highlights.iter().filter(move |h| h.field == field)
  }
}

/// Options controlling a single search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
  /// Results scoring strictly below this are dropped. NaN is treated as 0.
  #[serde(default)]
  pub min_score: f64,
  /// Maximum number of results after ranking. `None` or `Some(0)` means
  /// unlimited; negative values on the wire also read as unlimited.
  #[serde(default, deserialize_with = "lenient_limit")]
  pub limit: Option<usize>,
  /// Whether the body text is scored and highlighted.
  #[serde(default = "default_true")]
  pub include_content: bool,
  /// Whether highlight snippets are computed at all.
  #[serde(default = "default_true")]
  pub include_highlights: bool,
}

fn default_true() -> bool {
  true
}

fn lenient_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
  let limit = Option::<i64>::deserialize(deserializer)?;
  Ok(limit.and_then(|n| usize::try_from(n).ok()))
}

impl Default for SearchOptions {
  fn default() -> Self {
    Self {
      min_score: 0.0,
      limit: None,
      include_content: true,
      include_highlights: true,
    }
  }
}

impl SearchOptions {
  pub fn min_score(mut self, min_score: f64) -> Self {
    self.min_score = min_score;
    self
  }

  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }

  pub fn include_content(mut self, include_content: bool) -> Self {
    self.include_content = include_content;
    self
  }

  pub fn include_highlights(mut self, include_highlights: bool) -> Self {
    self.include_highlights = include_highlights;
    self
  }

  /// The score threshold actually applied; NaN counts as no threshold.
  pub fn effective_min_score(&self) -> f64 {
    if self.min_score.is_nan() {
      0.0
    } else {
      self.min_score
    }
  }

  /// The effective cap, with zero folded into "unlimited".
  pub fn effective_limit(&self) -> Option<usize> {
    self.limit.filter(|&n| n > 0)
  }
}

/// Serde adapter for publish dates written either as full timestamps or as
/// plain calendar dates in front-matter.
pub mod flexible_date {
  use chrono::{DateTime, NaiveDate, Utc};
  use serde::{de, Deserialize, Deserializer, Serializer};

  pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
      return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
      .ok()
      .and_then(|d| d.and_hms_opt(0, 0, 0))
      .map(|dt| dt.and_utc())
  }

  pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized date `{raw}`")))
  }

  pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
      date: &Option<DateTime<Utc>>,
      serializer: S,
    ) -> Result<S::Ok, S::Error> {
      match date {
        Some(date) => serializer.serialize_some(&date.to_rfc3339()),
        None => serializer.serialize_none(),
      }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
      deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
      match Option::<String>::deserialize(deserializer)? {
        Some(raw) => super::parse(&raw)
          .map(Some)
          .ok_or_else(|| de::Error::custom(format!("unrecognized date `{raw}`"))),
        None => Ok(None),
      }
    }
  }
}

/// Parses a JSON array of posts, the shape emitted by the content build.
pub fn load_posts_json(json: &str) -> crate::error::Result<Vec<Post>> {
  let posts: Vec<Post> = serde_json::from_str(json)?;
  tracing::debug!(count = posts.len(), "loaded posts from JSON");
  Ok(posts)
}
