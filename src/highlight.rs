//! Highlight snippet extraction.

use crate::normalize::{contains, take_chars, FoldedText, NormalizedQuery};
use crate::rules::ScoringRules;
use crate::types::{Highlight, HighlightField, Post};

/// Marker placed where a snippet was cut.
pub const ELLIPSIS: &str = "...";

/// Cut a window of `context` characters on each side of the first match.
///
/// `more_follows` marks text that was itself cut from a longer field, so the
/// snippet gets a trailing marker even when it reaches the end of `text`.
/// Returns `None` when the query does not occur.
pub fn extract_snippet(
  text: &str,
  query: &NormalizedQuery,
  context: usize,
  more_follows: bool,
) -> Option<String> {
  let folded = FoldedText::new(text);
  let (match_start, match_end) = folded.find(query.folded())?;

  let start = match_start.saturating_sub(context);
  let end = match_end.saturating_add(context).min(folded.len());

  let mut snippet = String::new();
  if start > 0 {
    snippet.push_str(ELLIPSIS);
  }
  snippet.push_str(&folded.slice(start, end));
  if end < folded.len() || more_follows {
    snippet.push_str(ELLIPSIS);
  }
  Some(snippet)
}

/// Collect the highlights for one post, in field order: title, description,
/// tags, series, content, author.
pub fn extract_highlights(
  post: &Post,
  query: &NormalizedQuery,
  rules: &ScoringRules,
  include_content: bool,
) -> Vec<Highlight> {
  let context = rules.highlight_context;
  let mut highlights = Vec::new();
  let mut push = |field: HighlightField, text: String| {
    highlights.push(Highlight {
      field,
      text,
      matched_text: query.raw().to_string(),
    });
  };

  if let Some(text) = extract_snippet(&post.title, query, context.default, false) {
    push(HighlightField::Title, text);
  }

  if let Some(text) = extract_snippet(&post.description, query, context.default, false) {
    push(HighlightField::Description, text);
  }

  for tag in &post.tags {
    if contains(tag, query.folded()) {
      push(HighlightField::Tags, tag.clone());
    }
  }

  if let Some(series) = &post.series {
    if let Some(text) = extract_snippet(series, query, context.default, false) {
      push(HighlightField::Series, text);
    }
  }

  if include_content && !post.content.is_empty() {
    let preview = take_chars(&post.content, rules.content_windows.highlight);
    let cut = preview.len() < post.content.len();
    if let Some(text) = extract_snippet(preview, query, context.content, cut) {
      push(HighlightField::Content, text);
    }
  }

  if let Some(author) = &post.author {
    if let Some(text) = extract_snippet(author, query, context.default, false) {
      push(HighlightField::Author, text);
    }
  }

  highlights
}
