//! Text normalization and substring matching.
//!
//! Every comparison goes through the same folding: Unicode NFC composition,
//! per-character lowercasing, then trimming. Composing first keeps Hangul typed
//! as separate jamo (NFD, common on macOS file systems) equal to the composed
//! syllables most keyboards produce.

use unicode_normalization::UnicodeNormalization;

/// Fold `text` for comparison: NFC, lowercase, trimmed.
pub fn normalize_text(text: &str) -> String {
  let folded: String = text.nfc().flat_map(char::to_lowercase).collect();
  folded.trim().to_string()
}

/// Number of non-overlapping occurrences of an already normalized `query`
/// inside `text`.
pub fn count_matches(text: &str, query: &str) -> usize {
  if query.is_empty() {
    return 0;
  }
  normalize_text(text).matches(query).count()
}

/// Whether `text` contains the normalized `query`.
pub fn contains(text: &str, query: &str) -> bool {
  !query.is_empty() && normalize_text(text).contains(query)
}

/// Whether `text` equals the normalized `query` once normalized itself.
pub fn equals(text: &str, query: &str) -> bool {
  !query.is_empty() && normalize_text(text) == query
}

/// The first `n` characters of `text`, never splitting a character.
pub fn take_chars(text: &str, n: usize) -> &str {
  match text.char_indices().nth(n) {
    Some((byte, _)) => &text[..byte],
    None => text,
  }
}

/// A search query after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
  raw: String,
  folded: String,
}

impl NormalizedQuery {
  /// Returns `None` when the query is empty after trimming.
  pub fn new(query: &str) -> Option<Self> {
    let folded = normalize_text(query);
    if folded.is_empty() {
      return None;
    }
    Some(Self {
      raw: query.trim().to_string(),
      folded,
    })
  }

  /// The query as typed, trimmed but otherwise untouched.
  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// The folded form used for matching.
  pub fn folded(&self) -> &str {
    &self.folded
  }
}

/// Text prepared for locating matches while keeping the displayable original.
///
/// `display` is the NFC form of the input with its casing intact; `folded` is
/// its lowercased form. Each folded character records the index of the
/// display character it came from, so a match found in `folded` can be cut out
/// of `display`.
#[derive(Debug, Clone)]
pub struct FoldedText {
  display: Vec<char>,
  folded: String,
  origin: Vec<usize>,
}

impl FoldedText {
  pub fn new(text: &str) -> Self {
    let display: Vec<char> = text.nfc().collect();
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(display.len());

    for (index, c) in display.iter().enumerate() {
      for lower in c.to_lowercase() {
        folded.push(lower);
        origin.push(index);
      }
    }

    Self {
      display,
      folded,
      origin,
    }
  }

  /// Length of the display text in characters.
  pub fn len(&self) -> usize {
    self.display.len()
  }

  pub fn is_empty(&self) -> bool {
    self.display.is_empty()
  }

  /// Display-character range `[start, end)` of the first occurrence of the
  /// normalized `query`.
  pub fn find(&self, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
      return None;
    }
    let byte = self.folded.find(query)?;
    let first = self.folded[..byte].chars().count();
    let last = first + query.chars().count() - 1;
    Some((self.origin[first], self.origin[last] + 1))
  }

  /// Display characters in `[start, end)`.
  pub fn slice(&self, start: usize, end: usize) -> String {
    self.display[start..end].iter().collect()
  }
}
