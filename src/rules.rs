//! Scoring rules: field weights, exact-match bonuses, recency boost and the
//! fixed text windows used while scoring and highlighting.
//!
//! [`ScoringRules::DEFAULT`] is the ranking contract. Changing any of its values
//! changes result order for every caller, so overrides are opt-in through
//! [`ScoringRules::builder`] or a JSON document.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Per-field multipliers applied to match counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
  /// Per occurrence in the title.
  pub title: f64,
  /// Per occurrence in the description.
  pub description: f64,
  /// Per tag containing the query (not per occurrence).
  pub tags: f64,
  /// Once if the series name contains the query.
  pub series: f64,
  /// Per occurrence inside the content scoring window.
  pub content: f64,
  /// Once if the author contains the query.
  pub author: f64,
}

impl FieldWeights {
  pub const DEFAULT: Self = Self {
    title: 3.0,
    description: 2.0,
    tags: 2.5,
    series: 1.5,
    content: 1.0,
    author: 0.5,
  };
}

impl Default for FieldWeights {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Bonuses for whole-field equality with the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactMatchBonus {
  pub title: f64,
  /// Added for each tag equal to the query.
  pub tag: f64,
}

impl ExactMatchBonus {
  pub const DEFAULT: Self = Self { title: 5.0, tag: 3.0 };
}

impl Default for ExactMatchBonus {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Multiplier for posts published recently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyBoost {
  pub window_days: i64,
  pub multiplier: f64,
}

impl RecencyBoost {
  pub const DEFAULT: Self = Self {
    window_days: 30,
    multiplier: 1.1,
  };
}

impl Default for RecencyBoost {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// How much of the body text is looked at, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentWindows {
  pub scoring: usize,
  pub highlight: usize,
}

impl ContentWindows {
  pub const DEFAULT: Self = Self {
    scoring: 500,
    highlight: 1000,
  };
}

impl Default for ContentWindows {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Characters of context kept on each side of a highlighted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightContext {
  pub default: usize,
  pub content: usize,
}

impl HighlightContext {
  pub const DEFAULT: Self = Self {
    default: 50,
    content: 80,
  };
}

impl Default for HighlightContext {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// The complete, read-only configuration of the ranking function.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
  pub weights: FieldWeights,
  pub exact_bonus: ExactMatchBonus,
  pub recency: RecencyBoost,
  pub content_windows: ContentWindows,
  pub highlight_context: HighlightContext,
}

impl ScoringRules {
  pub const DEFAULT: Self = Self {
    weights: FieldWeights::DEFAULT,
    exact_bonus: ExactMatchBonus::DEFAULT,
    recency: RecencyBoost::DEFAULT,
    content_windows: ContentWindows::DEFAULT,
    highlight_context: HighlightContext::DEFAULT,
  };

  /// Create a new rules builder starting from the defaults.
  pub fn builder() -> ScoringRulesBuilder {
    ScoringRulesBuilder::default()
  }

  /// Parse rules from JSON. Missing keys keep their default values.
  pub fn from_json(json: &str) -> Result<Self> {
    let rules: Self = serde_json::from_str(json)?;
    rules.validate()?;
    tracing::debug!(?rules, "loaded scoring rules");
    Ok(rules)
  }

  /// Parse rules from any reader yielding JSON.
  pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    Self::from_json(&json)
  }

  /// Reject rules that would produce negative or non-finite scores.
  pub fn validate(&self) -> Result<()> {
    let w = &self.weights;
    let weights = [
      ("weights.title", w.title),
      ("weights.description", w.description),
      ("weights.tags", w.tags),
      ("weights.series", w.series),
      ("weights.content", w.content),
      ("weights.author", w.author),
      ("exact_bonus.title", self.exact_bonus.title),
      ("exact_bonus.tag", self.exact_bonus.tag),
    ];
    for (name, value) in weights {
      if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidRules(format!(
          "{name} must be a finite, non-negative number (got {value})"
        )));
      }
    }

    let m = self.recency.multiplier;
    if !m.is_finite() || m <= 0.0 {
      return Err(Error::InvalidRules(format!(
        "recency.multiplier must be finite and positive (got {m})"
      )));
    }
    if self.recency.window_days < 0 {
      return Err(Error::InvalidRules(format!(
        "recency.window_days must not be negative (got {})",
        self.recency.window_days
      )));
    }
    Ok(())
  }
}

/// Builder for scoring rules.
#[derive(Debug, Default)]
pub struct ScoringRulesBuilder {
  rules: ScoringRules,
}

impl ScoringRulesBuilder {
  pub fn weights(mut self, weights: FieldWeights) -> Self {
    self.rules.weights = weights;
    self
  }

  pub fn exact_bonus(mut self, bonus: ExactMatchBonus) -> Self {
    self.rules.exact_bonus = bonus;
    self
  }

  pub fn recency(mut self, window_days: i64, multiplier: f64) -> Self {
    self.rules.recency = RecencyBoost {
      window_days,
      multiplier,
    };
    self
  }

  pub fn content_windows(mut self, scoring: usize, highlight: usize) -> Self {
    self.rules.content_windows = ContentWindows { scoring, highlight };
    self
  }

  pub fn highlight_context(mut self, default: usize, content: usize) -> Self {
    self.rules.highlight_context = HighlightContext { default, content };
    self
  }

  /// Build the rules, validating them first.
  pub fn build(self) -> Result<ScoringRules> {
    self.rules.validate()?;
    Ok(self.rules)
  }
}
