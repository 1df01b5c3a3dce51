use chrono::{DateTime, Duration, TimeZone, Utc};
use postseek::prelude::*;

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

struct QueryRewriteExt;

impl SearchExtension for QueryRewriteExt {
  fn before_query(&self, query: &mut String) {
    if query.trim() == "k8s" {
      *query = "kubernetes".to_string();
    }
  }
}

/// Moves pinned posts to the front before truncation.
struct PinExt {
  slug: &'static str,
}

impl SearchExtension for PinExt {
  fn before_limit(&self, _query: &str, results: &mut Vec<SearchResult<'_>>) {
    if let Some(pos) = results.iter().position(|r| r.post.slug == self.slug) {
      let pinned = results.remove(pos);
      results.insert(0, pinned);
    }
  }
}

struct ScoreBumpExt;

impl SearchExtension for ScoreBumpExt {
  fn after_limit(&self, _query: &str, results: &mut Vec<SearchResult<'_>>) {
    for r in results {
      r.score += 0.5;
    }
  }
}

fn posts() -> Vec<Post> {
  let old = now() - Duration::days(365);
  vec![
    Post::new("k8s-intro", "Kubernetes Intro", old).with_tags(["kubernetes"]),
    Post::new("k8s-ops", "Running Kubernetes", old),
    Post::new("pinned", "Notes", old).with_description("a kubernetes aside"),
  ]
}

#[test]
fn test_query_rewrite() {
  let posts = posts();
  let engine = SearchEngine::builder()
    .with_extension(Box::new(QueryRewriteExt))
    .build();

  let results = engine.search_at(&posts, "k8s", &SearchOptions::default(), now());
  assert_eq!(results.len(), 3, "rewritten query should match every post");
  // Highlights report the query after rewriting.
  assert_eq!(results[0].highlights[0].matched_text, "kubernetes");

  let plain = SearchEngine::default().search_at(&posts, "k8s", &SearchOptions::default(), now());
  assert!(plain.is_empty());
}

#[test]
fn test_before_limit_sees_full_ranking() {
  let posts = posts();
  let engine = SearchEngine::builder()
    .with_extension(Box::new(PinExt { slug: "pinned" }))
    .build();

  let results = engine.search_at(
    &posts,
    "kubernetes",
    &SearchOptions::default().limit(1),
    now(),
  );
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].post.slug, "pinned");
}

#[test]
fn test_extensions_run_in_order() {
  let posts = posts();
  let engine = SearchEngine::builder()
    .with_extension(Box::new(QueryRewriteExt))
    .with_extension(Box::new(ScoreBumpExt))
    .build();

  let bumped = engine.search_at(&posts, "k8s", &SearchOptions::default(), now());
  let base = SearchEngine::default().search_at(&posts, "kubernetes", &SearchOptions::default(), now());
  assert_eq!(bumped.len(), base.len());
  for (b, r) in bumped.iter().zip(&base) {
    assert_eq!(b.post.slug, r.post.slug);
    assert_eq!(b.score, r.score + 0.5);
  }
}
