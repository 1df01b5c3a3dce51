use chrono::{DateTime, Duration, TimeZone, Utc};
use postseek::prelude::*;
use unicode_normalization::UnicodeNormalization;

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
}

fn long_ago() -> DateTime<Utc> {
  now() - Duration::days(500)
}

fn search<'a>(posts: &'a [Post], query: &str, options: &SearchOptions) -> Vec<SearchResult<'a>> {
  SearchEngine::default().search_at(posts, query, options, now())
}

#[test]
fn test_title_match_outranks_tag_match() {
  let posts = vec![
    Post::new("guide", "Next.js Guide", now()).with_tags(["react"]),
    Post::new("notes", "Old Notes", now() - Duration::days(730)).with_tags(["nextjs"]),
  ];

  let results = search(&posts, "next", &SearchOptions::default());
  let slugs: Vec<_> = results.iter().map(|r| r.post.slug.as_str()).collect();
  assert_eq!(slugs, ["guide", "notes"]);
  assert_eq!(results[1].score, 2.5);

  let tags: Vec<_> = results[1].highlights_for(HighlightField::Tags).collect();
  assert_eq!(tags.len(), 1);
  assert_eq!(tags[0].text, "nextjs");
  assert_eq!(tags[0].matched_text, "next");
}

#[test]
fn test_whitespace_query_returns_nothing() {
  let posts = vec![Post::new("a", "   ", now()), Post::new("b", "Anything", now())];
  assert!(search(&posts, "   ", &SearchOptions::default()).is_empty());
  assert!(search(&posts, "\t\n", &SearchOptions::default()).is_empty());
  assert!(search_posts(&posts, "", &SearchOptions::default()).is_empty());
}

#[test]
fn test_equal_scores_newer_first() {
  let posts = vec![
    Post::new("older", "Async Rust", long_ago() - Duration::days(10)),
    Post::new("newer", "Async Rust", long_ago()),
  ];
  let results = search(&posts, "async", &SearchOptions::default());
  assert_eq!(results[0].score, results[1].score);
  assert_eq!(results[0].post.slug, "newer");
  assert_eq!(results[1].post.slug, "older");
}

#[test]
fn test_exact_title_bonus() {
  let posts = vec![
    Post::new("exact", "Rust", long_ago()),
    Post::new("partial", "Rust Book", long_ago()),
  ];
  let results = search(&posts, "rust", &SearchOptions::default());
  assert_eq!(results[0].post.slug, "exact");
  assert!(results[0].score - results[1].score >= 5.0);
}

#[test]
fn test_recent_posts_get_boost() {
  let template = |date| {
    Post::new("p", "Database Internals", date)
      .with_description("how a database stores pages")
      .with_tags(["database"])
  };
  let recent = template(now() - Duration::days(3));
  let old = template(long_ago());

  let engine = SearchEngine::default();
  let recent_score = engine.score(&recent, "database", true, now());
  let old_score = engine.score(&old, "database", true, now());
  assert!((recent_score - old_score * 1.1).abs() < 1e-9);

  // Thirty days back is still inside the window, thirty-one is not.
  let edge = template(now() - Duration::days(30));
  let outside = template(now() - Duration::days(31));
  assert!((engine.score(&edge, "database", true, now()) - recent_score).abs() < 1e-9);
  assert_eq!(engine.score(&outside, "database", true, now()), old_score);
}

#[test]
fn test_include_content_toggle() {
  let body = format!("{} the ferris crab shows up here.", "filler text ".repeat(10));
  let posts = vec![Post::new("crab", "Mascots", long_ago()).with_content(body)];

  let on = search(&posts, "ferris", &SearchOptions::default());
  assert_eq!(on.len(), 1);
  assert_eq!(on[0].score, 1.0);
  let content: Vec<_> = on[0].highlights_for(HighlightField::Content).collect();
  assert_eq!(content.len(), 1);
  assert!(content[0].text.contains("ferris crab"));

  let off = search(&posts, "ferris", &SearchOptions::default().include_content(false));
  assert!(off.is_empty());
}

#[test]
fn test_content_past_scoring_window_does_not_count() {
  let body = format!("{}needle", "x".repeat(600));
  let posts = vec![Post::new("deep", "Deep", long_ago()).with_content(body)];
  assert!(search(&posts, "needle", &SearchOptions::default()).is_empty());
}

#[test]
fn test_decomposed_korean_matches_composed_query() {
  let title: String = "한글 블로그 만들기".nfd().collect();
  let posts = vec![Post::new("ko", title, long_ago()).with_tags(["블로그"])];

  let results = search(&posts, "블로그", &SearchOptions::default());
  assert_eq!(results.len(), 1);
  // title 3 + tag 2.5 + exact tag 3
  assert_eq!(results[0].score, 8.5);

  let title = results[0]
    .highlights_for(HighlightField::Title)
    .next()
    .unwrap();
  assert_eq!(title.text, "한글 블로그 만들기");
}

#[test]
fn test_missing_optional_fields_are_ignored() {
  let json = r#"[
    {"slug": "bare", "title": "Bare Post", "date": "2024-01-01"},
    {"slug": "full", "title": "Full", "date": "2024-01-02T10:00:00Z",
     "tags": ["bare"], "series": "Bare Bones", "seriesOrder": 1, "author": "bare-author"}
  ]"#;
  let posts = load_posts_json(json).unwrap();

  let results = search(&posts, "bare", &SearchOptions::default());
  let slugs: Vec<_> = results.iter().map(|r| r.post.slug.as_str()).collect();
  // full: tag 2.5 + exact 3 + series 1.5 + author 0.5 = 7.5; bare: title 3
  assert_eq!(slugs, ["full", "bare"]);
  assert_eq!(results[0].score, 7.5);

  let fields: Vec<_> = results[0].highlights.iter().map(|h| h.field).collect();
  assert_eq!(
    fields,
    [HighlightField::Tags, HighlightField::Series, HighlightField::Author]
  );
}

#[test]
fn test_results_serialize_flattened() {
  let posts = vec![Post::new("json", "Serde Tricks", long_ago())];
  let results = search(&posts, "serde", &SearchOptions::default());
  let value = serde_json::to_value(&results[0]).unwrap();
  assert_eq!(value["slug"], "json");
  assert_eq!(value["score"], 3.0);
  assert_eq!(value["highlights"][0]["field"], "title");
  assert_eq!(value["highlights"][0]["matchedText"], "serde");
}
