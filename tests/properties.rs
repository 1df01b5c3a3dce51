use chrono::{DateTime, Duration, TimeZone, Utc};
use postseek::normalize::{count_matches, normalize_text};
use postseek::prelude::*;
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

fn arb_post() -> impl Strategy<Value = Post> {
  (
    "[a-z]{1,6}",
    "[abc 한글]{0,12}",
    "[abc ]{0,20}",
    prop::collection::vec("[abc]{1,4}", 0..4),
    prop::option::of("[abc ]{1,8}"),
    "[abc ]{0,40}",
    0i64..120,
  )
    .prop_map(|(slug, title, description, tags, series, content, age)| {
      let mut post = Post::new(slug, title, now() - Duration::days(age))
        .with_description(description)
        .with_tags(tags)
        .with_content(content);
      if let Some(series) = series {
        post = post.with_series(series, None);
      }
      post
    })
}

fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
  prop::collection::vec(arb_post(), 0..24)
}

proptest! {
  #[test]
  fn test_empty_query_never_matches(posts in arb_posts(), query in "[ \t\n]{0,4}") {
    let results = SearchEngine::default().search_at(&posts, &query, &SearchOptions::default(), now());
    prop_assert!(results.is_empty());
  }

  #[test]
  fn test_results_are_positive_and_above_min_score(
    posts in arb_posts(),
    query in "[abc한]{1,3}",
    min_score in 0.0f64..10.0,
  ) {
    let options = SearchOptions::default().min_score(min_score);
    let results = SearchEngine::default().search_at(&posts, &query, &options, now());
    for r in &results {
      prop_assert!(r.score > 0.0);
      prop_assert!(r.score >= min_score);
    }
  }

  #[test]
  fn test_results_are_sorted(posts in arb_posts(), query in "[abc]{1,2}") {
    let results = SearchEngine::default().search_at(&posts, &query, &SearchOptions::default(), now());
    for pair in results.windows(2) {
      let (a, b) = (&pair[0], &pair[1]);
      prop_assert!(
        a.score > b.score || (a.score == b.score && a.post.date >= b.post.date),
        "{} ({}) before {} ({})", a.post.slug, a.score, b.post.slug, b.score
      );
    }
  }

  #[test]
  fn test_limit_is_a_prefix(posts in arb_posts(), query in "[abc]{1,2}", limit in 1usize..10) {
    let engine = SearchEngine::default();
    let all = engine.search_at(&posts, &query, &SearchOptions::default(), now());
    let limited = engine.search_at(&posts, &query, &SearchOptions::default().limit(limit), now());

    prop_assert!(limited.len() <= limit);
    prop_assert_eq!(limited.len(), all.len().min(limit));
    for (l, a) in limited.iter().zip(&all) {
      prop_assert!(std::ptr::eq(l.post, a.post));
      prop_assert_eq!(l.score, a.score);
    }
  }

  #[test]
  fn test_content_toggle_only_removes_content(posts in arb_posts(), query in "[abc]{1,2}") {
    let engine = SearchEngine::default();
    let off = SearchOptions::default().include_content(false);
    let results = engine.search_at(&posts, &query, &off, now());
    for r in &results {
      prop_assert!(r.highlights_for(HighlightField::Content).next().is_none());
    }

    let folded = normalize_text(&query);
    for post in &posts {
      let with = engine.score(post, &query, true, now());
      let without = engine.score(post, &query, false, now());
      let occurrences = count_matches(&post.content, &folded) as f64;
      if occurrences == 0.0 {
        prop_assert_eq!(with, without);
      } else {
        // Content weight is 1, boosted by at most 1.1 for recent posts.
        let gap = with - without;
        prop_assert!(gap > 0.0);
        prop_assert!(gap <= occurrences * 1.1 + 1e-9, "gap {} for {} matches", gap, occurrences);
      }
    }
  }
}
