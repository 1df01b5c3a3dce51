//! Searches a small blog and prints ranked results with their highlights.
//!
//! Run with `RUST_LOG=postseek=debug` to see the engine's logging.

use chrono::{Duration, Utc};
use postseek::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let now = Utc::now();
  let posts = vec![
    Post::new("nextjs-blog", "Next.js로 블로그 만들기", now - Duration::days(3))
      .with_description("정적 생성과 MDX로 개인 블로그를 만드는 과정")
      .with_tags(["nextjs", "react", "블로그"])
      .with_series("블로그 개발기", Some(1))
      .with_content("Next.js App Router를 사용해 블로그를 만들었습니다. 검색 기능은 ..."),
    Post::new("search-feature", "블로그 검색 기능 구현", now - Duration::days(40))
      .with_description("가중치 기반 검색과 하이라이트")
      .with_tags(["search", "블로그"])
      .with_series("블로그 개발기", Some(2))
      .with_content("제목, 설명, 태그에 서로 다른 가중치를 두고 점수를 계산합니다."),
    Post::new("rust-notes", "Rust Ownership Notes", now - Duration::days(400))
      .with_tags(["rust"])
      .with_author("makano"),
  ];

  let engine = SearchEngine::default();
  for query in ["블로그", "next", "rust"] {
    println!("== {query}");
    let results = engine.search(&posts, query, &SearchOptions::default().limit(5));
    for result in &results {
      println!("{:>6.2}  {}", result.score, result.post.title);
      for h in &result.highlights {
        println!("        [{}] {}", h.field, h.text);
      }
    }
  }

  if let Some(nav) = series_navigation(&posts, "nextjs-blog") {
    let progress = series_progress(&nav.current.slug, &nav.series);
    println!(
      "\n{} ({}/{}), next: {}",
      nav.series.name,
      progress.current,
      progress.total,
      nav.next.map_or("-", |p| p.title.as_str())
    );
  }

  let related = related_posts(&posts[0], &posts, 3);
  println!("related: {:?}", related.iter().map(|p| &p.slug).collect::<Vec<_>>());
  println!("suggestions: {:?}", search_suggestions(&posts));
}
