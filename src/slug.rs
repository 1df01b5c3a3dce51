//! URL slugs for tag and series pages.

/// Convert text into a URL-friendly slug.
///
/// Lowercases, trims, turns whitespace runs into `-` and drops everything
/// except ASCII word characters, Hangul syllables and `-`.
///
/// ```rust
/// use postseek::slug::to_slug;
///
/// assert_eq!(to_slug("Next.js 시작하기"), "nextjs-시작하기");
/// assert_eq!(to_slug("Hello World"), "hello-world");
/// ```
pub fn to_slug(text: &str) -> String {
  let lowered = text.to_lowercase();
  let mut slug = String::with_capacity(lowered.len());
  let mut in_space = false;

  for c in lowered.trim().chars() {
    if c.is_whitespace() {
      if !in_space {
        slug.push('-');
      }
      in_space = true;
      continue;
    }
    in_space = false;
    if is_slug_char(c) {
      slug.push(c);
    }
  }

  slug
}

fn is_slug_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_' || c == '-' || ('가'..='힣').contains(&c)
}
