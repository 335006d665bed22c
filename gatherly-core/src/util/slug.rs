use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

pub const MAX_SLUG_LEN: usize = 50;

/// Derives a URL slug from a title.
///
/// Falls back to `fallback` if nothing remains.
pub fn slugify(title: &str, fallback: &str) -> String {
    let lowercase = title.to_lowercase();
    let dashed = NON_ALPHANUMERIC.replace_all(&lowercase, "-");
    let slug: String = dashed.trim_matches('-').chars().take(MAX_SLUG_LEN).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        fallback.to_owned()
    } else {
        slug.to_owned()
    }
}

/// Appends `-1`, `-2`, ... until the slug is not taken.
pub fn unique_slug<E>(
    base: String,
    mut is_taken: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E> {
    if !is_taken(&base)? {
        return Ok(base);
    }
    let mut counter = 1usize;
    loop {
        let candidate = format!("{base}-{counter}");
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
        counter += 1;
    }
}
