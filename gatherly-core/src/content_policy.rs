//! Advisory classification of user-provided text.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

lazy_static! {
    static ref SCRIPT_TAGS: Regex = Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub const DEFAULT_BANNED_TERMS: [&str; 3] = ["spam", "scam", "phishing"];
pub const DEFAULT_CAPITALIZATION_MIN_LEN: usize = 20;
pub const DEFAULT_MAX_UPPERCASE_RATIO: f64 = 0.7;

/// Why a text has been classified as unclean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Content contains prohibited terms")]
    ProhibitedTerms,
    #[error("Excessive capitalization detected")]
    ExcessiveCapitalization,
}

#[derive(Debug, Clone)]
pub struct ContentPolicy {
    banned_terms: Option<Regex>,
    capitalization_min_len: usize,
    max_uppercase_ratio: f64,
}

#[derive(Debug, Error)]
#[error("Invalid banned terms: {0}")]
pub struct InvalidBannedTerms(#[from] regex::Error);

impl ContentPolicy {
    pub fn try_new<S: AsRef<str>>(
        banned_terms: &[S],
        capitalization_min_len: usize,
        max_uppercase_ratio: f64,
    ) -> Result<Self, InvalidBannedTerms> {
        // An empty alternative would match at every word boundary.
        let terms: Vec<_> = banned_terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();
        let banned_terms = if terms.is_empty() {
            None
        } else {
            let alternatives = terms.join("|");
            Some(
                RegexBuilder::new(&format!(r"\b(?:{alternatives})\b"))
                    .case_insensitive(true)
                    .build()?,
            )
        };
        Ok(Self {
            banned_terms,
            capitalization_min_len,
            max_uppercase_ratio,
        })
    }

    /// Checks the sanitized text.
    pub fn evaluate(&self, text: &str) -> Result<(), Violation> {
        let text = sanitize(text);
        if self
            .banned_terms
            .as_ref()
            .is_some_and(|re| re.is_match(&text))
        {
            return Err(Violation::ProhibitedTerms);
        }
        if text.chars().count() > self.capitalization_min_len
            && uppercase_ratio(&text) > self.max_uppercase_ratio
        {
            return Err(Violation::ExcessiveCapitalization);
        }
        Ok(())
    }

    pub fn is_clean(&self, text: &str) -> bool {
        self.evaluate(text).is_ok()
    }
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::try_new(
            &DEFAULT_BANNED_TERMS,
            DEFAULT_CAPITALIZATION_MIN_LEN,
            DEFAULT_MAX_UPPERCASE_RATIO,
        )
        .expect("valid default banned terms")
    }
}

/// Strips script markup and collapses whitespace.
pub fn sanitize(text: &str) -> String {
    let without_scripts = SCRIPT_TAGS.replace_all(text, " ");
    WHITESPACE
        .replace_all(&without_scripts, " ")
        .trim()
        .to_owned()
}

fn uppercase_ratio(text: &str) -> f64 {
    let (letters, uppercase) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });
    if letters == 0 {
        return 0.0;
    }
    uppercase as f64 / letters as f64
}
