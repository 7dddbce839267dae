//! Rule-based normalizers and pattern lists for statement fields.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{format_indian_amount, parse_amount};
pub use dates::{DATE_FORMATS, parse_date, parse_date_with, standardize_date};
pub use patterns::{AMOUNT_TOKEN, DATE_TOKEN, normalize_whitespace};

use regex::{Captures, Regex};

/// Ordered list of candidate patterns for one field.
///
/// The first pattern that matches anywhere in the text wins; later patterns
/// are looser fallbacks and are never consulted once an earlier one hits.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile case-insensitive patterns in priority order.
    pub fn new<S: AsRef<str>>(patterns: impl IntoIterator<Item = S>) -> Result<Self, regex::Error> {
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(&format!("(?i){}", p.as_ref())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Captures of the first matching pattern.
    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.patterns.iter().find_map(|re| re.captures(text))
    }

    /// First capture group of the first matching pattern.
    pub fn first_group<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}
