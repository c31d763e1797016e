//! Compiled diagnosis code tables
//!
//! Table rows are written the way the published coding algorithms list them:
//! either a code prefix (`"I21"`) or an inclusive range of equal-width codes
//! that share their alphabetic head (`"I425-I429"`, `"1740-1958"`). Ranges are
//! expanded once at compile time into a prefix map, so a lookup only probes
//! the prefixes of the code being classified.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::models::diagnosis::normalize_code;

use super::Category;

/// Categories a single code resolves to
pub type CategoryMatches<C> = SmallVec<[C; 2]>;

/// Prefix map from code heads to categories, for one coding system
#[derive(Debug, Clone)]
pub struct CodeTable<C: Category> {
    prefixes: FxHashMap<String, CategoryMatches<C>>,
    longest: usize,
}

impl<C: Category> CodeTable<C> {
    /// Compile per-category rows into a lookup table
    pub fn compile(rows: &[(C, &[&str])]) -> Result<Self> {
        let mut prefixes: FxHashMap<String, CategoryMatches<C>> = FxHashMap::default();
        let mut longest = 0;

        for (category, entries) in rows {
            for entry in *entries {
                for prefix in expand_entry(entry)? {
                    longest = longest.max(prefix.len());
                    let matches = prefixes.entry(prefix).or_default();
                    if !matches.contains(category) {
                        matches.push(*category);
                    }
                }
            }
        }

        Ok(Self { prefixes, longest })
    }

    /// Number of distinct prefixes in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the table holds no prefixes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Categories matched by a code; unmapped codes match nothing
    #[must_use]
    pub fn lookup(&self, code: &str) -> CategoryMatches<C> {
        let code = normalize_code(code);
        let mut found = CategoryMatches::new();

        for len in 1..=code.len().min(self.longest) {
            let Some(head) = code.get(..len) else {
                continue;
            };
            if let Some(matches) = self.prefixes.get(head) {
                for category in matches {
                    if !found.contains(category) {
                        found.push(*category);
                    }
                }
            }
        }

        found
    }
}

/// Expand one table entry into the prefixes it stands for
fn expand_entry(entry: &str) -> Result<Vec<String>> {
    let entry = entry.trim();
    match entry.split_once('-') {
        None => {
            validate_code(entry)?;
            Ok(vec![entry.to_string()])
        }
        Some((low, high)) => expand_range(entry, low.trim(), high.trim()),
    }
}

fn expand_range(entry: &str, low: &str, high: &str) -> Result<Vec<String>> {
    validate_code(low).and_then(|()| validate_code(high))?;
    if low.len() != high.len() {
        return Err(Error::code_table(entry, "range bounds differ in width"));
    }

    let (low_head, low_digits) = split_head(low);
    let (high_head, high_digits) = split_head(high);
    if low_head != high_head {
        return Err(Error::code_table(entry, "range bounds differ in their alphabetic head"));
    }

    let parse = |digits: &str| {
        digits
            .parse::<u32>()
            .map_err(|_| Error::code_table(entry, "range bounds must end in digits"))
    };
    let (start, end) = (parse(low_digits)?, parse(high_digits)?);
    if start > end {
        return Err(Error::code_table(entry, "range is inverted"));
    }

    let width = low_digits.len();
    Ok((start..=end)
        .map(|n| format!("{low_head}{n:0width$}"))
        .collect())
}

fn split_head(code: &str) -> (&str, &str) {
    let split = code
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(code.len());
    code.split_at(split)
}

fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(Error::code_table(code, "empty code"));
    }
    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(Error::code_table(code, "codes must be upper-case alphanumeric without dots"));
    }
    Ok(())
}
