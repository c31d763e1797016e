//! Severity ordering within a condition family
//!
//! Some comorbidity categories are graded variants of the same condition
//! (mild and severe liver disease, diabetes with and without complications,
//! solid tumour and metastatic cancer). Only the most severe variant matched
//! for an encounter is kept.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;

use super::Category;

/// Severity of a category within its condition family
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityLevel {
    /// Milder variant (e.g. mild liver disease, uncomplicated diabetes)
    Mild = 1,
    /// More severe variant (e.g. severe liver disease, metastatic cancer)
    Severe = 2,
}

impl SeverityLevel {
    /// Get a descriptive name for this severity level
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Keep only the most severe category of each family
///
/// Categories outside any family are left untouched.
pub fn resolve_hierarchy<C: Category>(present: &mut BTreeSet<C>) {
    let mut worst: FxHashMap<C::Family, SeverityLevel> = FxHashMap::default();
    for (family, severity) in present.iter().filter_map(|category| category.hierarchy()) {
        worst
            .entry(family)
            .and_modify(|current| *current = (*current).max(severity))
            .or_insert(severity);
    }

    present.retain(|category| match category.hierarchy() {
        Some((family, severity)) => worst.get(&family).is_none_or(|max| severity >= *max),
        None => true,
    });
}
