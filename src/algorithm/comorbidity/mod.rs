//! Comorbidity classification
//!
//! This module maps diagnosis codes to comorbidity categories with fixed,
//! per-era lookup tables and resolves severity hierarchies per encounter.
//! The Charlson and Elixhauser taxonomies are independent: each defines its
//! own categories, tables and weights, and they only share the flag
//! representation produced here.

pub mod charlson;
pub mod codes;
pub mod elixhauser;
pub mod severity;

use log::debug;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use crate::error::Result;
use crate::models::diagnosis::{CodingSystem, DiagnosisEvent};
use codes::{CategoryMatches, CodeTable};
use severity::{SeverityLevel, resolve_hierarchy};

/// A comorbidity category of one index taxonomy
pub trait Category: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Condition family used for hierarchy resolution
    type Family: Copy + Eq + Hash + fmt::Debug;

    /// Every category of the taxonomy, in reporting order
    fn all() -> &'static [Self];

    /// Stable snake_case name
    fn name(self) -> &'static str;

    /// Family and severity, for categories that are graded variants
    fn hierarchy(self) -> Option<(Self::Family, SeverityLevel)>;

    /// Code table rows for one coding system
    fn code_rows(system: CodingSystem) -> &'static [(Self, &'static [&'static str])];

    /// Look a category up by name
    #[must_use]
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(name))
    }
}

/// Categories present for one encounter, hierarchy already resolved
///
/// The only way to build flags is through a resolving constructor, so a
/// milder variant never sits next to a more severe one of the same family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFlags<C: Category> {
    present: BTreeSet<C>,
}

impl<C: Category> Default for CategoryFlags<C> {
    fn default() -> Self {
        Self {
            present: BTreeSet::new(),
        }
    }
}

impl<C: Category> CategoryFlags<C> {
    /// Build flags from matched categories
    #[must_use]
    pub fn from_categories(categories: impl IntoIterator<Item = C>) -> Self {
        let mut present: BTreeSet<C> = categories.into_iter().collect();
        resolve_hierarchy(&mut present);
        Self { present }
    }

    /// Build flags from category names; names outside the taxonomy are ignored
    #[must_use]
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_categories(names.into_iter().filter_map(|name| {
            let category = C::from_name(name);
            if category.is_none() {
                debug!("Ignoring category '{name}' outside the active taxonomy");
            }
            category
        }))
    }

    /// Whether a category is present
    #[must_use]
    pub fn contains(&self, category: C) -> bool {
        self.present.contains(&category)
    }

    /// Present categories in taxonomy order
    pub fn iter(&self) -> impl Iterator<Item = C> + '_ {
        self.present.iter().copied()
    }

    /// Number of present categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.present.len()
    }

    /// Whether no category is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    /// One `(category, present)` flag for every category of the taxonomy
    #[must_use]
    pub fn flags(&self) -> Vec<(C, bool)> {
        C::all()
            .iter()
            .map(|category| (*category, self.contains(*category)))
            .collect()
    }

    /// Names of the present categories
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(C::name).collect()
    }
}

/// Maps diagnosis codes to the categories of one taxonomy
///
/// Compiled once and shared read-only between workers.
#[derive(Debug, Clone)]
pub struct CodeClassifier<C: Category> {
    icd9: CodeTable<C>,
    icd10: CodeTable<C>,
}

impl<C: Category> CodeClassifier<C> {
    /// Compile the taxonomy's code tables for both coding systems
    pub fn compile() -> Result<Self> {
        Ok(Self {
            icd9: CodeTable::compile(C::code_rows(CodingSystem::Icd9))?,
            icd10: CodeTable::compile(C::code_rows(CodingSystem::Icd10))?,
        })
    }

    fn table(&self, system: CodingSystem) -> &CodeTable<C> {
        match system {
            CodingSystem::Icd9 => &self.icd9,
            CodingSystem::Icd10 => &self.icd10,
        }
    }

    /// Categories a single code maps to
    #[must_use]
    pub fn lookup(&self, code: &str, system: CodingSystem) -> CategoryMatches<C> {
        self.table(system).lookup(code)
    }

    /// Classify every diagnosis of an encounter, in any list position
    #[must_use]
    pub fn classify(&self, diagnoses: &[DiagnosisEvent]) -> CategoryFlags<C> {
        CategoryFlags::from_categories(
            diagnoses
                .iter()
                .flat_map(|diagnosis| self.lookup(&diagnosis.code, diagnosis.coding_system)),
        )
    }

    /// Number of diagnoses that map to no category, for auditing
    #[must_use]
    pub fn unmapped_count(&self, diagnoses: &[DiagnosisEvent]) -> usize {
        diagnoses
            .iter()
            .filter(|diagnosis| {
                self.lookup(&diagnosis.code, diagnosis.coding_system)
                    .is_empty()
            })
            .count()
    }
}
