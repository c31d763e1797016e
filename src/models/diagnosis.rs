//! Diagnosis event model
//!
//! This module contains the diagnosis event attached to an encounter and the
//! coding-system era that decides which lookup table reads its code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::encounter::EncounterId;

/// Diagnosis vocabulary that produced a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CodingSystem {
    /// ICD-9-CM, used before the transition date
    Icd9,
    /// ICD-10 (CM or WHO), used from the transition date
    Icd10,
}

impl CodingSystem {
    /// Read a numeric version tag (9 or 10)
    #[must_use]
    pub const fn from_version(version: i32) -> Option<Self> {
        match version {
            9 => Some(Self::Icd9),
            10 => Some(Self::Icd10),
            _ => None,
        }
    }

    /// Numeric version tag
    #[must_use]
    pub const fn version(self) -> i32 {
        match self {
            Self::Icd9 => 9,
            Self::Icd10 => 10,
        }
    }

    /// Era of an untagged code recorded on the given date
    #[must_use]
    pub fn for_date(date: NaiveDate, transition: NaiveDate) -> Self {
        if date < transition {
            Self::Icd9
        } else {
            Self::Icd10
        }
    }
}

impl fmt::Display for CodingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Icd9 => write!(f, "ICD-9"),
            Self::Icd10 => write!(f, "ICD-10"),
        }
    }
}

/// A diagnosis code recorded for an encounter
///
/// `seq_num` keeps the position in the billing list. That position does not
/// reliably separate primary from secondary diagnoses, so classification
/// never looks at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisEvent {
    /// Encounter the diagnosis belongs to
    pub encounter_id: EncounterId,
    /// Diagnosis code as recorded (dots and case are tolerated)
    pub code: String,
    /// Vocabulary the code comes from
    pub coding_system: CodingSystem,
    /// Position in the encounter's diagnosis list
    pub seq_num: u32,
}

impl DiagnosisEvent {
    /// Create a new diagnosis event
    #[must_use]
    pub fn new(
        encounter_id: EncounterId,
        code: impl Into<String>,
        coding_system: CodingSystem,
        seq_num: u32,
    ) -> Self {
        Self {
            encounter_id,
            code: code.into(),
            coding_system,
            seq_num,
        }
    }
}

/// Normalize a diagnosis code for table lookup
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim()
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
