//! Charlson comorbidity index
//!
//! Quan (2005) ICD-9-CM and ICD-10 coding algorithms for the 17 Charlson
//! categories, the fixed integer weights, and the age step function.

use std::fmt;

use crate::models::diagnosis::CodingSystem;

use super::severity::SeverityLevel;
use super::{Category, CategoryFlags};

/// Charlson comorbidity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharlsonCategory {
    /// Myocardial infarction
    MyocardialInfarct,
    /// Congestive heart failure
    CongestiveHeartFailure,
    /// Peripheral vascular disease
    PeripheralVascularDisease,
    /// Cerebrovascular disease
    CerebrovascularDisease,
    /// Dementia
    Dementia,
    /// Chronic pulmonary disease
    ChronicPulmonaryDisease,
    /// Rheumatic disease
    RheumaticDisease,
    /// Peptic ulcer disease
    PepticUlcerDisease,
    /// Mild liver disease
    MildLiverDisease,
    /// Diabetes without chronic complications
    DiabetesWithoutComplications,
    /// Diabetes with chronic complications
    DiabetesWithComplications,
    /// Hemiplegia or paraplegia
    Paraplegia,
    /// Renal disease
    RenalDisease,
    /// Any malignancy, including lymphoma and leukaemia
    MalignantCancer,
    /// Moderate or severe liver disease
    SevereLiverDisease,
    /// Metastatic solid tumour
    MetastaticSolidTumor,
    /// AIDS/HIV
    Aids,
}

/// Condition families with graded Charlson variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharlsonFamily {
    /// Mild and severe liver disease
    Liver,
    /// Diabetes without and with complications
    Diabetes,
    /// Malignancy and metastatic solid tumour
    Cancer,
}

const ALL: [CharlsonCategory; 17] = [
    CharlsonCategory::MyocardialInfarct,
    CharlsonCategory::CongestiveHeartFailure,
    CharlsonCategory::PeripheralVascularDisease,
    CharlsonCategory::CerebrovascularDisease,
    CharlsonCategory::Dementia,
    CharlsonCategory::ChronicPulmonaryDisease,
    CharlsonCategory::RheumaticDisease,
    CharlsonCategory::PepticUlcerDisease,
    CharlsonCategory::MildLiverDisease,
    CharlsonCategory::DiabetesWithoutComplications,
    CharlsonCategory::DiabetesWithComplications,
    CharlsonCategory::Paraplegia,
    CharlsonCategory::RenalDisease,
    CharlsonCategory::MalignantCancer,
    CharlsonCategory::SevereLiverDisease,
    CharlsonCategory::MetastaticSolidTumor,
    CharlsonCategory::Aids,
];

impl CharlsonCategory {
    /// Fixed Charlson weight of the category
    #[must_use]
    pub const fn weight(self) -> i32 {
        match self {
            Self::MyocardialInfarct
            | Self::CongestiveHeartFailure
            | Self::PeripheralVascularDisease
            | Self::CerebrovascularDisease
            | Self::Dementia
            | Self::ChronicPulmonaryDisease
            | Self::RheumaticDisease
            | Self::PepticUlcerDisease
            | Self::MildLiverDisease
            | Self::DiabetesWithoutComplications => 1,
            Self::DiabetesWithComplications
            | Self::Paraplegia
            | Self::RenalDisease
            | Self::MalignantCancer => 2,
            Self::SevereLiverDisease => 3,
            Self::MetastaticSolidTumor | Self::Aids => 6,
        }
    }
}

impl Category for CharlsonCategory {
    type Family = CharlsonFamily;

    fn all() -> &'static [Self] {
        &ALL
    }

    fn name(self) -> &'static str {
        match self {
            Self::MyocardialInfarct => "myocardial_infarct",
            Self::CongestiveHeartFailure => "congestive_heart_failure",
            Self::PeripheralVascularDisease => "peripheral_vascular_disease",
            Self::CerebrovascularDisease => "cerebrovascular_disease",
            Self::Dementia => "dementia",
            Self::ChronicPulmonaryDisease => "chronic_pulmonary_disease",
            Self::RheumaticDisease => "rheumatic_disease",
            Self::PepticUlcerDisease => "peptic_ulcer_disease",
            Self::MildLiverDisease => "mild_liver_disease",
            Self::DiabetesWithoutComplications => "diabetes_without_cc",
            Self::DiabetesWithComplications => "diabetes_with_cc",
            Self::Paraplegia => "paraplegia",
            Self::RenalDisease => "renal_disease",
            Self::MalignantCancer => "malignant_cancer",
            Self::SevereLiverDisease => "severe_liver_disease",
            Self::MetastaticSolidTumor => "metastatic_solid_tumor",
            Self::Aids => "aids",
        }
    }

    fn hierarchy(self) -> Option<(CharlsonFamily, SeverityLevel)> {
        match self {
            Self::MildLiverDisease => Some((CharlsonFamily::Liver, SeverityLevel::Mild)),
            Self::SevereLiverDisease => Some((CharlsonFamily::Liver, SeverityLevel::Severe)),
            Self::DiabetesWithoutComplications => {
                Some((CharlsonFamily::Diabetes, SeverityLevel::Mild))
            }
            Self::DiabetesWithComplications => {
                Some((CharlsonFamily::Diabetes, SeverityLevel::Severe))
            }
            Self::MalignantCancer => Some((CharlsonFamily::Cancer, SeverityLevel::Mild)),
            Self::MetastaticSolidTumor => Some((CharlsonFamily::Cancer, SeverityLevel::Severe)),
            _ => None,
        }
    }

    fn code_rows(system: CodingSystem) -> &'static [(Self, &'static [&'static str])] {
        match system {
            CodingSystem::Icd9 => ICD9_ROWS,
            CodingSystem::Icd10 => ICD10_ROWS,
        }
    }
}

impl fmt::Display for CharlsonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

use CharlsonCategory as C;

const ICD9_ROWS: &[(CharlsonCategory, &[&str])] = &[
    (C::MyocardialInfarct, &["410", "412"]),
    (
        C::CongestiveHeartFailure,
        &[
            "39891", "40201", "40211", "40291", "40401", "40403", "40411", "40413", "40491",
            "40493", "4254-4259", "428",
        ],
    ),
    (
        C::PeripheralVascularDisease,
        &["0930", "4373", "440", "441", "4431-4439", "4471", "5571", "5579", "V434"],
    ),
    (C::CerebrovascularDisease, &["36234", "430-438"]),
    (C::Dementia, &["290", "2941", "3312"]),
    (
        C::ChronicPulmonaryDisease,
        &["4168", "4169", "490-505", "5064", "5081", "5088"],
    ),
    (
        C::RheumaticDisease,
        &["4465", "7100-7104", "7140-7142", "7148", "725"],
    ),
    (C::PepticUlcerDisease, &["531-534"]),
    (
        C::MildLiverDisease,
        &[
            "07022", "07023", "07032", "07033", "07044", "07054", "0706", "0709", "570", "571",
            "5733", "5734", "5738", "5739", "V427",
        ],
    ),
    (C::DiabetesWithoutComplications, &["2500-2503", "2508", "2509"]),
    (C::DiabetesWithComplications, &["2504-2507"]),
    (
        C::Paraplegia,
        &["3341", "342", "343", "3440-3446", "3449"],
    ),
    (
        C::RenalDisease,
        &[
            "40301", "40311", "40391", "40402", "40403", "40412", "40413", "40492", "40493",
            "582", "5830-5837", "585", "586", "5880", "V420", "V451", "V56",
        ],
    ),
    (C::MalignantCancer, &["140-172", "1740-1958", "200-208", "2386"]),
    (C::SevereLiverDisease, &["4560-4562", "5722-5728"]),
    (C::MetastaticSolidTumor, &["196-199"]),
    (C::Aids, &["042-044"]),
];

const ICD10_ROWS: &[(CharlsonCategory, &[&str])] = &[
    (C::MyocardialInfarct, &["I21", "I22", "I252"]),
    (
        C::CongestiveHeartFailure,
        &[
            "I099", "I110", "I130", "I132", "I255", "I420", "I425-I429", "I43", "I50", "P290",
        ],
    ),
    (
        C::PeripheralVascularDisease,
        &[
            "I70", "I71", "I731", "I738", "I739", "I771", "I790", "I792", "K551", "K558", "K559",
            "Z958", "Z959",
        ],
    ),
    (C::CerebrovascularDisease, &["G45", "G46", "H340", "I60-I69"]),
    (C::Dementia, &["F00-F03", "F051", "G30", "G311"]),
    (
        C::ChronicPulmonaryDisease,
        &["I278", "I279", "J40-J47", "J60-J67", "J684", "J701", "J703"],
    ),
    (
        C::RheumaticDisease,
        &["M05", "M06", "M315", "M32-M34", "M351", "M353", "M360"],
    ),
    (C::PepticUlcerDisease, &["K25-K28"]),
    (
        C::MildLiverDisease,
        &[
            "B18", "K700-K703", "K709", "K713-K715", "K717", "K73", "K74", "K760", "K762-K764",
            "K768", "K769", "Z944",
        ],
    ),
    (
        C::DiabetesWithoutComplications,
        &[
            "E100", "E101", "E106", "E108", "E109", "E110", "E111", "E116", "E118", "E119",
            "E120", "E121", "E126", "E128", "E129", "E130", "E131", "E136", "E138", "E139",
            "E140", "E141", "E146", "E148", "E149",
        ],
    ),
    (
        C::DiabetesWithComplications,
        &[
            "E102-E105", "E107", "E112-E115", "E117", "E122-E125", "E127", "E132-E135", "E137",
            "E142-E145", "E147",
        ],
    ),
    (
        C::Paraplegia,
        &["G041", "G114", "G801", "G802", "G81", "G82", "G830-G834", "G839"],
    ),
    (
        C::RenalDisease,
        &[
            "I120", "I131", "N032-N037", "N052-N057", "N18", "N19", "N250", "Z490-Z492", "Z940",
            "Z992",
        ],
    ),
    (
        C::MalignantCancer,
        &[
            "C00-C26", "C30-C34", "C37-C41", "C43", "C45-C58", "C60-C76", "C81-C85", "C88",
            "C90-C97",
        ],
    ),
    (
        C::SevereLiverDisease,
        &[
            "I850", "I859", "I864", "I982", "K704", "K711", "K721", "K729", "K765", "K766",
            "K767",
        ],
    ),
    (C::MetastaticSolidTumor, &["C77-C80"]),
    (C::Aids, &["B20-B22", "B24"]),
];

/// Charlson age points: 0 up to 50, then one point per decade, capped at 4
#[must_use]
pub const fn age_points(age_years: Option<u32>) -> i32 {
    match age_years {
        None => 0,
        Some(age) if age <= 50 => 0,
        Some(age) if age <= 60 => 1,
        Some(age) if age <= 70 => 2,
        Some(age) if age <= 80 => 3,
        Some(_) => 4,
    }
}

/// Charlson index of one encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharlsonScore {
    /// Present categories
    pub flags: CategoryFlags<CharlsonCategory>,
    /// Points from age at admission
    pub age_points: i32,
    /// Sum of category weights, excluding age
    pub comorbidity_points: i32,
}

impl CharlsonScore {
    /// Sum category weights and add age points
    #[must_use]
    pub fn from_flags(flags: CategoryFlags<CharlsonCategory>, age_years: Option<u32>) -> Self {
        let comorbidity_points = flags.iter().map(CharlsonCategory::weight).sum();
        Self {
            flags,
            age_points: age_points(age_years),
            comorbidity_points,
        }
    }

    /// Full Charlson comorbidity index
    #[must_use]
    pub const fn index(&self) -> i32 {
        self.comorbidity_points + self.age_points
    }
}
