//! Elixhauser comorbidities
//!
//! Quan (2005) enhanced ICD-9-CM and ICD-10 coding algorithms for 31
//! Elixhauser categories (hypertension split into uncomplicated and
//! complicated), scored both as an unweighted count and with the van Walraven
//! weights.

use std::fmt;

use crate::models::diagnosis::CodingSystem;

use super::severity::SeverityLevel;
use super::{Category, CategoryFlags};

/// Elixhauser comorbidity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum ElixhauserCategory {
    CongestiveHeartFailure,
    CardiacArrhythmias,
    ValvularDisease,
    PulmonaryCirculation,
    PeripheralVascular,
    HypertensionUncomplicated,
    HypertensionComplicated,
    Paralysis,
    OtherNeurological,
    ChronicPulmonary,
    DiabetesUncomplicated,
    DiabetesComplicated,
    Hypothyroidism,
    RenalFailure,
    LiverDisease,
    PepticUlcer,
    Aids,
    Lymphoma,
    MetastaticCancer,
    SolidTumor,
    RheumatoidArthritis,
    Coagulopathy,
    Obesity,
    WeightLoss,
    FluidElectrolyte,
    BloodLossAnemia,
    DeficiencyAnemias,
    AlcoholAbuse,
    DrugAbuse,
    Psychoses,
    Depression,
}

/// Condition families with graded Elixhauser variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElixhauserFamily {
    /// Uncomplicated and complicated hypertension
    Hypertension,
    /// Uncomplicated and complicated diabetes
    Diabetes,
    /// Solid tumour and metastatic cancer
    Cancer,
}

use ElixhauserCategory as E;

const ALL: [ElixhauserCategory; 31] = [
    E::CongestiveHeartFailure,
    E::CardiacArrhythmias,
    E::ValvularDisease,
    E::PulmonaryCirculation,
    E::PeripheralVascular,
    E::HypertensionUncomplicated,
    E::HypertensionComplicated,
    E::Paralysis,
    E::OtherNeurological,
    E::ChronicPulmonary,
    E::DiabetesUncomplicated,
    E::DiabetesComplicated,
    E::Hypothyroidism,
    E::RenalFailure,
    E::LiverDisease,
    E::PepticUlcer,
    E::Aids,
    E::Lymphoma,
    E::MetastaticCancer,
    E::SolidTumor,
    E::RheumatoidArthritis,
    E::Coagulopathy,
    E::Obesity,
    E::WeightLoss,
    E::FluidElectrolyte,
    E::BloodLossAnemia,
    E::DeficiencyAnemias,
    E::AlcoholAbuse,
    E::DrugAbuse,
    E::Psychoses,
    E::Depression,
];

impl ElixhauserCategory {
    /// van Walraven weight of the category
    #[must_use]
    pub const fn van_walraven_weight(self) -> i32 {
        match self {
            Self::CongestiveHeartFailure | Self::Paralysis => 7,
            Self::CardiacArrhythmias | Self::RenalFailure | Self::FluidElectrolyte => 5,
            Self::ValvularDisease => -1,
            Self::PulmonaryCirculation | Self::SolidTumor => 4,
            Self::PeripheralVascular => 2,
            Self::OtherNeurological | Self::WeightLoss => 6,
            Self::ChronicPulmonary | Self::Coagulopathy => 3,
            Self::LiverDisease => 11,
            Self::Lymphoma => 9,
            Self::MetastaticCancer => 12,
            Self::Obesity => -4,
            Self::BloodLossAnemia | Self::DeficiencyAnemias => -2,
            Self::DrugAbuse => -7,
            Self::Depression => -3,
            Self::HypertensionUncomplicated
            | Self::HypertensionComplicated
            | Self::DiabetesUncomplicated
            | Self::DiabetesComplicated
            | Self::Hypothyroidism
            | Self::PepticUlcer
            | Self::Aids
            | Self::RheumatoidArthritis
            | Self::AlcoholAbuse
            | Self::Psychoses => 0,
        }
    }
}

impl Category for ElixhauserCategory {
    type Family = ElixhauserFamily;

    fn all() -> &'static [Self] {
        &ALL
    }

    fn name(self) -> &'static str {
        match self {
            Self::CongestiveHeartFailure => "congestive_heart_failure",
            Self::CardiacArrhythmias => "cardiac_arrhythmias",
            Self::ValvularDisease => "valvular_disease",
            Self::PulmonaryCirculation => "pulmonary_circulation",
            Self::PeripheralVascular => "peripheral_vascular",
            Self::HypertensionUncomplicated => "hypertension_uncomplicated",
            Self::HypertensionComplicated => "hypertension_complicated",
            Self::Paralysis => "paralysis",
            Self::OtherNeurological => "other_neurological",
            Self::ChronicPulmonary => "chronic_pulmonary",
            Self::DiabetesUncomplicated => "diabetes_uncomplicated",
            Self::DiabetesComplicated => "diabetes_complicated",
            Self::Hypothyroidism => "hypothyroidism",
            Self::RenalFailure => "renal_failure",
            Self::LiverDisease => "liver_disease",
            Self::PepticUlcer => "peptic_ulcer",
            Self::Aids => "aids",
            Self::Lymphoma => "lymphoma",
            Self::MetastaticCancer => "metastatic_cancer",
            Self::SolidTumor => "solid_tumor",
            Self::RheumatoidArthritis => "rheumatoid_arthritis",
            Self::Coagulopathy => "coagulopathy",
            Self::Obesity => "obesity",
            Self::WeightLoss => "weight_loss",
            Self::FluidElectrolyte => "fluid_electrolyte",
            Self::BloodLossAnemia => "blood_loss_anemia",
            Self::DeficiencyAnemias => "deficiency_anemias",
            Self::AlcoholAbuse => "alcohol_abuse",
            Self::DrugAbuse => "drug_abuse",
            Self::Psychoses => "psychoses",
            Self::Depression => "depression",
        }
    }

    fn hierarchy(self) -> Option<(ElixhauserFamily, SeverityLevel)> {
        match self {
            Self::HypertensionUncomplicated => {
                Some((ElixhauserFamily::Hypertension, SeverityLevel::Mild))
            }
            Self::HypertensionComplicated => {
                Some((ElixhauserFamily::Hypertension, SeverityLevel::Severe))
            }
            Self::DiabetesUncomplicated => Some((ElixhauserFamily::Diabetes, SeverityLevel::Mild)),
            Self::DiabetesComplicated => Some((ElixhauserFamily::Diabetes, SeverityLevel::Severe)),
            Self::SolidTumor => Some((ElixhauserFamily::Cancer, SeverityLevel::Mild)),
            Self::MetastaticCancer => Some((ElixhauserFamily::Cancer, SeverityLevel::Severe)),
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

impl fmt::Display for ElixhauserCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

const ICD9_ROWS: &[(ElixhauserCategory, &[&str])] = &[
    (
        E::CongestiveHeartFailure,
        &[
            "39891", "40201", "40211", "40291", "40401", "40403", "40411", "40413", "40491",
            "40493", "4254-4259", "428",
        ],
    ),
    (
        E::CardiacArrhythmias,
        &[
            "4260", "42610", "42612", "42613", "4267", "4269", "4270-4274", "4276-4279", "7850",
            "99601", "99604", "V450", "V533",
        ],
    ),
    (
        E::ValvularDisease,
        &["0932", "394-397", "424", "7463-7466", "V422", "V433"],
    ),
    (
        E::PulmonaryCirculation,
        &["4150", "4151", "416", "4170", "4178", "4179"],
    ),
    (
        E::PeripheralVascular,
        &["0930", "4373", "440", "441", "4431-4439", "4471", "5571", "5579", "V434"],
    ),
    (E::HypertensionUncomplicated, &["401"]),
    (E::HypertensionComplicated, &["402-405"]),
    (E::Paralysis, &["3341", "342", "343", "3440-3446", "3449"]),
    (
        E::OtherNeurological,
        &[
            "3319", "3320", "3321", "3334", "3335", "33392", "334-335", "3362", "340", "341",
            "345", "3481", "3483", "7803", "7843",
        ],
    ),
    (
        E::ChronicPulmonary,
        &["4168", "4169", "490-505", "5064", "5081", "5088"],
    ),
    (E::DiabetesUncomplicated, &["2500-2503"]),
    (E::DiabetesComplicated, &["2504-2509"]),
    (E::Hypothyroidism, &["2409", "243", "244", "2461", "2468"]),
    (
        E::RenalFailure,
        &[
            "40301", "40311", "40391", "40402", "40403", "40412", "40413", "40492", "40493",
            "585", "586", "5880", "V420", "V451", "V56",
        ],
    ),
    (
        E::LiverDisease,
        &[
            "07022", "07023", "07032", "07033", "07044", "07054", "0706", "0709", "4560-4562",
            "570", "571", "5722-5728", "5733", "5734", "5738", "5739", "V427",
        ],
    ),
    (
        E::PepticUlcer,
        &["5317", "5319", "5327", "5329", "5337", "5339", "5347", "5349"],
    ),
    (E::Aids, &["042-044"]),
    (E::Lymphoma, &["200-202", "2030", "2386"]),
    (E::MetastaticCancer, &["196-199"]),
    (E::SolidTumor, &["140-172", "174-195"]),
    (
        E::RheumatoidArthritis,
        &[
            "446", "7010", "7100-7104", "7108", "7109", "7112", "714", "7193", "720", "725",
            "7285", "72889", "72930",
        ],
    ),
    (E::Coagulopathy, &["286", "2871", "2873-2875"]),
    (E::Obesity, &["2780"]),
    (E::WeightLoss, &["260-263", "7832", "7994"]),
    (E::FluidElectrolyte, &["2536", "276"]),
    (E::BloodLossAnemia, &["2800"]),
    (E::DeficiencyAnemias, &["2801-2809", "281"]),
    (
        E::AlcoholAbuse,
        &[
            "2652", "2911-2913", "2915-2919", "3030", "3039", "3050", "3575", "4255", "5353",
            "5710-5713", "980", "V113",
        ],
    ),
    (E::DrugAbuse, &["292", "304", "3052-3059", "V6542"]),
    (
        E::Psychoses,
        &["2938", "295", "29604", "29614", "29644", "29654", "297", "298"],
    ),
    (E::Depression, &["2962", "2963", "2965", "3004", "309", "311"]),
];

const ICD10_ROWS: &[(ElixhauserCategory, &[&str])] = &[
    (
        E::CongestiveHeartFailure,
        &[
            "I099", "I110", "I130", "I132", "I255", "I420", "I425-I429", "I43", "I50", "P290",
        ],
    ),
    (
        E::CardiacArrhythmias,
        &[
            "I441-I443", "I456", "I459", "I47-I49", "R000", "R001", "R008", "T821", "Z450",
            "Z950",
        ],
    ),
    (
        E::ValvularDisease,
        &["A520", "I05-I08", "I091", "I098", "I34-I39", "Q230-Q233", "Z952-Z954"],
    ),
    (
        E::PulmonaryCirculation,
        &["I26", "I27", "I280", "I288", "I289"],
    ),
    (
        E::PeripheralVascular,
        &[
            "I70", "I71", "I731", "I738", "I739", "I771", "I790", "I792", "K551", "K558", "K559",
            "Z958", "Z959",
        ],
    ),
    (E::HypertensionUncomplicated, &["I10"]),
    (E::HypertensionComplicated, &["I11-I13", "I15"]),
    (
        E::Paralysis,
        &["G041", "G114", "G801", "G802", "G81", "G82", "G830-G834", "G839"],
    ),
    (
        E::OtherNeurological,
        &[
            "G10-G13", "G20-G22", "G254", "G255", "G312", "G318", "G319", "G32", "G35-G37", "G40",
            "G41", "G931", "G934", "R470", "R56",
        ],
    ),
    (
        E::ChronicPulmonary,
        &["I278", "I279", "J40-J47", "J60-J67", "J684", "J701", "J703"],
    ),
    (
        E::DiabetesUncomplicated,
        &[
            "E100", "E101", "E109", "E110", "E111", "E119", "E120", "E121", "E129", "E130",
            "E131", "E139", "E140", "E141", "E149",
        ],
    ),
    (
        E::DiabetesComplicated,
        &["E102-E108", "E112-E118", "E122-E128", "E132-E138", "E142-E148"],
    ),
    (E::Hypothyroidism, &["E00-E03", "E890"]),
    (
        E::RenalFailure,
        &["I120", "I131", "N18", "N19", "N250", "Z490-Z492", "Z940", "Z992"],
    ),
    (
        E::LiverDisease,
        &[
            "B18", "I85", "I864", "I982", "K70", "K711", "K713-K715", "K717", "K72-K74", "K760",
            "K762-K769", "Z944",
        ],
    ),
    (
        E::PepticUlcer,
        &["K257", "K259", "K267", "K269", "K277", "K279", "K287", "K289"],
    ),
    (E::Aids, &["B20-B22", "B24"]),
    (E::Lymphoma, &["C81-C85", "C88", "C96", "C900", "C902"]),
    (E::MetastaticCancer, &["C77-C80"]),
    (
        E::SolidTumor,
        &[
            "C00-C26", "C30-C34", "C37-C41", "C43", "C45-C58", "C60-C76", "C97",
        ],
    ),
    (
        E::RheumatoidArthritis,
        &[
            "L940", "L941", "L943", "M05", "M06", "M08", "M120", "M123", "M30", "M310-M313",
            "M32-M35", "M45", "M461", "M468", "M469",
        ],
    ),
    (E::Coagulopathy, &["D65-D68", "D691", "D693-D696"]),
    (E::Obesity, &["E66"]),
    (E::WeightLoss, &["E40-E46", "R634", "R64"]),
    (E::FluidElectrolyte, &["E222", "E86", "E87"]),
    (E::BloodLossAnemia, &["D500"]),
    (E::DeficiencyAnemias, &["D508", "D509", "D51-D53"]),
    (
        E::AlcoholAbuse,
        &[
            "F10", "E52", "G621", "I426", "K292", "K700", "K703", "K709", "T51", "Z502", "Z714",
            "Z721",
        ],
    ),
    (E::DrugAbuse, &["F11-F16", "F18", "F19", "Z715", "Z722"]),
    (
        E::Psychoses,
        &["F20", "F22-F25", "F28", "F29", "F302", "F312", "F315"],
    ),
    (
        E::Depression,
        &["F204", "F313-F315", "F32", "F33", "F341", "F412", "F432"],
    ),
];

/// Elixhauser scores of one encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElixhauserScore {
    /// Present categories
    pub flags: CategoryFlags<ElixhauserCategory>,
}

impl ElixhauserScore {
    /// Wrap the flags of one encounter
    #[must_use]
    pub const fn from_flags(flags: CategoryFlags<ElixhauserCategory>) -> Self {
        Self { flags }
    }

    /// Unweighted number of present categories
    #[must_use]
    pub fn count(&self) -> usize {
        self.flags.len()
    }

    /// van Walraven weighted score; a linear function of the flags only
    #[must_use]
    pub fn van_walraven(&self) -> i32 {
        self.flags
            .iter()
            .map(ElixhauserCategory::van_walraven_weight)
            .sum()
    }
}
