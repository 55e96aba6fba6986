use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Classifier lookup tables
// ============================================================================

/// Immutable lookup data injected into the `Classifier`.
///
/// Everything that used to be a scattered literal in the legacy migration
/// scripts lives here: the supported languages, the ownership suffixes that
/// mark a role rather than a field, the enumerated option tokens that trail a
/// dotted field key, and the semantic suffix → option slot table.
///
/// Every list can be overridden from the `tables:` section of the YAML config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierTables {
    /// Languages every label, placeholder and option text is seeded with
    pub languages: Vec<String>,

    /// Trailing tokens stripped before pattern matching (`_has_property`, ...)
    pub role_suffixes: Vec<String>,

    /// Option tokens appended to a `<screen>.field.<field>` key; matched greedily
    pub value_suffixes: Vec<String>,

    /// Tokens that only follow a numeric infix (`income_0_no_additional_income`)
    pub numbered_value_suffixes: Vec<String>,

    /// Sector tokens of the field-of-activity dropdowns; matched lazily
    pub sector_suffixes: Vec<String>,

    /// Semantic option suffix → persisted option value
    pub slot_suffixes: BTreeMap<String, String>,
}

impl Default for ClassifierTables {
    fn default() -> Self {
        Self {
            languages: strings(&["en", "he", "ru"]),
            role_suffixes: strings(&["has_property", "no_property", "selling_property"]),
            value_suffixes: strings(DEFAULT_VALUE_SUFFIXES),
            numbered_value_suffixes: strings(&["no_additional_income", "no_obligations"]),
            sector_suffixes: strings(DEFAULT_SECTOR_SUFFIXES),
            slot_suffixes: default_slot_suffixes(),
        }
    }
}

impl ClassifierTables {
    pub fn supports_language(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l == code)
    }

    /// Slot table ordered longest suffix first, so `garden_apartment` wins
    /// over `apartment`.
    pub fn slot_suffixes_longest_first(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .slot_suffixes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

const DEFAULT_VALUE_SUFFIXES: &[&str] = &[
    // property ownership
    "has_property",
    "no_property",
    "selling_property",
    // when is the money needed
    "within_3_months",
    "3_to_6_months",
    "6_to_12_months",
    "over_12_months",
    // property type
    "apartment",
    "garden_apartment",
    "penthouse",
    "private_house",
    "other",
    // first home
    "yes_first_home",
    "no_additional_property",
    "investment",
    // interest rate
    "fixed_rate",
    "variable_rate",
    "mixed_rate",
    "not_sure",
    // free-text answer prefixes
    "im_",
    "i_no_",
    "i_own_",
    "selling_",
    "no_",
    "has_",
    // family status
    "single",
    "married",
    "divorced",
    "widowed",
    "partner",
    "commonlaw_partner",
    // education
    "no_high_school_diploma",
    "partial_high_school_diploma",
    "full_high_school_diploma",
    "postsecondary_education",
    "bachelors",
    "masters",
    "doctorate",
    // main source of income
    "employee",
    "selfemployed",
    "pension",
    "student",
    "unemployed",
    "unpaid_leave",
    // additional income
    "additional_salary",
    "additional_work",
    "property_rental_income",
    "no_additional_income",
    // obligations
    "bank_loan",
    "consumer_credit",
    "credit_card",
    "no_obligations",
    // banks
    "hapoalim",
    "leumi",
    "discount",
    "massad",
    "mizrahi",
];

const DEFAULT_SECTOR_SUFFIXES: &[&str] = &[
    "agriculture",
    "technology",
    "healthcare",
    "education",
    "finance",
    "real_estate",
    "construction",
    "retail",
    "manufacturing",
    "government",
    "transport",
    "consulting",
    "entertainment",
    "other",
];

/// Option values follow the order each dropdown shows its choices in.
const DEFAULT_SLOT_GROUPS: &[&[&str]] = &[
    &["no_property", "has_property", "selling_property"],
    &["within_3_months", "3_to_6_months", "6_to_12_months", "over_12_months"],
    &["apartment", "garden_apartment", "penthouse", "private_house"],
    &["yes_first_home", "no_additional_property", "investment"],
    &["fixed_rate", "variable_rate", "mixed_rate", "not_sure"],
    &["single", "married", "divorced", "widowed", "commonlaw_partner"],
    &[
        "no_high_school_diploma",
        "partial_high_school_diploma",
        "full_high_school_diploma",
        "postsecondary_education",
        "bachelors",
        "masters",
        "doctorate",
    ],
    &["employee", "selfemployed", "pension", "student", "unemployed", "unpaid_leave"],
    &[
        "no_additional_income",
        "additional_salary",
        "additional_work",
        "property_rental_income",
    ],
    &["no_obligations", "bank_loan", "consumer_credit", "credit_card"],
    &["hapoalim", "leumi", "discount", "massad", "mizrahi"],
];

fn default_slot_suffixes() -> BTreeMap<String, String> {
    DEFAULT_SLOT_GROUPS
        .iter()
        .flat_map(|group| {
            group
                .iter()
                .enumerate()
                .map(|(i, suffix)| (suffix.to_string(), (i + 1).to_string()))
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
