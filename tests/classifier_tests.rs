use dropdown_migrate::{
    classify::{
        classifier::{Confidence, SlotSource, UNNAMED_FIELD, effective_component},
        normalize::{
            ends_with_token, numbered_option, sanitize_identifier, strip_role_suffixes,
        },
        patterns::{
            CalculatorPattern, DottedFieldPattern, DropdownNamespacePattern, FieldPattern,
            PatternVariant, SegmentPattern, StepScreenPattern,
        },
        tables::ClassifierTables,
    },
    content::content_model::ComponentType,
};

use crate::common::utils::{consolidated, railway};

mod common;

// =========================================================================
// Key normalization helpers
// =========================================================================

#[test]
fn sanitize_replaces_everything_outside_word_chars() {
    assert_eq!(sanitize_identifier("xyz123???"), "xyz123___");
    assert_eq!(sanitize_identifier("a-b.c d"), "a_b_c_d");
    assert_eq!(sanitize_identifier("already_clean_01"), "already_clean_01");
    assert_eq!(sanitize_identifier("שלום"), "____");
}

#[test]
fn numbered_option_requires_digits_after_option_marker() {
    assert_eq!(numbered_option("credit_step1_purpose_option_12"), Some("12"));
    assert_eq!(numbered_option("mortgage_step1_debt_types_options_3"), Some("3"));
    assert_eq!(numbered_option("credit_step1_purpose_option_"), None);
    assert_eq!(numbered_option("credit_step1_purpose_12"), None);
    assert_eq!(numbered_option("credit_step1_purpose_option_a"), None);
}

#[test]
fn strip_role_suffixes_removes_option_placeholder_and_ownership_markers() {
    let roles = ClassifierTables::default().role_suffixes;

    assert_eq!(
        strip_role_suffixes("mortgage_step1.field.property_ownership_no_property", &roles),
        "mortgage_step1.field.property_ownership"
    );
    assert_eq!(
        strip_role_suffixes("mortgage_step1_debt_types_options_ph", &roles),
        "mortgage_step1_debt_types"
    );
    assert_eq!(
        strip_role_suffixes("calculate_mortgage_type_option_4", &roles),
        "calculate_mortgage_type"
    );
    assert_eq!(
        strip_role_suffixes("calculate_mortgage_period_ph", &roles),
        "calculate_mortgage_period"
    );
    // A bare role token is not reduced to nothing
    assert_eq!(strip_role_suffixes("has_property", &roles), "has_property");
}

#[test]
fn ends_with_token_respects_boundaries() {
    assert!(ends_with_token("family_status_single", "single"));
    assert!(ends_with_token("mortgage_step2.field.single", "single"));
    assert!(ends_with_token("single", "single"));
    assert!(!ends_with_token("familysingle", "single"));
    assert!(!ends_with_token("single_x", "single"));
}

// =========================================================================
// Individual patterns
// =========================================================================

#[test]
fn dotted_field_pattern_strips_enumerated_values() {
    let tables = ClassifierTables::default();
    let pattern = DottedFieldPattern::with_value_suffixes(&tables).unwrap();

    assert_eq!(pattern.name(), "dotted_field");
    assert_eq!(
        pattern.extract("mortgage_step2.field.education_bachelors"),
        Some("education".into())
    );
    assert_eq!(
        pattern.extract("mortgage_step2.field.family_status_married"),
        Some("family_status".into())
    );
    assert_eq!(
        pattern.extract("mortgage_step3.field.field_of_activity_technology"),
        Some("field_of_activity".into()),
        "sector suffixes are matched lazily"
    );
    assert_eq!(
        pattern.extract("mortgage_step3.field.additional_income_0_no_additional_income"),
        Some("additional_income".into()),
        "numbered infix comes off before the general value pass"
    );
    assert_eq!(
        pattern.extract("mortgage_step1.field.property_ownership"),
        Some("property_ownership".into())
    );
    assert_eq!(pattern.extract("mortgage_step1_property_ownership"), None);
}

#[test]
fn exact_dotted_field_pattern_keeps_value_tokens() {
    let pattern = DottedFieldPattern::exact().unwrap();
    assert_eq!(
        pattern.extract("mortgage_step2.field.education_bachelors"),
        Some("education_bachelors".into())
    );
    assert_eq!(pattern.extract("mortgage_step2.field.education.extra"), None);
}

#[test]
fn namespace_step_calculator_and_segment_patterns() {
    let namespace = DropdownNamespacePattern::new().unwrap();
    assert_eq!(
        namespace.extract("app.mortgage.step2.dropdown.education"),
        Some("education".into())
    );
    assert_eq!(namespace.extract("app.mortgage.form.education"), None);

    let step = StepScreenPattern::new().unwrap();
    assert_eq!(step.extract("mortgage_step1_when_needed"), Some("when_needed".into()));
    assert_eq!(step.extract("calculate_mortgage_period"), None);

    let calculator = CalculatorPattern::new(false).unwrap();
    assert_eq!(calculator.extract("calculate_mortgage_period"), Some("period".into()));
    assert_eq!(
        calculator.extract("app.mortgage.form.calculate_mortgage_debt_types"),
        Some("debt_types".into())
    );
    let form_only = CalculatorPattern::new(true).unwrap();
    assert_eq!(form_only.name(), "calculator_form");
    assert_eq!(form_only.extract("calculate_mortgage_period"), None);

    let two = SegmentPattern::two().unwrap();
    assert_eq!(two.extract("credit_step3.bank"), Some("bank".into()));
    assert_eq!(two.extract("a.b.c"), None);

    let three = SegmentPattern::three().unwrap();
    assert_eq!(three.extract("credit_step1.dropdown.loan_purpose"), Some("loan_purpose".into()));
}

#[test]
fn variant_tables_are_ordered() {
    assert_eq!(
        consolidated().pattern_names(),
        vec!["dotted_field", "dropdown_namespace", "step_screen", "calculator", "two_segment"]
    );
    assert_eq!(
        railway().pattern_names(),
        vec![
            "dotted_field",
            "calculator_form",
            "dropdown_namespace",
            "three_segment",
            "step_screen",
            "two_segment"
        ]
    );
    assert_eq!(PatternVariant::parse("Railway"), Some(PatternVariant::Railway));
    assert_eq!(PatternVariant::parse("consolidated"), Some(PatternVariant::Consolidated));
    assert_eq!(PatternVariant::parse("newest"), None);
}

// =========================================================================
// Classifier end to end
// =========================================================================

#[test]
fn container_key_maps_to_field_without_slot() {
    let c = consolidated().classify(
        "mortgage_step1.field.property_ownership",
        ComponentType::Container,
        "mortgage_step1",
    );
    assert_eq!(c.field_name, "property_ownership");
    assert_eq!(c.option_slot, None);
    assert_eq!(c.pattern, "dotted_field");
    assert_eq!(c.confidence, Confidence::Matched);
}

#[test]
fn ownership_option_uses_semantic_slot() {
    let classifier = consolidated();

    let has = classifier.classify(
        "mortgage_step1.field.property_ownership_has_property",
        ComponentType::Option,
        "mortgage_step1",
    );
    assert_eq!(has.field_name, "property_ownership");
    assert_eq!(has.option_slot.as_deref(), Some("2"));
    assert_eq!(has.slot_source, Some(SlotSource::Semantic));

    let no = classifier.classify(
        "mortgage_step1.field.property_ownership_no_property",
        ComponentType::Option,
        "mortgage_step1",
    );
    assert_eq!(no.option_slot.as_deref(), Some("1"));

    let selling = classifier.classify(
        "mortgage_step1.field.property_ownership_selling_property",
        ComponentType::Option,
        "mortgage_step1",
    );
    assert_eq!(selling.option_slot.as_deref(), Some("3"));
}

#[test]
fn calculator_placeholder_key() {
    let c = consolidated().classify(
        "calculate_mortgage_period_ph",
        ComponentType::Placeholder,
        "mortgage_step1",
    );
    assert_eq!(c.field_name, "period");
    assert_eq!(c.pattern, "calculator");
    assert_eq!(c.option_slot, None);
}

#[test]
fn numbered_options_take_their_number() {
    let classifier = consolidated();

    let step = classifier.classify(
        "mortgage_step1_when_needed_option_2",
        ComponentType::Option,
        "mortgage_step1",
    );
    assert_eq!(step.field_name, "when_needed");
    assert_eq!(step.pattern, "step_screen");
    assert_eq!(step.option_slot.as_deref(), Some("2"));
    assert_eq!(step.slot_source, Some(SlotSource::Numbered));

    let calc = classifier.classify(
        "calculate_mortgage_property_ownership_option_1",
        ComponentType::Option,
        "mortgage_step1",
    );
    assert_eq!(calc.field_name, "property_ownership");
    assert_eq!(calc.option_slot.as_deref(), Some("1"));
}

#[test]
fn longest_semantic_suffix_wins() {
    let c = consolidated().classify(
        "mortgage_step1.field.property_type_garden_apartment",
        ComponentType::Option,
        "mortgage_step1",
    );
    assert_eq!(c.field_name, "property_type");
    assert_eq!(c.option_slot.as_deref(), Some("2"), "garden_apartment, not apartment");
}

#[test]
fn unrecognized_key_falls_back_to_sanitized_key() {
    let c = consolidated().classify("xyz123???", ComponentType::Option, "credit_step3");
    assert_eq!(c.field_name, "xyz123___");
    assert_eq!(c.confidence, Confidence::Fallback);
    assert_eq!(c.pattern, "fallback");
    assert_eq!(c.option_slot.as_deref(), Some("xyz123???"));
    assert_eq!(c.slot_source, Some(SlotSource::LastToken));
}

#[test]
fn earlier_pattern_is_authoritative() {
    // Step screen and two-segment both fit; step screen comes first.
    let c = consolidated().classify(
        "mortgage_step1_field.amount",
        ComponentType::Label,
        "mortgage_step1",
    );
    assert_eq!(c.pattern, "step_screen");
    assert_eq!(c.field_name, "field.amount");
}

#[test]
fn classification_is_total() {
    let classifier = consolidated();
    let keys = [
        "", " ", "_", ".", "...", ".field.", "ñ", "__option_1", "x_ph", "has_property",
        "a.b.c.d.e", "app.mortgage.step.dropdown.", "calculate__", "_option_1",
    ];
    for component in [
        ComponentType::Container,
        ComponentType::Label,
        ComponentType::Placeholder,
        ComponentType::Option,
    ] {
        for key in keys {
            let c = classifier.classify(key, component, "credit_step1");
            assert!(!c.field_name.is_empty(), "empty field for {:?} ({:?})", key, component);
            assert_eq!(c.option_slot.is_some(), component == ComponentType::Option);
            if let Some(slot) = &c.option_slot {
                assert!(!slot.is_empty(), "empty slot for {:?}", key);
            }
        }
    }
    assert_eq!(
        classifier.classify("", ComponentType::Label, "x").field_name,
        UNNAMED_FIELD
    );
}

#[test]
fn fallback_sanitizes_the_whole_original_key() {
    let classifier = consolidated();
    let padded = classifier.classify(" ab", ComponentType::Label, "x");
    assert!(padded.is_fallback());
    assert_eq!(padded.field_name, "_ab");

    let blank = classifier.classify("   ", ComponentType::Label, "x");
    assert_eq!(blank.field_name, "___");
    assert_ne!(blank.field_name, UNNAMED_FIELD);
}

#[test]
fn variants_disagree_on_value_suffixed_keys() {
    let key = "mortgage_step2.field.education_bachelors";
    let a = consolidated().classify(key, ComponentType::Option, "mortgage_step2");
    let b = railway().classify(key, ComponentType::Option, "mortgage_step2");
    assert_eq!(a.field_name, "education");
    assert_eq!(b.field_name, "education_bachelors");
    assert_eq!(a.option_slot, b.option_slot);

    let key = "credit_step1.dropdown.loan_purpose";
    assert!(consolidated().classify(key, ComponentType::Label, "credit_step1").is_fallback());
    assert_eq!(
        railway().classify(key, ComponentType::Label, "credit_step1").field_name,
        "loan_purpose"
    );
}

// =========================================================================
// Role inference
// =========================================================================

#[test]
fn effective_component_routes_by_key_shape() {
    assert_eq!(
        effective_component("mortgage_step1_debt_types_option_3", ComponentType::Label),
        ComponentType::Option
    );
    assert_eq!(
        effective_component("calculate_mortgage_period_ph", ComponentType::Container),
        ComponentType::Placeholder
    );
    assert_eq!(
        effective_component("mortgage_step1.field.period", ComponentType::Container),
        ComponentType::Container
    );
    assert_eq!(
        effective_component("mortgage_step1_debt_types_options_ph", ComponentType::Option),
        ComponentType::Placeholder,
        "a _ph key is a placeholder even when filed as an option"
    );
    assert_eq!(
        effective_component("credit_step1_purpose_option_2", ComponentType::Option),
        ComponentType::Option
    );
    assert_eq!(
        effective_component("odd_key_ph", ComponentType::Unsupported),
        ComponentType::Unsupported
    );
}

// =========================================================================
// Injected tables
// =========================================================================

#[test]
fn custom_slot_table_is_honoured() {
    let mut tables = ClassifierTables::default();
    tables.slot_suffixes.insert("gold_tier".into(), "7".into());
    let classifier = dropdown_migrate::classify::classifier::Classifier::new(
        tables,
        PatternVariant::Consolidated,
    )
    .unwrap();

    let (slot, source) = classifier.option_slot("credit_step2.field.card_gold_tier");
    assert_eq!(slot, "7");
    assert_eq!(source, SlotSource::Semantic);
}

#[test]
fn default_slot_table_numbers_each_group_from_one() {
    let tables = ClassifierTables::default();
    assert_eq!(tables.slot_suffixes["no_property"], "1");
    assert_eq!(tables.slot_suffixes["selling_property"], "3");
    assert_eq!(tables.slot_suffixes["single"], "1");
    assert_eq!(tables.slot_suffixes["widowed"], "4");
    assert_eq!(tables.slot_suffixes["employee"], "1");
    assert_eq!(tables.slot_suffixes["mizrahi"], "5");
    assert!(tables.supports_language("he"));
    assert!(!tables.supports_language("fr"));
}
