use wallbox_roi::i18n::Translator;
use wallbox_roi::roi::WallboxPreset;
use wallbox_roi::validation::{
    self, CalculatorForm, Field, InputError, Violation, DEVICE_COST, KM_PER_YEAR,
};

#[test]
fn default_form_is_valid() {
    let input = CalculatorForm::default().validate().unwrap();
    assert_eq!(input.km_per_year, 15_000.0);
    assert_eq!(input.wallbox_cost, 2_200.0);
    assert_eq!(input.years(), 10);
}

#[test]
fn bounds_are_inclusive() {
    assert!(KM_PER_YEAR.contains(1_000.0));
    assert!(KM_PER_YEAR.contains(100_000.0));
    assert!(!KM_PER_YEAR.contains(999.0));
    assert!(DEVICE_COST.contains(5_000.0));
    assert!(!DEVICE_COST.contains(5_000.01));
}

#[test]
fn device_and_installation_are_summed() {
    let form = CalculatorForm {
        device_cost: 900.0,
        installation_cost: 1_400.0,
        ..CalculatorForm::default()
    };
    assert_eq!(form.validate().unwrap().wallbox_cost, 2_300.0);
}

#[test]
fn every_violation_is_reported() {
    let form = CalculatorForm {
        km_per_year: 500.0,
        electricity_cost: 1.5,
        device_cost: 100.0,
        installation_cost: 6_000.0,
        years_to_project: 0,
        preset: None,
    };
    let Err(InputError::Invalid(violations)) = form.validate() else {
        panic!("expected invalid input");
    };
    let fields: Vec<(Field, Violation)> =
        violations.iter().map(|v| (v.field, v.violation)).collect();
    assert_eq!(fields.len(), 5);
    assert!(fields.contains(&(Field::KmPerYear, Violation::BelowMin)));
    assert!(fields.contains(&(Field::ElectricityCost, Violation::AboveMax)));
    assert!(fields.contains(&(Field::DeviceCost, Violation::BelowMin)));
    assert!(fields.contains(&(Field::InstallationCost, Violation::AboveMax)));
    assert!(fields.contains(&(Field::YearsToProject, Violation::BelowMin)));
}

#[test]
fn preset_replaces_itemized_costs() {
    let form = CalculatorForm {
        device_cost: 0.0,
        installation_cost: 0.0,
        preset: Some(WallboxPreset::Basic),
        ..CalculatorForm::default()
    };
    let input = form.validate().unwrap();
    assert_eq!(input.wallbox_cost, 800.0);
}

#[test]
fn nan_is_not_a_number() {
    let form = CalculatorForm {
        electricity_cost: f64::NAN,
        ..CalculatorForm::default()
    };
    let violations = form.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].violation, Violation::NotANumber);
}

#[test]
fn messages_are_localized() {
    let form = CalculatorForm {
        km_per_year: 500.0,
        ..CalculatorForm::default()
    };
    let err = form.validate().unwrap_err();
    let de = err.messages(&Translator::new("de"));
    assert_eq!(de, vec!["Jährliche Fahrleistung (km): mindestens 1.000.".to_string()]);
    let en = err.messages(&Translator::new("en"));
    assert_eq!(en, vec!["Annual mileage (km): at least 1,000.".to_string()]);
    assert!(err.to_string().contains("below the minimum"));
}

#[test]
fn email_addresses() {
    for ok in ["max@example.de", " anna.schmidt@mail.example.com "] {
        assert!(validation::validate_email(ok).is_ok(), "{ok}");
    }
    for bad in ["", "max", "max@", "@example.de", "max@example", "a b@example.de", "a@b@c.de", "max@example..de"] {
        assert_eq!(
            validation::validate_email(bad),
            Err(InputError::InvalidEmail(bad.to_string())),
            "{bad}"
        );
    }
}
