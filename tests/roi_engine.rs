use approx::assert_relative_eq;
use wallbox_roi::roi::{calculate_roi, CalculatorInput, Payback, RoiModel};

fn typical() -> CalculatorInput {
    CalculatorInput::new(15_000.0, 0.30, 2_200.0).with_years(10)
}

#[test]
fn typical_household_projection() {
    let res = calculate_roi(&typical());

    assert_relative_eq!(res.annual_consumption_kwh, 3_000.0);
    assert_relative_eq!(res.home_cost_per_year, 900.0);
    assert_relative_eq!(res.public_cost_per_year, 1_800.0);
    assert_relative_eq!(res.savings_per_year, 900.0);
    assert_relative_eq!(res.savings_per_month, 75.0);
    assert_relative_eq!(res.break_even_year, 2_200.0 / 900.0);
    assert_eq!(res.years_data, (1..=10).collect::<Vec<u32>>());
    assert_relative_eq!(res.cumulative_savings[0], -1_300.0);
    assert_relative_eq!(res.cumulative_savings[9], 6_800.0);
    assert_relative_eq!(res.total_savings, 6_800.0);
    assert_relative_eq!(res.home_costs[9], 9_000.0);
    assert_relative_eq!(res.public_costs[9], 18_000.0);
}

#[test]
fn horizon_defaults_to_ten_years() {
    let res = calculate_roi(&CalculatorInput::new(20_000.0, 0.25, 1_500.0));
    assert_eq!(res.horizon(), 10);
    assert_eq!(res.home_costs.len(), 10);
    assert_eq!(res.public_costs.len(), 10);
    assert_eq!(res.cumulative_savings.len(), 10);
}

#[test]
fn home_price_equal_to_public_never_pays_back() {
    let res = calculate_roi(&CalculatorInput::new(15_000.0, 0.60, 2_200.0).with_years(5));
    assert_eq!(res.savings_per_year, 0.0);
    assert!(res.break_even_year.is_infinite());
    assert_eq!(res.payback(), Payback::Never);
    assert!(res.cumulative_savings.iter().all(|v| *v == -2_200.0));
}

#[test]
fn expensive_home_power_gives_negative_raw_break_even() {
    let res = calculate_roi(&CalculatorInput::new(10_000.0, 0.80, 1_000.0).with_years(3));
    assert!(res.savings_per_year < 0.0);
    assert!(res.break_even_year < 0.0);
    assert_eq!(res.payback(), Payback::Never);
    assert!(res.cumulative_savings.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn single_year_horizon() {
    let res = calculate_roi(&typical().with_years(1));
    assert_eq!(res.years_data, vec![1]);
    assert_relative_eq!(res.total_savings, -1_300.0);
    assert_relative_eq!(res.home_costs[0], res.home_cost_per_year);
}

#[test]
fn zero_horizon_leaves_only_the_investment() {
    let res = calculate_roi(&typical().with_years(0));
    assert!(res.years_data.is_empty());
    assert!(res.cumulative_savings.is_empty());
    assert_relative_eq!(res.total_savings, -2_200.0);
    assert_relative_eq!(res.savings_per_year, 900.0);
}

#[test]
fn custom_model_constants() {
    let model = RoiModel::new(0.15, 0.50);
    let res = model.project(&typical());
    assert_relative_eq!(res.annual_consumption_kwh, 2_250.0);
    assert_relative_eq!(res.savings_per_year, 2_250.0 * 0.20, epsilon = 1e-9);
    assert_relative_eq!(res.break_even_year, 2_200.0 / 450.0, epsilon = 1e-9);
}

#[test]
fn cumulative_savings_grow_linearly() {
    let res = calculate_roi(&typical().with_years(25));
    for (i, v) in res.cumulative_savings.iter().enumerate() {
        let expected = -2_200.0 + 900.0 * (i as f64 + 1.0);
        assert_relative_eq!(*v, expected, epsilon = 1e-9);
    }
    for (i, v) in res.home_costs.iter().enumerate() {
        assert_relative_eq!(*v, 900.0 * (i as f64 + 1.0), epsilon = 1e-9);
    }
}

#[test]
fn projection_is_deterministic() {
    assert_eq!(calculate_roi(&typical()), calculate_roi(&typical()));
}

#[test]
fn roi_ratio_relates_total_to_investment() {
    let res = calculate_roi(&typical());
    assert_relative_eq!(res.roi_ratio(), 6_800.0 / 2_200.0);
}

#[test]
fn rows_pair_each_year_with_its_values() {
    let res = calculate_roi(&typical().with_years(3));
    let rows: Vec<_> = res.rows().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].year, 3);
    assert_relative_eq!(rows[2].home_cost, 2_700.0);
    assert_relative_eq!(rows[2].public_cost, 5_400.0);
    assert_relative_eq!(rows[2].cumulative_savings, 500.0);
}

#[test]
fn json_uses_camel_case_keys() {
    let input = typical();
    let json = serde_json::to_value(calculate_roi(&input)).unwrap();
    for key in [
        "savingsPerYear",
        "savingsPerMonth",
        "breakEvenYear",
        "totalSavings",
        "homeCosts",
        "publicCosts",
        "cumulativeSavings",
        "yearsData",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }

    let parsed: CalculatorInput = serde_json::from_str(
        r#"{"kmPerYear": 12000, "electricityCost": 0.32, "wallboxCost": 1800}"#,
    )
    .unwrap();
    assert_eq!(parsed.years(), 10);
    assert_relative_eq!(parsed.km_per_year, 12_000.0);
}
