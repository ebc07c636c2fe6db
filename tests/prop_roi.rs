use proptest::prelude::*;
use wallbox_roi::roi::{calculate_roi, CalculatorInput, Payback};

fn valid_input() -> impl Strategy<Value = CalculatorInput> {
    (
        1_000.0f64..=100_000.0,
        0.10f64..=1.00,
        1_000.0f64..=10_000.0,
        1u32..=50,
    )
        .prop_map(|(km, price, cost, years)| {
            CalculatorInput::new(km, price, cost).with_years(years)
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn series_lengths_match_horizon(input in valid_input()) {
        let res = calculate_roi(&input);
        let n = input.years() as usize;
        prop_assert_eq!(res.years_data.len(), n);
        prop_assert_eq!(res.home_costs.len(), n);
        prop_assert_eq!(res.public_costs.len(), n);
        prop_assert_eq!(res.cumulative_savings.len(), n);
        prop_assert_eq!(res.years_data.first().copied(), Some(1));
        prop_assert_eq!(res.years_data.last().copied(), Some(input.years()));
    }

    #[test]
    fn cost_series_never_decrease(input in valid_input()) {
        let res = calculate_roi(&input);
        prop_assert!(res.home_costs.windows(2).all(|w| w[1] >= w[0]));
        prop_assert!(res.public_costs.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn costs_are_linear_in_year(input in valid_input()) {
        let res = calculate_roi(&input);
        for row in res.rows() {
            let year = f64::from(row.year);
            prop_assert!(close(row.home_cost, res.home_cost_per_year * year));
            prop_assert!(close(row.public_cost, res.public_cost_per_year * year));
        }
    }

    #[test]
    fn cumulative_savings_follow_cost_gap(input in valid_input()) {
        let res = calculate_roi(&input);
        for row in res.rows() {
            let expected = row.public_cost - row.home_cost - input.wallbox_cost;
            prop_assert!(close(row.cumulative_savings, expected));
        }
        prop_assert_eq!(res.cumulative_savings.last().copied(), Some(res.total_savings));
    }

    #[test]
    fn monthly_is_a_twelfth_of_yearly(input in valid_input()) {
        let res = calculate_roi(&input);
        prop_assert!(close(res.savings_per_month * 12.0, res.savings_per_year));
    }

    #[test]
    fn break_even_recovers_the_investment(input in valid_input()) {
        let res = calculate_roi(&input);
        match res.payback() {
            Payback::Years(years) => {
                prop_assert!(res.savings_per_year > 0.0);
                prop_assert!(close(years * res.savings_per_year, input.wallbox_cost));
            }
            Payback::Never => prop_assert!(res.savings_per_year <= 0.0),
        }
    }
}
