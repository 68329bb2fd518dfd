/// Integration tests for the pricing engine over the public API
use prospect_pricing::pricing::{
    compute_pricing, compute_pricing_from_input, Labels, Locale, Plan, PlanKey, PlanTable,
    PlanTableError, PricingError, QuoteSummary,
};
use prospect_pricing::session::Balance;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_observed_price_points() {
    let table = PlanTable::observed();
    let cases = [
        (4, PlanKey::Starter, dec!(149.00), false),
        (14, PlanKey::Starter, dec!(521.50), true),
        (15, PlanKey::Professional, dec!(399.00), false),
        (16, PlanKey::Professional, dec!(425.60), true),
        (49, PlanKey::Professional, dec!(1303.40), true),
        (50, PlanKey::Dominator, dec!(999.00), false),
        (60, PlanKey::Dominator, dec!(1199.00), true),
    ];

    for (prospects, plan, total, custom) in cases {
        let result = compute_pricing(prospects, Decimal::ZERO, &table).unwrap();
        assert_eq!(result.plan_key, plan, "prospects {}", prospects);
        assert_eq!(result.total_cost, total, "prospects {}", prospects);
        assert_eq!(result.is_custom, custom, "prospects {}", prospects);
    }
}

#[test]
fn test_total_never_drops_within_a_tier() {
    let table = PlanTable::observed();

    for plan in table.plans() {
        let base = i64::from(plan.base_prospects);
        let upper = plan.upper_bound.map(i64::from).unwrap_or(1000);

        let mut previous = Decimal::ZERO;
        for prospects in base..=upper {
            let total = compute_pricing(prospects, Decimal::ZERO, &table)
                .unwrap()
                .total_cost;
            assert!(total >= previous, "total dropped at {}", prospects);
            previous = total;
        }
    }
}

#[test]
fn test_tier_change_resets_price_to_next_base() {
    let table = PlanTable::observed();
    let total = |n| compute_pricing(n, Decimal::ZERO, &table).unwrap().total_cost;

    assert!(total(15) < total(14));
    assert!(total(50) < total(49));
    assert_eq!(total(15), dec!(399.00));
    assert_eq!(total(50), dec!(999.00));
}

#[test]
fn test_tier_boundaries_are_inclusive() {
    let table = PlanTable::observed();
    assert_eq!(table.find(14).unwrap().key, PlanKey::Starter);
    assert_eq!(table.find(15).unwrap().key, PlanKey::Professional);
    assert_eq!(table.find(49).unwrap().key, PlanKey::Professional);
    assert_eq!(table.find(50).unwrap().key, PlanKey::Dominator);
    assert!(table.find(3).is_none());
}

#[test]
fn test_typed_input_paths() {
    let table = PlanTable::observed();

    let result = compute_pricing_from_input(" 15 ", dec!(399), &table, Locale::Es).unwrap();
    assert_eq!(result.display_name, "El Profesional");
    assert!(result.affordable);

    assert_eq!(
        compute_pricing_from_input("3", dec!(399), &table, Locale::En),
        Err(PricingError::BelowMinimum {
            requested: 3,
            minimum: 4
        })
    );
    assert!(matches!(
        compute_pricing_from_input("quince", dec!(399), &table, Locale::En),
        Err(PricingError::NotANumber { .. })
    ));
}

#[test]
fn test_custom_table_drives_calculation() {
    let plans = vec![
        Plan {
            key: PlanKey::Starter,
            base_prospects: 10,
            base_cost: dec!(100),
            extra_cost_per_prospect: dec!(5),
            upper_bound: Some(19),
            labels: Labels::new("Small", "Pequeño"),
        },
        Plan {
            key: PlanKey::Dominator,
            base_prospects: 20,
            base_cost: dec!(180),
            extra_cost_per_prospect: dec!(4),
            upper_bound: None,
            labels: Labels::new("Large", "Grande"),
        },
    ];
    let table = PlanTable::new(plans, Labels::new("Tailored", "A medida"), Locale::En).unwrap();

    assert_eq!(table.min_prospects(), 10);
    let result = compute_pricing(12, Decimal::ZERO, &table).unwrap();
    assert_eq!(result.total_cost, dec!(110));
    assert_eq!(result.display_name, "Tailored");

    assert_eq!(
        compute_pricing(9, Decimal::ZERO, &table),
        Err(PricingError::BelowMinimum {
            requested: 9,
            minimum: 10
        })
    );
}

#[test]
fn test_table_with_gap_rejected() {
    let plans = vec![
        Plan {
            key: PlanKey::Starter,
            base_prospects: 4,
            base_cost: dec!(149),
            extra_cost_per_prospect: dec!(37.25),
            upper_bound: Some(14),
            labels: Labels::new("The Starter", "El Arrancador"),
        },
        Plan {
            key: PlanKey::Professional,
            base_prospects: 16,
            base_cost: dec!(399),
            extra_cost_per_prospect: dec!(26.60),
            upper_bound: None,
            labels: Labels::new("The Professional", "El Profesional"),
        },
    ];

    let result = PlanTable::new(plans, Labels::new("Custom", "Personalizado"), Locale::En);
    assert!(matches!(result, Err(PlanTableError::Gap { .. })));
}

#[test]
fn test_summary_agrees_with_result_across_balances() {
    let table = PlanTable::observed();

    for balance in [dec!(0), dec!(148.99), dec!(149), dec!(521.50), dec!(5000)] {
        for prospects in [4, 14, 15, 49, 50, 75] {
            let outcome = compute_pricing(prospects, balance, &table);
            let summary = QuoteSummary::from_outcome(&outcome, Balance::Amount(balance));
            let result = outcome.unwrap();

            assert_eq!(summary.launch_enabled, result.affordable);
            assert_eq!(summary.launch_enabled, balance >= result.total_cost);
            assert_eq!(summary.selected_plan, Some(result.plan_key));
        }
    }
}
