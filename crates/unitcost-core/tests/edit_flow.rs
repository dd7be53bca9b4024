//! End-to-end edit flow: a pricing-service payload comes in, the user
//! corrects a package, and the replacement result keeps every invariant.

use unitcost_core::engine::{assemble_result, price_line, save_edit, start_edit};
use unitcost_core::money::{Money, UnitPrice};
use unitcost_core::types::RecipeResult;
use unitcost_core::units::{BaseUnit, Quantity};

/// A realistic payload, shaped exactly like the pricing service's response.
const SERVICE_PAYLOAD: &str = r#"{
    "recipe_name": "Protein Balls",
    "ingredients": [
        {
            "ingredient": "peanut butter",
            "quantity": 60,
            "unit": "g",
            "cost": 0.48,
            "note": null,
            "package_info": {"size": "500g", "price": 4.0, "cost_per_unit": 0.008, "unit": "g"},
            "manually_adjusted": false,
            "unknown_ingredient": false
        },
        {
            "ingredient": "oats",
            "quantity": 110,
            "unit": "g",
            "cost": 0.22,
            "note": null,
            "package_info": {"size": "1kg", "price": 2.0, "cost_per_unit": 0.002, "unit": "g"},
            "manually_adjusted": false,
            "unknown_ingredient": false
        },
        {
            "ingredient": "vanilla extract",
            "quantity": 5,
            "unit": "ml",
            "cost": 2.5,
            "note": "estimated",
            "package_info": {"size": "60ml", "price": 30.0, "cost_per_unit": 0.5, "unit": "ml"},
            "manually_adjusted": false,
            "unknown_ingredient": false
        },
        {
            "ingredient": "collagen powder",
            "quantity": 30,
            "unit": "g",
            "cost": 0,
            "unknown_ingredient": true
        }
    ],
    "total_cost": 3.2,
    "yield_count": 6,
    "unit_cost": 0.533333
}"#;

fn service_result() -> RecipeResult {
    serde_json::from_str(SERVICE_PAYLOAD).expect("payload parses")
}

fn assert_invariants(result: &RecipeResult) {
    assert_eq!(result.total_cost, result.sum_of_lines());
    assert_eq!(
        result.unit_cost,
        result.total_cost.per_portion(result.yield_count)
    );
}

#[test]
fn payload_parses_and_holds_invariants() {
    let result = service_result();
    assert_invariants(&result);
    assert_eq!(result.total_cost, Money::from_cents(320));
    assert_eq!(result.ingredients.len(), 4);
}

#[test]
fn package_correction_updates_unit_price_and_line_cost() {
    // Ingredient uses 60 g from a 454 g / $3.50 jar; the user corrects the
    // package to 500 g for $4.00.
    let line = price_line(
        "peanut butter",
        Quantity::from_whole(60),
        BaseUnit::Gram,
        None,
        Some(unitcost_core::types::PackageInfo::from_magnitude(
            Quantity::from_whole(454),
            Money::from_cents(350),
            BaseUnit::Gram,
        )),
    )
    .unwrap();
    let result = assemble_result(None, vec![line], 6).unwrap();

    let updated = save_edit(&result, 0, "500", "4.00").unwrap();
    let package = updated.ingredients[0].package_info.as_ref().unwrap();

    // cost_per_unit = 4.00 / 500 = 0.008 $/g
    assert_eq!(package.cost_per_unit, UnitPrice::from_micros(8_000));
    // line cost = 0.008 × 60 = 0.48
    assert_eq!(updated.ingredients[0].cost, Money::from_cents(48));
    assert!(updated.ingredients[0].manually_adjusted);
    assert_invariants(&updated);
}

#[test]
fn totals_resum_after_single_line_edit() {
    // Two lines costing 0.48 and 0.22, yield 6. Edit only line 0 so it
    // costs 0.60; line 1 must stay exactly 0.22.
    let make = |name: &str, used: i64, size: i64, cents: i64| {
        price_line(
            name,
            Quantity::from_whole(used),
            BaseUnit::Gram,
            None,
            Some(unitcost_core::types::PackageInfo::from_magnitude(
                Quantity::from_whole(size),
                Money::from_cents(cents),
                BaseUnit::Gram,
            )),
        )
        .unwrap()
    };
    let result = assemble_result(
        None,
        vec![make("a", 60, 500, 400), make("b", 110, 1000, 200)],
        6,
    )
    .unwrap();
    assert_eq!(result.total_cost, Money::from_cents(70));

    // 60 g at $5.00 / 500 g = $0.01/g → $0.60.
    let updated = save_edit(&result, 0, "500", "5.00").unwrap();
    assert_eq!(updated.ingredients[0].cost, Money::from_cents(60));
    assert_eq!(updated.ingredients[1].cost, Money::from_cents(22));
    assert_eq!(updated.total_cost, Money::from_cents(82));
    // 0.82 / 6 ≈ 0.136667
    assert_eq!(updated.unit_cost, UnitPrice::from_micros(136_667));
    assert_invariants(&updated);
}

#[test]
fn repeated_edits_never_drift() {
    let mut result = service_result();

    // A pile of back-and-forth corrections on two different lines.
    for _ in 0..50 {
        result = save_edit(&result, 0, "454", "3.50").unwrap();
        assert_invariants(&result);
        result = save_edit(&result, 0, "500", "4.00").unwrap();
        assert_invariants(&result);
        result = save_edit(&result, 2, "118", "15.00").unwrap();
        assert_invariants(&result);
    }

    // Convergent: the final state equals a single pass of the same edits.
    let fresh = service_result();
    let fresh = save_edit(&fresh, 0, "500", "4.00").unwrap();
    let fresh = save_edit(&fresh, 2, "118", "15.00").unwrap();
    assert_eq!(result, fresh);
}

#[test]
fn edit_flow_start_save_on_service_payload() {
    let result = service_result();

    // "1kg" seeds the form as 1000 base units.
    let draft = start_edit(&result, 1).unwrap();
    assert_eq!(draft.raw_size_input, "1000");
    assert_eq!(draft.raw_price_input, "2.00");

    let updated = save_edit(&result, 1, &draft.raw_size_input, "3.00").unwrap();
    let package = updated.ingredients[1].package_info.as_ref().unwrap();
    assert_eq!(package.size, "1000g");
    assert_eq!(updated.ingredients[1].cost, Money::from_cents(33));
    assert_invariants(&updated);

    // The unpriced line stays untouched and non-editable throughout.
    assert_eq!(updated.ingredients[3], result.ingredients[3]);
    assert!(start_edit(&updated, 3).is_err());
}

#[test]
fn failed_edits_change_nothing() {
    let result = service_result();
    let before = result.clone();

    assert!(save_edit(&result, 0, "0", "4.00").is_err());
    assert!(save_edit(&result, 0, "500", "-1").is_err());
    assert!(save_edit(&result, 42, "500", "4.00").is_err());
    assert!(save_edit(&result, 3, "500", "4.00").is_err());

    // The input result is borrowed, never mutated.
    assert_eq!(result, before);
}
