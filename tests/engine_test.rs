use std::collections::HashSet;

use assert_float_eq::assert_float_absolute_eq;

use dining_recommender_rs::engine::{
    HARD_MAX_ITEMS, NO_MATCH_EXPLANATION, NO_MATCH_WARNING, OVER_CALORIE_WARNING,
    UNDER_PROTEIN_WARNING, recommend,
};
use dining_recommender_rs::models::{Constraints, DailyGoals, MenuItemCandidate, Nutrition};

fn make_item(id: i64, name: &str, calories: i64, protein: f64) -> MenuItemCandidate {
    MenuItemCandidate {
        id,
        name: name.to_string(),
        category: None,
        course: None,
        nutrition: Some(Nutrition {
            calories: Some(calories),
            protein: Some(protein),
            carbs: Some(10.0),
            fat: Some(5.0),
            ..Default::default()
        }),
    }
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|s| s.to_string()).collect())
}

fn large_menu() -> Vec<MenuItemCandidate> {
    (1..=25)
        .map(|i| make_item(i, &format!("Dish {}", i), 80 + 37 * i, (i % 7) as f64 * 6.0 + 2.0))
        .collect()
}

#[test]
fn test_item_count_never_exceeds_requested_or_hard_cap() {
    let items = large_menu();
    let none = HashSet::new();

    for requested in [-2.0, 0.0, 1.0, 2.0, 3.0, 5.0, 6.0, 9.0, 100.0] {
        let constraints = Constraints {
            max_items: Some(requested),
            ..Default::default()
        };
        let result = recommend(&items, &constraints, None, &none);
        let ceiling = (requested.max(1.0) as usize).min(HARD_MAX_ITEMS);
        assert!(
            result.items.len() <= ceiling,
            "requested {} got {} items",
            requested,
            result.items.len()
        );
        assert!(result.constraints.max_items <= HARD_MAX_ITEMS);
    }
}

#[test]
fn test_returned_items_have_calories() {
    let mut items = large_menu();
    items.push(MenuItemCandidate {
        id: 99,
        name: "Mystery Stew".to_string(),
        category: None,
        course: None,
        nutrition: Some(Nutrition {
            protein: Some(90.0),
            ..Default::default()
        }),
    });
    items.push(MenuItemCandidate {
        id: 100,
        name: "Bread".to_string(),
        category: None,
        course: None,
        nutrition: None,
    });

    let result = recommend(&items, &Constraints::default(), None, &HashSet::new());
    assert!(!result.items.is_empty());
    assert!(result.items.iter().all(|i| i.nutrition.calories.is_some()));
    assert!(result.items.iter().all(|i| i.id != 99 && i.id != 100));
}

#[test]
fn test_empty_menu_yields_warning() {
    let result = recommend(&[], &Constraints::default(), None, &HashSet::new());
    assert!(result.items.is_empty());
    assert_eq!(result.totals.calories, 0.0);
    assert_eq!(result.totals.protein, 0.0);
    assert_eq!(result.explanation, NO_MATCH_EXPLANATION);
    assert_eq!(result.warnings, vec![NO_MATCH_WARNING.to_string()]);
}

#[test]
fn test_missing_dietary_flag_yields_empty() {
    let items = large_menu();
    let constraints = Constraints {
        dietary_flags: strings(&["vegetarian"]),
        ..Default::default()
    };
    let result = recommend(&items, &constraints, None, &HashSet::new());
    assert!(result.items.is_empty());
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_excluded_allergen_never_returned() {
    let mut items = large_menu();
    for item in items.iter_mut().filter(|i| i.id % 3 == 0) {
        if let Some(n) = item.nutrition.as_mut() {
            n.allergens = Some(vec!["Nuts".to_string()]);
        }
    }
    let constraints = Constraints {
        exclude_allergens: strings(&["nuts"]),
        max_items: Some(6.0),
        ..Default::default()
    };
    let result = recommend(&items, &constraints, None, &HashSet::new());
    assert!(!result.items.is_empty());
    for item in &result.items {
        assert!(
            !item
                .nutrition
                .allergen_list()
                .iter()
                .any(|a| a.eq_ignore_ascii_case("nuts"))
        );
    }
}

#[test]
fn test_recommend_is_idempotent() {
    let items = large_menu();
    let constraints = Constraints {
        min_protein: Some(40.0),
        max_calories: Some(900.0),
        max_items: Some(4.0),
        prefer_ingredients: strings(&["dish 1"]),
        ..Default::default()
    };
    let goals = DailyGoals {
        calories: Some(2400.0),
        protein: Some(150.0),
        ..Default::default()
    };
    let recent: HashSet<i64> = [3, 5].into_iter().collect();

    let first = recommend(&items, &constraints, Some(&goals), &recent);
    let second = recommend(&items, &constraints, Some(&goals), &recent);
    assert_eq!(first, second);
}

#[test]
fn test_recommend_does_not_mutate_inputs() {
    let items = large_menu();
    let snapshot = items.clone();
    let constraints = Constraints {
        dietary_flags: None,
        max_items: Some(40.0),
        ..Default::default()
    };
    let constraints_snapshot = constraints.clone();

    let _ = recommend(&items, &constraints, None, &HashSet::new());
    assert_eq!(items, snapshot);
    assert_eq!(constraints, constraints_snapshot);
}

#[test]
fn test_protein_dense_item_wins_under_calorie_cap() {
    let items = vec![
        make_item(1, "A", 300, 40.0),
        make_item(2, "B", 200, 5.0),
    ];
    let constraints = Constraints {
        min_protein: Some(30.0),
        max_calories: Some(500.0),
        max_items: Some(2.0),
        ..Default::default()
    };
    let result = recommend(&items, &constraints, None, &HashSet::new());

    assert!(result.items.iter().any(|i| i.id == 1));
    assert!(result.totals.calories <= 500.0);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_recent_item_is_deprioritized() {
    let items = vec![
        make_item(1, "Chicken Plate", 400, 35.0),
        make_item(2, "Chicken Plate", 400, 35.0),
    ];
    let constraints = Constraints {
        max_items: Some(1.0),
        ..Default::default()
    };
    let recent: HashSet<i64> = [1].into_iter().collect();

    let result = recommend(&items, &constraints, None, &recent);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id, 2);

    // Without history the tie goes to the first item in enumeration order.
    let result = recommend(&items, &constraints, None, &HashSet::new());
    assert_eq!(result.items[0].id, 1);
}

#[test]
fn test_preferred_ingredient_boosts_item() {
    let items = vec![
        make_item(1, "Beef Bowl", 400, 30.0),
        make_item(2, "Salmon Bowl", 400, 28.0),
    ];
    let constraints = Constraints {
        max_items: Some(1.0),
        prefer_ingredients: strings(&["SALMON"]),
        ..Default::default()
    };
    let result = recommend(&items, &constraints, None, &HashSet::new());
    // 2 grams of protein is worth 4 points; the preference is worth 8.
    assert_eq!(result.items[0].id, 2);
}

#[test]
fn test_allergen_scenario() {
    let items = vec![
        MenuItemCandidate {
            id: 1,
            name: "Grilled Chicken".to_string(),
            category: None,
            course: None,
            nutrition: Some(Nutrition {
                calories: Some(300),
                protein: Some(40.0),
                carbs: Some(5.0),
                fat: Some(8.0),
                ..Default::default()
            }),
        },
        MenuItemCandidate {
            id: 2,
            name: "Peanut Sauce Tofu".to_string(),
            category: None,
            course: None,
            nutrition: Some(Nutrition {
                calories: Some(250),
                protein: Some(20.0),
                carbs: Some(10.0),
                fat: Some(12.0),
                allergens: Some(vec!["nuts".to_string()]),
                dietary_flags: Some(vec!["vegetarian".to_string()]),
                ..Default::default()
            }),
        },
    ];
    let constraints = Constraints {
        exclude_allergens: strings(&["nuts"]),
        max_items: Some(2.0),
        ..Default::default()
    };

    let result = recommend(&items, &constraints, None, &HashSet::new());
    let ids: Vec<i64> = result.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1]);
    assert_float_absolute_eq!(result.totals.calories, 300.0, 1e-9);
    assert_float_absolute_eq!(result.totals.protein, 40.0, 1e-9);
    assert_float_absolute_eq!(result.totals.carbs, 5.0, 1e-9);
    assert_float_absolute_eq!(result.totals.fat, 8.0, 1e-9);
}

#[test]
fn test_post_hoc_warnings() {
    // Nothing can satisfy both bounds, so the best combination violates one.
    let items = vec![make_item(1, "Pasta", 900, 20.0)];
    let constraints = Constraints {
        min_protein: Some(60.0),
        max_calories: Some(500.0),
        ..Default::default()
    };
    let result = recommend(&items, &constraints, None, &HashSet::new());
    assert_eq!(result.items.len(), 1);
    assert!(result.warnings.contains(&OVER_CALORIE_WARNING.to_string()));
    assert!(result.warnings.contains(&UNDER_PROTEIN_WARNING.to_string()));
}

#[test]
fn test_daily_goals_pull_toward_meal_target() {
    let items = vec![
        make_item(1, "Small Plate", 250, 20.0),
        make_item(2, "Side", 250, 20.0),
        make_item(3, "Extra", 250, 20.0),
    ];
    let constraints = Constraints {
        max_items: Some(3.0),
        ..Default::default()
    };

    // Without goals every added item raises the score (40 - 12.5 > 0).
    let free = recommend(&items, &constraints, None, &HashSet::new());
    assert_eq!(free.items.len(), 3);

    // A 750 kcal/day goal means a 250 kcal meal target; one item fits best.
    let goals = DailyGoals {
        calories: Some(750.0),
        protein: Some(60.0),
        ..Default::default()
    };
    let targeted = recommend(&items, &constraints, Some(&goals), &HashSet::new());
    assert_eq!(targeted.items.len(), 1);
}
