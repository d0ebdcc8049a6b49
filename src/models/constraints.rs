use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::constants::{DEFAULT_MAX_ITEMS, HARD_MAX_ITEMS};

/// Constraints as supplied by a caller or the prompt parser.
///
/// Every bound is optional; `None` means "no bound".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    pub min_protein: Option<f64>,
    pub max_calories: Option<f64>,
    pub min_calories: Option<f64>,
    pub max_carbs: Option<f64>,
    pub max_fat: Option<f64>,
    /// Any number; clamped during normalization.
    pub max_items: Option<f64>,
    pub dietary_flags: Option<Vec<String>>,
    pub exclude_allergens: Option<Vec<String>>,
    pub avoid_ingredients: Option<Vec<String>>,
    pub prefer_ingredients: Option<Vec<String>>,
    pub meal_period: Option<String>,
}

impl Constraints {
    /// Build constraints from the prompt parser's JSON output.
    ///
    /// Numeric fields keep only finite JSON numbers, list fields keep only
    /// trimmed, lowercased, non-empty strings, and anything malformed becomes
    /// null or an empty list.
    pub fn from_parser_output(value: &Value) -> Self {
        let number = |key: &str| value.get(key).and_then(Value::as_f64).filter(|n| n.is_finite());

        let list = |key: &str| {
            let items = value
                .get(key)
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(Value::as_str)
                        .map(|s| s.trim().to_lowercase())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            Some(items)
        };

        Self {
            min_protein: number("minProtein"),
            max_calories: number("maxCalories"),
            min_calories: number("minCalories"),
            max_carbs: number("maxCarbs"),
            max_fat: number("maxFat"),
            max_items: number("maxItems"),
            dietary_flags: list("dietaryFlags"),
            exclude_allergens: list("excludeAllergens"),
            avoid_ingredients: list("avoidIngredients"),
            prefer_ingredients: list("preferIngredients"),
            meal_period: value
                .get("mealPeriod")
                .and_then(Value::as_str)
                .map(str::to_lowercase),
        }
    }

    /// Clamp the item count and replace missing lists with empty ones.
    ///
    /// Numeric bounds pass through untouched.
    pub fn normalize(&self) -> NormalizedConstraints {
        let max_items = self
            .max_items
            .filter(|n| n.is_finite())
            .unwrap_or(DEFAULT_MAX_ITEMS as f64)
            .clamp(1.0, HARD_MAX_ITEMS as f64)
            .floor() as usize;

        NormalizedConstraints {
            min_protein: self.min_protein,
            max_calories: self.max_calories,
            min_calories: self.min_calories,
            max_carbs: self.max_carbs,
            max_fat: self.max_fat,
            max_items,
            dietary_flags: self.dietary_flags.clone().unwrap_or_default(),
            exclude_allergens: self.exclude_allergens.clone().unwrap_or_default(),
            avoid_ingredients: self.avoid_ingredients.clone().unwrap_or_default(),
            prefer_ingredients: self.prefer_ingredients.clone().unwrap_or_default(),
            meal_period: self.meal_period.clone(),
        }
    }
}

/// Constraints after normalization; this is what the search actually applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedConstraints {
    pub min_protein: Option<f64>,
    pub max_calories: Option<f64>,
    pub min_calories: Option<f64>,
    pub max_carbs: Option<f64>,
    pub max_fat: Option<f64>,
    /// Always within `1..=HARD_MAX_ITEMS`.
    pub max_items: usize,
    pub dietary_flags: Vec<String>,
    pub exclude_allergens: Vec<String>,
    pub avoid_ingredients: Vec<String>,
    pub prefer_ingredients: Vec<String>,
    /// Informational only.
    pub meal_period: Option<String>,
}

/// Per-day calorie and macro goals, each independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyGoals {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl DailyGoals {
    pub fn is_unset(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fat.is_none()
    }
}
