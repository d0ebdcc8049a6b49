use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{DiningError, Result};
use crate::models::lenient;

/// Minimum Jaro-Winkler similarity for a fuzzy meal-period match.
const PERIOD_MATCH_THRESHOLD: f64 = 0.7;

/// Nutrition facts for a single menu item.
///
/// Numeric columns are already parsed; the recommendation engine never
/// re-parses them. An item without calories is treated as having no usable
/// nutrition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub calories: Option<i64>,

    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub protein: Option<f64>,

    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub carbs: Option<f64>,

    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub fat: Option<f64>,

    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub fiber: Option<f64>,

    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub sugar: Option<f64>,

    /// Milligrams.
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub sodium: Option<i64>,

    #[serde(default)]
    pub serving_size: Option<String>,

    /// Daily-value percentages keyed by vitamin name.
    #[serde(default)]
    pub vitamins: Option<BTreeMap<String, f64>>,

    /// Daily-value percentages keyed by mineral name.
    #[serde(default)]
    pub minerals: Option<BTreeMap<String, f64>>,

    /// `None` when the source did not list allergens at all.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub allergens: Option<Vec<String>>,

    /// `None` when the source did not list dietary flags at all.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub dietary_flags: Option<Vec<String>>,
}

impl Nutrition {
    /// Calories, protein, carbs and fat for one serving; missing values count as 0.
    pub fn macros(&self) -> Macros {
        Macros {
            calories: self.calories.unwrap_or(0) as f64,
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fat: self.fat.unwrap_or(0.0),
        }
    }

    /// Listed allergens; unlisted counts as none.
    pub fn allergen_list(&self) -> &[String] {
        self.allergens.as_deref().unwrap_or_default()
    }

    /// Listed dietary flags; unlisted counts as none.
    pub fn dietary_flag_list(&self) -> &[String] {
        self.dietary_flags.as_deref().unwrap_or_default()
    }

    /// True when no field carries any information.
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fat.is_none()
            && self.fiber.is_none()
            && self.sugar.is_none()
            && self.sodium.is_none()
            && self.serving_size.is_none()
            && self.vitamins.as_ref().is_none_or(|m| m.is_empty())
            && self.minerals.as_ref().is_none_or(|m| m.is_empty())
            && self.allergens.is_none()
            && self.dietary_flags.is_none()
    }
}

/// Calorie and macronutrient totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, other: Macros) {
        *self = *self + other;
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Self {
        iter.fold(Macros::default(), Add::add)
    }
}

/// A dish on a meal period's menu, as handed to the recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCandidate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
}

impl MenuItemCandidate {
    /// Nutrition, but only when it carries calories.
    pub fn usable_nutrition(&self) -> Option<&Nutrition> {
        self.nutrition.as_ref().filter(|n| n.calories.is_some())
    }
}

/// One flattened menu/nutrition row as exported from storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRow {
    pub item_id: i64,
    pub item_name: String,
    #[serde(default)]
    pub item_category: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(flatten)]
    pub nutrition: Nutrition,
}

impl MenuRow {
    /// Convert to an engine candidate, dropping nutrition that carries no data.
    pub fn into_candidate(self) -> MenuItemCandidate {
        let nutrition = if self.nutrition.is_empty() {
            None
        } else {
            Some(self.nutrition)
        };

        MenuItemCandidate {
            id: self.item_id,
            name: self.item_name,
            category: self.item_category,
            course: self.course,
            nutrition,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningHall {
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A single day's menu for one dining hall, grouped by meal period.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDay {
    pub dining_hall: DiningHall,
    pub date: NaiveDate,
    #[serde(default)]
    pub meals: BTreeMap<String, Vec<MenuRow>>,
}

impl MenuDay {
    pub fn meal_periods(&self) -> Vec<&str> {
        self.meals.keys().map(String::as_str).collect()
    }

    /// Resolve a user-supplied period name to a key of `meals`.
    ///
    /// Exact case-insensitive matches win; otherwise the closest period by
    /// Jaro-Winkler similarity above the threshold.
    pub fn resolve_meal_period(&self, input: &str) -> Result<&str> {
        let wanted = input.trim().to_lowercase();

        if let Some(key) = self.meals.keys().find(|k| k.to_lowercase() == wanted) {
            return Ok(key.as_str());
        }

        self.meals
            .keys()
            .map(|k| (k, jaro_winkler(&k.to_lowercase(), &wanted)))
            .filter(|(_, score)| *score > PERIOD_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, _)| k.as_str())
            .ok_or_else(|| DiningError::MealPeriodNotFound(input.to_string()))
    }

    /// Candidates for a meal period; errors when the period has no items.
    pub fn candidates(&self, period: &str) -> Result<Vec<MenuItemCandidate>> {
        let rows = self.meals.get(period).ok_or(DiningError::NoMenuData)?;
        if rows.is_empty() {
            return Err(DiningError::NoMenuData);
        }
        Ok(rows.iter().cloned().map(MenuRow::into_candidate).collect())
    }
}

/// Display label for a meal period key.
pub fn meal_period_label(period: &str) -> String {
    match period.to_lowercase().as_str() {
        "breakfast" => "Breakfast".to_string(),
        "lunch" => "Lunch".to_string(),
        "dinner" => "Dinner".to_string(),
        "brunch" => "Brunch".to_string(),
        "light lunch" => "Light Lunch".to_string(),
        _ => period.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_day() -> MenuDay {
        let json = r#"{
            "diningHall": {"name": "North Commons", "slug": "north-commons"},
            "date": "2026-10-19",
            "meals": {
                "Lunch": [
                    {"itemId": 1, "itemName": "Grilled Chicken", "calories": 300, "protein": "40.00",
                     "carbs": "5", "fat": "8", "allergens": null, "dietaryFlags": ["halal"]},
                    {"itemId": 2, "itemName": "Mystery Soup"}
                ],
                "dinner": []
            }
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_row_parses_decimal_strings() {
        let day = sample_day();
        let items = day.candidates("Lunch").unwrap();
        let chicken = items[0].nutrition.as_ref().unwrap();
        assert_eq!(chicken.calories, Some(300));
        assert_eq!(chicken.protein, Some(40.0));
        assert_eq!(chicken.carbs, Some(5.0));
        assert_eq!(chicken.allergens, None);
        assert_eq!(chicken.dietary_flags, Some(vec!["halal".to_string()]));
    }

    #[test]
    fn test_row_without_nutrition_has_none() {
        let day = sample_day();
        let items = day.candidates("Lunch").unwrap();
        assert!(items[1].nutrition.is_none());
        assert!(items[1].usable_nutrition().is_none());
    }

    #[test]
    fn test_empty_flag_list_is_kept() {
        let row: MenuRow = serde_json::from_str(
            r#"{"itemId": 9, "itemName": "Beef Burger", "calories": 650, "dietaryFlags": []}"#,
        )
        .unwrap();
        let burger = row.into_candidate();
        let nutrition = burger.nutrition.as_ref().unwrap();
        assert_eq!(nutrition.dietary_flags, Some(vec![]));
        assert_eq!(nutrition.allergens, None);
        assert!(nutrition.allergen_list().is_empty());
    }

    #[test]
    fn test_resolve_meal_period() {
        let day = sample_day();
        assert_eq!(day.resolve_meal_period("lunch").unwrap(), "Lunch");
        assert_eq!(day.resolve_meal_period("diner").unwrap(), "dinner");
        assert!(matches!(
            day.resolve_meal_period("breakfast"),
            Err(DiningError::MealPeriodNotFound(_))
        ));
    }

    #[test]
    fn test_empty_period_is_no_menu_data() {
        let day = sample_day();
        assert!(matches!(day.candidates("dinner"), Err(DiningError::NoMenuData)));
    }

    #[test]
    fn test_macros_sum() {
        let a = Macros { calories: 100.0, protein: 10.0, carbs: 5.0, fat: 1.0 };
        let b = Macros { calories: 50.0, protein: 2.0, carbs: 1.0, fat: 0.5 };
        let total: Macros = [a, b].into_iter().sum();
        assert_eq!(total.calories, 150.0);
        assert_eq!(total.protein, 12.0);
        assert_eq!(a.scaled(2.0).fat, 2.0);
    }
}
