use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DiningError, Result};
use crate::models::menu::Macros;
use crate::models::recommendation::RecommendationResult;

/// Source tag for meals logged straight from a recommendation.
pub const SOURCE_RECOMMENDATION: &str = "recommendation";

fn default_source() -> String {
    "manual".to_string()
}

fn default_quantity() -> u32 {
    1
}

/// One dish eaten as part of a logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLogItem {
    #[serde(default)]
    pub menu_item_id: Option<i64>,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
}

impl MealLogItem {
    pub fn totals(&self) -> Macros {
        Macros {
            calories: self.calories.unwrap_or(0) as f64,
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fat: self.fat.unwrap_or(0.0),
        }
        .scaled(self.quantity as f64)
    }
}

/// A meal the user ate, as stored in the history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub date: NaiveDate,
    pub meal_period: String,
    #[serde(default)]
    pub dining_hall: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// When the entry was written; set when appended to the history file.
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
    pub items: Vec<MealLogItem>,
}

impl MealLog {
    /// Validate and build a log entry. Quantities below 1 are raised to 1.
    pub fn new(
        date: NaiveDate,
        meal_period: &str,
        dining_hall: Option<String>,
        source: &str,
        items: Vec<MealLogItem>,
    ) -> Result<Self> {
        if meal_period.trim().is_empty() || items.is_empty() {
            return Err(DiningError::InvalidInput(
                "date, mealPeriod, and items are required".to_string(),
            ));
        }

        let items = items
            .into_iter()
            .map(|mut item| {
                item.quantity = item.quantity.max(1);
                item
            })
            .collect();

        Ok(Self {
            date,
            meal_period: meal_period.to_string(),
            dining_hall,
            source: source.to_string(),
            notes: None,
            logged_at: None,
            items,
        })
    }

    /// Log entry for the items of a recommendation.
    pub fn from_recommendation(
        result: &RecommendationResult,
        date: NaiveDate,
        meal_period: &str,
        dining_hall: Option<String>,
    ) -> Result<Self> {
        let items = result
            .items
            .iter()
            .map(|item| MealLogItem {
                menu_item_id: Some(item.id),
                name: item.name.clone(),
                quantity: item.quantity,
                calories: item.nutrition.calories,
                protein: item.nutrition.protein,
                carbs: item.nutrition.carbs,
                fat: item.nutrition.fat,
            })
            .collect();

        Self::new(date, meal_period, dining_hall, SOURCE_RECOMMENDATION, items)
    }

    pub fn totals(&self) -> Macros {
        self.items.iter().map(MealLogItem::totals).sum()
    }
}
