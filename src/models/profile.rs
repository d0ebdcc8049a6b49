use serde::{Deserialize, Serialize};

use crate::models::constraints::DailyGoals;
use crate::models::lenient;

/// Saved user preferences and daily goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub daily_calories: Option<i64>,

    #[serde(deserialize_with = "lenient::i64_opt")]
    pub daily_protein: Option<i64>,

    #[serde(deserialize_with = "lenient::i64_opt")]
    pub daily_carbs: Option<i64>,

    #[serde(deserialize_with = "lenient::i64_opt")]
    pub daily_fat: Option<i64>,

    #[serde(deserialize_with = "lenient::string_list_or_empty")]
    pub dietary_flags: Vec<String>,

    #[serde(deserialize_with = "lenient::string_list_or_empty")]
    pub allergens: Vec<String>,

    #[serde(deserialize_with = "lenient::string_list_or_empty")]
    pub excluded_ingredients: Vec<String>,

    #[serde(deserialize_with = "lenient::string_list_or_empty")]
    pub preferred_ingredients: Vec<String>,

    #[serde(deserialize_with = "lenient::string_list_or_empty")]
    pub preferred_cuisines: Vec<String>,

    pub notes: Option<String>,
}

impl UserProfile {
    pub fn daily_goals(&self) -> DailyGoals {
        DailyGoals {
            calories: self.daily_calories.map(|v| v as f64),
            protein: self.daily_protein.map(|v| v as f64),
            carbs: self.daily_carbs.map(|v| v as f64),
            fat: self.daily_fat.map(|v| v as f64),
        }
    }

    pub fn clear_goals(&mut self) {
        self.daily_calories = None;
        self.daily_protein = None;
        self.daily_carbs = None;
        self.daily_fat = None;
    }
}
