use serde::{Deserialize, Serialize};

use crate::models::constraints::NormalizedConstraints;
use crate::models::menu::{Macros, Nutrition};

/// One dish in a recommended meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: i64,
    pub name: String,
    /// Always 1 for engine output.
    pub quantity: u32,
    /// Snapshot of the item's nutrition; calories are always present.
    pub nutrition: Nutrition,
    /// Protein per calorie, used only to rank candidates.
    pub score: f64,
}

impl RecommendationItem {
    /// Nutrition totals contributed by this line, scaled by quantity.
    pub fn totals(&self) -> Macros {
        self.nutrition.macros().scaled(self.quantity as f64)
    }
}

/// The engine's answer for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub items: Vec<RecommendationItem>,
    pub totals: Macros,
    pub constraints: NormalizedConstraints,
    pub explanation: String,
    pub warnings: Vec<String>,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
