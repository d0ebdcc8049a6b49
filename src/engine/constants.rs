/// Hard ceiling on items per recommendation, regardless of what the caller asks for.
pub const HARD_MAX_ITEMS: usize = 6;

/// Item count used when the caller does not specify one.
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// Candidates kept after ranking by protein density.
pub const CANDIDATE_LIMIT: usize = 18;

/// Maximum number of combinations enumerated per request.
pub const COMBINATION_CAP: usize = 2000;

/// Daily goals are split evenly across this many meals.
pub const MEALS_PER_DAY: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// Scoring weights
// ─────────────────────────────────────────────────────────────────────────────

/// Base score reward per gram of protein.
pub const PROTEIN_WEIGHT: f64 = 2.0;

/// Base score cost per calorie.
pub const CALORIE_WEIGHT: f64 = 0.05;

/// Penalty per calorie over `maxCalories`.
pub const OVER_CALORIE_PENALTY: f64 = 2.0;

/// Penalty per calorie under `minCalories`.
pub const UNDER_CALORIE_PENALTY: f64 = 1.5;

/// Penalty per gram of protein under `minProtein`.
pub const UNDER_PROTEIN_PENALTY: f64 = 4.0;

/// Penalty per gram of carbs over `maxCarbs`.
pub const OVER_CARBS_PENALTY: f64 = 1.2;

/// Penalty per gram of fat over `maxFat`.
pub const OVER_FAT_PENALTY: f64 = 1.2;

/// Adjustment per recently eaten item in a combination.
pub const RECENT_ITEM_ADJUSTMENT: f64 = -20.0;

/// Adjustment per item whose name matches a preferred ingredient.
pub const PREFERRED_ITEM_ADJUSTMENT: f64 = 8.0;

/// Cost per calorie of distance from the per-meal calorie target.
pub const TARGET_CALORIE_WEIGHT: f64 = 0.1;

/// Cost per gram of distance from the per-meal protein target.
pub const TARGET_PROTEIN_WEIGHT: f64 = 0.2;

// ─────────────────────────────────────────────────────────────────────────────
// Result text
// ─────────────────────────────────────────────────────────────────────────────

pub const EXPLANATION: &str =
    "Built a recommendation by optimizing protein density and fit to your constraints.";

pub const NO_MATCH_EXPLANATION: &str = "No matching items found for the given filters.";

pub const NO_MATCH_WARNING: &str = "No menu items with nutrition data matched the constraints.";

pub const OVER_CALORIE_WARNING: &str = "Best match exceeds your calorie cap.";

pub const UNDER_PROTEIN_WARNING: &str = "Best match is below your protein target.";
