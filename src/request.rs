//! Assembling engine inputs from parsed prompts, request options, the user
//! profile and meal history.

use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::engine::constants::HARD_MAX_ITEMS;
use crate::models::{Constraints, DailyGoals, MealLog, UserProfile};

/// Default window for "recently eaten" items.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 14;

/// Options given directly with a recommendation request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub meal_period: Option<String>,
    pub max_items: Option<f64>,
    pub min_protein: Option<f64>,
    pub max_calories: Option<f64>,
    pub min_calories: Option<f64>,
    pub max_carbs: Option<f64>,
    pub max_fat: Option<f64>,
    pub dietary_flags: Vec<String>,
    pub exclude_allergens: Vec<String>,
    pub avoid_ingredients: Vec<String>,
    pub prefer_ingredients: Vec<String>,
    pub daily_goals: DailyGoals,
}

/// Trimmed, lowercased, order-preserving dedup; blanks are dropped.
pub fn unique_strings<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Round and clamp a requested item count; zero or non-finite means unset.
pub fn clamp_max_items(value: Option<f64>) -> Option<f64> {
    let value = value.filter(|v| v.is_finite() && *v != 0.0)?;
    Some(value.round().clamp(1.0, HARD_MAX_ITEMS as f64))
}

fn merge_list(parsed: &Option<Vec<String>>, request: &[String], profile: &[String]) -> Vec<String> {
    let parsed = parsed.as_deref().unwrap_or_default();
    unique_strings(parsed.iter().chain(request).chain(profile))
}

/// Combine parser output, request options and profile defaults.
///
/// Request bounds override parsed ones; list constraints are the union of
/// all three sources.
pub fn merge_constraints(
    parsed: &Constraints,
    request: &RequestOptions,
    profile: Option<&UserProfile>,
) -> Constraints {
    let empty = UserProfile::default();
    let profile = profile.unwrap_or(&empty);

    Constraints {
        min_protein: request.min_protein.or(parsed.min_protein),
        max_calories: request.max_calories.or(parsed.max_calories),
        min_calories: request.min_calories.or(parsed.min_calories),
        max_carbs: request.max_carbs.or(parsed.max_carbs),
        max_fat: request.max_fat.or(parsed.max_fat),
        max_items: clamp_max_items(clamp_max_items(request.max_items).or(parsed.max_items)),
        dietary_flags: Some(merge_list(
            &parsed.dietary_flags,
            &request.dietary_flags,
            &profile.dietary_flags,
        )),
        exclude_allergens: Some(merge_list(
            &parsed.exclude_allergens,
            &request.exclude_allergens,
            &profile.allergens,
        )),
        avoid_ingredients: Some(merge_list(
            &parsed.avoid_ingredients,
            &request.avoid_ingredients,
            &profile.excluded_ingredients,
        )),
        prefer_ingredients: Some(merge_list(
            &parsed.prefer_ingredients,
            &request.prefer_ingredients,
            &profile.preferred_ingredients,
        )),
        meal_period: request
            .meal_period
            .as_ref()
            .map(|p| p.to_lowercase())
            .or_else(|| parsed.meal_period.clone()),
    }
}

/// Profile goals take precedence field by field over request goals.
pub fn merge_daily_goals(profile: Option<&UserProfile>, request: &DailyGoals) -> DailyGoals {
    let saved = profile.map(UserProfile::daily_goals).unwrap_or_default();
    DailyGoals {
        calories: saved.calories.or(request.calories),
        protein: saved.protein.or(request.protein),
        carbs: saved.carbs.or(request.carbs),
        fat: saved.fat.or(request.fat),
    }
}

/// First day still inside a lookback window ending on `today`.
pub fn lookback_start(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Ids of menu items logged within `days` before `now`.
///
/// Entries are placed by when they were logged. Entries without a log time
/// fall back to the meal date.
pub fn recent_item_ids(logs: &[MealLog], now: DateTime<Utc>, days: u64) -> HashSet<i64> {
    let cutoff = now
        .checked_sub_days(Days::new(days))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let cutoff_date = cutoff.date_naive();

    logs.iter()
        .filter(|log| match log.logged_at {
            Some(at) => at >= cutoff,
            None => log.date >= cutoff_date,
        })
        .flat_map(|log| log.items.iter().filter_map(|item| item.menu_item_id))
        .collect()
}
