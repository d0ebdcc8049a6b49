//! Meal recommendation search.
//!
//! Items are filtered by hard constraints, ranked by protein density and
//! truncated, then every small combination of the survivors is scored and
//! the best one wins.

pub mod combinations;
pub mod constants;
pub mod filters;
pub mod ranking;
pub mod scoring;

use std::collections::HashSet;

use tracing::debug;

use crate::models::{
    Constraints, DailyGoals, Macros, MenuItemCandidate, NormalizedConstraints,
    RecommendationResult,
};

pub use combinations::{Combinations, subset_count};
pub use constants::*;
pub use filters::CandidateFilter;
pub use ranking::{Candidate, build_candidates};
pub use scoring::{ComboScore, MealTargets, Scorer, ScoringWeights};

/// Search-space limits and scoring weights.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub candidate_limit: usize,
    pub combination_cap: usize,
    pub weights: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidate_limit: CANDIDATE_LIMIT,
            combination_cap: COMBINATION_CAP,
            weights: ScoringWeights::default(),
        }
    }
}

fn empty_result(constraints: NormalizedConstraints) -> RecommendationResult {
    RecommendationResult {
        items: Vec::new(),
        totals: Macros::default(),
        constraints,
        explanation: NO_MATCH_EXPLANATION.to_string(),
        warnings: vec![NO_MATCH_WARNING.to_string()],
    }
}

/// Recommend a meal with the default configuration.
pub fn recommend(
    items: &[MenuItemCandidate],
    constraints: &Constraints,
    daily_goals: Option<&DailyGoals>,
    recent_item_ids: &HashSet<i64>,
) -> RecommendationResult {
    recommend_with(
        &EngineConfig::default(),
        items,
        constraints,
        daily_goals,
        recent_item_ids,
    )
}

/// Recommend a meal.
///
/// Total over all inputs: when nothing survives filtering an empty result
/// with a warning is returned. Ties keep the first combination in
/// enumeration order.
pub fn recommend_with(
    config: &EngineConfig,
    items: &[MenuItemCandidate],
    constraints: &Constraints,
    daily_goals: Option<&DailyGoals>,
    recent_item_ids: &HashSet<i64>,
) -> RecommendationResult {
    let constraints = constraints.normalize();
    let filter = CandidateFilter::new(&constraints);
    let candidates = build_candidates(items, &filter, config.candidate_limit);

    debug!(
        menu_items = items.len(),
        candidates = candidates.len(),
        max_items = constraints.max_items,
        "Built recommendation candidates"
    );

    if candidates.is_empty() {
        return empty_result(constraints);
    }

    let targets = MealTargets::from_daily_goals(daily_goals);
    let scorer = Scorer::new(&constraints, &config.weights, targets, recent_item_ids);

    let mut evaluated = 0usize;
    let best = Combinations::new(candidates.len(), constraints.max_items, config.combination_cap)
        .map(|indices| {
            let combo: Vec<&Candidate> = indices.iter().map(|&i| &candidates[i]).collect();
            let scored = scorer.score(&combo);
            (indices, scored)
        })
        .fold(None::<(Vec<usize>, ComboScore)>, |best, (indices, scored)| {
            evaluated += 1;
            let improves = best
                .as_ref()
                .is_none_or(|(_, current)| scored.score > current.score);
            if improves { Some((indices, scored)) } else { best }
        });

    debug!(combinations = evaluated, "Scored combinations");

    let Some((indices, scored)) = best else {
        return empty_result(constraints);
    };

    let items = indices
        .iter()
        .map(|&i| candidates[i].to_recommendation_item())
        .collect();

    let mut warnings = Vec::new();
    if constraints
        .max_calories
        .is_some_and(|cap| scored.totals.calories > cap)
    {
        warnings.push(OVER_CALORIE_WARNING.to_string());
    }
    if constraints
        .min_protein
        .is_some_and(|min| scored.totals.protein < min)
    {
        warnings.push(UNDER_PROTEIN_WARNING.to_string());
    }

    debug!(score = scored.score, warnings = warnings.len(), "Selected best combination");

    RecommendationResult {
        items,
        totals: scored.totals,
        constraints,
        explanation: EXPLANATION.to_string(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrition;

    fn item(id: i64, calories: i64, protein: f64) -> MenuItemCandidate {
        MenuItemCandidate {
            id,
            name: format!("Dish {}", id),
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

    #[test]
    fn test_combination_cap_limits_search() {
        let items: Vec<MenuItemCandidate> = (1..=10).map(|i| item(i, 100 * i, 10.0)).collect();
        let config = EngineConfig {
            combination_cap: 1,
            ..Default::default()
        };
        let result = recommend_with(
            &config,
            &items,
            &Constraints::default(),
            None,
            &HashSet::new(),
        );
        // Only the first combination, [best-density item], is ever scored.
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].id, 1);
    }

    #[test]
    fn test_zero_cap_returns_empty_result() {
        let items = vec![item(1, 100, 10.0)];
        let config = EngineConfig {
            combination_cap: 0,
            ..Default::default()
        };
        let result = recommend_with(
            &config,
            &items,
            &Constraints::default(),
            None,
            &HashSet::new(),
        );
        assert!(result.is_empty());
        assert_eq!(result.warnings, vec![NO_MATCH_WARNING.to_string()]);
    }

    #[test]
    fn test_candidate_limit_applies() {
        let items: Vec<MenuItemCandidate> = (1..=5).map(|i| item(i, 100, 10.0 * i as f64)).collect();
        let config = EngineConfig {
            candidate_limit: 2,
            ..Default::default()
        };
        let result = recommend_with(
            &config,
            &items,
            &Constraints::default(),
            None,
            &HashSet::new(),
        );
        assert!(result.items.iter().all(|i| i.id == 5 || i.id == 4));
    }

    #[test]
    fn test_totals_match_items() {
        let items: Vec<MenuItemCandidate> = (1..=6).map(|i| item(i, 150 * i, 12.0)).collect();
        let result = recommend(&items, &Constraints::default(), None, &HashSet::new());
        let recomputed: Macros = result.items.iter().map(|i| i.totals()).sum();
        assert_eq!(recomputed, result.totals);
    }
}
