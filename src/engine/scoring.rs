use std::collections::HashSet;

use crate::engine::constants::*;
use crate::engine::filters::name_contains_any;
use crate::engine::ranking::Candidate;
use crate::models::{DailyGoals, Macros, NormalizedConstraints};

/// Weights used to score a combination. Defaults come from `constants`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    pub protein: f64,
    pub calorie: f64,
    pub over_calories: f64,
    pub under_calories: f64,
    pub under_protein: f64,
    pub over_carbs: f64,
    pub over_fat: f64,
    pub recent_item: f64,
    pub preferred_item: f64,
    pub target_calories: f64,
    pub target_protein: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            protein: PROTEIN_WEIGHT,
            calorie: CALORIE_WEIGHT,
            over_calories: OVER_CALORIE_PENALTY,
            under_calories: UNDER_CALORIE_PENALTY,
            under_protein: UNDER_PROTEIN_PENALTY,
            over_carbs: OVER_CARBS_PENALTY,
            over_fat: OVER_FAT_PENALTY,
            recent_item: RECENT_ITEM_ADJUSTMENT,
            preferred_item: PREFERRED_ITEM_ADJUSTMENT,
            target_calories: TARGET_CALORIE_WEIGHT,
            target_protein: TARGET_PROTEIN_WEIGHT,
        }
    }
}

/// Per-meal share of the daily goals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealTargets {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MealTargets {
    /// Split daily goals across meals.
    ///
    /// `None` when no goal is set at all. Otherwise a missing goal becomes a
    /// target of 0, which still pulls the proximity term toward zero.
    pub fn from_daily_goals(goals: Option<&DailyGoals>) -> Option<Self> {
        let goals = goals.filter(|g| !g.is_unset())?;
        Some(Self {
            calories: goals.calories.unwrap_or(0.0) / MEALS_PER_DAY,
            protein: goals.protein.unwrap_or(0.0) / MEALS_PER_DAY,
            carbs: goals.carbs.unwrap_or(0.0) / MEALS_PER_DAY,
            fat: goals.fat.unwrap_or(0.0) / MEALS_PER_DAY,
        })
    }
}

/// Score and totals for one combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboScore {
    pub score: f64,
    pub totals: Macros,
}

fn excess(value: f64, bound: Option<f64>) -> f64 {
    bound.map_or(0.0, |b| (value - b).max(0.0))
}

fn deficit(value: f64, bound: Option<f64>) -> f64 {
    bound.map_or(0.0, |b| (b - value).max(0.0))
}

/// Everything needed to score combinations for one request.
#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    constraints: &'a NormalizedConstraints,
    weights: &'a ScoringWeights,
    targets: Option<MealTargets>,
    recent_item_ids: &'a HashSet<i64>,
    prefer_terms: Vec<String>,
}

impl<'a> Scorer<'a> {
    pub fn new(
        constraints: &'a NormalizedConstraints,
        weights: &'a ScoringWeights,
        targets: Option<MealTargets>,
        recent_item_ids: &'a HashSet<i64>,
    ) -> Self {
        let prefer_terms = constraints
            .prefer_ingredients
            .iter()
            .map(|t| t.to_lowercase())
            .collect();

        Self {
            constraints,
            weights,
            targets,
            recent_item_ids,
            prefer_terms,
        }
    }

    /// Penalty for violated bounds; unset bounds never penalize.
    pub fn penalty(&self, totals: &Macros) -> f64 {
        let c = self.constraints;
        let w = self.weights;

        excess(totals.calories, c.max_calories) * w.over_calories
            + deficit(totals.calories, c.min_calories) * w.under_calories
            + deficit(totals.protein, c.min_protein) * w.under_protein
            + excess(totals.carbs, c.max_carbs) * w.over_carbs
            + excess(totals.fat, c.max_fat) * w.over_fat
    }

    /// Per-item adjustments for repeats and preferred ingredients.
    pub fn preference_adjustment(&self, combo: &[&Candidate]) -> f64 {
        combo
            .iter()
            .map(|candidate| {
                let mut adjustment = 0.0;
                if self.recent_item_ids.contains(&candidate.item.id) {
                    adjustment += self.weights.recent_item;
                }
                if name_contains_any(&candidate.item.name, &self.prefer_terms) {
                    adjustment += self.weights.preferred_item;
                }
                adjustment
            })
            .sum()
    }

    pub fn target_adjustment(&self, totals: &Macros) -> f64 {
        match self.targets {
            Some(targets) => {
                -(totals.calories - targets.calories).abs() * self.weights.target_calories
                    - (totals.protein - targets.protein).abs() * self.weights.target_protein
            }
            None => 0.0,
        }
    }

    pub fn base_score(&self, totals: &Macros) -> f64 {
        totals.protein * self.weights.protein - totals.calories * self.weights.calorie
    }

    pub fn score(&self, combo: &[&Candidate]) -> ComboScore {
        // Quantity is always 1 inside a combination.
        let totals: Macros = combo.iter().map(|c| c.macros).sum();

        let score = self.base_score(&totals) + self.target_adjustment(&totals)
            + self.preference_adjustment(combo)
            - self.penalty(&totals);

        ComboScore { score, totals }
    }
}
