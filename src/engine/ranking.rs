use std::cmp::Ordering;

use crate::engine::filters::CandidateFilter;
use crate::models::{Macros, MenuItemCandidate, Nutrition, RecommendationItem};

/// A filtered menu item with its parsed macros and protein density.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub item: &'a MenuItemCandidate,
    pub nutrition: &'a Nutrition,
    pub macros: Macros,
    /// Protein grams per calorie; 0 when the item has no calories.
    pub density: f64,
}

impl<'a> Candidate<'a> {
    /// Wrap an item; `None` when it has no calorie data.
    pub fn new(item: &'a MenuItemCandidate) -> Option<Self> {
        let nutrition = item.usable_nutrition()?;
        let macros = nutrition.macros();
        let density = if macros.calories > 0.0 {
            macros.protein / macros.calories
        } else {
            0.0
        };

        Some(Self {
            item,
            nutrition,
            macros,
            density,
        })
    }

    /// Materialize as a single-quantity recommendation line.
    pub fn to_recommendation_item(&self) -> RecommendationItem {
        RecommendationItem {
            id: self.item.id,
            name: self.item.name.clone(),
            quantity: 1,
            nutrition: self.nutrition.clone(),
            score: self.density,
        }
    }
}

/// Descending density, then descending protein.
fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    match b.density.partial_cmp(&a.density) {
        Some(Ordering::Equal) | None => b
            .macros
            .protein
            .partial_cmp(&a.macros.protein)
            .unwrap_or(Ordering::Equal),
        Some(ord) => ord,
    }
}

/// Filter, rank by protein density and keep the top `limit` candidates.
///
/// The sort is stable, so fully tied items keep their menu order.
pub fn build_candidates<'a>(
    items: &'a [MenuItemCandidate],
    filter: &CandidateFilter,
    limit: usize,
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = items
        .iter()
        .filter(|item| filter.accepts(item))
        .filter_map(Candidate::new)
        .collect();

    candidates.sort_by(compare_candidates);
    candidates.truncate(limit);
    candidates
}
