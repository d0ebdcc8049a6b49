use crate::models::MenuItemCandidate;

/// Menu listing filters.
///
/// Looser than the recommendation filter: items without nutrition pass
/// the numeric checks, and flag/allergen checks only run when the item
/// lists flags or allergens at all. An explicit empty list still counts as
/// listed.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub search_query: String,
    pub max_calories: Option<f64>,
    pub min_protein: Option<f64>,
    pub dietary_flags: Vec<String>,
    pub exclude_allergens: Vec<String>,
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|h| h.eq_ignore_ascii_case(needle))
}

impl MenuFilter {
    pub fn is_active(&self) -> bool {
        !self.search_query.trim().is_empty()
            || self.max_calories.is_some()
            || self.min_protein.is_some()
            || !self.dietary_flags.is_empty()
            || !self.exclude_allergens.is_empty()
    }

    pub fn matches(&self, item: &MenuItemCandidate) -> bool {
        let query = self.search_query.trim().to_lowercase();
        if !query.is_empty() && !item.name.to_lowercase().contains(&query) {
            return false;
        }

        let Some(nutrition) = item.nutrition.as_ref() else {
            return true;
        };

        if let (Some(max), Some(calories)) = (self.max_calories, nutrition.calories) {
            if calories as f64 > max {
                return false;
            }
        }

        if let Some(min) = self.min_protein {
            if nutrition.protein.unwrap_or(0.0) < min {
                return false;
            }
        }

        if let Some(flags) = nutrition.dietary_flags.as_deref() {
            if !self
                .dietary_flags
                .iter()
                .all(|flag| contains_ignore_case(flags, flag))
            {
                return false;
            }
        }

        if let Some(allergens) = nutrition.allergens.as_deref() {
            if self
                .exclude_allergens
                .iter()
                .any(|allergen| contains_ignore_case(allergens, allergen))
            {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, items: &'a [MenuItemCandidate]) -> Vec<&'a MenuItemCandidate> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
