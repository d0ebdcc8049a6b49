use crate::models::{MenuItemCandidate, NormalizedConstraints};

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

/// True when `name` contains any of the (already lowercased) terms.
pub fn name_contains_any(name: &str, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }
    let name = name.to_lowercase();
    terms.iter().any(|term| name.contains(term.as_str()))
}

/// Inclusion filter applied before any ranking or search.
///
/// Terms are lowercased once up front so every comparison is case-insensitive.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    dietary_flags: Vec<String>,
    exclude_allergens: Vec<String>,
    avoid_ingredients: Vec<String>,
}

impl CandidateFilter {
    pub fn new(constraints: &NormalizedConstraints) -> Self {
        Self {
            dietary_flags: lowercase_all(&constraints.dietary_flags),
            exclude_allergens: lowercase_all(&constraints.exclude_allergens),
            avoid_ingredients: lowercase_all(&constraints.avoid_ingredients),
        }
    }

    /// Item carries every required dietary flag.
    pub fn matches_dietary_flags(&self, flags: &[String]) -> bool {
        if self.dietary_flags.is_empty() {
            return true;
        }
        let item_flags = lowercase_all(flags);
        self.dietary_flags.iter().all(|flag| item_flags.contains(flag))
    }

    /// Item carries at least one excluded allergen.
    pub fn has_excluded_allergen(&self, allergens: &[String]) -> bool {
        if self.exclude_allergens.is_empty() {
            return false;
        }
        let item_allergens = lowercase_all(allergens);
        self.exclude_allergens
            .iter()
            .any(|allergen| item_allergens.contains(allergen))
    }

    pub fn accepts(&self, item: &MenuItemCandidate) -> bool {
        let Some(nutrition) = item.usable_nutrition() else {
            return false;
        };

        self.matches_dietary_flags(nutrition.dietary_flag_list())
            && !self.has_excluded_allergen(nutrition.allergen_list())
            && !name_contains_any(&item.name, &self.avoid_ingredients)
    }
}
