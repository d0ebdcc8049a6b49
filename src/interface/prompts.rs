use dialoguer::{Confirm, Input};

use crate::error::{DiningError, Result};
use crate::models::UserProfile;

/// Prompt for an optional whole-number goal. Empty input clears it.
pub fn prompt_goal(label: &str, unit: &str, current: Option<i64>) -> Result<Option<i64>> {
    let input: String = Input::new()
        .with_prompt(format!("Daily {} goal ({}), blank to clear", label, unit))
        .default(current.map(|v| v.to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let value: f64 = input
        .parse()
        .map_err(|_| DiningError::InvalidInput(format!("Invalid number: {}", input)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(DiningError::InvalidInput(format!(
            "{} goal must be a non-negative number",
            label
        )));
    }

    Ok(Some(value.round() as i64))
}

/// Walk through all four daily goals, updating the profile in place.
pub fn prompt_daily_goals(profile: &mut UserProfile) -> Result<()> {
    profile.daily_calories = prompt_goal("calories", "kcal", profile.daily_calories)?;
    profile.daily_protein = prompt_goal("protein", "g", profile.daily_protein)?;
    profile.daily_carbs = prompt_goal("carbs", "g", profile.daily_carbs)?;
    profile.daily_fat = prompt_goal("fat", "g", profile.daily_fat)?;
    Ok(())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
