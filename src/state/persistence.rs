use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Constraints, MealLog, MenuDay, UserProfile};

/// Load a day's menu from a JSON file.
pub fn load_menu<P: AsRef<Path>>(path: P) -> Result<MenuDay> {
    let content = fs::read_to_string(path.as_ref())?;
    let menu: MenuDay = serde_json::from_str(&content)?;
    info!(
        path = %path.as_ref().display(),
        dining_hall = %menu.dining_hall.name,
        date = %menu.date,
        periods = menu.meals.len(),
        "Loaded menu"
    );
    Ok(menu)
}

/// Read a JSON file, returning `None` when it does not exist.
fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load the user profile; a missing file yields an empty profile.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<UserProfile> {
    match read_optional(path.as_ref())? {
        Some(content) => Ok(serde_json::from_str(&content)?),
        None => {
            info!(path = %path.as_ref().display(), "No profile found, using defaults");
            Ok(UserProfile::default())
        }
    }
}

pub fn save_profile<P: AsRef<Path>>(path: P, profile: &UserProfile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load meal history; a missing file yields an empty history.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<Vec<MealLog>> {
    match read_optional(path)? {
        Some(content) => Ok(serde_json::from_str(&content)?),
        None => Ok(Vec::new()),
    }
}

pub fn save_history<P: AsRef<Path>>(path: P, logs: &[MealLog]) -> Result<()> {
    let json = serde_json::to_string_pretty(logs)?;
    fs::write(path, json)?;
    Ok(())
}

/// Append one meal to the history file, stamping the log time if unset.
pub fn append_meal_log<P: AsRef<Path>>(path: P, mut log: MealLog) -> Result<()> {
    let mut logs = load_history(path.as_ref())?;
    log.logged_at.get_or_insert_with(Utc::now);
    logs.push(log);
    save_history(path, &logs)
}

/// Load prompt-parser output.
///
/// Never fails: an unreadable or malformed file falls back to empty
/// constraints, matching how a failed parse is treated.
pub fn load_parsed_constraints<P: AsRef<Path>>(path: P) -> Constraints {
    let path = path.as_ref();
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<serde_json::Value>(&content).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(value) => Constraints::from_parser_output(&value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read parsed constraints, using defaults");
            Constraints::default()
        }
    }
}
