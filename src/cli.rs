use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::request::DEFAULT_LOOKBACK_DAYS;

/// Profile file name inside the data directory.
pub const PROFILE_FILE: &str = "profile.json";

/// Meal history file name inside the data directory.
pub const HISTORY_FILE: &str = "meal_history.json";

/// Dining recommender: browse a day's dining menu and get meal recommendations.
#[derive(Parser, Debug)]
#[command(name = "dining-recommender")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding profile.json and meal_history.json.
    #[arg(long, global = true, env = "DINING_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }
}

/// Menu file and meal period selection shared by several commands.
#[derive(Args, Debug)]
pub struct MenuSelection {
    /// Path to the day's menu JSON file.
    #[arg(short, long)]
    pub menu: PathBuf,

    /// Meal period (breakfast, lunch, dinner, ...). Close spellings are accepted.
    #[arg(short, long)]
    pub period: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend a meal from a menu.
    Recommend(RecommendArgs),

    /// List a meal period's items, optionally filtered or exported to CSV.
    Menu(MenuArgs),

    /// Show or set daily nutrition goals.
    Goals(GoalsArgs),

    /// Show recently logged meals.
    History {
        /// Days to look back.
        #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
        days: u64,
    },
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub selection: MenuSelection,

    /// JSON constraints produced by the prompt parser.
    #[arg(long)]
    pub constraints: Option<PathBuf>,

    /// Maximum number of items (clamped to 1..=6).
    #[arg(long)]
    pub max_items: Option<f64>,

    #[arg(long)]
    pub min_protein: Option<f64>,

    #[arg(long)]
    pub max_calories: Option<f64>,

    #[arg(long)]
    pub min_calories: Option<f64>,

    #[arg(long)]
    pub max_carbs: Option<f64>,

    #[arg(long)]
    pub max_fat: Option<f64>,

    /// Required dietary flag (repeatable).
    #[arg(long = "diet")]
    pub dietary_flags: Vec<String>,

    /// Allergen to exclude (repeatable).
    #[arg(long = "exclude-allergen")]
    pub exclude_allergens: Vec<String>,

    /// Skip items whose name contains this term (repeatable).
    #[arg(long = "avoid")]
    pub avoid_ingredients: Vec<String>,

    /// Favor items whose name contains this term (repeatable).
    #[arg(long = "prefer")]
    pub prefer_ingredients: Vec<String>,

    /// Daily calorie goal, used when the profile has none.
    #[arg(long)]
    pub daily_calories: Option<f64>,

    #[arg(long)]
    pub daily_protein: Option<f64>,

    #[arg(long)]
    pub daily_carbs: Option<f64>,

    #[arg(long)]
    pub daily_fat: Option<f64>,

    /// Days of meal history that count as "recent".
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub lookback_days: u64,

    /// Reference time for the history window, RFC 3339 (defaults to now).
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Append the recommended meal to the history file.
    #[arg(long)]
    pub log: bool,
}

#[derive(Args, Debug)]
pub struct MenuArgs {
    #[command(flatten)]
    pub selection: MenuSelection,

    /// Only items whose name contains this text.
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub max_calories: Option<f64>,

    #[arg(long)]
    pub min_protein: Option<f64>,

    /// Required dietary flag (repeatable).
    #[arg(long = "diet")]
    pub dietary_flags: Vec<String>,

    /// Allergen to exclude (repeatable).
    #[arg(long = "exclude-allergen")]
    pub exclude_allergens: Vec<String>,

    /// Write the listed items to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GoalsArgs {
    #[arg(long)]
    pub calories: Option<i64>,

    #[arg(long)]
    pub protein: Option<i64>,

    #[arg(long)]
    pub carbs: Option<i64>,

    #[arg(long)]
    pub fat: Option<i64>,

    /// Clear all daily goals.
    #[arg(long)]
    pub clear: bool,

    /// Prompt for each goal interactively.
    #[arg(short, long)]
    pub interactive: bool,
}

impl GoalsArgs {
    pub fn has_updates(&self) -> bool {
        self.clear
            || self.calories.is_some()
            || self.protein.is_some()
            || self.carbs.is_some()
            || self.fat.is_some()
    }
}
