use crate::engine::MealTargets;
use crate::models::menu::meal_period_label;
use crate::models::{MealLog, MenuItemCandidate, RecommendationResult, UserProfile};

fn format_grams(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0}g", v),
        None => "—".to_string(),
    }
}

fn format_calories(value: Option<i64>) -> String {
    match value {
        Some(v) => format!("{} cal", v),
        None => "— cal".to_string(),
    }
}

/// One "current / target" progress line.
fn progress_line(label: &str, current: f64, target: f64, unit: &str) -> String {
    let marker = if current > target { " (over)" } else { "" };
    format!(
        "  {:<9} {:>5.0} / {:.0}{}{}",
        label, current, target, unit, marker
    )
}

/// Display a recommendation with totals, target progress and warnings.
pub fn display_recommendation(result: &RecommendationResult, targets: Option<&MealTargets>) {
    println!();
    match result.constraints.meal_period.as_deref() {
        Some(period) => println!("=== Recommended {} ===", meal_period_label(period)),
        None => println!("=== Recommended Meal ==="),
    }
    println!();

    if result.items.is_empty() {
        println!("{}", result.explanation);
    } else {
        let width = result.items.iter().map(|i| i.name.len()).max().unwrap_or(10);

        for (i, item) in result.items.iter().enumerate() {
            let n = &item.nutrition;
            println!(
                "{:>3}. {:<width$} - {:>8} | P {:>4} C {:>4} F {:>4}",
                i + 1,
                item.name,
                format_calories(n.calories),
                format_grams(n.protein),
                format_grams(n.carbs),
                format_grams(n.fat),
                width = width
            );
        }

        println!();
        println!("--- Totals ---");
        println!(
            "Calories: {:.0} | Protein: {:.0}g | Carbs: {:.0}g | Fat: {:.0}g",
            result.totals.calories, result.totals.protein, result.totals.carbs, result.totals.fat
        );

        if let Some(t) = targets {
            println!();
            println!("--- Per-meal targets ---");
            println!("{}", progress_line("Calories", result.totals.calories, t.calories, ""));
            println!("{}", progress_line("Protein", result.totals.protein, t.protein, "g"));
            println!("{}", progress_line("Carbs", result.totals.carbs, t.carbs, "g"));
            println!("{}", progress_line("Fat", result.totals.fat, t.fat, "g"));
        }

        println!();
        println!("{}", result.explanation);
    }

    for warning in &result.warnings {
        println!("Warning: {}", warning);
    }
    println!();
}

/// Display a meal period's menu items with nutrition.
pub fn display_menu(items: &[&MenuItemCandidate], title: &str) {
    if items.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, items.len());
    println!();

    for item in items {
        let course = item
            .course
            .as_deref()
            .or(item.category.as_deref())
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();

        match &item.nutrition {
            Some(n) => {
                let mut tags: Vec<&str> = n.dietary_flag_list().iter().map(String::as_str).collect();
                tags.extend(n.allergen_list().iter().map(String::as_str));
                let tags = if tags.is_empty() {
                    String::new()
                } else {
                    format!("  ({})", tags.join(", "))
                };
                println!(
                    "  #{} {}{} - {}, P:{} C:{} F:{}{}",
                    item.id,
                    item.name,
                    course,
                    format_calories(n.calories),
                    format_grams(n.protein),
                    format_grams(n.carbs),
                    format_grams(n.fat),
                    tags
                );
            }
            None => println!("  #{} {}{} - no nutrition data", item.id, item.name, course),
        }
    }

    println!();
}

/// Display the profile's daily goals.
pub fn display_goals(profile: &UserProfile) {
    let show = |label: &str, value: Option<i64>, unit: &str| match value {
        Some(v) => println!("  {:<9} {}{}", label, v, unit),
        None => println!("  {:<9} not set", label),
    };

    println!("Daily goals:");
    show("Calories", profile.daily_calories, " kcal");
    show("Protein", profile.daily_protein, "g");
    show("Carbs", profile.daily_carbs, "g");
    show("Fat", profile.daily_fat, "g");
}

/// Display logged meals, newest first.
pub fn display_history(logs: &[&MealLog]) {
    if logs.is_empty() {
        println!("No meals logged in this window.");
        return;
    }

    let mut sorted: Vec<&MealLog> = logs.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    for log in sorted {
        let hall = log
            .dining_hall
            .as_deref()
            .map(|h| format!(" @ {}", h))
            .unwrap_or_default();
        println!(
            "{} {}{} - {:.0} cal ({})",
            log.date,
            meal_period_label(&log.meal_period),
            hall,
            log.totals().calories,
            log.source
        );
        for item in &log.items {
            println!("    {} x{}", item.name, item.quantity);
        }
    }
}
