use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dining_recommender_rs::cli::{Cli, Command, GoalsArgs, MenuArgs, RecommendArgs};
use dining_recommender_rs::browse::MenuFilter;
use dining_recommender_rs::engine::{MealTargets, recommend};
use dining_recommender_rs::error::Result;
use dining_recommender_rs::interface::{
    display_goals, display_history, display_menu, display_recommendation, prompt_daily_goals,
    prompt_yes_no, write_menu_csv,
};
use dining_recommender_rs::models::menu::meal_period_label;
use dining_recommender_rs::models::{Constraints, DailyGoals, MealLog};
use dining_recommender_rs::request::{
    RequestOptions, lookback_start, merge_constraints, merge_daily_goals, recent_item_ids,
};
use dining_recommender_rs::state::{
    append_meal_log, load_history, load_menu, load_parsed_constraints, load_profile, save_profile,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Recommend(args) => cmd_recommend(cli, args),
        Command::Menu(args) => cmd_menu(args),
        Command::Goals(args) => cmd_goals(cli, args),
        Command::History { days } => cmd_history(cli, *days),
    }
}

fn local_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Recommend a meal for one menu and meal period.
fn cmd_recommend(cli: &Cli, args: &RecommendArgs) -> Result<()> {
    let menu = load_menu(&args.selection.menu)?;
    let period = menu.resolve_meal_period(&args.selection.period)?.to_string();
    let items = menu.candidates(&period)?;

    let profile = load_profile(cli.profile_path())?;
    let history = load_history(cli.history_path())?;
    let now = args.as_of.unwrap_or_else(chrono::Utc::now);
    let recent = recent_item_ids(&history, now, args.lookback_days);

    info!(
        items = items.len(),
        recent = recent.len(),
        period = %period,
        "Preparing recommendation"
    );

    let parsed = match &args.constraints {
        Some(path) => load_parsed_constraints(path),
        None => Constraints::default(),
    };

    let request = RequestOptions {
        meal_period: Some(period.clone()),
        max_items: args.max_items,
        min_protein: args.min_protein,
        max_calories: args.max_calories,
        min_calories: args.min_calories,
        max_carbs: args.max_carbs,
        max_fat: args.max_fat,
        dietary_flags: args.dietary_flags.clone(),
        exclude_allergens: args.exclude_allergens.clone(),
        avoid_ingredients: args.avoid_ingredients.clone(),
        prefer_ingredients: args.prefer_ingredients.clone(),
        daily_goals: DailyGoals {
            calories: args.daily_calories,
            protein: args.daily_protein,
            carbs: args.daily_carbs,
            fat: args.daily_fat,
        },
    };

    let constraints = merge_constraints(&parsed, &request, Some(&profile));
    let goals = merge_daily_goals(Some(&profile), &request.daily_goals);

    let result = recommend(&items, &constraints, Some(&goals), &recent);

    if args.json {
        let payload = serde_json::json!({
            "success": true,
            "recommendation": result,
            "source": "file",
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        let targets = MealTargets::from_daily_goals(Some(&goals));
        display_recommendation(&result, targets.as_ref());
    }

    if args.log && !result.is_empty() {
        let log = MealLog::from_recommendation(
            &result,
            menu.date,
            &period,
            Some(menu.dining_hall.name.clone()),
        )?;
        append_meal_log(cli.history_path(), log)?;
        info!(items = result.items.len(), "Logged recommended meal");
        if !args.json {
            println!("Meal logged to history.");
        }
    }

    Ok(())
}

/// List a meal period's items.
fn cmd_menu(args: &MenuArgs) -> Result<()> {
    let menu = load_menu(&args.selection.menu)?;
    let period = menu.resolve_meal_period(&args.selection.period)?.to_string();
    let items = menu.candidates(&period)?;

    let filter = MenuFilter {
        search_query: args.search.clone().unwrap_or_default(),
        max_calories: args.max_calories,
        min_protein: args.min_protein,
        dietary_flags: args.dietary_flags.clone(),
        exclude_allergens: args.exclude_allergens.clone(),
    };
    let listed = filter.apply(&items);

    let title = format!(
        "{} {} - {}",
        menu.dining_hall.name,
        menu.date,
        meal_period_label(&period)
    );
    display_menu(&listed, &title);

    if filter.is_active() {
        println!("Showing {} of {} items.", listed.len(), items.len());
    }

    if let Some(path) = &args.csv {
        write_menu_csv(&listed, path)?;
        println!("Wrote {} items to {}", listed.len(), path.display());
    }

    Ok(())
}

/// Show or update daily goals.
fn cmd_goals(cli: &Cli, args: &GoalsArgs) -> Result<()> {
    let path = cli.profile_path();
    let mut profile = load_profile(&path)?;

    if !args.has_updates() && !args.interactive {
        display_goals(&profile);
        return Ok(());
    }

    if args.clear {
        profile.clear_goals();
    }
    if let Some(v) = args.calories {
        profile.daily_calories = Some(v);
    }
    if let Some(v) = args.protein {
        profile.daily_protein = Some(v);
    }
    if let Some(v) = args.carbs {
        profile.daily_carbs = Some(v);
    }
    if let Some(v) = args.fat {
        profile.daily_fat = Some(v);
    }

    if args.interactive {
        prompt_daily_goals(&mut profile)?;
        display_goals(&profile);
        if !prompt_yes_no("Save these goals?", true)? {
            println!("Goals not saved.");
            return Ok(());
        }
    }

    save_profile(&path, &profile)?;
    info!(path = %path.display(), "Saved profile");
    if !args.interactive {
        display_goals(&profile);
    }
    println!("Goals saved.");

    Ok(())
}

/// Show meals logged within the last `days` days.
fn cmd_history(cli: &Cli, days: u64) -> Result<()> {
    let logs = load_history(cli.history_path())?;
    let today = local_today();
    let start = lookback_start(today, days);

    let window: Vec<&MealLog> = logs
        .iter()
        .filter(|log| log.date >= start && log.date <= today)
        .collect();

    display_history(&window);
    Ok(())
}
