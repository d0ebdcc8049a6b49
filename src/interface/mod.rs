pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_menu_csv;
pub use prompts::{prompt_daily_goals, prompt_goal, prompt_yes_no};
pub use render::{display_goals, display_history, display_menu, display_recommendation};
