mod persistence;

pub use persistence::{
    append_meal_log, load_history, load_menu, load_parsed_constraints, load_profile,
    save_history, save_profile,
};
