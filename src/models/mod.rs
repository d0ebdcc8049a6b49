pub mod constraints;
pub mod history;
pub mod lenient;
pub mod menu;
pub mod profile;
pub mod recommendation;

pub use constraints::{Constraints, DailyGoals, NormalizedConstraints};
pub use history::{MealLog, MealLogItem};
pub use menu::{Macros, MenuDay, MenuItemCandidate, MenuRow, Nutrition};
pub use profile::UserProfile;
pub use recommendation::{RecommendationItem, RecommendationResult};
