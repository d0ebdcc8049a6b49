pub mod browse;
pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod request;
pub mod state;

pub use engine::{EngineConfig, recommend, recommend_with};
pub use error::{DiningError, Result};
pub use models::{Constraints, DailyGoals, MenuItemCandidate, RecommendationResult};
