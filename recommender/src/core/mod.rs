//! Recommender core business logic

pub mod classifier;
pub mod dedup;
pub mod fallback;
pub mod hierarchy;
pub mod history;
pub mod nearby;
pub mod prompt;

pub use classifier::{KeywordSet, MenuCategory, classify, is_disallowed_soup_upgrade, is_soup_family};
pub use dedup::dedupe;
pub use fallback::{fallback_recommendations, fallback_response};
pub use hierarchy::{MAX_RECOMMENDATIONS, correct_hierarchy};
pub use history::HistoryTracker;
pub use nearby::nearby_options;
pub use prompt::PromptBuilder;
