use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub image_url: String,
    pub prep_time_mins: u32,
    pub cook_time_mins: u32,
    pub rating: f32,
    pub ingredients: Vec<String>,
}

/// One ranked hit from the match engine. `unmatched_ingredients` is the
/// engine's authoritative count and is displayed unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeMatch {
    pub recipe: Recipe,
    pub unmatched_ingredients: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub values: Vec<RecipeMatch>,
    pub total_pages: u32,
    pub page_number: u32,
}

#[derive(Error, Debug)]
pub enum DinnerError {
    #[error("Network connection failed")]
    Network(#[from] reqwest::Error),

    #[error("Search engine returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("No active ingredient terms, add some before paging")]
    EmptySearch,

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
