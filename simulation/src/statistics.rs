//! Style popularity across stored sessions

use serde::{Deserialize, Serialize};

pub const NO_SESSIONS_MESSAGE: &str = "No dance sessions found";

/// How often a style has been danced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleUsage {
    pub style: String,
    pub usage_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DancePreferences {
    pub most_popular: Option<StyleUsage>,
    pub least_popular: Option<StyleUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DancePreferences {
    /// Pick the most and least danced styles.
    ///
    /// Ties keep the order they arrived in.
    pub fn from_usage(mut usage: Vec<StyleUsage>) -> Self {
        usage.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));

        match (usage.first(), usage.last()) {
            (Some(most), Some(least)) => Self {
                most_popular: Some(most.clone()),
                least_popular: Some(least.clone()),
                message: None,
            },
            _ => Self {
                most_popular: None,
                least_popular: None,
                message: Some(NO_SESSIONS_MESSAGE.to_string()),
            },
        }
    }
}
